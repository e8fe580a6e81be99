//! Sidebar navigation and submenu state

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Icon name, resolved by the renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl LinkItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some("#".to_string()),
            icon: None,
            active: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    /// Link target, `#` when none is set
    pub fn target(&self) -> &str {
        self.href.as_deref().unwrap_or("#")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavItem {
    Link(LinkItem),
    Submenu {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        children: Vec<LinkItem>,
    },
}

impl NavItem {
    pub fn label(&self) -> &str {
        match self {
            NavItem::Link(link) => &link.label,
            NavItem::Submenu { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    pub items: Vec<NavItem>,
}

impl NavSection {
    /// Favorites sections carry a "Recent" heading and dot markers
    pub fn is_favorites(&self) -> bool {
        self.title.to_lowercase().contains("favorites")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadge {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarData {
    pub user: UserBadge,
    pub sections: Vec<NavSection>,
}

/// Sidebar content plus which submenus are expanded
///
/// Open state is keyed by submenu label; two submenus sharing a label open
/// and close together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarState {
    pub data: SidebarData,
    open: IndexMap<String, bool>,
}

impl SidebarState {
    pub fn new(data: SidebarData) -> Self {
        Self {
            data,
            open: IndexMap::new(),
        }
    }

    /// Flip a submenu and return its new state
    pub fn toggle_submenu(&mut self, label: &str) -> bool {
        let entry = self.open.entry(label.to_string()).or_insert(false);
        *entry = !*entry;
        tracing::debug!(label, open = *entry, "toggled sidebar submenu");
        *entry
    }

    pub fn is_open(&self, label: &str) -> bool {
        self.open.get(label).copied().unwrap_or(false)
    }

    /// Labels of expanded submenus, in the order they were first toggled
    pub fn open_submenus(&self) -> impl Iterator<Item = &str> {
        self.open
            .iter()
            .filter(|(_, open)| **open)
            .map(|(label, _)| label.as_str())
    }

    /// Children to render under a submenu; empty while collapsed
    pub fn visible_children(&self, label: &str) -> &[LinkItem] {
        if !self.is_open(label) {
            return &[];
        }
        self.data
            .sections
            .iter()
            .flat_map(|section| section.items.iter())
            .find_map(|item| match item {
                NavItem::Submenu {
                    label: l, children, ..
                } if l == label => Some(children.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// The highlighted link, if any
    pub fn active_link(&self) -> Option<&LinkItem> {
        self.data
            .sections
            .iter()
            .flat_map(|section| section.items.iter())
            .find_map(|item| match item {
                NavItem::Link(link) if link.active => Some(link),
                _ => None,
            })
    }
}
