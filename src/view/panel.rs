//! Right-hand notifications, activities and contacts panel

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    /// "Just now", "12 hours ago", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// An activity plus whether the timeline connector is drawn below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRow<'a> {
    #[serde(flatten)]
    pub item: &'a ActivityItem,
    pub connector: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RightPanel {
    pub notifications: Vec<NotificationItem>,
    pub activities: Vec<ActivityItem>,
    pub contacts: Vec<ContactItem>,
}

impl RightPanel {
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| n.unread).count()
    }

    /// Every activity but the last is joined to the next by a connector
    pub fn activity_rows(&self) -> Vec<ActivityRow<'_>> {
        let last = self.activities.len().saturating_sub(1);
        self.activities
            .iter()
            .enumerate()
            .map(|(i, item)| ActivityRow {
                item,
                connector: i < last,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_count() {
        let panel = crate::data::right_panel().unwrap();
        assert_eq!(panel.unread_count(), 2);
    }

    #[test]
    fn test_last_activity_has_no_connector() {
        let panel = crate::data::right_panel().unwrap();
        let rows = panel.activity_rows();
        assert_eq!(rows.len(), 5);
        assert!(rows[..4].iter().all(|r| r.connector));
        assert!(!rows[4].connector);
    }

    #[test]
    fn test_empty_panel() {
        let panel = RightPanel::default();
        assert!(panel.activity_rows().is_empty());
        assert_eq!(panel.unread_count(), 0);
    }
}
