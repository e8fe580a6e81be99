//! Configuration loading and management

use crate::core::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

/// Where the theme flag is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ThemeConfig {
    /// Storage key holding the theme envelope
    #[validate(length(min = 1))]
    pub key: String,

    /// JSON file backing the key/value store; in-memory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            key: crate::storage::THEME_STORAGE_KEY.to_string(),
            storage_path: None,
        }
    }
}

/// Complete configuration for a dashboard session
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    /// Orders per page
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,

    /// Page buttons shown either side of the current page
    #[validate(range(max = 5))]
    pub pagination_neighbors: usize,

    /// Quiet period before a search keystroke is committed
    #[validate(range(max = 10000))]
    pub search_debounce_ms: u64,

    /// Jump back to page 1 whenever a filter changes
    pub reset_page_on_filter_change: bool,

    /// Month index where the revenue chart's current series turns dashed
    #[validate(range(min = 1))]
    pub revenue_split_index: usize,

    #[validate(nested)]
    pub theme: ThemeConfig,

    /// Orders dataset to load instead of the bundled seed (JSON or YAML)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            pagination_neighbors: 1,
            search_debounce_ms: 300,
            reset_page_on_filter_change: false,
            revenue_split_index: crate::charts::revenue::DEFAULT_SPLIT_INDEX,
            theme: ThemeConfig::default(),
            orders_path: None,
        }
    }
}

impl DashboardConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("invalid dashboard config in {}", path.display()))?;

        tracing::info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    /// Load and validate configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::Parse)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();

        assert_eq!(config.page_size, 5);
        assert_eq!(config.pagination_neighbors, 1);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.theme.key, "theme-storage");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DashboardConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = DashboardConfig::from_yaml_str(
            "page_size: 10\nreset_page_on_filter_change: true\ntheme:\n  storage_path: /tmp/theme.json\n",
        )
        .unwrap();

        assert_eq!(config.page_size, 10);
        assert!(config.reset_page_on_filter_change);
        assert_eq!(config.pagination_neighbors, 1);
        assert_eq!(config.theme.key, "theme-storage");
        assert_eq!(
            config.theme.storage_path.as_deref(),
            Some(Path::new("/tmp/theme.json"))
        );
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        for yaml in [
            "page_size: 0",
            "page_size: 101",
            "pagination_neighbors: 6",
            "search_debounce_ms: 10001",
            "revenue_split_index: 0",
            "theme:\n  key: ''",
        ] {
            let err = DashboardConfig::from_yaml_str(yaml).unwrap_err();
            assert!(
                matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Invalid(_))),
                "{yaml} should fail validation, got {err}"
            );
        }
    }

    #[test]
    fn test_yaml_serialization() {
        let config = DashboardConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = DashboardConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file() {
        let err = DashboardConfig::from_yaml_file("/nonexistent/dashboard.yaml").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Read { .. })
        ));
    }
}
