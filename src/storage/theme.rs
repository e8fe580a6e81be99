//! Persisted light/dark theme flag

use crate::core::error::{DashboardResult, StorageError};
use crate::config::ThemeConfig;
use crate::storage::kv::{FileKeyValueStorage, InMemoryKeyValueStorage, KeyValueStorage};
use serde::{Deserialize, Serialize};

/// Default storage key for the theme envelope
pub const THEME_STORAGE_KEY: &str = "theme-storage";

/// Envelope version written alongside the state
pub const THEME_STORAGE_VERSION: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct ThemeState {
    #[serde(rename = "isDark")]
    is_dark: bool,
}

/// `{"state":{"isDark":true},"version":0}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedTheme {
    state: ThemeState,
    version: u32,
}

/// The theme flag, written through to storage on every change
#[derive(Debug, Clone)]
pub struct ThemeStore<S> {
    storage: S,
    key: String,
    is_dark: bool,
}

impl ThemeStore<Box<dyn KeyValueStorage>> {
    /// Open the storage named by `config` and read the flag from it
    pub fn from_config(config: &ThemeConfig) -> DashboardResult<Self> {
        let storage: Box<dyn KeyValueStorage> = match &config.storage_path {
            Some(path) => Box::new(FileKeyValueStorage::new(path)),
            None => Box::new(InMemoryKeyValueStorage::new()),
        };
        Self::hydrate_with_key(storage, config.key.clone())
    }
}

impl<S: KeyValueStorage> ThemeStore<S> {
    /// Read the flag stored under [`THEME_STORAGE_KEY`]
    pub fn hydrate(storage: S) -> DashboardResult<Self> {
        Self::hydrate_with_key(storage, THEME_STORAGE_KEY)
    }

    /// Read the flag stored under `key`
    ///
    /// A missing value starts in light mode. A value that does not decode, or
    /// carries another envelope version, is ignored with a warning and also
    /// starts in light mode; it is overwritten on the next change. Failures of
    /// the storage itself are returned.
    pub fn hydrate_with_key(storage: S, key: impl Into<String>) -> DashboardResult<Self> {
        let key = key.into();
        let is_dark = match storage.get_item(&key)? {
            None => false,
            Some(raw) => match serde_json::from_str::<PersistedTheme>(&raw) {
                Ok(persisted) if persisted.version == THEME_STORAGE_VERSION => {
                    persisted.state.is_dark
                }
                Ok(persisted) => {
                    tracing::warn!(
                        key = %key,
                        version = persisted.version,
                        "ignoring theme stored with unknown version"
                    );
                    false
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "ignoring corrupt stored theme");
                    false
                }
            },
        };

        tracing::info!(key = %key, is_dark, "hydrated theme");
        Ok(Self {
            storage,
            key,
            is_dark,
        })
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Flip the flag and return the new value
    pub fn toggle(&mut self) -> DashboardResult<bool> {
        self.set_dark(!self.is_dark)?;
        Ok(self.is_dark)
    }

    pub fn set_dark(&mut self, is_dark: bool) -> DashboardResult<()> {
        let envelope = PersistedTheme {
            state: ThemeState { is_dark },
            version: THEME_STORAGE_VERSION,
        };
        let raw = serde_json::to_string(&envelope).map_err(StorageError::Corrupt)?;
        self.storage.set_item(&self.key, &raw)?;
        self.is_dark = is_dark;

        tracing::debug!(key = %self.key, is_dark, "persisted theme");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
