//! String key/value storage backends

use crate::core::error::{DashboardResult, StorageError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

/// Synchronous string key/value store
///
/// Implementations must be safe to share across threads.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>>;

    /// Insert or replace a value
    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()>;

    /// Delete a value; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> DashboardResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> DashboardResult<()> {
        (**self).remove_item(key)
    }
}

/// Process-local storage, lost on exit
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for InMemoryKeyValueStorage {
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|e| StorageError::Poisoned(format!("failed to acquire read lock: {}", e)))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StorageError::Poisoned(format!("failed to acquire write lock: {}", e)))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> DashboardResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StorageError::Poisoned(format!("failed to acquire write lock: {}", e)))?;
        items.remove(key);
        Ok(())
    }
}

/// Storage persisted as a single JSON object of string values
///
/// A missing file reads as empty and is created on the first write. The
/// whole document is rewritten on every change.
#[derive(Debug)]
pub struct FileKeyValueStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self, key: &str) -> DashboardResult<Map<String, Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                }
                .into());
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        let document: Map<String, Value> =
            serde_json::from_str(&content).map_err(StorageError::Corrupt)?;
        Ok(document)
    }

    fn store(&self, key: &str, document: &Map<String, Value>) -> DashboardResult<()> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(document).map_err(StorageError::Corrupt)?;
        std::fs::write(&self.path, content).map_err(io_err)?;
        Ok(())
    }

    fn update(&self, key: &str, apply: impl FnOnce(&mut Map<String, Value>)) -> DashboardResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Poisoned(format!("failed to acquire file lock: {}", e)))?;

        let mut document = self.load(key)?;
        apply(&mut document);
        self.store(key, &document)
    }
}

impl KeyValueStorage for FileKeyValueStorage {
    fn get_item(&self, key: &str) -> DashboardResult<Option<String>> {
        let document = self.load(key)?;
        Ok(document.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set_item(&self, key: &str, value: &str) -> DashboardResult<()> {
        self.update(key, |document| {
            document.insert(key.to_string(), Value::String(value.to_string()));
        })?;
        tracing::debug!(key, path = %self.path.display(), "persisted storage item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> DashboardResult<()> {
        self.update(key, |document| {
            document.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(storage: &dyn KeyValueStorage) {
        assert_eq!(storage.get_item("a").unwrap(), None);

        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "two").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));

        storage.set_item("a", "3").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("3"));

        storage.remove_item("a").unwrap();
        storage.remove_item("a").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
        assert_eq!(storage.get_item("b").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_in_memory_storage() {
        exercise(&InMemoryKeyValueStorage::new());
    }

    #[test]
    fn test_in_memory_clones_share_state() {
        let storage = InMemoryKeyValueStorage::new();
        let other = storage.clone();
        storage.set_item("k", "v").unwrap();
        assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileKeyValueStorage::new(dir.path().join("nested/store.json")));
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        FileKeyValueStorage::new(&path).set_item("k", "v").unwrap();
        let reopened = FileKeyValueStorage::new(&path);
        assert_eq!(reopened.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = FileKeyValueStorage::new(&path).get_item("k").unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_CORRUPT");
    }

    #[test]
    fn test_non_string_values_read_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"k": {"nested": true}}"#).unwrap();

        let value = FileKeyValueStorage::new(&path).get_item("k").unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"nested":true}"#));
    }
}
