//! Storage implementations for orders and persisted UI state

pub mod in_memory;
pub mod kv;
pub mod theme;

pub use in_memory::InMemoryOrderStore;
pub use kv::{FileKeyValueStorage, InMemoryKeyValueStorage, KeyValueStorage};
pub use theme::{THEME_STORAGE_KEY, THEME_STORAGE_VERSION, ThemeStore};
