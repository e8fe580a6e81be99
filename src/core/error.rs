//! Typed error handling for the dashboard engine
//!
//! The query pipeline, paginator and chart shapers are total functions and
//! never fail. Errors only come from the edges of the crate:
//!
//! - [`DashboardError::Config`]: configuration parsing and validation
//! - [`DashboardError::Dataset`]: bundled or user supplied seed data
//! - [`DashboardError::Storage`]: the key/value store behind the theme flag
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! match ThemeStore::hydrate(storage) {
//!     Ok(theme) => println!("dark = {}", theme.is_dark()),
//!     Err(DashboardError::Storage(StorageError::Io { key, .. })) => {
//!         eprintln!("could not read '{}'", key);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Result alias used across the crate's fallible edges
pub type DashboardResult<T> = std::result::Result<T, DashboardError>;

/// The main error type for the dashboard engine
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Seed dataset errors
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Key/value storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DashboardError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Config(e) => e.error_code(),
            DashboardError::Dataset(_) => "DATASET_ERROR",
            DashboardError::Storage(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration parsing and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The YAML document is malformed
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "CONFIG_READ_ERROR",
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
            ConfigError::Invalid(_) => "CONFIG_INVALID",
        }
    }
}

// =============================================================================
// Dataset Errors
// =============================================================================

/// Errors raised while loading order records
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("failed to read dataset file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be parsed
    #[error("failed to parse {dataset} dataset: {message}")]
    Parse { dataset: String, message: String },

    /// Two records share an identifier
    #[error("duplicate order id '{id}' in {dataset} dataset")]
    DuplicateId { dataset: String, id: String },
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a [`KeyValueStorage`](crate::storage::KeyValueStorage)
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing document is not a JSON object
    #[error("storage document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The lock guarding the storage was poisoned
    #[error("storage lock poisoned: {0}")]
    Poisoned(String),
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Io { .. } => "STORAGE_IO_ERROR",
            StorageError::Corrupt(_) => "STORAGE_CORRUPT",
            StorageError::Poisoned(_) => "STORAGE_POISONED",
        }
    }
}
