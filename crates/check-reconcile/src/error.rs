//! Error types for check-reconcile
//!
//! Reconciliation itself only fails with [`FetchError`](crate::FetchError);
//! these errors cover configuration and logging setup.

use std::path::PathBuf;

/// Result type for check-reconcile operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in check-reconcile operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file could not be read
    #[error("Failed to read configuration at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML deserialization error, including invalid policy paths
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// Tracing subscriber could not be installed
    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },
}
