//! Error types for accel-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using accel-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in accel-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file exists but is not a valid settings document
    #[error("Malformed settings at {}: {source}", .path.display())]
    MalformedSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No settings location could be resolved on this host
    #[error("Settings store is unavailable")]
    StoreUnavailable,
}

impl Error {
    /// Whether this error came from unreadable settings content rather than I/O.
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedSettings { .. })
    }
}
