//! Error types for settings and watch-list loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors.
///
/// The binary never lets these abort a run: they are logged and the run
/// continues with empty settings or an empty watch list.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Document has the wrong shape
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
