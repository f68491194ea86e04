//! Error types for the API

use thiserror::Error;

/// Error type for option construction and loading.
///
/// Formatting itself never fails; only building a [`RuleOptions`](crate::RuleOptions)
/// can.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid option value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No preset registered under this name
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Malformed TOML options
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Malformed JSON options
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Options file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, Error>;
