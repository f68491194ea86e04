//! Error handling for the CLI application

use std::fmt;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Input file missing or inaccessible
    FileNotFound(String),
    /// Malformed glob pattern
    InvalidPattern(String),
    /// Unreadable or invalid configuration
    ConfigError(String),
    /// Formatting could not be carried out
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<typograph_core::Error> for CliError {
    fn from(error: typograph_core::Error) -> Self {
        match error {
            typograph_core::Error::Configuration(msg) => CliError::ConfigError(msg),
            other => CliError::ConfigError(other.to_string()),
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
