//! Configuration error types

use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse configuration
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// Validation error with field and message
    #[error("validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// Environment variable error
    #[error("environment variable error: {0}")]
    EnvVarError(String),

    /// Mutually exclusive settings were both supplied
    #[error("mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    /// Generic configuration error from the config crate
    #[error("configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}
