//! Configuration error types

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable could not be parsed or was empty
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Base URL is not an absolute http(s) URL
    #[error("invalid URL format for {0}: {1}")]
    InvalidUrl(String, String),

    /// Values parse individually but are unusable together
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
