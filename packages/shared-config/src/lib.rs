//! Shared configuration types for the reqres suite
//!
//! This crate provides the configuration consumed by both the HTTP client
//! and the suite runner, so every crate agrees on the target API and on how
//! much of each exchange gets logged.

mod api;
mod error;

pub use api::ApiConfig;
pub use error::{ConfigError, ConfigResult};

use std::env;

/// Configuration for a full suite run
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Remote API configuration
    pub api: ApiConfig,

    /// Log level (from RUST_LOG or LOG_LEVEL)
    pub log_level: String,
}

impl SuiteConfig {
    /// Load a `.env` file if one exists, then read the environment
    pub fn load() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load suite configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            api: ApiConfig::from_env()?,
            log_level: env::var("RUST_LOG")
                .or_else(|_| env::var("LOG_LEVEL"))
                .unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// How much of each HTTP exchange is written to the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogDetail {
    /// Never log exchanges
    None,
    /// Log an exchange only when its response fails validation
    OnFailure,
    /// Log every request and response
    #[default]
    All,
}

impl LogDetail {
    /// Whether successful exchanges should be logged
    pub fn logs_success(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether failed exchanges should be logged
    pub fn logs_failure(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::str::FromStr for LogDetail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "failures" | "on_failure" | "on-failure" => Ok(Self::OnFailure),
            "none" | "off" => Ok(Self::None),
            other => Err(format!(
                "unknown log detail '{}' (expected all, failures or none)",
                other
            )),
        }
    }
}

impl std::fmt::Display for LogDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::OnFailure => write!(f, "failures"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
