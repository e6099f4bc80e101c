//! Remote API configuration types

use url::Url;

use crate::{get_env_or_default, parse_env, ConfigError, ConfigResult, LogDetail};

/// Default base URL of the public API under test
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";

/// Free-tier API key accepted by the public API
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";

/// Remote API configuration
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Value sent in the `x-api-key` header
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// How much of each exchange is logged
    pub log_detail: LogDetail,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("log_detail", &self.log_detail)
            .finish()
    }
}

impl ApiConfig {
    /// Load API configuration from environment variables
    ///
    /// Every variable has a default, so an empty environment targets the
    /// public API with the free-tier key.
    pub fn from_env() -> ConfigResult<Self> {
        let config = Self {
            base_url: get_env_or_default("REQRES_BASE_URL", DEFAULT_BASE_URL),
            api_key: get_env_or_default("REQRES_API_KEY", DEFAULT_API_KEY),
            timeout_secs: parse_env("REQRES_TIMEOUT", 30)?,
            connect_timeout_secs: parse_env("REQRES_CONNECT_TIMEOUT", 10)?,
            log_detail: parse_env("REQRES_LOG_DETAIL", LogDetail::All)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration with a custom URL and API key (useful for testing)
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            log_detail: LogDetail::All,
        }
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Check that the configuration can actually reach an API
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "REQRES_BASE_URL".to_string(),
                "URL cannot be empty".to_string(),
            ));
        }

        let parsed = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl("REQRES_BASE_URL".to_string(), e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(
                "REQRES_BASE_URL".to_string(),
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        if self.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "REQRES_API_KEY".to_string(),
                "API key cannot be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "REQRES_TIMEOUT must be greater than zero".to_string(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "REQRES_CONNECT_TIMEOUT must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_API_KEY)
    }
}
