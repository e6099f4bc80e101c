//! Error handling for suite runs
//!
//! Every failure is classified into a [`FailureKind`] so the report can tell
//! a wrong value apart from a broken response or an unreachable API.

use std::fmt;

use reqres_client::ReqresError;
use reqres_shared_config::ConfigError;
use thiserror::Error;

/// Failure classes of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Expected value or status mismatch; sibling cases keep running
    Assertion,
    /// Response body had an unexpected shape
    Mapping,
    /// Connectivity problem or timeout; never retried
    Network,
    /// The suite itself is misconfigured
    Configuration,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assertion => write!(f, "assertion"),
            Self::Mapping => write!(f, "mapping"),
            Self::Network => write!(f, "network"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

/// Errors raised while running a case
#[derive(Error, Debug)]
pub enum SuiteError {
    /// A checked value did not match
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The client failed to send, validate or map an exchange
    #[error(transparent)]
    Client(#[from] ReqresError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Setup could not create the fixture user
    #[error("fixture unavailable: {0}")]
    FixtureUnavailable(#[source] Box<SuiteError>),
}

impl SuiteError {
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    pub fn fixture_unavailable(cause: SuiteError) -> Self {
        Self::FixtureUnavailable(Box::new(cause))
    }

    /// Classify this error for the run report
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Assertion(_) => FailureKind::Assertion,
            Self::Client(e) if e.is_status_mismatch() => FailureKind::Assertion,
            Self::Client(e) if e.is_network() => FailureKind::Network,
            Self::Client(e) if e.is_mapping() => FailureKind::Mapping,
            Self::Client(_) | Self::Config(_) => FailureKind::Configuration,
            Self::FixtureUnavailable(cause) => cause.kind(),
        }
    }
}

/// Result type for suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;
