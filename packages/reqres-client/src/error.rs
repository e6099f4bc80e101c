//! reqres client error types

use std::time::Duration;

use thiserror::Error;

/// Errors raised while building, sending, validating or mapping an exchange
#[derive(Error, Debug)]
pub enum ReqresError {
    /// HTTP request failed for a reason other than timeout or connect
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request did not complete within the client timeout
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// Remote host could not be reached
    #[error("connection refused. Is the API reachable at {0}?")]
    ConnectionRefused(String),

    /// Response status did not match the response specification
    #[error("expected status {expected} from {method} {url}, got {actual}: {body}")]
    UnexpectedStatus {
        method: String,
        url: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    /// Response body could not be mapped to the requested record
    #[error("failed to map response from {url}: {source}")]
    Mapping {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required field was absent from a response
    #[error("missing field '{field}' in {context}")]
    MissingField { field: String, context: String },

    /// Identifier text is not an unsigned integer
    #[error("invalid identifier '{0}': expected an unsigned integer")]
    InvalidId(String),

    /// Request specification carries a header that cannot be sent
    #[error("invalid request header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Request body could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ReqresError {
    /// Check if this error came from the transport (connectivity or timeout)
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ReqresError::Http(_) | ReqresError::Timeout { .. } | ReqresError::ConnectionRefused(_)
        )
    }

    /// Check if this error means the response had an unexpected shape
    pub fn is_mapping(&self) -> bool {
        matches!(
            self,
            ReqresError::Mapping { .. } | ReqresError::MissingField { .. } | ReqresError::InvalidId(_)
        )
    }

    /// Check if this error is a failed status expectation
    pub fn is_status_mismatch(&self) -> bool {
        matches!(self, ReqresError::UnexpectedStatus { .. })
    }

    /// Convert a transport error, naming timeouts and refused connections
    pub(crate) fn from_transport(error: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if error.is_timeout() {
            ReqresError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else if error.is_connect() {
            ReqresError::ConnectionRefused(url.to_string())
        } else {
            ReqresError::Http(error)
        }
    }
}

/// Result type for reqres client operations
pub type ReqresResult<T> = Result<T, ReqresError>;
