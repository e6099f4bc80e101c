//! Captured HTTP exchanges and status validation
//!
//! An [`Exchange`] holds the fully read response. Its body can only be
//! mapped to a record after [`Exchange::expect`] has checked it against a
//! [`ResponseSpec`], which yields a [`ValidatedResponse`].

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ReqresError, ReqresResult};
use crate::spec::{redact_headers, ResponseSpec};

/// Maximum body size carried into error messages
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// A completed request and its response
#[derive(Debug, Clone)]
pub struct Exchange {
    method: Method,
    url: String,
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    elapsed: Duration,
}

impl Exchange {
    pub(crate) async fn read(
        method: Method,
        response: reqwest::Response,
        elapsed: Duration,
    ) -> ReqresResult<Self> {
        let url = response.url().to_string();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(Self {
            method,
            url,
            status,
            headers,
            body,
            elapsed,
        })
    }

    /// Build an exchange from parts (useful for testing)
    pub fn from_parts(
        method: Method,
        url: impl Into<String>,
        status: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            status,
            headers: HeaderMap::new(),
            body: body.into(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Numeric `id` of the body, whatever the status
    ///
    /// Lets a caller clean up a resource the server created even when the
    /// response fails validation or mapping.
    pub fn created_id(&self) -> Option<u64> {
        let root: Value = serde_json::from_str(&self.body).ok()?;
        match root.get("id")? {
            Value::String(text) => text.trim().parse().ok(),
            Value::Number(number) => number.as_u64(),
            _ => None,
        }
    }

    /// Check the status against an expectation
    ///
    /// Logs the exchange according to the expectation's log detail; a
    /// mismatch is logged in full (headers and body) at `warn`.
    ///
    /// # Errors
    /// Returns `ReqresError::UnexpectedStatus` when the status differs
    pub fn expect(self, spec: &ResponseSpec) -> ReqresResult<ValidatedResponse> {
        if spec.matches(self.status) {
            if spec.log_detail().logs_success() {
                info!(
                    method = %self.method,
                    url = %self.url,
                    status = self.status.as_u16(),
                    elapsed_ms = self.elapsed.as_millis() as u64,
                    body = %self.body,
                    "Response matched expectation"
                );
            }
            return Ok(ValidatedResponse { exchange: self });
        }

        if spec.log_detail().logs_failure() {
            warn!(
                method = %self.method,
                url = %self.url,
                expected = spec.expected_status().as_u16(),
                actual = self.status.as_u16(),
                elapsed_ms = self.elapsed.as_millis() as u64,
                headers = ?redact_headers(&self.headers),
                body = %self.body,
                "Response did not match expected status"
            );
        }

        Err(ReqresError::UnexpectedStatus {
            method: self.method.to_string(),
            url: self.url,
            expected: spec.expected_status().as_u16(),
            actual: self.status.as_u16(),
            body: truncate_body(self.body),
        })
    }
}

/// A response whose status matched its expectation
#[derive(Debug, Clone)]
pub struct ValidatedResponse {
    exchange: Exchange,
}

impl ValidatedResponse {
    pub fn status(&self) -> StatusCode {
        self.exchange.status
    }

    pub fn body(&self) -> &str {
        &self.exchange.body
    }

    pub fn url(&self) -> &str {
        &self.exchange.url
    }

    /// Map the whole body to a record
    pub fn json<T: DeserializeOwned>(&self) -> ReqresResult<T> {
        serde_json::from_str(&self.exchange.body).map_err(|source| ReqresError::Mapping {
            url: self.exchange.url.clone(),
            source,
        })
    }

    /// Map the value at a JSON pointer such as `/data` to a record
    pub fn json_at<T: DeserializeOwned>(&self, pointer: &str) -> ReqresResult<T> {
        let value = self
            .value_at(pointer)?
            .ok_or_else(|| ReqresError::MissingField {
                field: pointer.to_string(),
                context: format!("response from {}", self.exchange.url),
            })?;
        serde_json::from_value(value).map_err(|source| ReqresError::Mapping {
            url: self.exchange.url.clone(),
            source,
        })
    }

    /// Check that a top-level field is present and not null
    pub fn has_field(&self, field: &str) -> ReqresResult<bool> {
        Ok(self
            .value_at(&format!("/{}", field))?
            .is_some_and(|value| !value.is_null()))
    }

    fn value_at(&self, pointer: &str) -> ReqresResult<Option<Value>> {
        let root: Value = self.json()?;
        Ok(root.pointer(pointer).cloned())
    }
}

/// Truncate a body for error messages without splitting a UTF-8 character
fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_SIZE {
        return body;
    }

    let truncate_at = body
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
        .last()
        .unwrap_or(0);

    format!("{}... (truncated)", &body[..truncate_at])
}
