//! Reusable request defaults and response expectations
//!
//! A [`RequestSpec`] is built once per run and shared by reference; deriving
//! a variant with extra query parameters returns a new value and leaves the
//! original untouched. A [`ResponseSpec`] asserts one exact status code.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use reqres_shared_config::{ApiConfig, LogDetail};

use crate::error::{ReqresError, ReqresResult};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Content type of every request body
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Immutable request defaults shared by every call of a run
#[derive(Clone)]
pub struct RequestSpec {
    base_url: String,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    log_detail: LogDetail,
}

impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpec")
            .field("base_url", &self.base_url)
            .field("headers", &redact_headers(&self.headers))
            .field("query", &self.query)
            .field("log_detail", &self.log_detail)
            .finish()
    }
}

impl RequestSpec {
    /// Start building a spec for the given base URL
    pub fn builder(base_url: impl Into<String>) -> RequestSpecBuilder {
        RequestSpecBuilder {
            base_url: base_url.into(),
            api_key: None,
            headers: Vec::new(),
            query: Vec::new(),
            log_detail: LogDetail::All,
        }
    }

    /// Build the run's default spec: JSON content type, API key, configured logging
    pub fn from_config(config: &ApiConfig) -> ReqresResult<Self> {
        Self::builder(config.base_url.clone())
            .api_key(config.api_key.clone())
            .log_detail(config.log_detail)
            .build()
    }

    /// Derive a spec with one more query parameter
    pub fn with_query(&self, key: impl Into<String>, value: impl ToString) -> Self {
        let mut derived = self.clone();
        derived.query.push((key.into(), value.to_string()));
        derived
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn log_detail(&self) -> LogDetail {
        self.log_detail
    }

    /// Full URL for an endpoint path such as `/users/2`
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Start a request with this spec's headers and query applied
    pub(crate) fn apply(&self, http_client: &Client, method: Method, path: &str) -> RequestBuilder {
        let builder = http_client
            .request(method, self.url(path))
            .headers(self.headers.clone());
        if self.query.is_empty() {
            builder
        } else {
            builder.query(&self.query)
        }
    }
}

/// Builder for [`RequestSpec`]
#[derive(Debug)]
pub struct RequestSpecBuilder {
    base_url: String,
    api_key: Option<String>,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    log_detail: LogDetail,
}

impl RequestSpecBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn log_detail(mut self, log_detail: LogDetail) -> Self {
        self.log_detail = log_detail;
        self
    }

    /// Freeze the builder into a `RequestSpec`
    ///
    /// # Errors
    /// Returns `ReqresError::InvalidHeader` if a header name or value cannot
    /// be sent over HTTP
    pub fn build(self) -> ReqresResult<RequestSpec> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        if let Some(api_key) = self.api_key {
            let mut value = header_value(API_KEY_HEADER, &api_key)?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ReqresError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value(name, value)?);
        }

        Ok(RequestSpec {
            base_url: self.base_url,
            headers,
            query: self.query,
            log_detail: self.log_detail,
        })
    }
}

fn header_value(name: &str, value: &str) -> ReqresResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ReqresError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Render headers for logs, hiding sensitive values
pub(crate) fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if value.is_sensitive() || name.as_str() == API_KEY_HEADER {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}

/// Immutable expectation on a response: one exact status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSpec {
    status: StatusCode,
    log_detail: LogDetail,
}

impl ResponseSpec {
    /// Expect exactly this status, logging every response
    pub const fn status(status: StatusCode) -> Self {
        Self {
            status,
            log_detail: LogDetail::All,
        }
    }

    /// Expect a status given as a number
    ///
    /// Returns `None` for codes outside 100..=999.
    pub fn status_code(code: u16) -> Option<Self> {
        StatusCode::from_u16(code).ok().map(Self::status)
    }

    pub const fn with_log_detail(mut self, log_detail: LogDetail) -> Self {
        self.log_detail = log_detail;
        self
    }

    pub fn expected_status(&self) -> StatusCode {
        self.status
    }

    pub fn log_detail(&self) -> LogDetail {
        self.log_detail
    }

    pub fn matches(&self, status: StatusCode) -> bool {
        self.status == status
    }
}

/// The response expectations one run reuses, one per status class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSpecs {
    pub ok: ResponseSpec,
    pub created: ResponseSpec,
    pub no_content: ResponseSpec,
    pub bad_request: ResponseSpec,
    pub not_found: ResponseSpec,
}

impl ResponseSpecs {
    pub fn new(log_detail: LogDetail) -> Self {
        Self {
            ok: ResponseSpec::status(StatusCode::OK).with_log_detail(log_detail),
            created: ResponseSpec::status(StatusCode::CREATED).with_log_detail(log_detail),
            no_content: ResponseSpec::status(StatusCode::NO_CONTENT).with_log_detail(log_detail),
            bad_request: ResponseSpec::status(StatusCode::BAD_REQUEST).with_log_detail(log_detail),
            not_found: ResponseSpec::status(StatusCode::NOT_FOUND).with_log_detail(log_detail),
        }
    }

    /// Reuse a shared expectation for a known status, or build one otherwise
    pub fn for_status(&self, code: u16) -> Option<ResponseSpec> {
        [
            self.ok,
            self.created,
            self.no_content,
            self.bad_request,
            self.not_found,
        ]
        .into_iter()
        .find(|spec| spec.status.as_u16() == code)
        .or_else(|| {
            ResponseSpec::status_code(code).map(|spec| spec.with_log_detail(self.ok.log_detail))
        })
    }
}

impl Default for ResponseSpecs {
    fn default() -> Self {
        Self::new(LogDetail::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_sets_defaults() {
        let spec = RequestSpec::from_config(&ApiConfig::new("https://reqres.in/api", "key-1")).unwrap();

        assert_eq!(spec.headers().get(CONTENT_TYPE).unwrap(), JSON_CONTENT_TYPE);
        assert_eq!(spec.headers().get(API_KEY_HEADER).unwrap(), "key-1");
        assert_eq!(spec.log_detail(), LogDetail::All);
        assert!(spec.query().is_empty());
    }

    #[test]
    fn test_with_query_leaves_original_untouched() {
        let spec = RequestSpec::builder("https://reqres.in/api").build().unwrap();
        let paged = spec.with_query("page", 2);

        assert!(spec.query().is_empty());
        assert_eq!(paged.query(), &[("page".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_url_joins_paths() {
        let spec = RequestSpec::builder("https://reqres.in/api/").build().unwrap();
        assert_eq!(spec.url("/users/2"), "https://reqres.in/api/users/2");
        assert_eq!(spec.url("register"), "https://reqres.in/api/register");
    }

    #[test]
    fn test_invalid_header_rejected() {
        let result = RequestSpec::builder("https://reqres.in/api")
            .header("bad header", "value")
            .build();
        assert!(matches!(result, Err(ReqresError::InvalidHeader { .. })));

        let result = RequestSpec::builder("https://reqres.in/api")
            .api_key("line\nbreak")
            .build();
        assert!(matches!(result, Err(ReqresError::InvalidHeader { name, .. }) if name == API_KEY_HEADER));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let spec = RequestSpec::builder("https://reqres.in/api")
            .api_key("secret_key")
            .build()
            .unwrap();
        let debug_str = format!("{:?}", spec);
        assert!(!debug_str.contains("secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_response_spec_matches_exact_status() {
        let spec = ResponseSpec::status(StatusCode::CREATED);
        assert!(spec.matches(StatusCode::CREATED));
        assert!(!spec.matches(StatusCode::OK));
    }

    #[test]
    fn test_response_specs_for_status() {
        let specs = ResponseSpecs::new(LogDetail::OnFailure);
        assert_eq!(specs.for_status(404), Some(specs.not_found));
        assert_eq!(specs.for_status(400), Some(specs.bad_request));

        let teapot = specs.for_status(418).unwrap();
        assert_eq!(teapot.expected_status().as_u16(), 418);
        assert_eq!(teapot.log_detail(), LogDetail::OnFailure);

        assert!(specs.for_status(42).is_none());
    }
}
