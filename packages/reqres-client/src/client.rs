//! reqres HTTP client implementation

use std::time::{Duration, Instant};

use reqwest::{Client, Method};
use reqres_shared_config::ApiConfig;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::{ReqresError, ReqresResult};
use crate::models::{RegistrationRequest, UserRequest};
use crate::response::Exchange;
use crate::spec::{redact_headers, RequestSpec};

/// Transport for the reqres API
///
/// The client owns only the connection pool and timeouts. Every call takes
/// the run's [`RequestSpec`] explicitly, so request defaults are never
/// hidden inside the client. Network failures are not retried.
#[derive(Debug, Clone)]
pub struct ReqresClient {
    http_client: Client,
    timeout: Duration,
}

impl ReqresClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> ReqresResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("reqres-suite/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    /// Create a client with custom HTTP client (for testing)
    ///
    /// `timeout` must be the one `http_client` was built with; it is only
    /// reported in `ReqresError::Timeout`.
    pub fn with_client(http_client: Client, timeout: Duration) -> Self {
        Self {
            http_client,
            timeout,
        }
    }

    /// Client with the default configuration's timeouts
    pub fn with_defaults() -> ReqresResult<Self> {
        Self::new(&ApiConfig::default())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one request built from `spec` plus an optional JSON body
    pub async fn execute<B>(
        &self,
        spec: &RequestSpec,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ReqresResult<Exchange>
    where
        B: Serialize + ?Sized,
    {
        let url = spec.url(path);
        let mut request = spec.apply(&self.http_client, method.clone(), path);

        let encoded = body
            .map(|b| serde_json::to_string(b).map_err(ReqresError::Encode))
            .transpose()?;

        if spec.log_detail().logs_success() {
            info!(
                method = %method,
                url = %url,
                query = ?spec.query(),
                headers = ?redact_headers(spec.headers()),
                body = encoded.as_deref().unwrap_or(""),
                "Sending request"
            );
        }

        if let Some(encoded) = encoded {
            request = request.body(encoded);
        }

        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| ReqresError::from_transport(e, &url, self.timeout))?;

        Exchange::read(method, response, started.elapsed())
            .await
            .map_err(|e| match e {
                ReqresError::Http(inner) => {
                    ReqresError::from_transport(inner, &url, self.timeout)
                }
                other => other,
            })
    }

    /// `GET /users?page={page}`
    #[instrument(skip(self, spec))]
    pub async fn list_users(&self, spec: &RequestSpec, page: u32) -> ReqresResult<Exchange> {
        self.execute::<()>(&spec.with_query("page", page), Method::GET, "/users", None)
            .await
    }

    /// `GET /users?delay={delay_secs}`, answered after a server-side delay
    #[instrument(skip(self, spec))]
    pub async fn list_users_delayed(
        &self,
        spec: &RequestSpec,
        delay_secs: u64,
    ) -> ReqresResult<Exchange> {
        self.execute::<()>(
            &spec.with_query("delay", delay_secs),
            Method::GET,
            "/users",
            None,
        )
        .await
    }

    /// `GET /users/{id}`
    #[instrument(skip(self, spec))]
    pub async fn get_user(&self, spec: &RequestSpec, id: u64) -> ReqresResult<Exchange> {
        self.execute::<()>(spec, Method::GET, &format!("/users/{}", id), None)
            .await
    }

    /// `POST /users`
    #[instrument(skip(self, spec))]
    pub async fn create_user(
        &self,
        spec: &RequestSpec,
        user: &UserRequest,
    ) -> ReqresResult<Exchange> {
        self.execute(spec, Method::POST, "/users", Some(user)).await
    }

    /// `PUT /users/{id}`, full replacement
    #[instrument(skip(self, spec))]
    pub async fn update_user(
        &self,
        spec: &RequestSpec,
        id: u64,
        user: &UserRequest,
    ) -> ReqresResult<Exchange> {
        self.execute(spec, Method::PUT, &format!("/users/{}", id), Some(user))
            .await
    }

    /// `PATCH /users/{id}`, partial update
    #[instrument(skip(self, spec))]
    pub async fn patch_user(
        &self,
        spec: &RequestSpec,
        id: u64,
        user: &UserRequest,
    ) -> ReqresResult<Exchange> {
        self.execute(spec, Method::PATCH, &format!("/users/{}", id), Some(user))
            .await
    }

    /// `DELETE /users/{id}`
    #[instrument(skip(self, spec))]
    pub async fn delete_user(&self, spec: &RequestSpec, id: u64) -> ReqresResult<Exchange> {
        self.execute::<()>(spec, Method::DELETE, &format!("/users/{}", id), None)
            .await
    }

    /// `POST /register`
    #[instrument(skip(self, spec, request), fields(email = %request.email))]
    pub async fn register(
        &self,
        spec: &RequestSpec,
        request: &RegistrationRequest,
    ) -> ReqresResult<Exchange> {
        self.execute(spec, Method::POST, "/register", Some(request))
            .await
    }
}
