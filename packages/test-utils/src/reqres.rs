//! Mock reqres server for offline suite runs
//!
//! Provides a [`MockReqresServer`] that answers every endpoint the suite
//! exercises the way the public API does: fixed users on two pages, echoing
//! create/update responses, a delayed list and registration that only
//! succeeds for known users.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{any, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use crate::fixtures::{users_page_json, ReqresUserFixture, FIXED_TIMESTAMP};

/// Header the public API reads its key from
const API_KEY_HEADER: &str = "x-api-key";

/// First ID handed out by `POST /users`
const FIRST_CREATED_ID: u64 = 100;

/// Token returned for every successful registration
pub const REGISTRATION_TOKEN: &str = "QpwL5tke4Pnpja7X4";

/// Priority of per-test overrides; lower numbers win in wiremock
const OVERRIDE_PRIORITY: u8 = 1;

/// Priority of the missing-key fallback
const FALLBACK_PRIORITY: u8 = 10;

/// Mock reqres server
///
/// Wraps a [`wiremock::MockServer`]. [`MockReqresServer::mock_reqres_api`]
/// mounts the whole API; the `mock_*_response` methods mount overrides that
/// take precedence for a single endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use reqres_test_utils::MockReqresServer;
///
/// #[tokio::test]
/// async fn test_against_mock() {
///     let server = MockReqresServer::start().await;
///     server.mock_reqres_api().await;
///
///     // Point ApiConfig::new(server.url(), server.api_key()) at it
/// }
/// ```
pub struct MockReqresServer {
    server: MockServer,
    api_key: String,
    next_id: Arc<AtomicU64>,
}

impl MockReqresServer {
    /// Start a new mock server expecting the free-tier API key
    pub async fn start() -> Self {
        Self::start_with_api_key("reqres-free-v1").await
    }

    /// Start a new mock server expecting a custom API key
    pub async fn start_with_api_key(api_key: &str) -> Self {
        Self {
            server: MockServer::start().await,
            api_key: api_key.to_string(),
            next_id: Arc::new(AtomicU64::new(FIRST_CREATED_ID)),
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get the API key requests must carry
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// ID the next `POST /users` will return
    pub fn next_created_id(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    /// Mount every endpoint with the API's default behaviour
    pub async fn mock_reqres_api(&self) {
        self.mock_users_page(1, ReqresUserFixture::page_one()).await;
        self.mock_users_page(2, ReqresUserFixture::page_two()).await;
        self.mock_delayed_users(Duration::from_secs(3)).await;
        for user in ReqresUserFixture::all() {
            self.mock_user_found(&user).await;
        }
        self.mock_user_not_found().await;
        self.mock_create_user().await;
        self.mock_update_user().await;
        self.mock_patch_user().await;
        self.mock_delete_user().await;
        self.mock_register().await;
        self.mock_missing_api_key().await;
    }

    /// Mount `GET /users?page={page}`
    pub async fn mock_users_page(&self, page: u32, users: Vec<ReqresUserFixture>) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", page.to_string().as_str()))
            .and(header(API_KEY_HEADER, self.api_key.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_page_json(page, &users)))
            .mount(&self.server)
            .await;
    }

    /// Mount `GET /users?delay=…`, answering page 1 after `delay`
    pub async fn mock_delayed_users(&self, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(DelayParam)
            .and(header(API_KEY_HEADER, self.api_key.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(delay)
                    .set_body_json(users_page_json(1, &ReqresUserFixture::page_one())),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount `GET /users/{id}` for one known user
    pub async fn mock_user_found(&self, user: &ReqresUserFixture) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}", user.id)))
            .and(header(API_KEY_HEADER, self.api_key.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": user.to_json()
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount 404 for any `GET /users/{id}` not mounted as found
    pub async fn mock_user_not_found(&self) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/users/\d+$"))
            .and(header(API_KEY_HEADER, self.api_key.as_str()))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
            .with_priority(FALLBACK_PRIORITY - 1)
            .mount(&self.server)
            .await;
    }

    /// Mount `POST /users`, echoing the body with a fresh ID and `createdAt`
    pub async fn mock_create_user(&self) {
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(header(API_KEY_HEADER, self.api_key.as_str()))
            .respond_with(EchoUser {
                status: 201,
                next_id: Some(self.next_id.clone()),
                timestamp_field: "createdAt",
            })
            .mount(&self.server)
            .await;
    }

    /// Mount `PUT /users/{id}`, echoing the body with `updatedAt`
    pub async fn mock_update_user(&self) {
        self.mock_echo_mutation("PUT").await;
    }

    /// Mount `PATCH /users/{id}`, echoing the body with `updatedAt`
    pub async fn mock_patch_user(&self) {
        self.mock_echo_mutation("PATCH").await;
    }

    async fn mock_echo_mutation(&self, http_method: &str) {
        Mock::given(method(http_method))
            .and(path_regex(r"^/users/\d+$"))
            .and(header(API_KEY_HEADER, self.api_key.as_str()))
            .respond_with(EchoUser {
                status: 200,
                next_id: None,
                timestamp_field: "updatedAt",
            })
            .mount(&self.server)
            .await;
    }

    /// Mount `DELETE /users/{id}` answering 204 with an empty body
    pub async fn mock_delete_user(&self) {
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/users/\d+$"))
            .and(header(API_KEY_HEADER, self.api_key.as_str()))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    /// Mount `POST /register` with the public API's validation rules
    pub async fn mock_register(&self) {
        Mock::given(method("POST"))
            .and(path("/register"))
            .and(header(API_KEY_HEADER, self.api_key.as_str()))
            .respond_with(Register {
                known: ReqresUserFixture::all(),
            })
            .mount(&self.server)
            .await;
    }

    /// Mount 401 for any request lacking the expected API key
    pub async fn mock_missing_api_key(&self) {
        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "Missing API key"})),
            )
            .with_priority(FALLBACK_PRIORITY)
            .mount(&self.server)
            .await;
    }

    /// Override one method and path with a fixed status and body
    pub async fn mock_response(&self, http_method: &str, endpoint: &str, status: u16, body: Value) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .with_priority(OVERRIDE_PRIORITY)
            .mount(&self.server)
            .await;
    }

    /// Override any `{method} /users/{id}` with a fixed status and body
    pub async fn mock_user_response(&self, http_method: &str, status: u16, body: Value) {
        Mock::given(method(http_method))
            .and(path_regex(r"^/users/\d+$"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .with_priority(OVERRIDE_PRIORITY)
            .mount(&self.server)
            .await;
    }

    /// Override `DELETE /users/{id}` with a failure status
    pub async fn mock_delete_failure(&self, status: u16) {
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/users/\d+$"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"error": "boom"})))
            .with_priority(OVERRIDE_PRIORITY)
            .mount(&self.server)
            .await;
    }

    /// Count received requests for a method and exact path
    pub async fn received(&self, http_method: &str, endpoint: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| {
                request.method.to_string().eq_ignore_ascii_case(http_method)
                    && request.url.path() == endpoint
            })
            .count()
    }

    /// Count received `DELETE /users/{id}` requests for any ID
    pub async fn delete_calls(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| {
                request.method.to_string().eq_ignore_ascii_case("DELETE")
                    && request.url.path().starts_with("/users/")
            })
            .count()
    }
}

/// Matches any request carrying a `delay` query parameter
struct DelayParam;

impl wiremock::Match for DelayParam {
    fn matches(&self, request: &Request) -> bool {
        request.url.query_pairs().any(|(key, _)| key == "delay")
    }
}

/// Echoes a JSON request body, stamping a timestamp and optionally an ID
struct EchoUser {
    status: u16,
    next_id: Option<Arc<AtomicU64>>,
    timestamp_field: &'static str,
}

impl Respond for EchoUser {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut body = serde_json::from_slice::<Value>(&request.body)
            .ok()
            .filter(Value::is_object)
            .unwrap_or_else(|| json!({}));

        if let Some(next_id) = &self.next_id {
            body["id"] = json!(next_id.fetch_add(1, Ordering::SeqCst).to_string());
        }
        body[self.timestamp_field] = json!(FIXED_TIMESTAMP);

        ResponseTemplate::new(self.status).set_body_json(body)
    }
}

/// Registration succeeds only for known emails with a password
struct Register {
    known: Vec<ReqresUserFixture>,
}

impl Respond for Register {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let email = body["email"].as_str().unwrap_or_default();
        let password = body["password"].as_str().unwrap_or_default();

        let rejected = |message: &str| {
            ResponseTemplate::new(400).set_body_json(json!({"error": message}))
        };

        if email.is_empty() {
            return rejected("Missing email or username");
        }
        if password.is_empty() {
            return rejected("Missing password");
        }

        match self.known.iter().find(|user| user.email == email) {
            Some(user) => ResponseTemplate::new(200).set_body_json(json!({
                "id": user.id,
                "token": REGISTRATION_TOKEN
            })),
            None => rejected("Note: Only defined users succeed registration"),
        }
    }
}
