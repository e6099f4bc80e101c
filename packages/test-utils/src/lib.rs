//! Shared test utilities for the reqres suite
//!
//! This crate provides a local stand-in of the public reqres API so the
//! suite's orchestration can be tested without network access.
//!
//! # Mock Services
//!
//! - [`MockReqresServer`] - wiremock server answering every endpoint the
//!   suite exercises, with the API's fixed user data
//!
//! # Example
//!
//! ```rust,ignore
//! use reqres_test_utils::MockReqresServer;
//!
//! #[tokio::test]
//! async fn test_with_mock() {
//!     let server = MockReqresServer::start().await;
//!     server.mock_reqres_api().await;
//!
//!     // Use server.url() and server.api_key() to configure the client
//! }
//! ```

mod fixtures;
mod reqres;

pub use fixtures::{users_page_json, ReqresUserFixture, FIXED_TIMESTAMP, USERS_PER_PAGE};
pub use reqres::{MockReqresServer, REGISTRATION_TOKEN};
