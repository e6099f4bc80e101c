//! Common test utilities for suite integration tests
//!
//! Every test gets its own mock server with the whole API mounted, and a
//! [`SuiteContext`] pointed at it.

#![allow(unused_imports)]
#![allow(dead_code)]

use reqres_shared_config::ApiConfig;
use reqres_suite::SuiteContext;

pub use reqres_test_utils::{MockReqresServer, ReqresUserFixture, REGISTRATION_TOKEN};

/// Mock server with every endpoint mounted
pub async fn mock_api() -> MockReqresServer {
    let server = MockReqresServer::start().await;
    server.mock_reqres_api().await;
    server
}

/// Configuration targeting a mock server with its expected key
pub fn config_for(server: &MockReqresServer) -> ApiConfig {
    ApiConfig::new(server.url(), server.api_key())
}

/// Suite context targeting a mock server
pub fn context_for(server: &MockReqresServer) -> SuiteContext {
    SuiteContext::new(&config_for(server)).expect("mock configuration is valid")
}
