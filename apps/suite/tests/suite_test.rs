//! Integration tests for the case runner
//!
//! Every case runs against a wiremock server that mirrors the public API, so
//! fixture lifecycle, failure classification and step reporting can be
//! checked without network access.

mod common;

use std::time::Duration;

use common::{config_for, context_for, mock_api, MockReqresServer};
use reqres_shared_config::ApiConfig;
use reqres_suite::scenarios::{self, RegistrationScenario, UserNameScenario};
use reqres_suite::{
    run_all, run_case, Case, CasePhase, FailureKind, Phase, SuiteContext, SuiteError,
};
use reqres_test_utils::FIXED_TIMESTAMP;
use rstest::rstest;
use serde_json::json;

// ============================================================================
// Fixed remote data
// ============================================================================

#[rstest]
#[case(7, "Michael")]
#[case(8, "Lindsay")]
#[case(9, "Tobias")]
#[case(10, "Byron")]
#[case(11, "George")]
#[case(12, "Rachel")]
#[tokio::test]
async fn test_find_user_name(#[case] user_id: u64, #[case] first_name: &'static str) {
    let server = mock_api().await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::UserName(UserNameScenario { user_id, first_name })).await;

    assert!(outcome.passed(), "{}", outcome);
    assert_eq!(outcome.phase, CasePhase::Validated);
    assert_eq!(outcome.steps_in(Phase::Setup).count(), 0);
    assert_eq!(server.received("GET", "/users").await, 1);
}

#[tokio::test]
async fn test_wrong_first_name_is_an_assertion_failure() {
    let server = mock_api().await;
    let ctx = context_for(&server);

    let case = Case::UserName(UserNameScenario {
        user_id: 7,
        first_name: "Mike",
    });
    let outcome = run_case(&ctx, &case).await;

    let failure = outcome.failure.as_ref().expect("case should fail");
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.contains("first_name"));
    assert!(failure.message.contains("Michael"));
    // earlier validation steps passed, the last one did not
    assert_eq!(outcome.phase, CasePhase::RequestIssued);
    assert!(outcome.steps_in(Phase::Validate).next().unwrap().passed());
}

#[tokio::test]
async fn test_users_list_structure() {
    let server = mock_api().await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::UsersListStructure).await;

    assert!(outcome.passed(), "{}", outcome);
    assert_eq!(outcome.steps_in(Phase::Exercise).count(), 1);
}

#[tokio::test]
async fn test_unmappable_list_is_a_mapping_failure() {
    let server = mock_api().await;
    server
        .mock_response("GET", "/users", 200, json!({"unexpected": true}))
        .await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::UsersListStructure).await;

    assert_eq!(outcome.failure.unwrap().kind, FailureKind::Mapping);
}

#[tokio::test]
async fn test_missing_user() {
    let server = mock_api().await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::MissingUser).await;

    assert!(outcome.passed(), "{}", outcome);
    assert_eq!(server.received("GET", "/users/999").await, 1);
}

#[tokio::test]
async fn test_missing_user_found_is_an_assertion_failure() {
    let server = mock_api().await;
    server
        .mock_user_response("GET", 200, json!({"data": {"id": 999}}))
        .await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::MissingUser).await;

    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.contains("404"));
}

// ============================================================================
// Mutations and fixture lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_user_deletes_what_it_created() {
    let server = mock_api().await;
    let ctx = context_for(&server);
    let created_id = server.next_created_id();

    let outcome = run_case(&ctx, &Case::CreateUser).await;

    assert!(outcome.passed(), "{}", outcome);
    assert_eq!(outcome.phase, CasePhase::TornDown);
    assert_eq!(outcome.steps_in(Phase::Teardown).count(), 1);
    assert_eq!(
        server
            .received("DELETE", &format!("/users/{}", created_id))
            .await,
        1
    );
}

#[rstest]
#[case(201, json!({"id": "100", "name": "Ivan", "job": "Tester", "createdAt": "yesterday"}), FailureKind::Mapping)]
#[case(200, json!({"id": "100", "name": "Ivan", "job": "Tester", "createdAt": FIXED_TIMESTAMP}), FailureKind::Assertion)]
#[case(201, json!({"id": 100, "name": "Ivan", "job": "Janitor", "createdAt": FIXED_TIMESTAMP}), FailureKind::Assertion)]
#[tokio::test]
async fn test_create_user_deletes_even_when_response_is_rejected(
    #[case] status: u16,
    #[case] body: serde_json::Value,
    #[case] kind: FailureKind,
) {
    let server = mock_api().await;
    server.mock_response("POST", "/users", status, body).await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::CreateUser).await;

    assert_eq!(outcome.failure.as_ref().map(|f| f.kind), Some(kind));
    assert_eq!(outcome.phase, CasePhase::TornDown);
    assert_eq!(server.received("DELETE", "/users/100").await, 1);
}

#[tokio::test]
async fn test_create_user_without_id_skips_teardown() {
    let server = mock_api().await;
    server
        .mock_response("POST", "/users", 201, json!({"name": "Ivan", "job": "Tester"}))
        .await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::CreateUser).await;

    assert_eq!(outcome.failure.as_ref().unwrap().kind, FailureKind::Assertion);
    assert_eq!(outcome.steps_in(Phase::Teardown).count(), 0);
    assert_eq!(server.delete_calls().await, 0);
}

#[tokio::test]
async fn test_update_user_runs_full_lifecycle() {
    let server = mock_api().await;
    let ctx = context_for(&server);
    let fixture_id = server.next_created_id();

    let outcome = run_case(&ctx, &Case::UpdateUser).await;

    assert!(outcome.passed(), "{}", outcome);
    assert_eq!(outcome.phase, CasePhase::TornDown);

    let phases: Vec<Phase> = outcome.steps.iter().map(|step| step.phase).collect();
    assert_eq!(phases.first(), Some(&Phase::Setup));
    assert_eq!(phases.last(), Some(&Phase::Teardown));
    assert!(phases.contains(&Phase::Exercise));
    assert!(phases.contains(&Phase::Validate));

    assert_eq!(server.received("PUT", &format!("/users/{}", fixture_id)).await, 1);
    assert_eq!(server.delete_calls().await, 1);
}

#[tokio::test]
async fn test_update_failure_still_tears_down() {
    let server = mock_api().await;
    server
        .mock_user_response(
            "PUT",
            200,
            json!({"name": "Ivan", "job": "AutoTester", "updatedAt": FIXED_TIMESTAMP}),
        )
        .await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::UpdateUser).await;

    let failure = outcome.failure.as_ref().expect("case should fail");
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.contains("SuperIvan"));
    assert_eq!(outcome.phase, CasePhase::TornDown);
    assert!(!outcome.teardown_failed());
    assert_eq!(server.delete_calls().await, 1);
}

#[tokio::test]
async fn test_fixture_failure_skips_exercise_and_teardown() {
    let server = mock_api().await;
    server
        .mock_response("POST", "/users", 500, json!({"error": "down"}))
        .await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::UpdateUser).await;

    let failure = outcome.failure.as_ref().expect("case should fail");
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.starts_with("fixture unavailable"));
    assert_eq!(outcome.phase, CasePhase::Uninitialized);
    assert_eq!(outcome.steps.len(), 1);
    assert_eq!(outcome.steps[0].phase, Phase::Setup);
    assert_eq!(server.delete_calls().await, 0);
    assert_eq!(server.received("PUT", "/users/100").await, 0);
}

#[tokio::test]
async fn test_teardown_failure_keeps_case_outcome() {
    let server = mock_api().await;
    server.mock_delete_failure(500).await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::UpdateUser).await;

    assert!(outcome.passed(), "{}", outcome);
    assert!(outcome.teardown_failed());
    assert_eq!(outcome.phase, CasePhase::TornDown);
    assert!(outcome.to_string().ends_with("(teardown failed)"));
    assert_eq!(server.delete_calls().await, 1);
}

#[tokio::test]
async fn test_partial_update_changes_only_job() {
    let server = mock_api().await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::PartialUpdate).await;

    assert!(outcome.passed(), "{}", outcome);
    assert_eq!(server.received("PATCH", "/users/2").await, 1);
    assert_eq!(server.delete_calls().await, 0);
}

#[tokio::test]
async fn test_partial_update_with_name_fails() {
    let server = mock_api().await;
    server
        .mock_user_response(
            "PATCH",
            200,
            json!({"name": "Janet", "job": "QA Engineer", "updatedAt": FIXED_TIMESTAMP}),
        )
        .await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::PartialUpdate).await;

    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.contains("name"));
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_registration_rows_pass() {
    let server = mock_api().await;
    let ctx = context_for(&server);

    for row in scenarios::registrations() {
        let outcome = run_case(&ctx, &Case::Registration(row)).await;
        assert!(outcome.passed(), "{}", outcome);
    }
    assert_eq!(server.received("POST", "/register").await, 3);
}

#[tokio::test]
async fn test_unexpected_rejection_is_an_assertion_failure() {
    let server = mock_api().await;
    let ctx = context_for(&server);

    let row = RegistrationScenario {
        email: "nobody@reqres.in",
        password: Some("secret"),
        expected_status: 200,
        expected_field: "token",
        expected_error: None,
    };
    let outcome = run_case(&ctx, &Case::Registration(row)).await;

    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.contains("400"));
}

#[tokio::test]
async fn test_wrong_rejection_message_fails() {
    let server = mock_api().await;
    let ctx = context_for(&server);

    let row = RegistrationScenario {
        email: "sydney@fife",
        password: None,
        expected_status: 400,
        expected_field: "error",
        expected_error: Some("Missing email or username"),
    };
    let outcome = run_case(&ctx, &Case::Registration(row)).await;

    let failure = outcome.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert!(failure.message.contains("Missing password"));
}

// ============================================================================
// Delays, connectivity and configuration
// ============================================================================

#[tokio::test]
async fn test_delayed_response_within_timeout() {
    let server = MockReqresServer::start().await;
    server
        .mock_delayed_users(Duration::from_millis(200))
        .await;
    let ctx = context_for(&server);

    let outcome = run_case(&ctx, &Case::DelayedResponse).await;

    assert!(outcome.passed(), "{}", outcome);
    assert!(outcome.elapsed >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_delay_beyond_timeout_is_a_network_failure() {
    let server = MockReqresServer::start().await;
    server.mock_delayed_users(Duration::from_secs(3)).await;
    let config = config_for(&server).with_timeout_secs(1);
    let ctx = SuiteContext::new(&config).unwrap();

    let outcome = run_case(&ctx, &Case::DelayedResponse).await;

    assert_eq!(outcome.failure.unwrap().kind, FailureKind::Network);
    assert_eq!(outcome.phase, CasePhase::Uninitialized);
}

#[tokio::test]
async fn test_unreachable_api_is_a_network_failure() {
    let ctx = SuiteContext::new(&ApiConfig::new("http://127.0.0.1:9", "reqres-free-v1")).unwrap();

    let outcome = run_case(&ctx, &Case::MissingUser).await;

    assert_eq!(outcome.failure.unwrap().kind, FailureKind::Network);
}

#[tokio::test]
async fn test_wrong_api_key_fails_every_case() {
    let server = mock_api().await;
    let ctx = SuiteContext::new(&ApiConfig::new(server.url(), "not-the-key")).unwrap();

    let report = run_all(&ctx, Case::catalogue()).await;

    assert_eq!(report.passed(), 0);
    assert!(report
        .failures()
        .all(|case| case.failure.as_ref().unwrap().kind == FailureKind::Assertion));
    assert_eq!(server.delete_calls().await, 0);
}

#[test]
fn test_invalid_config_is_a_configuration_failure() {
    let err = SuiteContext::new(&ApiConfig::new("https://reqres.in/api", "")).unwrap_err();

    assert!(matches!(err, SuiteError::Config(_)));
    assert_eq!(err.kind(), FailureKind::Configuration);
}

// ============================================================================
// Whole catalogue
// ============================================================================

#[tokio::test]
async fn test_full_catalogue_passes() {
    let server = mock_api().await;
    let ctx = context_for(&server);

    let report = run_all(&ctx, Case::catalogue()).await;

    assert!(report.is_success(), "{}", report);
    assert_eq!(report.cases.len(), 15);
    assert!(report.case("find_user_name[12]").is_some());
    assert!(report.case("registration[sydney@fife]").is_some());
    // create_user and update_user_put each remove one user
    assert_eq!(server.delete_calls().await, 2);
    assert!(report.to_string().ends_with("15 cases: 15 passed, 0 failed"));
}

#[tokio::test]
async fn test_one_failure_does_not_stop_the_run() {
    let server = mock_api().await;
    server.mock_response("POST", "/register", 503, json!({})).await;
    let ctx = context_for(&server);

    let report = run_all(&ctx, Case::catalogue()).await;

    assert_eq!(report.failed(), 3);
    assert!(report
        .failures()
        .all(|case| case.name.starts_with("registration[")));
    assert!(report.case("missing_user").unwrap().passed());
}
