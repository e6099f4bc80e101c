//! Case catalogue
//!
//! One [`Case`] per scenario row. Parameterized cases carry their row, so the
//! catalogue is a flat ordered list the runner walks once.

use reqres_client::{
    Exchange, RegistrationOutcome, RegistrationRequest, RegistrationResponse, UserRequest,
    UserResponse, UsersPage,
};

use crate::check::{expect_absent, expect_eq, expect_present, expect_that};
use crate::error::{SuiteError, SuiteResult};
use crate::orchestrator::CaseRun;
use crate::scenarios::{
    self, RegistrationScenario, UserNameScenario, DELAY_SECS, FIXTURE_USER, LIST_PAGE,
    MISSING_USER_ID, PATCHED_JOB, PATCH_TARGET_ID, UPDATED_USER,
};

/// A single executable case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Listed user carries the expected first name
    UserName(UserNameScenario),
    /// Creation echoes name and job, assigns ID and `createdAt`
    CreateUser,
    /// Full replacement of a fixture user
    UpdateUser,
    /// List page shape: page number, non-empty data, IDs and emails set
    UsersListStructure,
    /// Registration answers with the expected status and field
    Registration(RegistrationScenario),
    /// Delayed list still arrives within the client timeout
    DelayedResponse,
    /// Job-only update of a well-known user
    PartialUpdate,
    /// Unknown user answers 404
    MissingUser,
}

impl Case {
    /// Every case in run order
    pub fn catalogue() -> Vec<Case> {
        let mut cases: Vec<Case> = scenarios::user_names().map(Case::UserName).collect();
        cases.push(Case::CreateUser);
        cases.push(Case::UpdateUser);
        cases.push(Case::UsersListStructure);
        cases.extend(scenarios::registrations().map(Case::Registration));
        cases.push(Case::DelayedResponse);
        cases.push(Case::PartialUpdate);
        cases.push(Case::MissingUser);
        cases
    }

    /// Report name, with the scenario row for parameterized cases
    pub fn name(&self) -> String {
        match self {
            Case::UserName(row) => format!("find_user_name[{}]", row.user_id),
            Case::CreateUser => "create_user".to_string(),
            Case::UpdateUser => "update_user_put".to_string(),
            Case::UsersListStructure => "users_list_structure".to_string(),
            Case::Registration(row) => format!("registration[{}]", row.email),
            Case::DelayedResponse => "delayed_response".to_string(),
            Case::PartialUpdate => "partial_update_patch".to_string(),
            Case::MissingUser => "missing_user".to_string(),
        }
    }

    pub async fn execute(&self, run: &CaseRun<'_>) -> SuiteResult<()> {
        match *self {
            Case::UserName(row) => find_user_name(run, row).await,
            Case::CreateUser => create_user(run).await,
            Case::UpdateUser => run.with_fixture(|id| update_user(run, id)).await,
            Case::UsersListStructure => users_list_structure(run).await,
            Case::Registration(row) => registration(run, row).await,
            Case::DelayedResponse => delayed_response(run).await,
            Case::PartialUpdate => partial_update(run).await,
            Case::MissingUser => missing_user(run).await,
        }
    }
}

async fn find_user_name(run: &CaseRun<'_>, row: UserNameScenario) -> SuiteResult<()> {
    let ctx = run.context();
    let exchange = run
        .issue(
            format!("GET /users?page={}", LIST_PAGE),
            ctx.client.list_users(&ctx.request, LIST_PAGE),
        )
        .await?;

    let page: UsersPage = run.validate("map user list", || {
        Ok(exchange.expect(&ctx.expect.ok)?.json()?)
    })?;

    let user = run.validate(format!("find user {}", row.user_id), || {
        page.find(row.user_id).cloned().ok_or_else(|| {
            SuiteError::assertion(format!(
                "user {} not found on page {}",
                row.user_id, LIST_PAGE
            ))
        })
    })?;

    run.validate("compare first name", || {
        expect_eq("first_name", row.first_name, user.first_name.as_str())
    })
}

async fn create_user(run: &CaseRun<'_>) -> SuiteResult<()> {
    let ctx = run.context();
    let payload = UserRequest::new(FIXTURE_USER.name, FIXTURE_USER.job);
    let exchange = run
        .issue("POST /users", ctx.client.create_user(&ctx.request, &payload))
        .await?;

    // read before validation so a rejected or unmappable body is still cleaned up
    let created_id = exchange.created_id();
    let checked = check_created_user(run, exchange);

    if let Some(id) = created_id {
        run.teardown(id).await;
    }
    checked
}

fn check_created_user(run: &CaseRun<'_>, exchange: Exchange) -> SuiteResult<()> {
    let ctx = run.context();
    let created: UserResponse = run.validate("map created user", || {
        Ok(exchange.expect(&ctx.expect.created)?.json()?)
    })?;

    run.validate("check created user", || {
        expect_eq("name", Some(FIXTURE_USER.name), created.name.as_deref())?;
        expect_eq("job", Some(FIXTURE_USER.job), created.job.as_deref())?;
        expect_present("id", created.id.as_deref())?;
        expect_present("createdAt", created.created_at.as_ref())?;
        Ok(())
    })
}

async fn update_user(run: &CaseRun<'_>, id: u64) -> SuiteResult<()> {
    let ctx = run.context();
    let payload = UserRequest::new(UPDATED_USER.name, UPDATED_USER.job);
    let exchange = run
        .issue(
            format!("PUT /users/{}", id),
            ctx.client.update_user(&ctx.request, id, &payload),
        )
        .await?;

    let updated: UserResponse = run.validate("map updated user", || {
        Ok(exchange.expect(&ctx.expect.ok)?.json()?)
    })?;

    run.validate("check updated user", || {
        expect_eq("name", Some(UPDATED_USER.name), updated.name.as_deref())?;
        expect_eq("job", Some(UPDATED_USER.job), updated.job.as_deref())?;
        expect_present("updatedAt", updated.updated_at.as_ref())?;
        Ok(())
    })
}

async fn users_list_structure(run: &CaseRun<'_>) -> SuiteResult<()> {
    let ctx = run.context();
    let exchange = run
        .issue(
            format!("GET /users?page={}", LIST_PAGE),
            ctx.client.list_users(&ctx.request, LIST_PAGE),
        )
        .await?;

    let page: UsersPage = run.validate("map user list", || {
        Ok(exchange.expect(&ctx.expect.ok)?.json()?)
    })?;

    run.validate("check list structure", || {
        expect_eq("page", LIST_PAGE, page.page)?;
        expect_that(!page.data.is_empty(), || "data: expected users, got none".to_string())?;
        for user in &page.data {
            expect_that(user.id > 0, || format!("id: expected a positive ID, got {}", user.id))?;
            expect_that(!user.email.trim().is_empty(), || {
                format!("email: user {} has an empty email", user.id)
            })?;
        }
        Ok(())
    })
}

async fn registration(run: &CaseRun<'_>, row: RegistrationScenario) -> SuiteResult<()> {
    let ctx = run.context();
    let request = match row.password {
        Some(password) => RegistrationRequest::new(row.email, password),
        None => RegistrationRequest::without_password(row.email),
    };
    let exchange = run
        .issue("POST /register", ctx.client.register(&ctx.request, &request))
        .await?;

    let validated = run.validate(format!("expect status {}", row.expected_status), || {
        let spec = ctx.expect.for_status(row.expected_status).ok_or_else(|| {
            SuiteError::assertion(format!(
                "expected_status: {} is not an HTTP status",
                row.expected_status
            ))
        })?;
        Ok(exchange.expect(&spec)?)
    })?;

    run.validate(format!("field '{}' present", row.expected_field), || {
        let present = validated.has_field(row.expected_field)?;
        expect_that(present, || {
            format!("{}: expected field in response, got none", row.expected_field)
        })
    })?;

    run.validate("check registration outcome", || {
        let raw: RegistrationResponse = validated.json()?;
        match RegistrationOutcome::try_from(raw)? {
            RegistrationOutcome::Registered { id, token } => {
                expect_that(row.expects_success(), || {
                    format!("registration of {} unexpectedly succeeded", row.email)
                })?;
                expect_that(!id.is_empty(), || "id: expected a value, got empty".to_string())?;
                expect_that(!token.is_empty(), || {
                    "token: expected a value, got empty".to_string()
                })
            }
            RegistrationOutcome::Rejected { error } => {
                expect_that(!row.expects_success(), || {
                    format!("registration of {} rejected: {}", row.email, error)
                })?;
                match row.expected_error {
                    Some(expected) => expect_eq("error", expected, error.as_str()),
                    None => Ok(()),
                }
            }
        }
    })
}

async fn delayed_response(run: &CaseRun<'_>) -> SuiteResult<()> {
    let ctx = run.context();
    let exchange = run
        .issue(
            format!("GET /users?delay={}", DELAY_SECS),
            ctx.client.list_users_delayed(&ctx.request, DELAY_SECS),
        )
        .await?;

    let page: UsersPage = run.validate("map delayed user list", || {
        Ok(exchange.expect(&ctx.expect.ok)?.json()?)
    })?;

    run.validate("users received", || {
        expect_that(!page.data.is_empty(), || "data: expected users, got none".to_string())
    })
}

async fn partial_update(run: &CaseRun<'_>) -> SuiteResult<()> {
    let ctx = run.context();
    let payload = UserRequest::job_only(PATCHED_JOB);
    let exchange = run
        .issue(
            format!("PATCH /users/{}", PATCH_TARGET_ID),
            ctx.client.patch_user(&ctx.request, PATCH_TARGET_ID, &payload),
        )
        .await?;

    let patched: UserResponse = run.validate("map patched user", || {
        Ok(exchange.expect(&ctx.expect.ok)?.json()?)
    })?;

    run.validate("only job changed", || {
        expect_eq("job", Some(PATCHED_JOB), patched.job.as_deref())?;
        expect_absent("name", patched.name.as_ref())?;
        expect_present("updatedAt", patched.updated_at.as_ref())?;
        Ok(())
    })
}

async fn missing_user(run: &CaseRun<'_>) -> SuiteResult<()> {
    let ctx = run.context();
    let exchange = run
        .issue(
            format!("GET /users/{}", MISSING_USER_ID),
            ctx.client.get_user(&ctx.request, MISSING_USER_ID),
        )
        .await?;

    run.validate("expect 404", || {
        exchange.expect(&ctx.expect.not_found)?;
        Ok(())
    })
}
