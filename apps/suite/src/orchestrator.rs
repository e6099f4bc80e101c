//! Per-case lifecycle: fixture setup, exercise, validation, teardown
//!
//! A case walks `Uninitialized → FixtureCreated → RequestIssued → Validated
//! → TornDown`. Cases against fixed remote resources skip the fixture states.
//! Once a fixture exists, teardown runs whatever the exercise and validation
//! steps returned; a teardown failure is logged on its step and never replaces
//! the case's own outcome.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use reqres_client::{
    Exchange, ReqresClient, ReqresResult, RequestSpec, ResponseSpecs, UserRequest, UserResponse,
};
use reqres_shared_config::ApiConfig;
use tracing::{info_span, warn, Instrument};

use crate::cases::Case;
use crate::error::{SuiteError, SuiteResult};
use crate::report::{CaseOutcome, RunReport};
use crate::scenarios::FIXTURE_USER;
use crate::steps::{Phase, StepLog};

/// Immutable values every case of a run shares
#[derive(Debug, Clone)]
pub struct SuiteContext {
    pub client: ReqresClient,
    pub request: RequestSpec,
    pub expect: ResponseSpecs,
}

impl SuiteContext {
    /// Build the client and specifications once for a run
    pub fn new(config: &ApiConfig) -> SuiteResult<Self> {
        config.validate()?;
        Ok(Self {
            client: ReqresClient::new(config)?,
            request: RequestSpec::from_config(config)?,
            expect: ResponseSpecs::new(config.log_detail),
        })
    }
}

/// Lifecycle state of one case
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CasePhase {
    Uninitialized,
    FixtureCreated,
    RequestIssued,
    Validated,
    TornDown,
}

/// Drives one case through its phases and records its steps
#[derive(Debug)]
pub struct CaseRun<'a> {
    ctx: &'a SuiteContext,
    steps: StepLog,
    phase: Mutex<CasePhase>,
}

impl<'a> CaseRun<'a> {
    pub fn new(ctx: &'a SuiteContext) -> Self {
        Self {
            ctx,
            steps: StepLog::new(),
            phase: Mutex::new(CasePhase::Uninitialized),
        }
    }

    pub fn context(&self) -> &'a SuiteContext {
        self.ctx
    }

    pub fn phase(&self) -> CasePhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn advance(&self, next: CasePhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Create the fixture user and return its ID
    ///
    /// Any failure is wrapped as `FixtureUnavailable` and ends the case.
    pub async fn create_fixture(&self) -> SuiteResult<u64> {
        let ctx = self.ctx;
        let payload = UserRequest::new(FIXTURE_USER.name, FIXTURE_USER.job);

        let id = self
            .steps
            .step(Phase::Setup, "create fixture user", async {
                let created: UserResponse = ctx
                    .client
                    .create_user(&ctx.request, &payload)
                    .await?
                    .expect(&ctx.expect.created)?
                    .json()?;
                Ok::<_, SuiteError>(created.numeric_id()?)
            })
            .await
            .map_err(SuiteError::fixture_unavailable)?;

        self.advance(CasePhase::FixtureCreated);
        Ok(id)
    }

    /// Issue the case's request
    pub async fn issue<Fut>(&self, name: impl Into<String>, request: Fut) -> SuiteResult<Exchange>
    where
        Fut: Future<Output = ReqresResult<Exchange>>,
    {
        let exchange = self
            .steps
            .step(Phase::Exercise, name, async {
                Ok::<_, SuiteError>(request.await?)
            })
            .await?;
        self.advance(CasePhase::RequestIssued);
        Ok(exchange)
    }

    /// Run one validation step
    ///
    /// The case counts as `Validated` only while every validation so far has
    /// passed; a failing one puts it back to `RequestIssued`.
    pub fn validate<T>(
        &self,
        name: impl Into<String>,
        check: impl FnOnce() -> SuiteResult<T>,
    ) -> SuiteResult<T> {
        let result = self.steps.step_sync(Phase::Validate, name, check);
        if result.is_ok() {
            self.advance(CasePhase::Validated);
        } else {
            self.advance(CasePhase::RequestIssued);
        }
        result
    }

    /// Delete a user created by this case, expecting 204
    ///
    /// Failures are logged and recorded but not returned or retried.
    pub async fn teardown(&self, id: u64) {
        let ctx = self.ctx;
        let result = self
            .steps
            .step(Phase::Teardown, format!("delete user {}", id), async {
                ctx.client
                    .delete_user(&ctx.request, id)
                    .await?
                    .expect(&ctx.expect.no_content)?;
                Ok::<_, SuiteError>(())
            })
            .await;

        if let Err(e) = result {
            warn!(user_id = id, error = %e, "Teardown failed; fixture user may remain");
        }
        self.advance(CasePhase::TornDown);
    }

    /// Run `body` against a fresh fixture user, deleting it afterwards
    pub async fn with_fixture<F, Fut>(&self, body: F) -> SuiteResult<()>
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = SuiteResult<()>>,
    {
        let id = self.create_fixture().await?;
        let result = body(id).await;
        self.teardown(id).await;
        result
    }

    pub fn into_steps(self) -> StepLog {
        self.steps
    }
}

/// Run one case to completion
pub async fn run_case(ctx: &SuiteContext, case: &Case) -> CaseOutcome {
    let name = case.name();
    let run = CaseRun::new(ctx);
    let started = Instant::now();

    let result = case
        .execute(&run)
        .instrument(info_span!("case", name = %name))
        .await;

    let phase = run.phase();
    CaseOutcome::new(name, phase, run.into_steps().into_records(), started.elapsed(), result)
}

/// Run cases one after another; a failing case never stops the next
pub async fn run_all(ctx: &SuiteContext, cases: impl IntoIterator<Item = Case>) -> RunReport {
    let mut report = RunReport::default();
    for case in cases {
        let outcome = run_case(ctx, &case).await;
        report.push(outcome);
    }
    report
}
