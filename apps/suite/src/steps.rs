//! Named reporting steps
//!
//! Each step runs inside a `step` tracing span carrying its phase and name,
//! and ends with one `step passed` or `step failed` event. The same outcome
//! is kept in a [`StepLog`] for the run report.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::{info, info_span, warn, Instrument, Span};

use crate::error::{FailureKind, SuiteResult};

/// Orchestration phase a step belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Exercise,
    Validate,
    Teardown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Exercise => write!(f, "exercise"),
            Self::Validate => write!(f, "validate"),
            Self::Teardown => write!(f, "teardown"),
        }
    }
}

/// Outcome of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    Failed { kind: FailureKind, message: String },
}

/// One finished step
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub phase: Phase,
    pub name: String,
    pub status: StepStatus,
    pub elapsed: Duration,
}

impl StepRecord {
    pub fn passed(&self) -> bool {
        matches!(self.status, StepStatus::Passed)
    }
}

/// Steps recorded for one case, in execution order
#[derive(Debug, Default)]
pub struct StepLog {
    records: Mutex<Vec<StepRecord>>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run an async step
    pub async fn step<T, Fut>(&self, phase: Phase, name: impl Into<String>, fut: Fut) -> SuiteResult<T>
    where
        Fut: Future<Output = SuiteResult<T>>,
    {
        let name = name.into();
        let span = info_span!("step", phase = %phase, name = %name);
        let started = Instant::now();
        let result = fut.instrument(span.clone()).await;
        self.finish(&span, phase, name, started.elapsed(), &result);
        result
    }

    /// Run a synchronous step
    pub fn step_sync<T>(
        &self,
        phase: Phase,
        name: impl Into<String>,
        f: impl FnOnce() -> SuiteResult<T>,
    ) -> SuiteResult<T> {
        let name = name.into();
        let span = info_span!("step", phase = %phase, name = %name);
        let started = Instant::now();
        let result = span.in_scope(f);
        self.finish(&span, phase, name, started.elapsed(), &result);
        result
    }

    fn finish<T>(
        &self,
        span: &Span,
        phase: Phase,
        name: String,
        elapsed: Duration,
        result: &SuiteResult<T>,
    ) {
        let elapsed_ms = elapsed.as_millis() as u64;
        let status = span.in_scope(|| match result {
            Ok(_) => {
                info!(elapsed_ms, "step passed");
                StepStatus::Passed
            }
            Err(e) => {
                warn!(elapsed_ms, kind = %e.kind(), error = %e, "step failed");
                StepStatus::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                }
            }
        });

        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StepRecord {
                phase,
                name,
                status,
                elapsed,
            });
    }

    /// Snapshot of the steps recorded so far
    pub fn records(&self) -> Vec<StepRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
