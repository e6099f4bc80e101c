//! Data-driven test suite for the reqres user and registration endpoints
//!
//! [`cases::Case::catalogue`] lists every case in run order.
//! [`orchestrator::run_all`] runs them one after another against a shared
//! [`orchestrator::SuiteContext`] and collects a [`report::RunReport`].

pub mod cases;
pub mod check;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod scenarios;
pub mod steps;

pub use cases::Case;
pub use error::{FailureKind, SuiteError, SuiteResult};
pub use orchestrator::{run_all, run_case, CasePhase, CaseRun, SuiteContext};
pub use report::{CaseFailure, CaseOutcome, RunReport};
pub use steps::{Phase, StepLog, StepRecord, StepStatus};
