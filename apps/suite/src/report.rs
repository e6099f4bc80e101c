//! Run report: one outcome per case, with its steps

use std::fmt;
use std::time::Duration;

use crate::error::{FailureKind, SuiteResult};
use crate::orchestrator::CasePhase;
use crate::steps::{Phase, StepRecord, StepStatus};

/// Why a case failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Result of one case
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub name: String,
    /// Last lifecycle state the case reached
    pub phase: CasePhase,
    pub steps: Vec<StepRecord>,
    pub elapsed: Duration,
    pub failure: Option<CaseFailure>,
}

impl CaseOutcome {
    pub fn new(
        name: String,
        phase: CasePhase,
        steps: Vec<StepRecord>,
        elapsed: Duration,
        result: SuiteResult<()>,
    ) -> Self {
        let failure = result.err().map(|e| CaseFailure {
            kind: e.kind(),
            message: e.to_string(),
        });
        Self {
            name,
            phase,
            steps,
            elapsed,
            failure,
        }
    }

    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Steps of one phase, in order
    pub fn steps_in(&self, phase: Phase) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(move |step| step.phase == phase)
    }

    /// Whether a teardown step ran and failed
    pub fn teardown_failed(&self) -> bool {
        self.steps_in(Phase::Teardown)
            .any(|step| matches!(step.status, StepStatus::Failed { .. }))
    }
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => write!(f, "PASS {} ({} ms)", self.name, self.elapsed.as_millis())?,
            Some(failure) => write!(
                f,
                "FAIL {} [{}] {} ({} ms)",
                self.name,
                failure.kind,
                failure.message,
                self.elapsed.as_millis()
            )?,
        }
        if self.teardown_failed() {
            write!(f, " (teardown failed)")?;
        }
        Ok(())
    }
}

/// Outcomes of a whole run, in execution order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub cases: Vec<CaseOutcome>,
}

impl RunReport {
    pub fn push(&mut self, outcome: CaseOutcome) {
        self.cases.push(outcome);
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.cases.iter().filter(|c| !c.passed())
    }

    /// Find a case outcome by name
    pub fn case(&self, name: &str) -> Option<&CaseOutcome> {
        self.cases.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for case in &self.cases {
            writeln!(f, "{}", case)?;
        }
        write!(
            f,
            "{} cases: {} passed, {} failed",
            self.cases.len(),
            self.passed(),
            self.failed()
        )
    }
}
