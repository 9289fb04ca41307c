//! Results of a session.

use roster_core::{HostingError, ReconciliationPlan, RepoName, Username};

use crate::event::Action;

/// Outcome of one grant or revocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub username: Username,
    pub action: Action,
    pub error: Option<HostingError>,
}

impl OperationOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Every attempted operation, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub repository: RepoName,
    pub outcomes: Vec<OperationOutcome>,
}

impl ApplyReport {
    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.len() - self.successes()
    }

    pub fn failed(&self) -> impl Iterator<Item = &OperationOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }
}

/// How a session that did not fail fatally ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The plan was applied; individual operations may still have failed.
    Applied(ApplyReport),
    /// Nothing to do; no mutating call was made.
    NoChanges,
    /// `dry_run` was set; the plan was computed but not applied.
    DryRun(ReconciliationPlan),
    /// The user declined the confirmation.
    Aborted,
}
