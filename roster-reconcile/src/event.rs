//! Progress events emitted by a session.

use std::fmt;

use roster_core::{HostingError, ReconciliationPlan, RepoName, Username};

/// A single membership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Remove,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => write!(f, "add"),
            Action::Remove => write!(f, "remove"),
        }
    }
}

/// Something the user should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CredentialValidated,
    FetchingRepositories { org: String, prefix: String },
    FetchingCollaborators { org: String, repo: RepoName },
    /// An admin was deselected; they will be kept to prevent lockout.
    AdminRetained { username: Username },
    /// A typed entry is not a valid login and was skipped.
    InvalidUsername { input: String },
    /// The typed repository name already carried the configured prefix.
    PrefixAlreadyPresent { prefix: String },
    Recap {
        org: String,
        repo: RepoName,
        plan: ReconciliationPlan,
    },
    NoChanges,
    Aborted,
    RepositoryCreated { org: String, repo: RepoName },
    Started { action: Action, username: Username },
    Succeeded { action: Action, username: Username },
    Failed {
        action: Action,
        username: Username,
        error: HostingError,
    },
    Finished { succeeded: usize, failed: usize },
}

/// Sink for session events. The CLI renders them; tests record them.
pub trait Reporter {
    fn report(&mut self, event: Event);
}

impl Reporter for Vec<Event> {
    fn report(&mut self, event: Event) {
        self.push(event);
    }
}
