//! Error types for roster-reconcile.
//!
//! Only fatal conditions live here. Per-user apply failures are recorded in
//! the [`crate::ApplyReport`], and a declined confirmation is the clean
//! [`crate::SessionOutcome::Aborted`].

use thiserror::Error;

use roster_core::{HostingError, PromptError};

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The credential was rejected before anything was read or written.
    #[error("credential validation failed: {0}")]
    Credential(#[source] HostingError),

    #[error("repository '{repo}' not found in organization '{org}' (or you don't have access)")]
    RepositoryNotFound { org: String, repo: String },

    #[error("no repositories in '{org}' match prefix '{prefix}'")]
    NoMatchingRepositories { org: String, prefix: String },

    #[error("invalid repository name '{name}'")]
    InvalidRepositoryName { name: String },

    /// A read needed to build the plan failed.
    #[error("failed to fetch {what}: {source}")]
    Fetch {
        what: String,
        #[source]
        source: HostingError,
    },

    #[error("failed to create repository {org}/{repo}: {source}")]
    Create {
        org: String,
        repo: String,
        #[source]
        source: HostingError,
    },

    #[error("interactive input failed: {0}")]
    Prompt(#[from] PromptError),
}
