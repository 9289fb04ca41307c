//! Roster core library — permission model, membership resolution, diffing.
//!
//! - [`types`] — usernames, access levels, collaborators
//! - [`permission`] — flag classification and the admin-protection predicate
//! - [`resolver`] — merge declared, explicit and implicit access into a [`Membership`]
//! - [`plan`] — compute a [`ReconciliationPlan`] from a [`DesiredSet`]
//! - [`presentation`] — labels shown to the user and their normalization
//! - [`config`] — YAML configuration loading
//! - [`hosting`] / [`prompt`] — capability traits implemented elsewhere

pub mod config;
pub mod error;
pub mod hosting;
pub mod permission;
pub mod plan;
pub mod presentation;
pub mod prompt;
pub mod resolver;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, HostingError, PromptError};
pub use hosting::HostingApi;
pub use permission::{classify, is_admin, GRANT_LEVEL};
pub use plan::{diff, diff_fresh, DesiredSet, ReconciliationPlan};
pub use presentation::{Choice, Choices, UsernameList};
pub use prompt::Prompter;
pub use resolver::{merge, resolve, Membership};
pub use types::{
    AccessLevel, Collaborator, ExplicitCollaborator, LevelFlags, Provenance, RepoInfo, RepoName,
    Username,
};
