//! Capability set of the repository hosting platform.
//!
//! All calls are blocking. Listing calls return fully drained results; no
//! partial page is ever exposed to callers.

use crate::error::HostingError;
use crate::types::{AccessLevel, ExplicitCollaborator, RepoInfo, RepoName, Username};

pub trait HostingApi {
    /// Check that the configured credential is accepted.
    fn validate_credential(&self) -> Result<(), HostingError>;

    /// Create a private repository inside `org`.
    fn create_repository(&self, org: &str, name: &RepoName) -> Result<(), HostingError>;

    fn get_repository(&self, org: &str, name: &RepoName) -> Result<RepoInfo, HostingError>;

    /// Repositories of `org` whose name starts with `prefix`.
    fn list_repositories(&self, org: &str, prefix: &str) -> Result<Vec<RepoInfo>, HostingError>;

    /// Direct collaborators with their raw permission flags, in platform order.
    fn list_collaborators(
        &self,
        org: &str,
        repo: &RepoName,
    ) -> Result<Vec<ExplicitCollaborator>, HostingError>;

    /// Effective access of `username`, including indirect routes such as
    /// organization ownership. `Ok(None)` means no access.
    fn get_permission_level(
        &self,
        org: &str,
        repo: &RepoName,
        username: &Username,
    ) -> Result<Option<AccessLevel>, HostingError>;

    fn add_collaborator(
        &self,
        org: &str,
        repo: &RepoName,
        username: &Username,
        level: AccessLevel,
    ) -> Result<(), HostingError>;

    fn remove_collaborator(
        &self,
        org: &str,
        repo: &RepoName,
        username: &Username,
    ) -> Result<(), HostingError>;
}
