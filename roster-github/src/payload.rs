//! Request and response bodies of the GitHub REST API.

use roster_core::{AccessLevel, ExplicitCollaborator, LevelFlags, Username};
use serde::{Deserialize, Serialize};

/// Entry of `GET /repos/{owner}/{repo}/collaborators`.
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorPayload {
    pub login: String,
    #[serde(default)]
    pub permissions: Option<LevelFlags>,
}

impl From<CollaboratorPayload> for ExplicitCollaborator {
    fn from(p: CollaboratorPayload) -> Self {
        ExplicitCollaborator {
            username: Username::from(p.login),
            flags: p.permissions.unwrap_or_default(),
        }
    }
}

/// Body of `GET /repos/{owner}/{repo}/collaborators/{user}/permission`.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionPayload {
    pub permission: String,
    #[serde(default)]
    pub role_name: Option<String>,
}

impl PermissionPayload {
    /// `permission` only distinguishes admin/write/read/none; `role_name`
    /// refines write into maintain.
    pub fn level(&self) -> Option<AccessLevel> {
        let base = AccessLevel::from_permission_str(&self.permission)?;
        match self.role_name.as_deref() {
            Some("maintain") if base < AccessLevel::Admin => Some(AccessLevel::Maintain),
            _ => Some(base),
        }
    }
}

/// Body of `POST /orgs/{org}/repos`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoRequest<'a> {
    pub name: &'a str,
    pub private: bool,
}

/// Body of `PUT /repos/{owner}/{repo}/collaborators/{user}`.
#[derive(Debug, Clone, Serialize)]
pub struct AddCollaboratorRequest<'a> {
    pub permission: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_without_permissions_is_read() {
        let p: CollaboratorPayload = serde_json::from_str(r#"{"login":"amy"}"#).expect("decode");
        let c = ExplicitCollaborator::from(p);
        assert_eq!(roster_core::classify(&c.flags), AccessLevel::Read);
    }

    #[test]
    fn role_name_refines_write() {
        let p: PermissionPayload =
            serde_json::from_str(r#"{"permission":"write","role_name":"maintain"}"#).expect("decode");
        assert_eq!(p.level(), Some(AccessLevel::Maintain));
    }

    #[test]
    fn none_means_no_access() {
        let p: PermissionPayload =
            serde_json::from_str(r#"{"permission":"none","role_name":"none"}"#).expect("decode");
        assert_eq!(p.level(), None);
    }
}
