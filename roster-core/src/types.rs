//! Domain types for repository membership.
//!
//! Usernames are case-sensitive and compared by exact string match.
//! All serializable types round-trip through serde.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A hosting-platform login. Unique per repository, case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(pub String);

impl Username {
    /// Longest login the platform accepts.
    pub const MAX_LEN: usize = 39;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `s` is a well-formed login: ASCII letters, digits and single
    /// hyphens, neither leading nor trailing, at most [`Self::MAX_LEN`] long.
    ///
    /// Logins end up as URL path segments, so anything else is rejected
    /// before it reaches a desired set.
    pub fn is_valid_login(s: &str) -> bool {
        !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            && !s.starts_with('-')
            && !s.ends_with('-')
            && !s.contains("--")
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A repository name inside the configured organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoName(pub String);

impl RepoName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Access levels
// ---------------------------------------------------------------------------

/// Ordered access level: `Read < Write < Maintain < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Read,
    Write,
    Maintain,
    Admin,
}

impl AccessLevel {
    /// The grant vocabulary the hosting platform expects when adding a collaborator.
    pub fn api_permission(self) -> &'static str {
        match self {
            AccessLevel::Read => "pull",
            AccessLevel::Write => "push",
            AccessLevel::Maintain => "maintain",
            AccessLevel::Admin => "admin",
        }
    }

    /// Parse the answer of a permission-level lookup.
    ///
    /// `none` and anything unrecognised mean the user has no access.
    pub fn from_permission_str(s: &str) -> Option<AccessLevel> {
        s.parse().ok()
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Read => write!(f, "read"),
            AccessLevel::Write => write!(f, "write"),
            AccessLevel::Maintain => write!(f, "maintain"),
            AccessLevel::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(AccessLevel::Read),
            "write" => Ok(AccessLevel::Write),
            "maintain" => Ok(AccessLevel::Maintain),
            "admin" => Ok(AccessLevel::Admin),
            other => Err(format!(
                "unknown access level '{other}'; expected: read, write, maintain, admin"
            )),
        }
    }
}

/// Raw permission flags as returned by a collaborator listing.
///
/// Flags are independent; [`crate::permission::classify`] collapses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelFlags {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub maintain: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub triage: bool,
    #[serde(default)]
    pub pull: bool,
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Where knowledge of a collaborator's access came from.
///
/// A single user can carry several flags at once (e.g. declared and explicit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Provenance {
    /// Listed in the configured desired users.
    pub declared: bool,
    /// Present in the platform's direct collaborator listing.
    pub explicit: bool,
    /// Access known only through a permission-level lookup.
    pub implicit: bool,
}

impl Provenance {
    pub const EXPLICIT: Provenance = Provenance {
        declared: false,
        explicit: true,
        implicit: false,
    };
    pub const DECLARED_EXPLICIT: Provenance = Provenance {
        declared: true,
        explicit: true,
        implicit: false,
    };
    pub const DECLARED_IMPLICIT: Provenance = Provenance {
        declared: true,
        explicit: false,
        implicit: true,
    };
}

/// An entry of the platform's direct collaborator listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitCollaborator {
    pub username: Username,
    pub flags: LevelFlags,
}

impl ExplicitCollaborator {
    pub fn new(username: impl Into<Username>, flags: LevelFlags) -> Self {
        Self {
            username: username.into(),
            flags,
        }
    }
}

/// A user who currently holds access to the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub username: Username,
    pub level: AccessLevel,
    pub provenance: Provenance,
}

impl Collaborator {
    pub fn is_admin(&self) -> bool {
        crate::permission::is_admin(self.level)
    }
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

/// Summary of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub name: RepoName,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
