//! Permission model: collapse raw flags into one ordered [`AccessLevel`].

use crate::types::{AccessLevel, LevelFlags};

/// Level granted to every newly invited collaborator.
pub const GRANT_LEVEL: AccessLevel = AccessLevel::Write;

/// Classify raw permission flags with priority `admin > maintain > write > read`.
///
/// Total: no flags set (or only `triage`/`pull`) yields [`AccessLevel::Read`].
pub fn classify(flags: &LevelFlags) -> AccessLevel {
    if flags.admin {
        AccessLevel::Admin
    } else if flags.maintain {
        AccessLevel::Maintain
    } else if flags.push {
        AccessLevel::Write
    } else {
        AccessLevel::Read
    }
}

/// Admins are never removed by a reconciliation.
pub fn is_admin(level: AccessLevel) -> bool {
    level == AccessLevel::Admin
}
