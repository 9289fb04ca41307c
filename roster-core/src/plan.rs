//! Diff engine: canonical membership + desired set → reconciliation plan.
//!
//! Matching is by exact username. Admins are never placed in `to_remove`;
//! they are reported in `retained_admins` instead.

use std::collections::HashSet;

use serde::Serialize;

use crate::presentation::strip_annotation;
use crate::resolver::Membership;
use crate::types::Username;

/// The user-confirmed set of usernames that should hold access.
///
/// Compared by membership; entry order is kept so grants are applied in the
/// order the user chose them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredSet {
    order: Vec<Username>,
    members: HashSet<Username>,
}

impl DesiredSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from interactive labels, stripping any role annotation.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|l| Username::from(strip_annotation(l.as_ref())))
            .filter(|u| !u.as_str().is_empty())
            .collect()
    }

    /// Returns `true` if the username was not already present.
    pub fn insert(&mut self, username: Username) -> bool {
        if self.members.contains(&username) {
            return false;
        }
        self.members.insert(username.clone());
        self.order.push(username);
        true
    }

    pub fn contains(&self, username: &Username) -> bool {
        self.members.contains(username)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Username> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<Username> for DesiredSet {
    fn from_iter<I: IntoIterator<Item = Username>>(iter: I) -> Self {
        let mut set = DesiredSet::new();
        for username in iter {
            set.insert(username);
        }
        set
    }
}

/// Grants and revocations needed to reach the desired set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationPlan {
    /// Desired but without current access, in desired-set order.
    pub to_add: Vec<Username>,
    /// Holding access but not desired, in membership order. Never contains an admin.
    pub to_remove: Vec<Username>,
    /// Admins left out of the desired set; kept to prevent lockout.
    pub retained_admins: Vec<Username>,
}

impl ReconciliationPlan {
    /// `true` when there is nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute the plan for `desired` against `membership`.
pub fn diff(membership: &Membership, desired: &DesiredSet) -> ReconciliationPlan {
    let to_add = desired
        .iter()
        .filter(|u| !membership.contains(u))
        .cloned()
        .collect();

    let mut to_remove = Vec::new();
    let mut retained_admins = Vec::new();
    for collaborator in membership.iter() {
        if desired.contains(&collaborator.username) {
            continue;
        }
        if collaborator.is_admin() {
            retained_admins.push(collaborator.username.clone());
        } else {
            to_remove.push(collaborator.username.clone());
        }
    }

    ReconciliationPlan {
        to_add,
        to_remove,
        retained_admins,
    }
}

/// Plan for a repository with no prior membership: everything is added.
pub fn diff_fresh(desired: &DesiredSet) -> ReconciliationPlan {
    diff(&Membership::default(), desired)
}
