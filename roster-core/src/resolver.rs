//! Membership resolver.
//!
//! Builds one canonical view of who holds access from three read-only inputs:
//!
//! 1. the declared users (config order),
//! 2. the explicit collaborator listing (platform order),
//! 3. implicit permission lookups for declared users missing from (2).
//!
//! [`lookup_implicit`] performs the lookups; [`merge`] is pure and never
//! touches the network. Declared users come first in the result, followed by
//! the remaining explicit collaborators.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;

use crate::permission::classify;
use crate::types::{AccessLevel, Collaborator, ExplicitCollaborator, Provenance, Username};

/// Canonical, immutable snapshot of current repository access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    collaborators: Vec<Collaborator>,
}

impl Membership {
    pub fn iter(&self) -> impl Iterator<Item = &Collaborator> {
        self.collaborators.iter()
    }

    pub fn get(&self, username: &Username) -> Option<&Collaborator> {
        self.collaborators.iter().find(|c| &c.username == username)
    }

    pub fn contains(&self, username: &Username) -> bool {
        self.get(username).is_some()
    }

    pub fn len(&self) -> usize {
        self.collaborators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collaborators.is_empty()
    }

    pub fn into_vec(self) -> Vec<Collaborator> {
        self.collaborators
    }
}

impl FromIterator<Collaborator> for Membership {
    fn from_iter<I: IntoIterator<Item = Collaborator>>(iter: I) -> Self {
        Self {
            collaborators: iter.into_iter().collect(),
        }
    }
}

/// Query the implicit access level of every declared user absent from the
/// explicit listing.
///
/// A failed lookup is logged and treated as "no access"; it never aborts
/// resolution. Users without access are absent from the returned map.
pub fn lookup_implicit<F, E>(
    declared: &[Username],
    explicit: &[ExplicitCollaborator],
    mut lookup: F,
) -> BTreeMap<Username, AccessLevel>
where
    F: FnMut(&Username) -> Result<Option<AccessLevel>, E>,
    E: Display,
{
    let listed: HashSet<&Username> = explicit.iter().map(|c| &c.username).collect();
    let mut seen = HashSet::new();
    let mut found = BTreeMap::new();

    for username in declared {
        if listed.contains(username) || !seen.insert(username) {
            continue;
        }
        match lookup(username) {
            Ok(Some(level)) => {
                tracing::debug!("implicit access for {username}: {level}");
                found.insert(username.clone(), level);
            }
            Ok(None) => tracing::debug!("no implicit access for {username}"),
            Err(err) => {
                tracing::warn!("permission lookup for {username} failed, assuming no access: {err}")
            }
        }
    }
    found
}

/// Merge the three inputs into a canonical [`Membership`].
pub fn merge(
    declared: &[Username],
    explicit: &[ExplicitCollaborator],
    implicit: &BTreeMap<Username, AccessLevel>,
) -> Membership {
    let mut explicit_by_name: BTreeMap<&Username, &ExplicitCollaborator> = BTreeMap::new();
    for entry in explicit {
        explicit_by_name.entry(&entry.username).or_insert(entry);
    }

    let mut covered: HashSet<&Username> = HashSet::new();
    let mut collaborators = Vec::new();

    for username in declared {
        if !covered.insert(username) {
            continue;
        }
        if let Some(entry) = explicit_by_name.get(username) {
            collaborators.push(Collaborator {
                username: username.clone(),
                level: classify(&entry.flags),
                provenance: Provenance::DECLARED_EXPLICIT,
            });
        } else if let Some(level) = implicit.get(username) {
            collaborators.push(Collaborator {
                username: username.clone(),
                level: *level,
                provenance: Provenance::DECLARED_IMPLICIT,
            });
        }
    }

    for entry in explicit {
        if !covered.insert(&entry.username) {
            continue;
        }
        collaborators.push(Collaborator {
            username: entry.username.clone(),
            level: classify(&entry.flags),
            provenance: Provenance::EXPLICIT,
        });
    }

    Membership { collaborators }
}

/// [`lookup_implicit`] followed by [`merge`].
pub fn resolve<F, E>(
    declared: &[Username],
    explicit: &[ExplicitCollaborator],
    lookup: F,
) -> Membership
where
    F: FnMut(&Username) -> Result<Option<AccessLevel>, E>,
    E: Display,
{
    let implicit = lookup_implicit(declared, explicit, lookup);
    merge(declared, explicit, &implicit)
}
