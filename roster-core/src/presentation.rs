//! Labels shown at the interactive boundary.
//!
//! Labels are a projection of structured [`Collaborator`] values. They are
//! never the source of truth: selections are mapped back through the
//! [`Choices`] table, and [`strip_annotation`] only covers free text.

use crate::resolver::Membership;
use crate::types::{Collaborator, Username};

/// `"alice (write)"`.
pub fn label(collaborator: &Collaborator) -> String {
    format!("{} ({})", collaborator.username, collaborator.level)
}

/// Bare username of a possibly annotated label: `"alice (write)"` → `"alice"`.
pub fn strip_annotation(label: &str) -> &str {
    match label.find(" (") {
        Some(idx) => label[..idx].trim(),
        None => label.trim(),
    }
}

/// Free text split into usernames, with malformed entries set aside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameList {
    pub accepted: Vec<Username>,
    /// Entries that are not valid logins, as typed (trimmed).
    pub rejected: Vec<String>,
}

/// Split comma separated free text into normalized usernames.
///
/// Empty segments are dropped; order of entry is preserved. Segments that
/// are not valid logins land in [`UsernameList::rejected`].
pub fn parse_username_list(input: &str) -> UsernameList {
    let mut list = UsernameList::default();
    for entry in input.split(',').map(strip_annotation) {
        if entry.is_empty() {
            continue;
        }
        if Username::is_valid_login(entry) {
            list.accepted.push(Username::from(entry));
        } else {
            list.rejected.push(entry.to_string());
        }
    }
    list
}

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub username: Username,
    pub label: String,
    pub selected: bool,
}

/// Option table for the membership multi-select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choices {
    choices: Vec<Choice>,
}

impl Choices {
    /// Build options from the declared users and the canonical membership.
    ///
    /// Declared users come first (annotated when they already hold access and
    /// pre-selected in that case), then every other non-admin collaborator,
    /// pre-selected. Undeclared admins are not offered.
    pub fn present(declared: &[Username], membership: &Membership) -> Self {
        let mut choices: Vec<Choice> = Vec::new();

        for username in declared {
            if choices.iter().any(|c| &c.username == username) {
                continue;
            }
            let choice = match membership.get(username) {
                Some(collaborator) => Choice {
                    username: username.clone(),
                    label: label(collaborator),
                    selected: true,
                },
                None => Choice {
                    username: username.clone(),
                    label: username.to_string(),
                    selected: false,
                },
            };
            choices.push(choice);
        }

        for collaborator in membership.iter() {
            if collaborator.provenance.declared || collaborator.is_admin() {
                continue;
            }
            if choices.iter().any(|c| c.username == collaborator.username) {
                continue;
            }
            choices.push(Choice {
                username: collaborator.username.clone(),
                label: label(collaborator),
                selected: true,
            });
        }

        Self { choices }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.choices.iter().map(|c| c.label.clone()).collect()
    }

    pub fn default_labels(&self) -> Vec<String> {
        self.choices
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.label.clone())
            .collect()
    }

    /// Map selected labels back to usernames, preserving selection order.
    pub fn resolve(&self, selected: &[String]) -> Vec<Username> {
        selected
            .iter()
            .map(|label| {
                self.choices
                    .iter()
                    .find(|c| &c.label == label)
                    .map(|c| c.username.clone())
                    .unwrap_or_else(|| Username::from(strip_annotation(label)))
            })
            .collect()
    }
}
