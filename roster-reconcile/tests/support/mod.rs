//! In-memory doubles for the hosting platform and the interactive input.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet, VecDeque};

use roster_core::{
    AccessLevel, Config, ExplicitCollaborator, HostingApi, HostingError, LevelFlags, PromptError,
    Prompter, RepoInfo, RepoName, Username,
};

// ---------------------------------------------------------------------------
// Hosting
// ---------------------------------------------------------------------------

/// A call that reached the fake platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Validate,
    Create(String),
    GetRepository(String),
    ListRepositories(String),
    ListCollaborators(String),
    Permission(String),
    Add(String, AccessLevel),
    Remove(String),
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        matches!(self, Call::Create(_) | Call::Add(..) | Call::Remove(_))
    }
}

#[derive(Default)]
pub struct FakeHosting {
    pub valid_credential: bool,
    pub repos: Vec<String>,
    pub collaborators: RefCell<Vec<ExplicitCollaborator>>,
    pub implicit: BTreeMap<String, AccessLevel>,
    pub failing_lookups: HashSet<String>,
    pub failing_ops: HashSet<String>,
    pub fail_listing: bool,
    pub fail_create: bool,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeHosting {
    pub fn new() -> Self {
        Self {
            valid_credential: true,
            repos: vec!["team-api".to_string(), "team-web".to_string()],
            ..Self::default()
        }
    }

    pub fn with_collaborator(self, name: &str, flags: LevelFlags) -> Self {
        self.collaborators
            .borrow_mut()
            .push(ExplicitCollaborator::new(name, flags));
        self
    }

    pub fn with_implicit(mut self, name: &str, level: AccessLevel) -> Self {
        self.implicit.insert(name.to_string(), level);
        self
    }

    pub fn failing_op(mut self, name: &str) -> Self {
        self.failing_ops.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutating).collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn transient(what: &str) -> HostingError {
        HostingError::Transient {
            message: format!("{what}: HTTP 502"),
        }
    }
}

pub fn write() -> LevelFlags {
    LevelFlags {
        push: true,
        pull: true,
        ..LevelFlags::default()
    }
}

pub fn admin() -> LevelFlags {
    LevelFlags {
        admin: true,
        maintain: true,
        push: true,
        triage: true,
        pull: true,
    }
}

impl HostingApi for FakeHosting {
    fn validate_credential(&self) -> Result<(), HostingError> {
        self.record(Call::Validate);
        if self.valid_credential {
            Ok(())
        } else {
            Err(HostingError::Auth {
                message: "Bad credentials".to_string(),
            })
        }
    }

    fn create_repository(&self, _org: &str, name: &RepoName) -> Result<(), HostingError> {
        self.record(Call::Create(name.0.clone()));
        if self.fail_create {
            return Err(HostingError::Transient {
                message: "name already exists on this account".to_string(),
            });
        }
        Ok(())
    }

    fn get_repository(&self, org: &str, name: &RepoName) -> Result<RepoInfo, HostingError> {
        self.record(Call::GetRepository(name.0.clone()));
        if !self.repos.contains(&name.0) {
            return Err(HostingError::NotFound {
                resource: format!("repository {org}/{name}"),
            });
        }
        Ok(RepoInfo {
            name: name.clone(),
            full_name: Some(format!("{org}/{name}")),
            private: true,
            html_url: None,
            updated_at: None,
        })
    }

    fn list_repositories(&self, _org: &str, prefix: &str) -> Result<Vec<RepoInfo>, HostingError> {
        self.record(Call::ListRepositories(prefix.to_string()));
        Ok(self
            .repos
            .iter()
            .filter(|r| r.starts_with(prefix))
            .map(|r| RepoInfo {
                name: RepoName::from(r.as_str()),
                full_name: None,
                private: true,
                html_url: None,
                updated_at: None,
            })
            .collect())
    }

    fn list_collaborators(
        &self,
        _org: &str,
        repo: &RepoName,
    ) -> Result<Vec<ExplicitCollaborator>, HostingError> {
        self.record(Call::ListCollaborators(repo.0.clone()));
        if self.fail_listing {
            return Err(Self::transient("collaborators"));
        }
        Ok(self.collaborators.borrow().clone())
    }

    fn get_permission_level(
        &self,
        _org: &str,
        _repo: &RepoName,
        username: &Username,
    ) -> Result<Option<AccessLevel>, HostingError> {
        self.record(Call::Permission(username.0.clone()));
        if self.failing_lookups.contains(&username.0) {
            return Err(Self::transient("permission"));
        }
        Ok(self.implicit.get(&username.0).copied())
    }

    fn add_collaborator(
        &self,
        _org: &str,
        _repo: &RepoName,
        username: &Username,
        level: AccessLevel,
    ) -> Result<(), HostingError> {
        self.record(Call::Add(username.0.clone(), level));
        if self.failing_ops.contains(&username.0) {
            return Err(Self::transient(username.as_str()));
        }
        self.collaborators
            .borrow_mut()
            .push(ExplicitCollaborator::new(username.clone(), write()));
        Ok(())
    }

    fn remove_collaborator(
        &self,
        _org: &str,
        _repo: &RepoName,
        username: &Username,
    ) -> Result<(), HostingError> {
        self.record(Call::Remove(username.0.clone()));
        if self.failing_ops.contains(&username.0) {
            return Err(Self::transient(username.as_str()));
        }
        self.collaborators
            .borrow_mut()
            .retain(|c| &c.username != username);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Prompter
// ---------------------------------------------------------------------------

/// A scripted answer, consumed in order.
#[derive(Debug, Clone)]
pub enum Answer {
    Text(&'static str),
    One(&'static str),
    /// Keep the pre-selected defaults.
    Defaults,
    /// Pick exactly these labels.
    Many(Vec<&'static str>),
    Confirm(bool),
}

/// Records every question and answers from a script.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: VecDeque<Answer>,
    pub offered: Vec<(Vec<String>, Vec<String>)>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    fn next(&mut self, prompt: &str) -> Answer {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for prompt: {prompt}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_text(&mut self, prompt: &str) -> Result<String, PromptError> {
        match self.next(prompt) {
            Answer::Text(t) => Ok(t.to_string()),
            other => panic!("expected text answer for {prompt}, got {other:?}"),
        }
    }

    fn ask_select_one(&mut self, prompt: &str, options: &[String]) -> Result<String, PromptError> {
        match self.next(prompt) {
            Answer::One(choice) => {
                assert!(options.iter().any(|o| o == choice), "{choice} not offered");
                Ok(choice.to_string())
            }
            other => panic!("expected select-one answer for {prompt}, got {other:?}"),
        }
    }

    fn ask_select_many(
        &mut self,
        prompt: &str,
        options: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>, PromptError> {
        self.offered.push((options.to_vec(), defaults.to_vec()));
        match self.next(prompt) {
            Answer::Defaults => Ok(defaults.to_vec()),
            Answer::Many(picked) => {
                for p in &picked {
                    assert!(options.iter().any(|o| o == p), "{p} not offered");
                }
                Ok(picked.into_iter().map(String::from).collect())
            }
            other => panic!("expected select-many answer for {prompt}, got {other:?}"),
        }
    }

    fn ask_confirm(&mut self, prompt: &str, _default: bool) -> Result<bool, PromptError> {
        match self.next(prompt) {
            Answer::Confirm(b) => Ok(b),
            other => panic!("expected confirm answer for {prompt}, got {other:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn config(users: &[&str]) -> Config {
    Config {
        organization: "acme".to_string(),
        prefix: "team-".to_string(),
        users: users.iter().map(|u| Username::from(*u)).collect(),
    }
}

pub fn names(list: &[&str]) -> Vec<Username> {
    list.iter().map(|n| Username::from(*n)).collect()
}
