//! Reconciliation sessions.
//!
//! ## `manage`
//!
//! ```text
//! Fetching → Presenting → AdminWarning → Collecting → Diffing → Confirming → Applying → Done
//!                                                                    └─→ Aborted (declined)
//! ```
//!
//! Any fatal error enters `Aborted` before it is returned. Nothing is written
//! before `Applying`, and within `Applying` every removal runs before any
//! addition. Each operation is independent: a failure is reported and the
//! batch continues.
//!
//! ## `create`
//!
//! The degenerate case with no prior membership: `Collecting → Diffing →
//! Confirming → Applying → Done`. The repository is created first inside
//! `Applying`; if that fails the session aborts.

use roster_core::presentation::parse_username_list;
use roster_core::{
    diff, diff_fresh, resolve, Choices, Config, DesiredSet, HostingApi, HostingError, Membership,
    Prompter, ReconciliationPlan, RepoName, Username, GRANT_LEVEL,
};

use crate::error::ReconcileError;
use crate::event::{Action, Event, Reporter};
use crate::report::{ApplyReport, OperationOutcome, SessionOutcome};
use crate::stage::Stage;

const SELECT_REPOSITORY: &str = "Select repository to manage:";
const SELECT_MEMBERS: &str = "Manage users (deselect to remove, select to add):";
const SELECT_INITIAL: &str = "Select users to add:";
const ADD_MORE: &str = "Add more users?";
const ENTER_USERS: &str = "Enter usernames (comma separated):";
const REPOSITORY_NAME: &str = "Repository name:";
const PROCEED_CHANGES: &str = "Proceed with changes?";
const PROCEED_CREATE: &str = "Proceed with creation?";

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Stop after computing the plan; make no mutating call.
    pub dry_run: bool,
}

/// One reconciliation session over borrowed capabilities.
pub struct Reconciler<'a, H: ?Sized, P: ?Sized, R: ?Sized> {
    config: Config,
    hosting: &'a H,
    prompter: &'a mut P,
    reporter: &'a mut R,
    options: SessionOptions,
    stages: Vec<Stage>,
}

impl<'a, H, P, R> Reconciler<'a, H, P, R>
where
    H: HostingApi + ?Sized,
    P: Prompter + ?Sized,
    R: Reporter + ?Sized,
{
    pub fn new(config: Config, hosting: &'a H, prompter: &'a mut P, reporter: &'a mut R) -> Self {
        Self {
            config,
            hosting,
            prompter,
            reporter,
            options: SessionOptions::default(),
            stages: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Stages entered so far, in order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Reconcile the collaborators of an existing repository.
    ///
    /// With `repo = None` the user picks among repositories matching the
    /// configured prefix.
    pub fn manage(&mut self, repo: Option<RepoName>) -> Result<SessionOutcome, ReconcileError> {
        let result = self.run_manage(repo);
        if result.is_err() {
            self.enter(Stage::Aborted);
        }
        result
    }

    /// Create a repository and invite its initial members.
    pub fn create(&mut self) -> Result<SessionOutcome, ReconcileError> {
        let result = self.run_create();
        if result.is_err() {
            self.enter(Stage::Aborted);
        }
        result
    }

    // -----------------------------------------------------------------------
    // manage
    // -----------------------------------------------------------------------

    fn run_manage(&mut self, repo: Option<RepoName>) -> Result<SessionOutcome, ReconcileError> {
        self.enter(Stage::Fetching);
        self.validate_credential()?;
        let repo = self.select_repository(repo)?;
        let membership = self.fetch_membership(&repo)?;

        self.enter(Stage::Presenting);
        let choices = Choices::present(&self.config.users, &membership);
        let selected = if choices.is_empty() {
            Vec::new()
        } else {
            self.prompter.ask_select_many(
                SELECT_MEMBERS,
                &choices.labels(),
                &choices.default_labels(),
            )?
        };
        let mut desired: DesiredSet = choices.resolve(&selected).into_iter().collect();

        self.enter(Stage::AdminWarning);
        self.warn_deselected_admins(&choices, &membership, &desired);

        self.enter(Stage::Collecting);
        self.collect_more(&mut desired)?;

        self.enter(Stage::Diffing);
        let plan = diff(&membership, &desired);

        self.confirm_and_apply(repo, plan)
    }

    fn validate_credential(&mut self) -> Result<(), ReconcileError> {
        self.hosting
            .validate_credential()
            .map_err(ReconcileError::Credential)?;
        self.reporter.report(Event::CredentialValidated);
        Ok(())
    }

    fn select_repository(&mut self, repo: Option<RepoName>) -> Result<RepoName, ReconcileError> {
        let org = self.config.organization.clone();
        if let Some(repo) = repo {
            return match self.hosting.get_repository(&org, &repo) {
                Ok(_) => Ok(repo),
                Err(HostingError::NotFound { .. }) => Err(ReconcileError::RepositoryNotFound {
                    org,
                    repo: repo.0,
                }),
                Err(source) => Err(ReconcileError::Fetch {
                    what: format!("repository {org}/{repo}"),
                    source,
                }),
            };
        }

        let prefix = self.config.prefix.clone();
        self.reporter.report(Event::FetchingRepositories {
            org: org.clone(),
            prefix: prefix.clone(),
        });
        let repos = self
            .hosting
            .list_repositories(&org, &prefix)
            .map_err(|source| ReconcileError::Fetch {
                what: format!("repositories of {org}"),
                source,
            })?;
        if repos.is_empty() {
            return Err(ReconcileError::NoMatchingRepositories { org, prefix });
        }
        let names: Vec<String> = repos.into_iter().map(|r| r.name.0).collect();
        let picked = self.prompter.ask_select_one(SELECT_REPOSITORY, &names)?;
        Ok(RepoName::from(picked))
    }

    fn fetch_membership(&mut self, repo: &RepoName) -> Result<Membership, ReconcileError> {
        let org = self.config.organization.clone();
        self.reporter.report(Event::FetchingCollaborators {
            org: org.clone(),
            repo: repo.clone(),
        });
        let explicit = self
            .hosting
            .list_collaborators(&org, repo)
            .map_err(|source| ReconcileError::Fetch {
                what: format!("collaborators of {org}/{repo}"),
                source,
            })?;
        let hosting = self.hosting;
        Ok(resolve(&self.config.users, &explicit, |username| {
            hosting.get_permission_level(&org, repo, username)
        }))
    }

    fn warn_deselected_admins(
        &mut self,
        choices: &Choices,
        membership: &Membership,
        desired: &DesiredSet,
    ) {
        for choice in choices.iter() {
            let Some(collaborator) = membership.get(&choice.username) else {
                continue;
            };
            if collaborator.is_admin() && !desired.contains(&choice.username) {
                tracing::warn!("{} is an admin and will be kept", choice.username);
                self.reporter.report(Event::AdminRetained {
                    username: choice.username.clone(),
                });
            }
        }
    }

    // -----------------------------------------------------------------------
    // create
    // -----------------------------------------------------------------------

    fn run_create(&mut self) -> Result<SessionOutcome, ReconcileError> {
        self.validate_credential()?;

        self.enter(Stage::Collecting);
        let typed = self.prompter.ask_text(REPOSITORY_NAME)?;
        let (name, had_prefix) = self.config.prefixed_name(&typed);
        if had_prefix {
            self.reporter.report(Event::PrefixAlreadyPresent {
                prefix: self.config.prefix.clone(),
            });
        }
        if name.is_empty() || name == self.config.prefix || name.contains(char::is_whitespace) {
            return Err(ReconcileError::InvalidRepositoryName { name });
        }
        let repo = RepoName::from(name);

        let declared: Vec<String> = self.config.users.iter().map(|u| u.0.clone()).collect();
        let selected = if declared.is_empty() {
            Vec::new()
        } else {
            self.prompter
                .ask_select_many(SELECT_INITIAL, &declared, &declared)?
        };
        let mut desired = DesiredSet::from_labels(&selected);
        self.collect_more(&mut desired)?;

        self.enter(Stage::Diffing);
        let plan = diff_fresh(&desired);

        self.enter(Stage::Confirming);
        let org = self.config.organization.clone();
        self.reporter.report(Event::Recap {
            org: org.clone(),
            repo: repo.clone(),
            plan: plan.clone(),
        });
        if self.options.dry_run {
            self.enter(Stage::Done);
            return Ok(SessionOutcome::DryRun(plan));
        }
        if !self.prompter.ask_confirm(PROCEED_CREATE, false)? {
            return Ok(self.abort());
        }

        self.enter(Stage::Applying);
        self.hosting
            .create_repository(&org, &repo)
            .map_err(|source| ReconcileError::Create {
                org: org.clone(),
                repo: repo.0.clone(),
                source,
            })?;
        self.reporter.report(Event::RepositoryCreated {
            org,
            repo: repo.clone(),
        });
        let report = self.apply(repo, &plan);
        self.enter(Stage::Done);
        Ok(SessionOutcome::Applied(report))
    }

    // -----------------------------------------------------------------------
    // shared
    // -----------------------------------------------------------------------

    /// Offer free-text additions, de-duplicated against `desired`.
    ///
    /// Malformed logins are reported and dropped.
    fn collect_more(&mut self, desired: &mut DesiredSet) -> Result<(), ReconcileError> {
        if !self.prompter.ask_confirm(ADD_MORE, false)? {
            return Ok(());
        }
        let text = self.prompter.ask_text(ENTER_USERS)?;
        let list = parse_username_list(&text);
        for input in list.rejected {
            tracing::warn!("skipping invalid username {input:?}");
            self.reporter.report(Event::InvalidUsername { input });
        }
        for username in list.accepted {
            if !desired.insert(username.clone()) {
                tracing::debug!("{username} already selected");
            }
        }
        Ok(())
    }

    fn confirm_and_apply(
        &mut self,
        repo: RepoName,
        plan: ReconciliationPlan,
    ) -> Result<SessionOutcome, ReconcileError> {
        self.enter(Stage::Confirming);
        self.reporter.report(Event::Recap {
            org: self.config.organization.clone(),
            repo: repo.clone(),
            plan: plan.clone(),
        });

        if plan.is_empty() {
            self.reporter.report(Event::NoChanges);
            self.enter(Stage::Done);
            return Ok(SessionOutcome::NoChanges);
        }
        if self.options.dry_run {
            self.enter(Stage::Done);
            return Ok(SessionOutcome::DryRun(plan));
        }
        if !self.prompter.ask_confirm(PROCEED_CHANGES, false)? {
            return Ok(self.abort());
        }

        self.enter(Stage::Applying);
        let report = self.apply(repo, &plan);
        self.enter(Stage::Done);
        Ok(SessionOutcome::Applied(report))
    }

    /// Removals first, then additions at [`GRANT_LEVEL`].
    fn apply(&mut self, repo: RepoName, plan: &ReconciliationPlan) -> ApplyReport {
        let org = self.config.organization.clone();
        let hosting = self.hosting;
        let mut outcomes = Vec::with_capacity(plan.to_remove.len() + plan.to_add.len());

        for username in &plan.to_remove {
            outcomes.push(self.attempt(Action::Remove, username, || {
                hosting.remove_collaborator(&org, &repo, username)
            }));
        }
        for username in &plan.to_add {
            outcomes.push(self.attempt(Action::Add, username, || {
                hosting.add_collaborator(&org, &repo, username, GRANT_LEVEL)
            }));
        }

        let report = ApplyReport {
            repository: repo,
            outcomes,
        };
        self.reporter.report(Event::Finished {
            succeeded: report.successes(),
            failed: report.failures(),
        });
        report
    }

    fn attempt<F>(&mut self, action: Action, username: &Username, op: F) -> OperationOutcome
    where
        F: FnOnce() -> Result<(), HostingError>,
    {
        self.reporter.report(Event::Started {
            action,
            username: username.clone(),
        });
        let error = match op() {
            Ok(()) => {
                self.reporter.report(Event::Succeeded {
                    action,
                    username: username.clone(),
                });
                None
            }
            Err(error) => {
                tracing::warn!("{action} {username} failed: {error}");
                self.reporter.report(Event::Failed {
                    action,
                    username: username.clone(),
                    error: error.clone(),
                });
                Some(error)
            }
        };
        OperationOutcome {
            username: username.clone(),
            action,
            error,
        }
    }

    fn abort(&mut self) -> SessionOutcome {
        self.reporter.report(Event::Aborted);
        self.enter(Stage::Aborted);
        SessionOutcome::Aborted
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!("entering stage {stage}");
        self.stages.push(stage);
    }
}
