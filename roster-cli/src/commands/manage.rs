//! `roster manage [--repo <name>] [--dry-run]`

use anyhow::{Context, Result};
use clap::Args;

use roster_core::RepoName;
use roster_reconcile::{Reconciler, SessionOptions};

use crate::output::TerminalReporter;
use crate::prompt::TerminalPrompter;
use crate::GlobalArgs;

/// Reconcile the collaborators of an existing repository.
#[derive(Args, Debug)]
pub struct ManageArgs {
    /// Repository to manage. If omitted, pick from repositories matching the prefix.
    #[arg(long)]
    pub repo: Option<String>,

    /// Show the plan without applying it.
    #[arg(long)]
    pub dry_run: bool,
}

impl ManageArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let (config, client) = super::setup(global)?;
        let org = config.organization.clone();

        let mut prompter = TerminalPrompter::new();
        let mut reporter = TerminalReporter;
        let outcome = Reconciler::new(config, &client, &mut prompter, &mut reporter)
            .with_options(SessionOptions {
                dry_run: self.dry_run,
            })
            .manage(self.repo.map(RepoName::from))
            .with_context(|| format!("manage failed in organization '{org}'"))?;

        super::print_outcome(&outcome);
        Ok(())
    }
}
