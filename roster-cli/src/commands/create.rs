//! `roster create [--dry-run]`

use anyhow::{Context, Result};
use clap::Args;

use roster_reconcile::{Reconciler, SessionOptions};

use crate::output::TerminalReporter;
use crate::prompt::TerminalPrompter;
use crate::GlobalArgs;

/// Create a new private repository inside the configured organization.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Show what would be created without calling the API.
    #[arg(long)]
    pub dry_run: bool,
}

impl CreateArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let (config, client) = super::setup(global)?;

        let mut prompter = TerminalPrompter::new();
        let mut reporter = TerminalReporter;
        let outcome = Reconciler::new(config, &client, &mut prompter, &mut reporter)
            .with_options(SessionOptions {
                dry_run: self.dry_run,
            })
            .create()
            .context("create failed")?;

        super::print_outcome(&outcome);
        Ok(())
    }
}
