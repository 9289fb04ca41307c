//! Subcommands and the setup they share.

pub mod create;
pub mod list;
pub mod manage;

use anyhow::{bail, Context, Result};

use roster_core::{config, Config};
use roster_github::GitHubClient;
use roster_reconcile::SessionOutcome;

use crate::GlobalArgs;

/// Load the config, then build an authenticated client.
///
/// The config is read first so a broken file is reported even without a token.
pub fn setup(global: &GlobalArgs) -> Result<(Config, GitHubClient)> {
    let config = config::load(global.config.as_deref()).context("error loading config")?;
    let token = match global.github_token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => bail!(
            "GitHub token is required. Set GITHUB_TOKEN env var or use --github-token flag."
        ),
    };
    tracing::debug!(
        "organization '{}', prefix '{}', {} declared users",
        config.organization,
        config.prefix,
        config.users.len()
    );
    Ok((config, GitHubClient::new(token)))
}

/// Print the closing line for outcomes the reporter does not already cover.
pub fn print_outcome(outcome: &SessionOutcome) {
    match outcome {
        SessionOutcome::DryRun(plan) => println!(
            "[dry-run] {} to add, {} to remove; nothing applied.",
            plan.to_add.len(),
            plan.to_remove.len()
        ),
        SessionOutcome::Applied(report) if report.failures() > 0 => {
            let names: Vec<String> = report
                .failed()
                .map(|o| format!("{} {}", o.action, o.username))
                .collect();
            println!("Failed operations: {}", names.join(", "));
        }
        SessionOutcome::Applied(_) | SessionOutcome::NoChanges | SessionOutcome::Aborted => {}
    }
}
