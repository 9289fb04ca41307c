//! `roster list [--json]` — repositories matching the configured prefix.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use roster_core::{HostingApi, RepoInfo};

use crate::GlobalArgs;

/// Arguments for `roster list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct RepoRow {
    #[tabled(rename = "repository")]
    name: String,
    #[tabled(rename = "visibility")]
    visibility: String,
    #[tabled(rename = "updated")]
    updated: String,
}

impl ListArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let (config, client) = super::setup(global)?;
        client
            .validate_credential()
            .context("credential validation failed")?;

        let repos = client
            .list_repositories(&config.organization, &config.prefix)
            .with_context(|| format!("error listing repositories of '{}'", config.organization))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&repos).context("failed to serialize repository JSON")?
            );
            return Ok(());
        }

        if repos.is_empty() {
            println!("No matching repositories found.");
            return Ok(());
        }

        println!(
            "{} | prefix '{}' | {} repositories",
            config.organization.bold(),
            config.prefix,
            repos.len()
        );
        let rows: Vec<RepoRow> = repos.iter().map(row).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn row(repo: &RepoInfo) -> RepoRow {
    RepoRow {
        name: repo.name.to_string(),
        visibility: (if repo.private { "private" } else { "public" }).to_string(),
        updated: repo
            .updated_at
            .map(|at| format_age(Utc::now().signed_duration_since(at).num_seconds()))
            .unwrap_or_else(|| "-".to_string()),
    }
}

fn format_age(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 60 {
        return format!("{seconds}s ago");
    }
    if seconds < 60 * 60 {
        return format!("{}m ago", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h ago", seconds / (60 * 60));
    }
    format!("{}d ago", seconds / (60 * 60 * 24))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_buckets() {
        assert_eq!(format_age(-5), "0s ago");
        assert_eq!(format_age(90), "1m ago");
        assert_eq!(format_age(7200), "2h ago");
        assert_eq!(format_age(200_000), "2d ago");
    }
}
