//! Roster — keep a repository's collaborators in line with a declared list.
//!
//! # Usage
//!
//! ```text
//! roster [--config <path>] [--github-token <token>] create [--dry-run]
//! roster [--config <path>] [--github-token <token>] manage [--repo <name>] [--dry-run]
//! roster [--config <path>] [--github-token <token>] list [--json]
//! ```

mod commands;
mod output;
mod prompt;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{create::CreateArgs, list::ListArgs, manage::ManageArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    version,
    about = "Create repositories and reconcile their collaborators with a declared user list",
    long_about = None,
)]
struct Cli {
    /// Config file (default: ./config.yaml, then ~/.roster/config.yaml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// GitHub token.
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new private repository and invite its initial members.
    Create(CreateArgs),

    /// Reconcile the collaborators of an existing repository.
    Manage(ManageArgs),

    /// List repositories matching the configured prefix.
    List(ListArgs),
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub github_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let global = GlobalArgs {
        config: cli.config,
        github_token: cli.github_token,
    };
    match cli.command {
        Commands::Create(args) => args.run(&global),
        Commands::Manage(args) => args.run(&global),
        Commands::List(args) => args.run(&global),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
