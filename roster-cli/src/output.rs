//! Terminal rendering of session events.

use colored::Colorize;

use roster_core::Username;
use roster_reconcile::{Action, Event, Reporter};

/// Prints one line per event to stdout.
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn report(&mut self, event: Event) {
        match event {
            Event::CredentialValidated => println!("Validating token... {}", "OK".green()),
            Event::FetchingRepositories { org, prefix } => {
                println!("Fetching repositories in {org} with prefix '{prefix}'...")
            }
            Event::FetchingCollaborators { org, repo } => {
                println!("Fetching collaborators for {org}/{repo}...")
            }
            Event::AdminRetained { username } => println!(
                "{} Warning: User '{username}' has admin rights (and might be the owner). \
                 They will NOT be removed to prevent accidental lockout.",
                "!".yellow()
            ),
            Event::InvalidUsername { input } => println!(
                "{} Skipping '{input}': not a valid GitHub username.",
                "✗".red()
            ),
            Event::PrefixAlreadyPresent { prefix } => println!(
                "{} Warning: Prefix '{prefix}' is already present in the name. \
                 It will be stripped and re-added.",
                "!".yellow()
            ),
            Event::Recap { org, repo, plan } => {
                println!();
                println!("{}", "--- Recap ---".bold());
                println!("Repository: {org}/{repo}");
                println!("Users to REMOVE: {}", list(&plan.to_remove));
                println!("Users to ADD:    {}", list(&plan.to_add));
                if !plan.retained_admins.is_empty() {
                    println!("Admins KEPT:     {}", list(&plan.retained_admins));
                }
                println!("{}", "-------------".bold());
            }
            Event::NoChanges => println!("No changes detected."),
            Event::Aborted => println!("{}", "Aborted.".yellow()),
            Event::RepositoryCreated { org, repo } => {
                println!("{} Repository {org}/{repo} created.", "✓".green())
            }
            Event::Started { action, username } => match action {
                Action::Remove => println!("Removing user {username}..."),
                Action::Add => println!("Adding user {username}..."),
            },
            Event::Succeeded { action, username } => match action {
                Action::Remove => println!("{} User {username} removed.", "✓".green()),
                Action::Add => println!("{} User {username} added.", "✓".green()),
            },
            Event::Failed {
                action,
                username,
                error,
            } => match action {
                Action::Remove => {
                    println!("{} Error removing user {username}: {error}", "✗".red())
                }
                Action::Add => println!("{} Error adding user {username}: {error}", "✗".red()),
            },
            Event::Finished { succeeded, failed } => {
                if failed == 0 {
                    println!("Done. {succeeded} change(s) applied.");
                } else {
                    println!(
                        "Done. {succeeded} change(s) applied, {} failed.",
                        failed.to_string().red()
                    );
                }
            }
        }
    }
}

fn list(users: &[Username]) -> String {
    let names: Vec<&str> = users.iter().map(Username::as_str).collect();
    format!("[{}]", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_formats_like_a_slice() {
        assert_eq!(list(&[]), "[]");
        assert_eq!(list(&["amy".into(), "bob".into()]), "[amy, bob]");
    }
}
