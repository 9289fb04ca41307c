//! Argument parsing and setup failures that never reach the network.

use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn roster_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roster").expect("roster binary");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().expect("home");
    roster_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("create"))
        .stdout(contains("manage"))
        .stdout(contains("list"));
}

#[test]
fn missing_config_is_reported() {
    let home = TempDir::new().expect("home");
    roster_cmd(home.path())
        .args(["manage", "--repo", "team-api"])
        .assert()
        .failure()
        .stderr(contains("error loading config"))
        .stderr(contains("config file not found"));
}

#[test]
fn missing_token_is_reported_before_any_request() {
    let home = TempDir::new().expect("home");
    std::fs::write(
        home.path().join("config.yaml"),
        "organization: acme\nprefix: team-\nusers: [alice]\n",
    )
    .expect("write config");

    roster_cmd(home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("GitHub token is required"));
}

#[test]
fn blank_token_counts_as_missing() {
    let home = TempDir::new().expect("home");
    let config = home.path().join("custom.yaml");
    std::fs::write(&config, "organization: acme\n").expect("write config");

    roster_cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["--github-token", "  ", "create"])
        .assert()
        .failure()
        .stderr(contains("GitHub token is required"));
}

#[test]
fn home_config_is_found() {
    let home = TempDir::new().expect("home");
    let cwd = TempDir::new().expect("cwd");
    std::fs::create_dir_all(home.path().join(".roster")).expect("mkdir");
    std::fs::write(
        home.path().join(".roster").join("config.yaml"),
        "organization: ''\n",
    )
    .expect("write config");

    roster_cmd(home.path())
        .current_dir(cwd.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("organization"));
}
