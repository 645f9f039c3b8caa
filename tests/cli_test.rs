//! Integration tests for CLI argument parsing.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn upgrade_all(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("upgrade-all"));
    cmd.env("HOME", home.path())
        .env_remove("UPGRADE_ALL_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    upgrade_all(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Update every package manager"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    upgrade_all(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_list_shows_registry_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    upgrade_all(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)macos.*xcode.*mas.*homebrew.*apt.*snap.*ruby.*rubygems.*rust")?);
    Ok(())
}

#[test]
fn cli_missing_explicit_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    upgrade_all(&home)
        .args(["--config", "/nonexistent/upgrade-all.yml", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
    Ok(())
}

#[test]
fn cli_config_from_env_var() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    upgrade_all(&home)
        .env("UPGRADE_ALL_CONFIG", "/nonexistent/from-env.yml")
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("from-env.yml"));
    Ok(())
}

#[test]
fn cli_invalid_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = home.path().join("bad.yml");
    fs::write(&config, "http:\n  timeout_secs: soon\n")?;
    upgrade_all(&home)
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    upgrade_all(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("upgrade-all"));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    upgrade_all(&home).arg("frobnicate").assert().failure();
    Ok(())
}
