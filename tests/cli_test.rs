//! Integration tests for the command-line host.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A command isolated from the caller's home, config and CI variables.
fn updater(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("prerelease-updater"));
    cmd.env("HOME", home.path())
        .env_remove("PRERELEASE_UPDATER_CONFIG")
        .env_remove("PRERELEASE_UPDATER_RELEASE_INDEX_URL")
        .env_remove("PRERELEASE_UPDATER_HOST_VERSION")
        .env_remove("PRERELEASE_UPDATER_ALPHA_CAPABILITY")
        .env_remove("PRERELEASE_UPDATER_BETA_CHANNEL")
        .env_remove("PRERELEASE_UPDATER_SERVER_URL")
        .env_remove("RUST_LOG")
        .arg("--non-interactive")
        .arg("--state-dir")
        .arg(home.path().join("state"));
    cmd
}

fn write_config(home: &TempDir, yaml: &str) -> std::path::PathBuf {
    let path = home.path().join("updater.yml");
    fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("prerelease-updater"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Pre-release channel updater"))
        .stdout(predicate::str::contains("activate"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("prerelease-updater"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn no_subcommand_runs_check() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    updater(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pre-release channel is not enabled"));
    Ok(())
}

#[test]
fn disabled_channel_never_fetches_index() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let index = server.mock(|when, then| {
        when.method(GET).path("/releases");
        then.status(200).body("[]");
    });

    let home = TempDir::new()?;
    updater(&home)
        .env("PRERELEASE_UPDATER_RELEASE_INDEX_URL", server.url("/releases"))
        .env("PRERELEASE_UPDATER_HOST_VERSION", "1.62.0")
        .env("PRERELEASE_UPDATER_ALPHA_CAPABILITY", "true")
        .arg("check")
        .assert()
        .success();

    index.assert_calls(0);
    Ok(())
}

#[test]
fn enabled_channel_reports_empty_index() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let index = server.mock(|when, then| {
        when.method(GET).path("/releases");
        then.status(200).body("[]");
    });

    let home = TempDir::new()?;
    updater(&home)
        .env("PRERELEASE_UPDATER_RELEASE_INDEX_URL", server.url("/releases"))
        .env("PRERELEASE_UPDATER_HOST_VERSION", "1.80.0")
        .env("PRERELEASE_UPDATER_ALPHA_CAPABILITY", "true")
        .args(["check", "--no-notice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pre-release available"));

    index.assert_calls(1);
    Ok(())
}

#[test]
fn status_on_fresh_state() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    updater(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Last installed:      -"));
    Ok(())
}

#[test]
fn status_json_is_machine_readable() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let output = updater(&home).args(["status", "--json"]).output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["beta_notice_shown"], false);
    assert_eq!(report["channel_supported"], false);
    assert!(report["last_installed"].is_null());
    assert!(report.get("remote").is_none());
    Ok(())
}

#[test]
fn reset_on_fresh_state() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    updater(&home)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to reset"));
    Ok(())
}

#[test]
fn reset_all_requires_confirmation() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    updater(&home)
        .env_remove("PRERELEASE_UPDATER_PROMPT_RESET_ALL")
        .args(["reset", "--all"])
        .assert()
        .code(1);

    updater(&home)
        .args(["reset", "--all", "--yes"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn invalid_config_exits_with_config_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = write_config(&home, "network:\n  fetch_timeout_secs: 0\n");
    updater(&home)
        .arg("--config")
        .arg(&config)
        .arg("status")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fetch_timeout_secs"));
    Ok(())
}

#[test]
fn missing_config_file_exits_with_config_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    updater(&home)
        .arg("--config")
        .arg(home.path().join("nope.yml"))
        .arg("status")
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn activate_without_server_url_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = write_config(&home, "host:\n  editor_cli: /nonexistent/editor-cli\n");
    updater(&home)
        .arg("--config")
        .arg(&config)
        .arg("activate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Please set your Tabnine Enterprise server URL"));
    Ok(())
}

#[test]
fn activate_json_prints_launch_plan() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200);
    });

    let home = TempDir::new()?;
    let config = write_config(
        &home,
        &format!(
            "host:\n  editor_cli: /nonexistent/editor-cli\nenterprise:\n  server_url: {}\n",
            server.url("/")
        ),
    );
    let output = updater(&home)
        .arg("--config")
        .arg(&config)
        .args(["activate", "--json"])
        .output()?;
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(plan["args"][0], "--no_bootstrap");
    assert_eq!(plan["args"][2], "--client=vscode-enterprise");
    Ok(())
}
