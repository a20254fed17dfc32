//! Integration tests for the `stockdeck` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live service.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `stockdeck` binary with env isolation.
///
/// Clears all `STOCKDECK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn stockdeck_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("stockdeck");
    cmd.env("HOME", "/tmp/stockdeck-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/stockdeck-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/stockdeck-cli-test-nonexistent")
        .env_remove("STOCKDECK_URL")
        .env_remove("STOCKDECK_OUTPUT")
        .env_remove("STOCKDECK_INSECURE")
        .env_remove("STOCKDECK_TIMEOUT")
        .env_remove("STOCKDECK_SERVER_URL");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = stockdeck_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    stockdeck_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("inventory")
            .and(predicate::str::contains("stocks"))
            .and(predicate::str::contains("movements"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn test_version_flag() {
    stockdeck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stockdeck"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    stockdeck_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    stockdeck_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_unknown_subcommand_fails() {
    stockdeck_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_stocks_add_requires_fields() {
    let output = stockdeck_cmd()
        .args(["stocks", "add", "--name", "Pen"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("--quantity"), "missing-flag hint:\n{text}");
}

#[test]
fn test_data_command_without_config_fails_cleanly() {
    // No config file and no --server: the command must fail with the
    // no-server diagnostic, not a panic or a hang.
    let output = stockdeck_cmd().args(["stocks", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("No service URL configured"),
        "expected no-server diagnostic:\n{text}"
    );
}

#[test]
fn test_config_path_prints_a_path() {
    stockdeck_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
