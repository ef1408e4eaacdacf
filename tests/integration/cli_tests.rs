//! Integration tests for the hostspec CLI surface.
//!
//! Checks against real hosts are out of reach here, so these tests cover
//! argument parsing, the exit-code contract for fatal pre-run failures, and
//! the JSON error surface.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn hostspec() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hostspec"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("TARGET_HOST");
    cmd.env_remove("SSH_USER");
    cmd.env_remove("SSH_KEY");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    hostspec().assert().code(2).stderr(predicate::str::contains(
        "Declarative acceptance checks for provisioned hosts",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    hostspec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    hostspec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostspec"));
}

#[test]
fn test_version_command_shows_version() {
    hostspec()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostspec 0.2.0"));
}

#[test]
fn test_version_command_json_outputs_version_object() {
    hostspec()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version":"0.2.0""#));
}

// --- Command hierarchy tests ---

#[test]
fn test_help_shows_check_command() {
    hostspec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_check_help_lists_connection_flags() {
    hostspec()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--spec"))
        .stdout(predicate::str::contains("--os-family"))
        .stdout(predicate::str::contains("--jobs"))
        .stdout(predicate::str::contains("--retries"))
        .stdout(predicate::str::contains("--ask-password"));
}

#[test]
fn test_check_help_mentions_env_fallbacks() {
    hostspec()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TARGET_HOST"))
        .stdout(predicate::str::contains("SSH_USER"))
        .stdout(predicate::str::contains("SSH_KEY"));
}

// --- Global flags tests ---

#[test]
fn test_global_quiet_flag_accepted() {
    hostspec().args(["--quiet", "version"]).assert().success();
}

#[test]
fn test_global_no_color_flag_accepted() {
    hostspec().args(["--no-color", "version"]).assert().success();
}

#[test]
fn test_unknown_command_exits_with_error() {
    hostspec()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// --- Fatal pre-run exit-code contract ---

#[test]
fn test_check_without_host_is_a_usage_error() {
    hostspec()
        .args(["check", "--spec"])
        .arg(fixture("acceptance.yaml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--host"));
}

#[test]
fn test_check_missing_checkfile_exits_two() {
    hostspec()
        .args(["check", "--host", "127.0.0.1", "--spec", "/nonexistent/hostspec.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("read checkfile"));
}

#[test]
fn test_check_invalid_checkfile_exits_two() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "checks:\n  - mode: \"755\"\n").expect("write");
    hostspec()
        .args(["check", "--host", "127.0.0.1", "--spec"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no subject"));
}

#[test]
fn test_check_unreachable_host_exits_two_before_any_probe() {
    // Port 1 on loopback is refused (or the ssh binary is absent) — either
    // way the preflight fails and no check runs.
    hostspec()
        .args([
            "check",
            "--host",
            "127.0.0.1",
            "--port",
            "1",
            "--connect-timeout",
            "2",
            "--timeout",
            "5",
            "--spec",
        ])
        .arg(fixture("acceptance.yaml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot reach 127.0.0.1"));
}

#[test]
fn test_check_unreachable_host_json_emits_error_object() {
    hostspec()
        .args([
            "check",
            "--json",
            "--host",
            "127.0.0.1",
            "--port",
            "1",
            "--connect-timeout",
            "2",
            "--timeout",
            "5",
            "--spec",
        ])
        .arg(fixture("acceptance.yaml"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#""error": true"#))
        .stdout(predicate::str::contains(r#""code": "fatal""#));
}

#[test]
fn test_check_host_from_environment_is_accepted() {
    // TARGET_HOST satisfies the required --host flag; the run still fails at
    // the connect preflight, not at argument parsing.
    hostspec()
        .env("TARGET_HOST", "127.0.0.1")
        .args([
            "check",
            "--port",
            "1",
            "--connect-timeout",
            "2",
            "--timeout",
            "5",
            "--spec",
        ])
        .arg(fixture("acceptance.yaml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot reach 127.0.0.1"));
}

#[test]
fn test_check_rejects_unknown_os_family() {
    hostspec()
        .args([
            "check",
            "--host",
            "127.0.0.1",
            "--os-family",
            "plan9",
            "--spec",
        ])
        .arg(fixture("acceptance.yaml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}
