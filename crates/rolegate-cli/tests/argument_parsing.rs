//! Focused CLI argument parsing and guard tests.
//!
//! Everything here runs without a server: parse failures, the version
//! command, and the signed-out guard path, which refuses before any
//! network activity.

#![allow(deprecated)] // Command::cargo_bin is deprecated but replacement requires newer assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rolegate() -> Command {
    Command::cargo_bin("rolegate").unwrap()
}

/// A command sandboxed to an empty session file, i.e. signed out.
fn signed_out(temp: &TempDir) -> Command {
    let mut cmd = rolegate();
    cmd.env(
        "ROLEGATE_SESSION_FILE",
        temp.path().join("session.json").to_str().unwrap(),
    );
    cmd
}

// ============================================================================
// Commands That Work Without Server
// ============================================================================

#[test]
fn version_command_succeeds() {
    rolegate().arg("version").assert().success();
}

#[test]
fn version_flag_shows_version() {
    rolegate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rolegate"));
}

#[test]
fn help_flag_shows_usage() {
    rolegate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("administration console"));
}

#[test]
fn user_help_lists_subcommands() {
    rolegate()
        .args(["user", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("change-role"))
        .stdout(predicate::str::contains("promote-admin"));
}

// ============================================================================
// Argument Parsing Errors
// ============================================================================

#[test]
fn no_command_shows_help() {
    rolegate()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn user_show_requires_an_id() {
    rolegate()
        .args(["user", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn change_role_rejects_unknown_role_names() {
    rolegate()
        .args(["user", "change-role", "u-1", "superadmin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown role"));
}

#[test]
fn register_requires_email_and_username() {
    rolegate()
        .arg("register")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

// ============================================================================
// Signed-Out Guard (no network involved)
// ============================================================================

#[test]
fn user_list_without_session_fails_with_login_hint() {
    let temp = TempDir::new().unwrap();
    signed_out(&temp)
        .args(["user", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"))
        .stderr(predicate::str::contains("rolegate login"));
}

#[test]
fn role_create_without_session_fails_with_login_hint() {
    let temp = TempDir::new().unwrap();
    signed_out(&temp)
        .args(["role", "create", "support"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));
}

#[test]
fn whoami_without_session_fails_with_login_hint() {
    let temp = TempDir::new().unwrap();
    signed_out(&temp)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not signed in"));
}

#[test]
fn logout_without_session_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    signed_out(&temp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("already signed out"));
}
