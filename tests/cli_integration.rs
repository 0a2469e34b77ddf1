//! Integration tests for the Lockbox CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive prompts are bypassed with the `LOCKBOX_PASSKEY`
//! environment variable and piped stdin, so every test here runs
//! non-interactively.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the lockbox binary.
fn lockbox() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("lockbox").expect("binary should exist")
}

#[test]
fn help_flag_shows_usage() {
    lockbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Encrypted personal secret store",
        ))
        .stdout(predicate::str::contains("store"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("reset-lockout"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn version_flag_shows_version() {
    lockbox()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn no_args_shows_help() {
    // Running with no subcommand should show an error or help.
    lockbox()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_principal_rejected() {
    lockbox()
        .args(["--principal", "UPPER", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn store_then_get_roundtrip() {
    let tmp = TempDir::new().unwrap();

    // Store: plaintext from stdin, passkey from the environment.
    lockbox()
        .args(["store", "--name", "demo"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "integration-pass-1")
        .write_stdin("my piped secret\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record 1 stored"));

    // Get: same passkey, plaintext comes back on stdout.
    lockbox()
        .args(["get", "1"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "integration-pass-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("my piped secret"));
}

#[test]
fn get_with_wrong_passkey_fails() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .args(["store"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "the-right-pass")
        .write_stdin("secret\n")
        .assert()
        .success();

    lockbox()
        .args(["get", "1"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "not-the-right-pass")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong passkey"));
}

#[test]
fn lockout_after_three_wrong_attempts() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .args(["store"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "correct-pass-1")
        .write_stdin("guarded\n")
        .assert()
        .success();

    // Three wrong guesses, each its own process — the counter is
    // persisted between runs.
    for _ in 0..3 {
        lockbox()
            .args(["get", "1"])
            .current_dir(tmp.path())
            .env("LOCKBOX_PASSKEY", "wrong-guess-1")
            .assert()
            .failure();
    }

    // Fourth attempt with the CORRECT passkey is still rejected.
    lockbox()
        .args(["get", "1"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "correct-pass-1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));
}

#[test]
fn get_unknown_record_reports_not_found() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .args(["get", "99"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "whatever-pass")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn store_with_empty_stdin_fails() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .args(["store"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "some-pass-123")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to encrypt"));
}

#[test]
fn store_rejects_short_env_passkey() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .args(["store"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "short")
        .write_stdin("data\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn list_shows_stored_record_metadata() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .args(["store", "--name", "api-key"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "list-pass-123")
        .write_stdin("secret\n")
        .assert()
        .success();

    // List needs no passkey and must not print the secret.
    lockbox()
        .args(["list"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("api-key"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn delete_with_force_removes_the_record() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .args(["store"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "delete-pass-12")
        .write_stdin("doomed\n")
        .assert()
        .success();

    lockbox()
        .args(["delete", "1", "--force"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted record 1"));

    lockbox()
        .args(["get", "1"])
        .current_dir(tmp.path())
        .env("LOCKBOX_PASSKEY", "delete-pass-12")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn status_runs_without_a_store() {
    let tmp = TempDir::new().unwrap();

    lockbox()
        .args(["status"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 record(s)"));
}

#[test]
fn completions_bash_generates_script() {
    lockbox()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn completions_unknown_shell_fails() {
    lockbox()
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell"));
}
