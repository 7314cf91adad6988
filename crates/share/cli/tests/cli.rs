//! Binary tests: drive the `share` REPL through stdin.

use assert_cmd::Command;
use predicates::prelude::*;

fn share() -> Command {
    let mut cmd = Command::cargo_bin("share").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .args(["--config", "/nonexistent/share/config.toml"]);
    cmd
}

#[test]
fn splits_pool_by_score() {
    share()
        .arg("repl")
        .write_stdin("total 1000\nadd A 1\nadd B 3\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("250"))
        .stdout(predicate::str::contains("750"));
}

#[test]
fn default_pool_is_rendered_with_separators() {
    share()
        .write_stdin("show\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("500,000,000,000,000"));
}

#[test]
fn out_of_range_reserved_is_reported_and_kept() {
    share()
        .arg("repl")
        .write_stdin("total 1000\nreserved 1500\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("previous value kept"));
}

#[test]
fn manual_estimate_moves_money_out_of_the_allocated_pool() {
    share()
        .args(["--output", "json", "repl"])
        .write_stdin("total 1000\nadd A 1\nadd B 1\nestimate 1 100\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"manual_pool\": 100.0"))
        .stdout(predicate::str::contains("\"estimate\": 900.0"));
}

#[test]
fn pending_edit_can_be_cancelled() {
    share()
        .args(["--output", "json", "repl"])
        .write_stdin("total 1000\ntotal\ncancel\nshow\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("edit cancelled"))
        .stdout(predicate::str::contains("\"total_pool\": 1000.0"));
}

#[test]
fn missing_script_fails() {
    share()
        .args(["run", "/nonexistent/actions.json"])
        .assert()
        .failure();
}
