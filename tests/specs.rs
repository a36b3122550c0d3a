//! Behavioral specifications for the scour CLI.
//!
//! These tests are black-box: they invoke the built binary and verify
//! stdout, stderr, and exit codes rather than calling library functions
//! directly, so they catch the same class of bug a user hitting the CLI
//! would (argument parsing, formatter wiring, encoding edge cases).

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/scenarios.rs"]
mod scenarios;

#[path = "specs/options.rs"]
mod options;

use prelude::*;

#[test]
fn bare_invocation_without_pattern_fails() {
    scour_cmd().assert().failure();
}

#[test]
fn help_exits_successfully() {
    scour_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("scour"));
}

#[test]
fn version_exits_successfully() {
    scour_cmd().arg("--version").assert().success();
}

#[test]
fn no_match_exits_with_code_one() {
    let dir = temp_file_tree(&[("f.txt", "alpha\nbeta\n")]);
    scour_cmd()
        .arg("zzz")
        .arg("f.txt")
        .current_dir(dir.path())
        .assert()
        .code(1);
}

#[test]
fn match_exits_with_code_zero() {
    let dir = temp_file_tree(&[("f.txt", "alpha\nbeta\n")]);
    scour_cmd()
        .arg("alpha")
        .arg("f.txt")
        .current_dir(dir.path())
        .assert()
        .code(0);
}
