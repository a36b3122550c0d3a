//! Coverage for flags added on top of the matcher/output core: combined
//! `-e` patterns, forced encodings, and context lines.

use crate::prelude::*;

#[test]
fn repeatable_regexp_flag_is_combined_as_an_alternation() {
    let dir = temp_file_tree(&[("f", "alpha\nbeta\ngamma\n")]);
    scour_cmd()
        .args(["-e", "alpha", "-e", "gamma", "nomatch", "f"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(
            predicates::str::contains("alpha")
                .and(predicates::str::contains("gamma"))
                .and(predicates::str::contains("beta").not()),
        );
}

#[test]
fn unrecognized_encoding_is_an_argument_error() {
    let dir = temp_file_tree(&[("f", "hit\n")]);
    scour_cmd()
        .args(["--encoding", "latin-9000", "hit", "f"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicates::str::contains("--encoding"));
}

#[test]
fn after_context_prints_the_following_lines() {
    let dir = temp_file_tree(&[("f", "one\nhit\ntwo\nthree\n")]);
    scour_cmd()
        .args(["-A", "2", "hit", "f"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("hit\ntwo\nthree\n");
}

#[test]
fn before_context_prints_the_preceding_lines() {
    let dir = temp_file_tree(&[("f", "one\ntwo\nhit\n")]);
    scour_cmd()
        .args(["-B", "2", "hit", "f"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("one\ntwo\nhit\n");
}

#[test]
fn context_flag_sets_both_sides() {
    let dir = temp_file_tree(&[("f", "one\nhit\ntwo\n")]);
    scour_cmd()
        .args(["--context", "1", "hit", "f"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("one\nhit\ntwo\n");
}

#[test]
fn query_ui_falls_back_to_a_one_shot_search_outside_a_tty() {
    let dir = temp_file_tree(&[("f", "needle here\n")]);
    scour_cmd()
        .args(["-Q", "needle", "f"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("needle here"));
}
