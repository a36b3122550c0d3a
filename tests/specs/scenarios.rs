//! End-to-end scenarios exercising one literal input/command/output triple
//! each, covering the matcher, search pipeline, and output formatter
//! together the way a user's invocation would.

use crate::prelude::*;

#[test]
fn literal_word_bounded_count() {
    let dir = temp_file_tree(&[("f", "patricia Patricia patrician\n")]);
    scour_cmd()
        .args(["-cw", "patricia", "f"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn multiline_regex_only_matching_does_not_crash_and_prints_the_full_match() {
    let dir = temp_file_tree(&[("f", "/* a\nb */c")]);
    scour_cmd()
        .args(["-o", "-e", r"/\*(.|\n)*?\*/", "f"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("/* a\nb */\n");
}

#[test]
fn unicode_class_only_matching() {
    let dir = temp_file_tree(&[("f", "Hello 世界\n")]);
    scour_cmd()
        .args(["-o", r"\p{Upper}\p{Lower}*", "f"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("Hello\n");
}

#[test]
fn recursive_search_respects_hidden_and_glob_filtering() {
    let dir = temp_file_tree(&[
        ("a/x.txt", "hit"),
        ("a/.hidden", "hit"),
        ("b/x.txt", "no"),
    ]);
    scour_cmd()
        .args(["-rl", "hit", "."])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(
            predicates::str::contains("a/x.txt")
                .and(predicates::str::contains(".hidden").not())
                .and(predicates::str::contains("b/x.txt").not()),
        );
}

#[test]
fn gzip_member_is_decompressed_before_matching() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write as _;

    let dir = tempfile::tempdir().unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"line1\nhit\n").unwrap();
    let compressed = encoder.finish().unwrap();
    std::fs::write(dir.path().join("f.gz"), &compressed).unwrap();

    scour_cmd()
        .args(["-z", "-n", "hit", "f.gz"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("2:hit\n");
}
