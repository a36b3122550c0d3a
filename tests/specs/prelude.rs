//! Test helpers for the CLI behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
use std::process::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the scour binary.
pub fn scour_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("scour"))
}

/// Build a temp directory populated with `(relative_path, contents)` pairs,
/// creating parent directories as needed.
pub fn temp_file_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, contents) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, contents).unwrap();
    }
    dir
}
