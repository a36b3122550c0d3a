#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use std::fs;
use tempfile::TempDir;

fn create_test_tree(dir: &Path) {
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(dir.join("src/lib.rs"), "fn main() {}").unwrap();
    fs::write(dir.join("src/test.rs"), "fn test() {}").unwrap();
}

#[test]
fn walks_simple_directory() {
    let tmp = TempDir::new().unwrap();
    create_test_tree(tmp.path());

    let walker = FileWalker::new(WalkerConfig::default());
    let (files, stats) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 2);
    assert_eq!(stats.files_found, 2);
}

#[test]
fn respects_gitignore() {
    let tmp = TempDir::new().unwrap();
    create_test_tree(tmp.path());

    fs::write(tmp.path().join(".gitignore"), "*.rs\n").unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();

    let walker = FileWalker::new(WalkerConfig::default());
    let (files, _) = walker.walk_collect(tmp.path());

    assert!(
        files
            .iter()
            .all(|f| !f.path.extension().map(|e| e == "rs").unwrap_or(false)),
        "expected no .rs files but found: {:?}",
        files.iter().map(|f| &f.path).collect::<Vec<_>>()
    );
}

#[test]
fn skips_hidden_files_by_default() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".hidden"), "hit").unwrap();
    fs::write(tmp.path().join("visible.txt"), "hit").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 1);
    assert!(files[0].path.ends_with("visible.txt"));
}

#[test]
fn hidden_flag_includes_dotfiles() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".hidden"), "hit").unwrap();
    fs::write(tmp.path().join("visible.txt"), "hit").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 2);
}

#[test]
fn respects_depth_limit() {
    let tmp = TempDir::new().unwrap();

    let deep = tmp.path().join("level1/level2/level3");
    fs::create_dir_all(&deep).unwrap();
    fs::write(deep.join("file.rs"), "fn f() {}").unwrap();

    fs::write(tmp.path().join("shallow.rs"), "fn s() {}").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        max_depth: Some(2),
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 1);
    assert!(files[0].path.ends_with("shallow.rs"));
}

#[test]
fn custom_exclude_patterns() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("src")).unwrap();
    fs::write(tmp.path().join("src/lib.rs"), "fn main() {}").unwrap();
    fs::write(tmp.path().join("src/test.snapshot"), "snapshot").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        exclude_patterns: vec!["*.snapshot".to_string()],
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert!(
        files
            .iter()
            .all(|f| !f.path.to_string_lossy().contains(".snapshot")),
        "expected no .snapshot files but found: {:?}",
        files.iter().map(|f| &f.path).collect::<Vec<_>>()
    );
}

#[test]
fn include_patterns_restrict_to_matches() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("src")).unwrap();
    fs::write(tmp.path().join("src/lib.rs"), "fn main() {}").unwrap();
    fs::write(tmp.path().join("src/readme.md"), "docs").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        include_patterns: vec!["*.rs".to_string()],
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 1);
    assert!(files[0].path.ends_with("lib.rs"));
}

#[test]
fn collects_file_size() {
    let tmp = TempDir::new().unwrap();
    let content = "hello world";
    fs::write(tmp.path().join("file.txt"), content).unwrap();

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].size, content.len() as u64);
}

#[test]
fn tracks_file_depth() {
    let tmp = TempDir::new().unwrap();

    fs::create_dir_all(tmp.path().join("a/b")).unwrap();
    fs::write(tmp.path().join("root.txt"), "root").unwrap();
    fs::write(tmp.path().join("a/level1.txt"), "level1").unwrap();
    fs::write(tmp.path().join("a/b/level2.txt"), "level2").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (mut files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 3);

    files.sort_by_key(|f| f.depth);

    assert_eq!(files[0].depth, 1); // root.txt
    assert_eq!(files[1].depth, 2); // a/level1.txt
    assert_eq!(files[2].depth, 3); // a/b/level2.txt
}

#[test]
fn display_keys_are_unique() {
    let tmp = TempDir::new().unwrap();
    create_test_tree(tmp.path());

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    let mut keys: Vec<u64> = files.iter().map(|f| f.display_key).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), files.len());
}

#[test]
fn handles_empty_directory() {
    let tmp = TempDir::new().unwrap();

    let walker = FileWalker::new(WalkerConfig::default());
    let (files, stats) = walker.walk_collect(tmp.path());

    assert!(files.is_empty());
    assert_eq!(stats.files_found, 0);
    assert_eq!(stats.errors, 0);
}

#[test]
fn from_ignore_config() {
    let ignore = IgnoreConfig {
        patterns: vec!["*.log".to_string(), "tmp/".to_string()],
        files: Vec::new(),
    };

    let walker = FileWalker::from_ignore_config(&ignore);
    assert_eq!(walker.config.exclude_patterns, ignore.patterns);
}

#[test]
fn custom_ignore_filename_is_respected() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("src")).unwrap();
    fs::write(tmp.path().join("src/lib.rs"), "fn main() {}").unwrap();
    fs::write(tmp.path().join("src/skip.rs"), "fn skip() {}").unwrap();
    fs::write(tmp.path().join(".scourignore"), "skip.rs\n").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        custom_ignore_filenames: vec![".scourignore".to_string()],
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert!(
        files.iter().all(|f| !f.path.ends_with("skip.rs")),
        "expected skip.rs to be ignored but found: {:?}",
        files.iter().map(|f| &f.path).collect::<Vec<_>>()
    );
}
