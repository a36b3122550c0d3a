// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel directory traversal with gitignore support.
//!
//! Uses the `ignore` crate for efficient, parallel file discovery that
//! respects `.gitignore`, custom include/exclude globs, hidden-file policy,
//! and depth limits. Each discovered file is assigned a monotonic
//! `display_key` so the search pipeline's emitter can serialize output
//! deterministically even though workers finish out of order.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::SystemTime;

use crossbeam_channel::{Receiver, bounded};
use ignore::overrides::OverrideBuilder;
use ignore::{WalkBuilder, WalkState};

use crate::config::IgnoreConfig;

/// Helper to check if an ignore::Error is a symlink loop error.
fn is_loop_error(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. } => is_loop_error(err),
        ignore::Error::WithDepth { err, .. } => is_loop_error(err),
        ignore::Error::WithLineNumber { err, .. } => is_loop_error(err),
        _ => false,
    }
}

/// Build a WalkedFile from a directory entry and metadata.
fn build_walked_file(entry: ignore::DirEntry, size: u64, display_key: u64) -> WalkedFile {
    let (mtime_secs, mtime_nanos) = entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .map(|t| {
            let dur = t.duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
            (dur.as_secs() as i64, dur.subsec_nanos())
        })
        .unwrap_or((0, 0));

    WalkedFile {
        depth: entry.depth(),
        path: entry.into_path(),
        size,
        mtime_secs,
        mtime_nanos,
        display_key,
        decompress_depth: 0,
    }
}

/// Default maximum directory depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Directories to skip entirely during walking.
pub(crate) const SKIP_DIRECTORIES: &[&str] = &["node_modules", ".git"];

/// Walker configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum directory depth (default: 100).
    pub max_depth: Option<usize>,

    /// Glob patterns that exclude matching paths from the search.
    pub exclude_patterns: Vec<String>,

    /// Glob patterns that, if non-empty, restrict the search to matches.
    pub include_patterns: Vec<String>,

    /// Whether to respect `.gitignore` (and friends).
    pub git_ignore: bool,

    /// Whether to skip hidden files.
    pub hidden: bool,

    /// Whether to follow symlinks (the `ignore` crate detects loops).
    pub follow_symlinks: bool,

    /// Additional ignore-file names to honor besides `.gitignore`.
    pub custom_ignore_filenames: Vec<String>,

    /// Number of threads (0 = auto).
    pub threads: usize,

    /// Minimum top-level-entry estimate to prefer parallel walking.
    pub parallel_threshold: usize,

    /// Force parallel mode regardless of heuristic.
    pub force_parallel: bool,

    /// Force sequential mode regardless of heuristic.
    pub force_sequential: bool,
}

/// Default threshold for switching from sequential to parallel walking.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            exclude_patterns: Vec::new(),
            include_patterns: Vec::new(),
            git_ignore: true,
            hidden: true, // Skip hidden files by default (scour's `--hidden` turns this off)
            follow_symlinks: false,
            custom_ignore_filenames: Vec::new(),
            threads: 0,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            force_parallel: false,
            force_sequential: false,
        }
    }
}

/// A file discovered by the walker, ready to enter the search pipeline.
#[derive(Debug)]
pub struct WalkedFile {
    /// Path to the file.
    pub path: PathBuf,

    /// File size in bytes.
    pub size: u64,

    /// Modification time seconds since epoch.
    pub mtime_secs: i64,

    /// Modification time nanoseconds.
    pub mtime_nanos: u32,

    /// Directory depth from root.
    pub depth: usize,

    /// Total order used by the emitter to serialize worker output.
    pub display_key: u64,

    /// Nested-archive depth reached to produce this item (0 for plain files).
    pub decompress_depth: u32,
}

/// Statistics from a walk operation.
#[derive(Debug, Default)]
pub struct WalkStats {
    /// Total files discovered.
    pub files_found: usize,

    /// Directories skipped due to depth limit.
    pub depth_limited: usize,

    /// Symlink loops detected.
    pub symlink_loops: usize,

    /// Errors encountered.
    pub errors: usize,
}

/// Parallel file walker with gitignore support.
pub struct FileWalker {
    config: WalkerConfig,
}

impl FileWalker {
    /// Check if a directory entry should be skipped entirely.
    #[inline]
    fn should_skip_dir(entry: &ignore::DirEntry) -> bool {
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            return false;
        }

        entry
            .file_name()
            .to_str()
            .map(|name| SKIP_DIRECTORIES.contains(&name))
            .unwrap_or(false)
    }

    /// Create a new walker with the given configuration.
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Create a walker from the `[ignore]` section of a loaded config.
    pub fn from_ignore_config(ignore: &IgnoreConfig) -> Self {
        Self::new(WalkerConfig {
            exclude_patterns: ignore.patterns.clone(),
            custom_ignore_filenames: ignore.files.clone(),
            ..Default::default()
        })
    }

    /// Determine whether to use parallel walking based on heuristics.
    fn should_use_parallel(&self, root: &Path) -> bool {
        if self.config.force_parallel {
            return true;
        }
        if self.config.force_sequential {
            return false;
        }

        let entry_count = std::fs::read_dir(root)
            .map(|entries| entries.count())
            .unwrap_or(0);

        entry_count >= self.config.parallel_threshold / 10
    }

    /// Build the `ignore` crate's `WalkBuilder` for `root` per this config.
    fn build(&self, root: &Path) -> WalkBuilder {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(self.config.hidden)
            .git_ignore(self.config.git_ignore)
            .git_exclude(true)
            .git_global(true)
            .follow_links(self.config.follow_symlinks);

        for name in &self.config.custom_ignore_filenames {
            builder.add_custom_ignore_filename(name);
        }

        if let Some(depth) = self.config.max_depth {
            builder.max_depth(Some(depth));
        }

        if self.config.threads > 0 {
            builder.threads(self.config.threads);
        }

        if !self.config.exclude_patterns.is_empty() || !self.config.include_patterns.is_empty() {
            let mut override_builder = OverrideBuilder::new(root);
            for pattern in &self.config.include_patterns {
                let _ = override_builder.add(pattern);
            }
            for pattern in &self.config.exclude_patterns {
                let _ = override_builder.add(&format!("!{}", pattern));
            }
            if let Ok(overrides) = override_builder.build() {
                builder.overrides(overrides);
            }
        }

        builder.filter_entry(|entry| {
            !entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
                || !entry
                    .file_name()
                    .to_str()
                    .map(|name| SKIP_DIRECTORIES.contains(&name))
                    .unwrap_or(false)
        });

        builder
    }

    /// Walk `root`, returning a receiver of discovered files streamed as
    /// they are found, plus a handle that yields stats once draining
    /// completes.
    pub fn walk(&self, root: &Path) -> (Receiver<WalkedFile>, WalkHandle) {
        let (tx, rx) = bounded(1000);
        let builder = self.build(root);
        let use_parallel = self.should_use_parallel(root);

        let handle = if use_parallel {
            Self::walk_parallel(builder, tx)
        } else {
            Self::walk_sequential(builder, tx)
        };

        (rx, handle)
    }

    fn walk_parallel(builder: WalkBuilder, tx: crossbeam_channel::Sender<WalkedFile>) -> WalkHandle {
        let walker = builder.build_parallel();

        let files_found = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(AtomicUsize::new(0));
        let symlink_loops = Arc::new(AtomicUsize::new(0));
        let next_key = Arc::new(AtomicU64::new(0));

        let stats_files = Arc::clone(&files_found);
        let stats_errors = Arc::clone(&errors);
        let stats_loops = Arc::clone(&symlink_loops);

        let handle = std::thread::spawn(move || {
            walker.run(|| {
                let tx = tx.clone();
                let files_found = Arc::clone(&stats_files);
                let errors = Arc::clone(&stats_errors);
                let symlink_loops = Arc::clone(&stats_loops);
                let next_key = Arc::clone(&next_key);

                Box::new(move |entry| match entry {
                    Ok(entry) => {
                        if Self::should_skip_dir(&entry) {
                            return WalkState::Skip;
                        }

                        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
                        if !is_file {
                            return WalkState::Continue;
                        }

                        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                        let key = next_key.fetch_add(1, Ordering::Relaxed);
                        let walked = build_walked_file(entry, size, key);

                        files_found.fetch_add(1, Ordering::Relaxed);

                        if tx.send(walked).is_err() {
                            return WalkState::Quit;
                        }

                        WalkState::Continue
                    }
                    Err(err) => {
                        if is_loop_error(&err) {
                            tracing::warn!("symlink loop detected: {}", err);
                            symlink_loops.fetch_add(1, Ordering::Relaxed);
                        } else {
                            tracing::warn!("walk error: {}", err);
                            errors.fetch_add(1, Ordering::Relaxed);
                        }
                        WalkState::Continue
                    }
                })
            });

            WalkStats {
                files_found: stats_files.load(Ordering::Relaxed),
                errors: stats_errors.load(Ordering::Relaxed),
                symlink_loops: stats_loops.load(Ordering::Relaxed),
                ..Default::default()
            }
        });

        WalkHandle { handle }
    }

    fn walk_sequential(
        builder: WalkBuilder,
        tx: crossbeam_channel::Sender<WalkedFile>,
    ) -> WalkHandle {
        let walker = builder.build();

        let handle = std::thread::spawn(move || {
            let mut files_found = 0usize;
            let mut errors = 0usize;
            let mut symlink_loops = 0usize;
            let mut next_key = 0u64;

            for entry in walker {
                match entry {
                    Ok(entry) => {
                        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
                        if !is_file {
                            continue;
                        }

                        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                        let key = next_key;
                        next_key += 1;
                        let walked = build_walked_file(entry, size, key);

                        files_found += 1;

                        if tx.send(walked).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        if is_loop_error(&err) {
                            tracing::warn!("symlink loop detected: {}", err);
                            symlink_loops += 1;
                        } else {
                            tracing::warn!("walk error: {}", err);
                            errors += 1;
                        }
                    }
                }
            }

            WalkStats {
                files_found,
                errors,
                symlink_loops,
                ..Default::default()
            }
        });

        WalkHandle { handle }
    }

    /// Walk and collect all files (convenience method for small directories
    /// and for tests).
    pub fn walk_collect(&self, root: &Path) -> (Vec<WalkedFile>, WalkStats) {
        let (rx, handle) = self.walk(root);
        let files: Vec<_> = rx.iter().collect();
        let stats = handle.join();
        (files, stats)
    }
}

/// Handle to a running walk operation.
pub struct WalkHandle {
    handle: std::thread::JoinHandle<WalkStats>,
}

impl WalkHandle {
    /// Wait for the walk to complete and return stats.
    pub fn join(self) -> WalkStats {
        self.handle.join().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
