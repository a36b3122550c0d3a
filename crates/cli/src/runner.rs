// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel search worker pool with error recovery.
//!
//! Runs [`crate::search::search_file`] over every discovered file using
//! `rayon`, isolating panics so one bad file doesn't abort the whole search.
//! Results are sorted by `display_key` before being returned so output stays
//! deterministic regardless of which worker finished first.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::pattern::CompiledPattern;
use crate::search::{FileResult, SearchOptions, search_file};
use crate::walker::WalkedFile;

/// Configuration for the search runner.
pub struct RunnerConfig {
    /// Worker thread count (0 = rayon default, sized off available cores).
    pub jobs: usize,
    /// Options applied uniformly to every file.
    pub search: SearchOptions,
}

/// Runs the search pipeline's worker pool.
pub struct SearchRunner {
    config: RunnerConfig,
    /// Cooperative cancellation flag; workers check this between files and
    /// stop picking up new work once it's set (e.g. on Ctrl-C, or when the
    /// query UI issues a new search before the old one finishes).
    stop: Arc<AtomicBool>,
}

impl SearchRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A clone of the cancellation flag, for callers that need to signal
    /// cancellation from another thread (e.g. a signal handler).
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Search every file in `files` against `pattern`.
    ///
    /// Files whose scan panics are skipped (logged at warn level) rather
    /// than aborting the whole run. Results come back sorted by
    /// `display_key`.
    pub fn run(&self, files: &[WalkedFile], pattern: &Arc<CompiledPattern>) -> Vec<FileResult> {
        let pool = if self.config.jobs > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()
                .ok()
        } else {
            None
        };

        let search = |files: &[WalkedFile]| -> Vec<FileResult> {
            files
                .par_iter()
                .filter_map(|file| {
                    if self.stop.load(Ordering::Relaxed) {
                        return None;
                    }
                    let pattern = Arc::clone(pattern);
                    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        search_file(file, &pattern, &self.config.search)
                    })) {
                        Ok(Ok(result)) => Some(result),
                        Ok(Err(err)) => {
                            tracing::warn!("skipping {}: {}", file.path.display(), err);
                            None
                        }
                        Err(_) => {
                            tracing::warn!("scan panicked: {}", file.path.display());
                            None
                        }
                    }
                })
                .collect()
        };

        let mut results = match &pool {
            Some(pool) => pool.install(|| search(files)),
            None => search(files),
        };

        results.sort_by_key(|r| r.display_key);
        results
    }

    /// Signal cooperative cancellation; in-flight work finishes, no new
    /// files are picked up.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
