// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive query UI: an alternate-screen controller that recompiles the
//! pattern and re-runs the search pipeline as the user types, debounced so
//! every keystroke doesn't trigger a full tree walk.
//!
//! Searches run on a background thread so a slow tree never blocks the
//! keystroke-polling loop: each keystroke cancels the in-flight search via
//! its cooperative stop flag (without blocking on it -- see
//! `SearchHandle::cancel`) and starts a fresh one, and only the most
//! recently submitted search's results are ever rendered.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, unbounded};
use crossterm::event::{self, Event};
use termcolor::ColorChoice;

use crate::error::{Error, ExitCode, Result};
use crate::pattern::{CompiledPattern, MatchOptions};
use crate::runner::{RunnerConfig, SearchRunner};
use crate::screen::Screen;
use crate::search::SearchOptions;
use crate::vkey::{self, Key};
use crate::walker::{FileWalker, WalkedFile, WalkerConfig};

/// Debounce window: a keystroke younger than this doesn't trigger a
/// re-search, so rapid typing doesn't launch a tree walk per character.
const DEBOUNCE: Duration = Duration::from_millis(50);

/// Matches kept for on-screen display; enough to fill any reasonable
/// terminal without the result list growing unbounded.
const MAX_DISPLAYED_MATCHES: usize = 200;

/// One line of rendered search output: the text to print and, for an actual
/// match row (as opposed to a status message like "(invalid pattern)"), the
/// byte range within it to render highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResultRow {
    line: String,
    highlight: Option<(usize, usize)>,
}

/// A search submitted to the background thread: its cancellation flag and
/// the channel its rows arrive on.
struct SearchHandle {
    stop: Arc<AtomicBool>,
    rx: Receiver<Vec<ResultRow>>,
}

impl SearchHandle {
    /// Signal cooperative cancellation. Does not block: the worker pool
    /// observes the flag at its own polling cadence (file and 64 KiB read
    /// boundaries, per the search pipeline's cancellation contract) and its
    /// results, if any arrive late, are simply never read once a newer
    /// `SearchHandle` replaces this one.
    fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Run the interactive query UI rooted at `paths`, starting with
/// `initial_pattern` already typed in. Falls back to a one-shot search if
/// the terminal can't be placed into raw/alternate-screen mode (e.g.
/// stdout isn't a tty).
pub fn run(
    paths: Vec<PathBuf>,
    initial_pattern: String,
    walker_config: WalkerConfig,
    search_opts: SearchOptions,
) -> Result<ExitCode> {
    let mut screen = Screen::enter().map_err(io_err)?;
    if !screen.good() {
        return run_fallback(&paths, &initial_pattern, &walker_config, &search_opts);
    }

    let walker = FileWalker::new(walker_config);
    let mut collected_files = Vec::new();
    for root in &paths {
        let (collected, _stats) = walker.walk_collect(root);
        collected_files.extend(collected);
    }
    let files = Arc::new(collected_files);

    let mut query = initial_pattern;
    let mut dirty = true;
    let mut last_keystroke = Instant::now();
    let mut displayed: Vec<ResultRow> = Vec::new();
    let mut in_flight: Option<SearchHandle> = None;

    redraw(&mut screen, &query, &displayed).map_err(io_err)?;

    loop {
        if dirty && last_keystroke.elapsed() >= DEBOUNCE {
            if let Some(prev) = in_flight.take() {
                prev.cancel();
            }
            match submit_search(&query, &files, search_opts) {
                Some(handle) => in_flight = Some(handle),
                None => {
                    displayed = invalid_pattern_row();
                    redraw(&mut screen, &query, &displayed).map_err(io_err)?;
                }
            }
            dirty = false;
        }

        if let Some(handle) = &in_flight {
            if let Ok(rows) = handle.rx.try_recv() {
                displayed = rows;
                in_flight = None;
                redraw(&mut screen, &query, &displayed).map_err(io_err)?;
            }
        }

        if !event::poll(Duration::from_millis(25)).unwrap_or(false) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key_event)) => {
                let Some(key) = vkey::map_key_event(&key_event) else {
                    continue;
                };
                match key {
                    Key::CtrlC | Key::Esc | Key::Enter => break,
                    Key::Backspace => {
                        query.pop();
                        dirty = true;
                        last_keystroke = Instant::now();
                    }
                    Key::Char(c) => {
                        query.push(c);
                        dirty = true;
                        last_keystroke = Instant::now();
                    }
                    _ => {}
                }
            }
            Ok(Event::Resize(w, h)) => {
                screen.resize(w, h);
                redraw(&mut screen, &query, &displayed).map_err(io_err)?;
            }
            _ => {}
        }
    }

    if let Some(handle) = in_flight.take() {
        handle.cancel();
    }
    screen.leave().map_err(io_err)?;
    Ok(ExitCode::Match)
}

fn invalid_pattern_row() -> Vec<ResultRow> {
    vec![ResultRow {
        line: "(invalid pattern)".to_string(),
        highlight: None,
    }]
}

/// Launch a search on a background thread. Returns `None` only for an
/// empty query (nothing to dispatch, caller shows a blank result list); a
/// syntactically invalid pattern still gets a `SearchHandle`, whose rows
/// resolve to [`invalid_pattern_row`].
fn submit_search(
    query: &str,
    files: &Arc<Vec<WalkedFile>>,
    search_opts: SearchOptions,
) -> Option<SearchHandle> {
    if query.is_empty() {
        return None;
    }
    let (tx, rx) = unbounded();
    let files = Arc::clone(files);
    let query = query.to_string();
    let runner = SearchRunner::new(RunnerConfig {
        jobs: 0,
        search: search_opts,
    });
    let stop = runner.stop_flag();

    std::thread::spawn(move || {
        let rows = compute_rows(&query, &files, &runner);
        // Ignore a disconnected receiver: it means a newer search already
        // replaced this one and nobody will ever read these rows.
        let _ = tx.send(rows);
    });

    Some(SearchHandle { stop, rx })
}

/// Compile `query`, run it against `files` through `runner`, and format the
/// matches into display rows. Empty query yields no rows; an unparseable
/// pattern yields [`invalid_pattern_row`].
fn compute_rows(query: &str, files: &[WalkedFile], runner: &SearchRunner) -> Vec<ResultRow> {
    if query.is_empty() {
        return Vec::new();
    }
    let pattern = match CompiledPattern::compile_with_options(query, MatchOptions::default()) {
        Ok(p) => Arc::new(p),
        Err(_) => return invalid_pattern_row(),
    };
    let results = runner.run(files, &pattern);
    let mut rows = Vec::new();
    'outer: for result in &results {
        for m in &result.matches {
            let prefix = format!("{}:{}:", result.path.display(), m.line_number);
            let highlight = Some((prefix.len() + m.match_start, prefix.len() + m.match_end));
            let mut line = prefix;
            line.push_str(&m.line_text);
            rows.push(ResultRow { line, highlight });
            if rows.len() >= MAX_DISPLAYED_MATCHES {
                break 'outer;
            }
        }
    }
    rows
}

fn redraw(screen: &mut Screen, query: &str, rows: &[ResultRow]) -> io::Result<()> {
    screen.clear()?;
    screen.put_line(0, &format!("> {}", query))?;
    let visible_rows = screen.height().saturating_sub(2) as usize;
    for (i, row) in rows.iter().take(visible_rows).enumerate() {
        let line_row = (i + 2) as u16;
        match row.highlight {
            Some((start, end)) => {
                screen.put_line_with_highlight(line_row, &row.line, start, end)?;
            }
            None => screen.put_line(line_row, &row.line)?,
        }
    }
    screen.flush()
}

/// One-shot search used when the terminal can't support the interactive
/// screen; prints through the same text formatter the non-interactive path
/// uses.
fn run_fallback(
    paths: &[PathBuf],
    query: &str,
    walker_config: &WalkerConfig,
    search_opts: &SearchOptions,
) -> Result<ExitCode> {
    let walker = FileWalker::new(walker_config.clone());
    let mut files = Vec::new();
    for root in paths {
        let (collected, _stats) = walker.walk_collect(root);
        files.extend(collected);
    }
    let pattern = Arc::new(CompiledPattern::compile(query)?);
    let runner = SearchRunner::new(RunnerConfig {
        jobs: 0,
        search: *search_opts,
    });
    let results = runner.run(&files, &pattern);

    let mut formatter =
        crate::output::text::TextFormatter::new(ColorChoice::Auto, crate::output::FormatOptions::default());
    let mut any = false;
    let show_filename = files.len() > 1;
    for result in &results {
        if formatter
            .write_file_result(result, show_filename)
            .map_err(io_err)?
        {
            any = true;
        }
    }
    formatter.flush().map_err(io_err)?;
    Ok(if any { ExitCode::Match } else { ExitCode::NoMatch })
}

fn io_err(e: std::io::Error) -> Error {
    Error::Internal(e.to_string())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
