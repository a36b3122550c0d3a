// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-file search: the FileContext a worker scans and the matches it emits.
//!
//! A worker opens a [`crate::walker::WalkedFile`] through
//! [`crate::input::InputSource`] and runs the pattern once over the whole
//! decoded buffer (block-buffered): a match is free to cross `\n` (e.g. a
//! multi-line regex like `/\*(.|\n)*?\*/`). `line_text` always covers the
//! match in full, from the start of the line containing `match_start` to the
//! end of the line containing `match_end` -- for a match confined to one
//! line this is just that line; for one that crosses lines, `line_text`
//! embeds the intervening `\n` bytes so `match_start..match_end` stays a
//! valid slice into it. `line_number` is always the 1-based number of the
//! line containing `match_start`.

use std::path::PathBuf;

use crate::decompress;
use crate::error::Result;
use crate::input::{self, InputSource};
use crate::pattern::CompiledPattern;
use crate::walker::WalkedFile;

/// One matched (or, under `-v`, non-matched) line -- or, for a match that
/// crosses line boundaries, the full run of lines the match spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSpan {
    /// 1-based number of the line containing the match's start.
    pub line_number: u32,
    /// Text covering the match in full (no trailing `\n`); may itself
    /// contain embedded `\n` bytes when the match spans multiple lines.
    pub line_text: String,
    /// Byte offset of the match start within `line_text` (0 under `-v`,
    /// where there is no match span to highlight).
    pub match_start: usize,
    /// Byte offset of the match end within `line_text`.
    pub match_end: usize,
    /// Up to `before_context` lines immediately preceding the match,
    /// oldest first, as `(line_number, text)`.
    pub leading_context: Vec<(u32, String)>,
    /// Up to `after_context` lines immediately following the match, in
    /// order, as `(line_number, text)`.
    pub trailing_context: Vec<(u32, String)>,
}

/// Options shaping how a single file is scanned.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Report lines that do NOT match (`-v`).
    pub invert: bool,
    /// Skip files that look binary.
    pub ignore_binary: bool,
    /// Use memory-mapped I/O above the mmap threshold.
    pub mmap: bool,
    /// Stop after this many matches in a single file.
    pub max_count: Option<usize>,
    /// Decompress gzip members before scanning.
    pub decompress: bool,
    /// Maximum nested archive depth when `decompress` is set.
    pub zmax: u32,
    /// User-asserted code page (`--encoding=`), overriding BOM detection.
    pub forced_encoding: Option<input::Encoding>,
    /// Lines of leading context to attach to each match (`-B`/`-C`).
    pub before_context: usize,
    /// Lines of trailing context to attach to each match (`-A`/`-C`).
    pub after_context: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            invert: false,
            ignore_binary: true,
            mmap: true,
            max_count: None,
            decompress: false,
            zmax: 1,
            forced_encoding: None,
            before_context: 0,
            after_context: 0,
        }
    }
}

/// The outcome of scanning one file.
#[derive(Debug, Default)]
pub struct FileResult {
    pub path: PathBuf,
    pub display_key: u64,
    pub matches: Vec<MatchSpan>,
    pub match_count: usize,
    /// The file was skipped because it looked binary.
    pub binary: bool,
}

/// Scan one file against `pattern`, honoring `opts`.
pub fn search_file(
    file: &WalkedFile,
    pattern: &CompiledPattern,
    opts: &SearchOptions,
) -> Result<FileResult> {
    let source = InputSource::open(&file.path, opts.mmap)?;
    let raw_owned;
    let raw: &[u8] = if opts.decompress && decompress::is_gzip_path(&file.path) {
        raw_owned = decompress::decompress_gzip(
            &file.path,
            source.raw_bytes(),
            file.decompress_depth,
            opts.zmax,
        )?;
        &raw_owned
    } else {
        source.raw_bytes()
    };

    if opts.ignore_binary && input::looks_binary(raw) {
        return Ok(FileResult {
            path: file.path.clone(),
            display_key: file.display_key,
            binary: true,
            ..Default::default()
        });
    }

    let content = input::decode_bytes(raw, opts.forced_encoding);
    let mut result = FileResult {
        path: file.path.clone(),
        display_key: file.display_key,
        ..Default::default()
    };

    let all_lines: Vec<&str> = content.lines().collect();

    if opts.invert {
        for (idx, line) in all_lines.iter().enumerate() {
            if pattern.find_all(line).is_empty() {
                result.matches.push(MatchSpan {
                    line_number: (idx + 1) as u32,
                    line_text: line.to_string(),
                    match_start: 0,
                    match_end: 0,
                    leading_context: context_before(&all_lines, idx, opts.before_context),
                    trailing_context: context_after(&all_lines, idx, opts.after_context),
                });
                result.match_count += 1;
                if opts.max_count.is_some_and(|max| result.match_count >= max) {
                    break;
                }
            }
        }
        return Ok(result);
    }

    let line_starts = line_start_offsets(&content);
    for m in pattern.find_all(&content) {
        let line_idx = line_starts.partition_point(|&start| start <= m.start) - 1;
        let line_start = line_starts[line_idx];
        let end_line_idx = line_starts.partition_point(|&start| start <= m.end) - 1;
        // The line containing the match's end, not its start: a
        // block-buffered match may cross `\n`, and `line_text` must cover
        // it in full so `match_end` stays a valid slice bound.
        let line_end = content[m.end..]
            .find('\n')
            .map(|p| m.end + p)
            .unwrap_or(content.len());
        result.matches.push(MatchSpan {
            line_number: (line_idx + 1) as u32,
            line_text: content[line_start..line_end].to_string(),
            match_start: m.start - line_start,
            match_end: m.end - line_start,
            leading_context: context_before(&all_lines, line_idx, opts.before_context),
            trailing_context: context_after(&all_lines, end_line_idx, opts.after_context),
        });
        result.match_count += 1;
        if opts.max_count.is_some_and(|max| result.match_count >= max) {
            break;
        }
    }

    Ok(result)
}

/// Up to `count` lines immediately before `line_idx` (0-based), oldest
/// first.
fn context_before(lines: &[&str], line_idx: usize, count: usize) -> Vec<(u32, String)> {
    if count == 0 {
        return Vec::new();
    }
    let start = line_idx.saturating_sub(count);
    (start..line_idx)
        .filter_map(|i| lines.get(i).map(|l| ((i + 1) as u32, l.to_string())))
        .collect()
}

/// Up to `count` lines immediately after the line containing the match's
/// end (0-based `end_line_idx`), in order.
fn context_after(lines: &[&str], end_line_idx: usize, count: usize) -> Vec<(u32, String)> {
    if count == 0 {
        return Vec::new();
    }
    let from = end_line_idx + 1;
    let to = (from + count).min(lines.len());
    (from..to)
        .filter_map(|i| lines.get(i).map(|l| ((i + 1) as u32, l.to_string())))
        .collect()
}

/// Byte offset of the start of each line (index 0 is always 0).
fn line_start_offsets(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in content.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
