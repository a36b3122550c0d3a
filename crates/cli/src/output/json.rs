// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! Unlike the streaming text formatter, JSON buffers every [`FileResult`]
//! and writes one array at the end, since a syntactically valid JSON array
//! can't be streamed a file at a time without a wrapping object.

use std::io::Write;

use serde::Serialize;

use crate::search::FileResult;

#[derive(Debug, Serialize)]
struct JsonMatch {
    line_number: u32,
    line_text: String,
    match_start: usize,
    match_end: usize,
}

#[derive(Debug, Serialize)]
struct JsonFileResult<'a> {
    path: String,
    match_count: usize,
    binary: bool,
    matches: &'a [JsonMatch],
}

/// Buffered JSON formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
    results: Vec<(std::path::PathBuf, usize, bool, Vec<JsonMatch>)>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            results: Vec::new(),
        }
    }

    /// Buffer one file's results for the final write.
    pub fn push(&mut self, result: &FileResult) {
        let matches = result
            .matches
            .iter()
            .map(|m| JsonMatch {
                line_number: m.line_number,
                line_text: m.line_text.clone(),
                match_start: m.match_start,
                match_end: m.match_end,
            })
            .collect();
        self.results.push((
            result.path.clone(),
            result.match_count,
            result.binary,
            matches,
        ));
    }

    /// Write the buffered results as a single JSON array.
    pub fn finish(mut self) -> std::io::Result<()> {
        let entries: Vec<JsonFileResult> = self
            .results
            .iter()
            .map(|(path, match_count, binary, matches)| JsonFileResult {
                path: path.display().to_string(),
                match_count: *match_count,
                binary: *binary,
                matches,
            })
            .collect();
        let json = serde_json::to_string_pretty(&entries).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
