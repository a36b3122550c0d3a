// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain text (grep-compatible) output formatter.
//!
//! Streams one [`FileResult`] at a time so large trees don't buffer their
//! whole output in memory.

use std::io::Write;

use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::{AggregationMode, FormatOptions};
use crate::color::scheme;
use crate::search::FileResult;

/// Streaming plain-text formatter.
pub struct TextFormatter {
    stdout: StandardStream,
    options: FormatOptions,
    highlight: ColorSpec,
}

impl TextFormatter {
    pub fn new(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self {
            stdout: StandardStream::stdout(color_choice),
            options,
            highlight: crate::color::match_highlight_spec(),
        }
    }

    /// Write one file's results. Returns true if anything was printed
    /// (used by the caller to decide the overall match/no-match exit code).
    pub fn write_file_result(
        &mut self,
        result: &FileResult,
        show_filename: bool,
    ) -> std::io::Result<bool> {
        match self.options.aggregation {
            AggregationMode::Count => {
                if show_filename {
                    self.write_path(&result.path)?;
                    self.write_plain(":")?;
                }
                writeln!(self.stdout, "{}", result.match_count)?;
                Ok(result.match_count > 0)
            }
            AggregationMode::FilesWithMatches => {
                if result.match_count > 0 {
                    self.write_path(&result.path)?;
                    writeln!(self.stdout)?;
                }
                Ok(result.match_count > 0)
            }
            AggregationMode::FilesWithoutMatch => {
                if result.match_count == 0 && !result.binary {
                    self.write_path(&result.path)?;
                    writeln!(self.stdout)?;
                }
                Ok(result.match_count == 0)
            }
            AggregationMode::PerLine => {
                let mut prev_trailing_end: Option<u32> = None;
                for m in &result.matches {
                    let has_context = !m.leading_context.is_empty() || !m.trailing_context.is_empty();
                    if has_context {
                        if let Some(prev_end) = prev_trailing_end {
                            let next_start = m.leading_context.first().map_or(m.line_number, |c| c.0);
                            if next_start > prev_end + 1 {
                                writeln!(self.stdout, "--")?;
                            }
                        }
                        for (line_number, text) in &m.leading_context {
                            if show_filename {
                                self.write_path(&result.path)?;
                                self.write_plain("-")?;
                            }
                            self.write_context_line_number(*line_number)?;
                            writeln!(self.stdout, "{}", text)?;
                        }
                    }

                    if show_filename {
                        self.write_path(&result.path)?;
                        self.write_plain(":")?;
                    }
                    if self.options.line_numbers {
                        self.stdout.set_color(&scheme::line_number())?;
                        write!(self.stdout, "{}", m.line_number)?;
                        self.stdout.reset()?;
                        self.write_plain(":")?;
                    }
                    if self.options.columns {
                        self.stdout.set_color(&scheme::column())?;
                        write!(self.stdout, "{}", m.match_start + 1)?;
                        self.stdout.reset()?;
                        self.write_plain(":")?;
                    }

                    if self.options.only_matching {
                        self.stdout.set_color(&self.highlight)?;
                        write!(
                            self.stdout,
                            "{}",
                            &m.line_text[m.match_start..m.match_end]
                        )?;
                        self.stdout.reset()?;
                        writeln!(self.stdout)?;
                    } else {
                        write!(self.stdout, "{}", &m.line_text[..m.match_start])?;
                        if m.match_end > m.match_start {
                            self.stdout.set_color(&self.highlight)?;
                            write!(self.stdout, "{}", &m.line_text[m.match_start..m.match_end])?;
                            self.stdout.reset()?;
                        }
                        writeln!(self.stdout, "{}", &m.line_text[m.match_end..])?;
                    }

                    for (line_number, text) in &m.trailing_context {
                        if show_filename {
                            self.write_path(&result.path)?;
                            self.write_plain("-")?;
                        }
                        self.write_context_line_number(*line_number)?;
                        writeln!(self.stdout, "{}", text)?;
                    }
                    prev_trailing_end = Some(m.trailing_context.last().map_or(m.line_number, |c| c.0));
                }
                Ok(!result.matches.is_empty())
            }
        }
    }

    /// Line-number prefix for a context line, mirroring `-n`'s formatting
    /// but with a `-` separator (grep's convention for distinguishing
    /// context from an actual match line).
    fn write_context_line_number(&mut self, line_number: u32) -> std::io::Result<()> {
        if self.options.line_numbers {
            self.stdout.set_color(&scheme::line_number())?;
            write!(self.stdout, "{}", line_number)?;
            self.stdout.reset()?;
            self.write_plain("-")?;
        }
        Ok(())
    }

    fn write_path(&mut self, path: &std::path::Path) -> std::io::Result<()> {
        self.stdout.set_color(&scheme::path())?;
        write!(self.stdout, "{}", path.display())?;
        self.stdout.reset()
    }

    fn write_plain(&mut self, s: &str) -> std::io::Result<()> {
        self.stdout.set_color(&scheme::separator())?;
        write!(self.stdout, "{}", s)?;
        self.stdout.reset()
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
