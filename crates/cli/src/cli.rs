// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::Parser;

/// A fast, grep-compatible file-pattern search tool.
#[derive(Parser)]
#[command(name = "scour")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pattern to search for.
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Files or directories to search (default: current directory).
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Use specific config file.
    #[arg(short = 'C', long = "config", global = true, env = "SCOUR_CONFIG")]
    pub config: Option<PathBuf>,

    // -- Matching behavior --
    /// Case-insensitive matching.
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Match only whole words.
    #[arg(short = 'w', long)]
    pub whole_word: bool,

    /// Match only whole lines.
    #[arg(short = 'x', long)]
    pub whole_line: bool,

    /// Invert match: select non-matching lines.
    #[arg(short = 'v', long)]
    pub invert_match: bool,

    /// Interpret PATTERN as a fixed string, not a regex.
    #[arg(short = 'F', long)]
    pub fixed_strings: bool,

    /// Interpret PATTERN as an extended regular expression (default).
    #[arg(short = 'E', long)]
    pub extended_regexp: bool,

    /// Interpret PATTERN as a Perl-compatible regular expression.
    ///
    /// Not supported: only the `regex` crate's automaton-based backend is
    /// wired in, which does not implement PCRE backreferences/lookaround.
    #[arg(short = 'P', long)]
    pub perl_regexp: bool,

    /// Interpret PATTERN as a basic regular expression.
    #[arg(short = 'G', long)]
    pub basic_regexp: bool,

    /// Additional patterns to match, combined with PATTERN as an
    /// alternation. Repeatable.
    #[arg(short = 'e', long = "regexp", value_name = "PATTERN")]
    pub regexp: Vec<String>,

    /// Print NUM lines of leading context before each match.
    #[arg(short = 'B', long = "before-context", value_name = "NUM")]
    pub before_context: Option<usize>,

    /// Print NUM lines of trailing context after each match.
    #[arg(short = 'A', long = "after-context", value_name = "NUM")]
    pub after_context: Option<usize>,

    /// Print NUM lines of context both before and after each match.
    ///
    /// No short flag: `-C` is already `--config` here. Combine with
    /// `-A`/`-B` to get asymmetric context.
    #[arg(long = "context", value_name = "NUM")]
    pub context: Option<usize>,

    // -- Output control --
    /// Print only a count of matching lines per file.
    #[arg(short = 'c', long)]
    pub count: bool,

    /// Print only names of files containing a match.
    #[arg(short = 'l', long)]
    pub files_with_matches: bool,

    /// Print only names of files containing no match.
    #[arg(short = 'L', long)]
    pub files_without_match: bool,

    /// Print only the matched (non-empty) part of each line.
    #[arg(short = 'o', long)]
    pub only_matching: bool,

    /// Prefix each line of output with its line number.
    #[arg(short = 'n', long)]
    pub line_number: bool,

    /// Prefix each match with its 1-based column (byte offset).
    #[arg(short = 'k', long)]
    pub column: bool,

    /// Always print the filename prefix.
    #[arg(short = 'H', long = "with-filename")]
    pub with_filename: bool,

    /// Never print the filename prefix.
    #[arg(short = 'h', long = "no-filename")]
    pub no_filename: bool,

    /// Control color output: auto, always, never.
    #[arg(long, default_value = "auto")]
    pub color: String,

    /// Output format: text, json, csv, xml.
    #[arg(long, default_value = "text")]
    pub format: String,

    // -- Traversal --
    /// Recursively search directories.
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Recursively search directories, following symlinked directories too.
    #[arg(short = 'R')]
    pub recursive_follow: bool,

    /// Maximum directory depth to descend.
    #[arg(short = 'd', long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Search hidden files and directories.
    #[arg(long)]
    pub hidden: bool,

    /// Glob patterns restricting the search to matches.
    #[arg(long = "include", value_name = "GLOB")]
    pub include: Vec<String>,

    /// Glob patterns excluding matches from the search.
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Additional ignore-file names to honor besides `.gitignore`.
    #[arg(long = "ignore-files", value_name = "NAME")]
    pub ignore_files: Vec<String>,

    /// Follow symbolic links during traversal.
    #[arg(short = 'S', long = "follow-symlinks")]
    pub follow_symlinks: bool,

    /// Don't skip files that look binary.
    #[arg(short = 'I', long = "no-ignore-binary")]
    pub no_ignore_binary: bool,

    /// Suppress error messages about unreadable files or directories.
    #[arg(short = 's', long = "no-messages")]
    pub no_messages: bool,

    /// Force a specific input encoding instead of BOM/heuristic detection.
    #[arg(long = "encoding", value_name = "ENCODING")]
    pub encoding: Option<String>,

    // -- Decompression --
    /// Decompress gzip members before scanning.
    #[arg(short = 'z', long)]
    pub decompress: bool,

    /// Maximum nested archive depth when `-z` is set.
    #[arg(long, default_value_t = 1)]
    pub zmax: u32,

    // -- Performance --
    /// Worker thread count (0 = auto).
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,

    /// Use memory-mapped I/O above the mmap threshold.
    #[arg(long, default_value_t = true)]
    pub mmap: bool,

    // -- Interactive --
    /// Launch the interactive query UI instead of a one-shot search.
    #[arg(short = 'Q', long = "query")]
    pub query_ui: bool,

    /// Force color output (shorthand for `--color=always`).
    #[arg(long)]
    pub force_color: bool,

    /// Disable color output (shorthand for `--color=never`).
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Resolve `-A`/`-B`/`--context` into a `(before, after)` pair.
    /// `-A`/`-B` override `--context` on whichever side they're given.
    pub fn context_lines(&self) -> (usize, usize) {
        let before = self.before_context.or(self.context).unwrap_or(0);
        let after = self.after_context.or(self.context).unwrap_or(0);
        (before, after)
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
