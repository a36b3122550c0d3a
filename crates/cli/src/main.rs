// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! scour CLI entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use scour::cli::Cli;
use scour::color::{is_no_color_env, resolve_color};
use scour::config::{self, Config};
use scour::discovery;
use scour::error::{Error, ExitCode, Result};
use scour::input::Encoding;
use scour::output::csv::CsvFormatter;
use scour::output::json::JsonFormatter;
use scour::output::text::TextFormatter;
use scour::output::xml::XmlFormatter;
use scour::output::{AggregationMode, FormatOptions, OutputFormat};
use scour::pattern::{CompiledPattern, MatchOptions};
use scour::runner::{RunnerConfig, SearchRunner};
use scour::search::SearchOptions;
use scour::walker::{FileWalker, WalkerConfig};

fn init_logging(suppress: bool) {
    let filter = if suppress {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_env("SCOUR_LOG").unwrap_or_else(|_| EnvFilter::new("off"))
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    // -s/--no-messages forces logging off regardless of SCOUR_LOG, since it
    // governs per-file warnings the same way grep's -s silences diagnostics.
    let suppress_messages = std::env::args().any(|a| a == "-s" || a == "--no-messages");
    init_logging(suppress_messages);
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("scour: {}", e);
            ExitCode::from(&e)
        }
    };
    std::process::exit(exit_code as i32);
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.perl_regexp {
        return Err(Error::Argument(
            "-P/--perl-regexp is not supported (no PCRE backend is wired in; use -E or -F instead)"
                .to_string(),
        ));
    }

    let cwd = std::env::current_dir().map_err(|e| Error::Io {
        path: PathBuf::from("."),
        source: e,
    })?;
    let config_path = discovery::resolve_config(cli.config.as_deref(), &cwd)?;
    let loaded = match &config_path {
        Some(path) => config::load_with_warnings(path)?,
        None => Config::default(),
    };

    let match_opts = MatchOptions {
        ignore_case: cli.ignore_case || loaded.search.ignore_case,
        whole_word: cli.whole_word,
        whole_line: cli.whole_line,
        fixed_strings: cli.fixed_strings && cli.regexp.is_empty(),
    };

    // `-e` patterns are combined with the positional PATTERN as an
    // alternation. Under `-F` this forces a regex-escaped alternation
    // rather than the literal/multi-literal fast path, since a single
    // `CompiledPattern` only ever carries one pattern string.
    let effective_pattern = if cli.regexp.is_empty() {
        cli.pattern.clone()
    } else if cli.fixed_strings {
        std::iter::once(cli.pattern.as_str())
            .chain(cli.regexp.iter().map(String::as_str))
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|")
    } else {
        std::iter::once(cli.pattern.as_str())
            .chain(cli.regexp.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("|")
    };

    let paths: Vec<PathBuf> = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths.clone()
    };

    let walker_config = WalkerConfig {
        max_depth: cli.max_depth.or(loaded.search.max_depth),
        exclude_patterns: if cli.exclude.is_empty() {
            loaded.ignore.patterns.clone()
        } else {
            cli.exclude.clone()
        },
        include_patterns: cli.include.clone(),
        git_ignore: true,
        hidden: !(cli.hidden || loaded.search.hidden),
        follow_symlinks: cli.follow_symlinks || loaded.search.follow_symlinks,
        custom_ignore_filenames: if cli.ignore_files.is_empty() {
            loaded.ignore.files.clone()
        } else {
            cli.ignore_files.clone()
        },
        ..WalkerConfig::default()
    };

    let forced_encoding = match &cli.encoding {
        Some(label) => Some(Encoding::parse(label).ok_or_else(|| {
            Error::Argument(format!(
                "unrecognized --encoding value '{}' (expected one of: utf-8, utf-16le, utf-16be, utf-32le, utf-32be)",
                label
            ))
        })?),
        None => None,
    };

    let (before_context, after_context) = cli.context_lines();
    let search_opts = SearchOptions {
        invert: cli.invert_match,
        ignore_binary: !cli.no_ignore_binary && loaded.search.ignore_binary,
        mmap: cli.mmap && loaded.search.mmap,
        max_count: None,
        decompress: cli.decompress,
        zmax: if cli.zmax > 0 {
            cli.zmax
        } else {
            loaded.search.zmax
        },
        forced_encoding,
        before_context,
        after_context,
    };

    if cli.query_ui {
        return scour::ui::run(paths, effective_pattern, walker_config, search_opts);
    }

    let pattern = Arc::new(CompiledPattern::compile_with_options(
        &effective_pattern,
        match_opts,
    )?);

    let walker = FileWalker::new(walker_config);
    let mut files = Vec::new();
    for root in &paths {
        let (collected, _stats) = walker.walk_collect(root);
        files.extend(collected);
    }

    let jobs = if cli.jobs > 0 {
        cli.jobs
    } else {
        loaded.search.jobs.unwrap_or(0)
    };
    let runner = SearchRunner::new(RunnerConfig {
        jobs,
        search: search_opts,
    });
    let results = runner.run(&files, &pattern);

    let aggregation = if cli.count {
        AggregationMode::Count
    } else if cli.files_with_matches {
        AggregationMode::FilesWithMatches
    } else if cli.files_without_match {
        AggregationMode::FilesWithoutMatch
    } else {
        AggregationMode::PerLine
    };

    let format = match cli.format.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "xml" => OutputFormat::Xml,
        _ => OutputFormat::Text,
    };

    let show_filename = if cli.with_filename {
        Some(true)
    } else if cli.no_filename {
        Some(false)
    } else {
        None
    };

    let format_opts = FormatOptions {
        aggregation,
        line_numbers: cli.line_number,
        columns: cli.column,
        show_filename,
        only_matching: cli.only_matching,
        format,
    };

    let no_color = cli.no_color || is_no_color_env();
    let color_choice = resolve_color(cli.force_color, no_color);

    let mut any_match = false;
    let stdout = std::io::stdout();
    match format {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::new(color_choice, format_opts.clone());
            let show = format_opts.resolve_show_filename(files.len());
            for result in &results {
                if formatter
                    .write_file_result(result, show)
                    .map_err(|e| Error::Internal(e.to_string()))?
                {
                    any_match = true;
                }
            }
            formatter
                .flush()
                .map_err(|e| Error::Internal(e.to_string()))?;
        }
        OutputFormat::Json => {
            let mut formatter = JsonFormatter::new(stdout.lock());
            for result in &results {
                if result.match_count > 0 {
                    any_match = true;
                }
                formatter.push(result);
            }
            formatter
                .finish()
                .map_err(|e| Error::Internal(e.to_string()))?;
        }
        OutputFormat::Csv => {
            let mut formatter = CsvFormatter::new(stdout.lock());
            for result in &results {
                if result.match_count > 0 {
                    any_match = true;
                }
                formatter
                    .write_file_result(result)
                    .map_err(|e| Error::Internal(e.to_string()))?;
            }
        }
        OutputFormat::Xml => {
            let mut formatter = XmlFormatter::new(stdout.lock());
            for result in results {
                if result.match_count > 0 {
                    any_match = true;
                }
                formatter.push(result);
            }
            formatter
                .finish()
                .map_err(|e| Error::Internal(e.to_string()))?;
        }
    }

    if any_match {
        Ok(ExitCode::Match)
    } else {
        Ok(ExitCode::NoMatch)
    }
}
