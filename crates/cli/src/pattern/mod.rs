// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern matching: the dispatch hierarchy behind every search.
//!
//! - Single literal: `memchr::memmem`
//! - Multiple literals: `aho-corasick`
//! - Word/line-anchored or otherwise complex patterns: the `regex` crate

pub mod matcher;

pub use matcher::{CompiledPattern, MatchOptions, PatternError};
#[cfg(test)]
pub(crate) use matcher::{LineMatch, byte_offset_to_line};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
