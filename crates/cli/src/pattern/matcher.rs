//! Compiled pattern matchers with automatic optimization.
//!
//! [`CompiledPattern::compile`] inspects the pattern text and the requested
//! [`MatchOptions`] and picks the cheapest matcher shape that can satisfy
//! them: a single SIMD literal scan, an Aho-Corasick multi-literal scan, or
//! the general regex engine. Selection happens once at compile time; the
//! resulting `CompiledPattern` is stateless and safe to share across worker
//! threads behind an `Arc`.

use aho_corasick::AhoCorasick;
use memchr::memmem::Finder;
use regex::{Regex, RegexBuilder};

/// Options that shape how a pattern is compiled and matched.
///
/// `invert` is not consulted by the matcher itself (inversion is a
/// search-pipeline concern, applied to whole lines after matching) but is
/// kept here so callers have one place to thread match-affecting flags
/// through to the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// Case-insensitive matching (Unicode-aware for the regex path).
    pub ignore_case: bool,
    /// Anchor the match at word boundaries (`\b...\b`).
    pub whole_word: bool,
    /// Require the match to span an entire line (`^...$`).
    pub whole_line: bool,
    /// Treat the pattern as a literal string, not a regex (`-F`).
    pub fixed_strings: bool,
}

/// A compiled pattern optimized for its structure.
pub enum CompiledPattern {
    /// Single literal string (fastest).
    Literal(LiteralMatcher),
    /// Multiple literal strings (Aho-Corasick).
    MultiLiteral(MultiLiteralMatcher),
    /// Full regex (most flexible).
    Regex(RegexMatcher),
}

/// Matcher for single literal strings using SIMD-optimized memchr.
pub struct LiteralMatcher {
    pattern: String,
    finder: Finder<'static>,
    ignore_case: bool,
}

/// Matcher for multiple literal strings using an Aho-Corasick automaton.
pub struct MultiLiteralMatcher {
    automaton: AhoCorasick,
}

/// Matcher for complex regex patterns.
pub struct RegexMatcher {
    regex: Regex,
}

/// A match found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Byte offset where match starts.
    pub start: usize,
    /// Byte offset where match ends.
    pub end: usize,
}

/// A match with resolved line number.
#[derive(Debug, Clone)]
pub struct LineMatch {
    /// 1-based line number.
    pub line: u32,
    /// The matched text.
    pub text: String,
    /// Byte offset in file.
    pub offset: usize,
}

/// Error during pattern compilation.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

impl CompiledPattern {
    /// Compile a pattern string into an optimized matcher using default
    /// options (case-sensitive, no boundary anchoring, regex syntax).
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        Self::compile_with_options(pattern, MatchOptions::default())
    }

    /// Compile a pattern string under the given [`MatchOptions`].
    ///
    /// Automatically selects the cheapest matcher shape:
    /// - plain literal, no boundary/case folding required -> [`LiteralMatcher`]
    /// - plain literal with case-insensitivity, no boundary -> [`LiteralMatcher`]
    ///   (case-folded)
    /// - pure alternation of literals, no boundary/case folding -> [`MultiLiteralMatcher`]
    /// - anything else (word/line boundaries, general regex syntax) -> [`RegexMatcher`]
    pub fn compile_with_options(
        pattern: &str,
        opts: MatchOptions,
    ) -> Result<Self, PatternError> {
        let needs_boundary = opts.whole_word || opts.whole_line;

        if opts.fixed_strings {
            if needs_boundary {
                return Ok(CompiledPattern::Regex(RegexMatcher::new_anchored(
                    &regex::escape(pattern),
                    opts,
                )?));
            }
            return Ok(CompiledPattern::Literal(LiteralMatcher::new(
                pattern,
                opts.ignore_case,
            )));
        }

        if needs_boundary {
            return Ok(CompiledPattern::Regex(RegexMatcher::new_anchored(
                pattern, opts,
            )?));
        }

        if is_literal(pattern) {
            return Ok(CompiledPattern::Literal(LiteralMatcher::new(
                pattern,
                opts.ignore_case,
            )));
        }

        if !opts.ignore_case {
            if let Some(literals) = extract_alternation_literals(pattern) {
                return Ok(CompiledPattern::MultiLiteral(MultiLiteralMatcher::new(
                    &literals,
                )?));
            }
        }

        Ok(CompiledPattern::Regex(RegexMatcher::new(pattern, opts)?))
    }

    /// Find all matches in content.
    pub fn find_all(&self, content: &str) -> Vec<PatternMatch> {
        match self {
            CompiledPattern::Literal(m) => m.find_all(content),
            CompiledPattern::MultiLiteral(m) => m.find_all(content),
            CompiledPattern::Regex(m) => m.find_all(content),
        }
    }

    /// Find all matches with line numbers.
    pub fn find_all_with_lines(&self, content: &str) -> Vec<LineMatch> {
        self.find_all(content)
            .into_iter()
            .map(|m| {
                let line = byte_offset_to_line(content, m.start);
                let text = content[m.start..m.end].to_string();
                LineMatch {
                    line,
                    text,
                    offset: m.start,
                }
            })
            .collect()
    }
}

/// Check if pattern is a plain literal (no regex metacharacters).
fn is_literal(pattern: &str) -> bool {
    !pattern.chars().any(|c| {
        matches!(
            c,
            '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|'
        )
    })
}

/// Extract literals from patterns like "foo|bar|baz".
///
/// Returns None if the pattern is not a pure alternation of literals.
fn extract_alternation_literals(pattern: &str) -> Option<Vec<String>> {
    let parts: Vec<&str> = pattern.split('|').collect();
    if parts.len() < 2 {
        return None;
    }

    for part in &parts {
        if !is_literal(part) {
            return None;
        }
    }

    Some(parts.into_iter().map(String::from).collect())
}

impl LiteralMatcher {
    /// Create a new literal matcher.
    ///
    /// Note: we leak the (possibly case-folded) pattern string to get a
    /// `'static` lifetime for `Finder`. Acceptable since patterns are
    /// compiled once at startup and live for the program duration.
    pub fn new(pattern: &str, ignore_case: bool) -> Self {
        let needle = if ignore_case {
            pattern.to_lowercase()
        } else {
            pattern.to_string()
        };
        let needle_static: &'static str = Box::leak(needle.clone().into_boxed_str());
        Self {
            pattern: needle,
            finder: Finder::new(needle_static),
            ignore_case,
        }
    }

    pub fn find_all(&self, content: &str) -> Vec<PatternMatch> {
        if self.ignore_case {
            // Simple case fold: lower the whole window once per call. An
            // ASCII-only fast path would avoid the allocation, but this
            // path only runs for patterns that needed a boundary-free
            // case-insensitive literal scan.
            let folded = content.to_lowercase();
            return self
                .finder
                .find_iter(folded.as_bytes())
                .map(|pos| PatternMatch {
                    start: pos,
                    end: pos + self.pattern.len(),
                })
                .collect();
        }

        self.finder
            .find_iter(content.as_bytes())
            .map(|pos| PatternMatch {
                start: pos,
                end: pos + self.pattern.len(),
            })
            .collect()
    }
}

impl MultiLiteralMatcher {
    /// Create a new multi-literal matcher using Aho-Corasick.
    pub fn new(patterns: &[String]) -> Result<Self, PatternError> {
        let automaton = AhoCorasick::new(patterns)
            .map_err(|e| PatternError::InvalidPattern(format!("aho-corasick error: {}", e)))?;
        Ok(Self { automaton })
    }

    pub fn find_all(&self, content: &str) -> Vec<PatternMatch> {
        self.automaton
            .find_iter(content)
            .map(|m| PatternMatch {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

impl RegexMatcher {
    /// Create a new regex matcher, honoring `opts.ignore_case`.
    pub fn new(pattern: &str, opts: MatchOptions) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(opts.ignore_case)
            .build()?;
        Ok(Self { regex })
    }

    /// Create a regex matcher with word/line boundaries applied around the
    /// pattern text, per `opts`.
    pub fn new_anchored(pattern: &str, opts: MatchOptions) -> Result<Self, PatternError> {
        let mut wrapped = pattern.to_string();
        if opts.whole_word {
            wrapped = format!(r"\b(?:{})\b", wrapped);
        }
        if opts.whole_line {
            wrapped = format!(r"(?m)^(?:{})$", wrapped);
        }
        Self::new(&wrapped, opts)
    }

    pub fn find_all(&self, content: &str) -> Vec<PatternMatch> {
        self.regex
            .find_iter(content)
            .map(|m| PatternMatch {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

/// Convert byte offset to 1-based line number.
pub fn byte_offset_to_line(content: &str, offset: usize) -> u32 {
    content[..offset].bytes().filter(|&b| b == b'\n').count() as u32 + 1
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
