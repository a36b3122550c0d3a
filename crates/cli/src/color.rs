//! Color detection and terminal styling.
//!
//! Detection priority:
//! 1. `--no-color` (or `SCOUR_NO_COLOR`) -> never
//! 2. `--color` -> always
//! 3. default:
//!    - If stdout is not a tty -> never
//!    - If CLAUDE_CODE, CODEX, CI, or CURSOR env var is set -> never
//!    - Else -> auto

use std::io::IsTerminal;
use termcolor::{Color, ColorSpec};
use termcolor::ColorChoice;

/// Resolve color choice from CLI flags.
///
/// Priority: no_color > force_color > auto-detect.
pub fn resolve_color(force_color: bool, no_color: bool) -> ColorChoice {
    if no_color {
        return ColorChoice::Never;
    }
    if force_color {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() {
        return ColorChoice::Never;
    }
    if is_agent_environment() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Check if running in an AI agent environment.
fn is_agent_environment() -> bool {
    std::env::var_os("CLAUDE_CODE").is_some()
        || std::env::var_os("CODEX").is_some()
        || std::env::var_os("CURSOR").is_some()
        || std::env::var_os("CI").is_some()
}

/// Check if `SCOUR_NO_COLOR` is set.
pub fn is_no_color_env() -> bool {
    std::env::var_os("SCOUR_NO_COLOR").is_some()
}

/// Parse `GREP_COLOR`/`GREP_COLORS` into the `ColorSpec` used for match
/// highlighting. `GREP_COLORS` wins if both are set; its `mt`/`ms`/`mc` field
/// supplies the SGR parameters (e.g. `01;31`). Falls back to `scheme::highlight()`
/// when neither var is set or parsing fails.
pub fn match_highlight_spec() -> ColorSpec {
    if let Ok(colors) = std::env::var("GREP_COLORS") {
        if let Some(spec) = parse_grep_colors(&colors) {
            return spec;
        }
    }
    if let Ok(legacy) = std::env::var("GREP_COLOR") {
        if let Some(spec) = sgr_to_spec(&legacy) {
            return spec;
        }
    }
    scheme::highlight()
}

/// Parse a `GREP_COLORS`-style `key=sgr:key=sgr` string and return the spec
/// for the `mt` (match), falling back to `ms`/`mc` (selected/context match).
fn parse_grep_colors(s: &str) -> Option<ColorSpec> {
    let mut mt = None;
    let mut ms = None;
    let mut mc = None;
    for field in s.split(':') {
        let Some((key, val)) = field.split_once('=') else {
            continue;
        };
        match key {
            "mt" => mt = sgr_to_spec(val),
            "ms" => ms = sgr_to_spec(val),
            "mc" => mc = sgr_to_spec(val),
            _ => {}
        }
    }
    mt.or(ms).or(mc)
}

/// Translate a `;`-separated SGR parameter string into a `ColorSpec`.
fn sgr_to_spec(sgr: &str) -> Option<ColorSpec> {
    let mut spec = ColorSpec::new();
    let mut saw_any = false;
    for part in sgr.split(';') {
        let Ok(code) = part.parse::<u16>() else {
            continue;
        };
        saw_any = true;
        match code {
            1 => {
                spec.set_bold(true);
            }
            4 => {
                spec.set_underline(true);
            }
            30..=37 => {
                spec.set_fg(Some(ansi_color(code - 30)));
            }
            40..=47 => {
                spec.set_bg(Some(ansi_color(code - 40)));
            }
            _ => {}
        }
    }
    saw_any.then_some(spec)
}

fn ansi_color(n: u16) -> Color {
    match n {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::White,
    }
}

/// Color scheme for output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    /// The matched span, highlighted the way `GREP_COLOR` would by default.
    pub fn highlight() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Cyan file path.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Magenta));
        spec
    }

    /// Green line number.
    pub fn line_number() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green));
        spec
    }

    /// Cyan byte/column offset.
    pub fn column() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Separator between fields (`:`, `-`).
    pub fn separator() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Default (no color) for plain text.
    pub fn plain() -> ColorSpec {
        ColorSpec::new()
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
