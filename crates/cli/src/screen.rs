// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Alternate-screen buffer: a thin line-oriented surface over crossterm,
//! with column width computed via `unicode-width` and a compressed table of
//! combining-character ranges so zero-width marks don't advance the cursor.

use std::io::{self, Write};

use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor, execute, queue, terminal};
use unicode_width::UnicodeWidthChar;

/// Ranges of zero-width combining characters, encoded as
/// `(first_codepoint << 8) | run_length` so the common single-entry case
/// fits one table slot; the binary search over this table is hot in
/// rendering.
const COMBINING_RANGES: &[u32] = &[
    encode_range(0x0300, 112), // combining diacritical marks
    encode_range(0x0483, 4),   // combining cyrillic titlo etc.
    encode_range(0x0591, 45),  // hebrew points
    encode_range(0x064B, 21),  // arabic combining marks
    encode_range(0x1AB0, 35),  // combining diacritical marks extended
    encode_range(0x1DC0, 80),  // combining diacritical marks supplement
    encode_range(0x20D0, 31),  // combining diacritical marks for symbols
    encode_range(0xFE20, 16),  // combining half marks
];

const fn encode_range(first: u32, len: u32) -> u32 {
    (first << 8) | (len & 0xFF)
}

fn is_combining(c: char) -> bool {
    let cp = c as u32;
    if cp < 0x0300 {
        return false;
    }
    COMBINING_RANGES
        .binary_search_by(|&entry| {
            let first = entry >> 8;
            let len = entry & 0xFF;
            if cp < first {
                std::cmp::Ordering::Greater
            } else if cp >= first + len {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Terminal columns a tab advances to, when not aligned to a stop.
pub const TAB_WIDTH: usize = 8;

/// The three capability flags `ScreenState` carries for ambiguous-width
/// ranges a terminal may or may not render as double-wide: U+3000
/// (ideographic space), the emoji blocks, and the Unicode supplementary
/// ideographic plane. Each defers to `unicode-width`'s own East-Asian-width
/// table when its flag is off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidthCapabilities {
    pub double_width: bool,
    pub double_width_emoji: bool,
    pub double_width_cjk: bool,
}

/// Display width of one character: combining marks are zero columns
/// regardless of what `unicode-width` reports for the base codepoint class.
pub fn char_width(c: char) -> usize {
    char_width_with(c, WidthCapabilities::default())
}

/// Like [`char_width`] but honoring a terminal's double-width capability
/// flags for the ranges where rendering genuinely varies by terminal.
pub fn char_width_with(c: char, caps: WidthCapabilities) -> usize {
    if c == '\t' {
        return TAB_WIDTH;
    }
    if is_combining(c) {
        return 0;
    }
    let cp = c as u32;
    if cp == 0x3000 && caps.double_width {
        return 2;
    }
    if (0x1F300..=0x1FAFF).contains(&cp) && caps.double_width_emoji {
        return 2;
    }
    if (0x20000..=0x2FFFF).contains(&cp) && caps.double_width_cjk {
        return 2;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Width in terminal columns of a whole string, tabs expanded and
/// combining marks folded to zero width.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Like [`display_width`] but honoring capability flags; see
/// [`char_width_with`].
pub fn display_width_with(s: &str, caps: WidthCapabilities) -> usize {
    s.chars().map(|c| char_width_with(c, caps)).sum()
}

/// Decode bytes as UTF-8 for display, rendering each invalid byte as an
/// inverse-video two-digit hex pair instead of the lossy replacement
/// character, so corrupt input is visible as what it is.
pub fn decode_display(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(e) => {
                let valid_len = e.valid_up_to();
                if valid_len > 0 {
                    out.push_str(std::str::from_utf8(&rest[..valid_len]).unwrap_or_default());
                }
                let bad_len = e.error_len().unwrap_or(rest.len() - valid_len).max(1);
                for &b in &rest[valid_len..valid_len + bad_len] {
                    out.push_str(&format!("\x1b[7m{:02X}\x1b[27m", b));
                }
                rest = &rest[valid_len + bad_len..];
            }
        }
    }
    out
}

/// The alternate-screen buffer the query UI renders into. `good` is false
/// when the terminal couldn't be set up (e.g. stdout isn't a tty), in which
/// case callers should fall back to non-interactive output. Process-wide:
/// only the UI thread ever touches a `Screen`.
pub struct Screen {
    width: u16,
    height: u16,
    good: bool,
    cursor_row: u16,
    cursor_col: u16,
    mono: bool,
    selection: bool,
    caps: WidthCapabilities,
}

impl Screen {
    /// Enter the alternate screen and raw mode. Never panics: setup
    /// failures leave `good() == false` instead of propagating an error.
    pub fn enter() -> io::Result<Self> {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        let good = terminal::enable_raw_mode().is_ok()
            && execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide).is_ok();
        Ok(Self {
            width,
            height,
            good,
            cursor_row: 0,
            cursor_col: 0,
            mono: false,
            selection: false,
            caps: WidthCapabilities::default(),
        })
    }

    pub fn good(&self) -> bool {
        self.good
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Current `(width, height)`, the pair form of [`Screen::width`] /
    /// [`Screen::height`].
    pub fn getsize(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Capability flags governing ambiguous-width ranges; see
    /// [`WidthCapabilities`].
    pub fn capabilities(&self) -> WidthCapabilities {
        self.caps
    }

    pub fn set_capabilities(&mut self, caps: WidthCapabilities) {
        self.caps = caps;
    }

    /// Display width of `c` under this screen's capability flags.
    pub fn char_width(&self, c: char) -> usize {
        char_width_with(c, self.caps)
    }

    /// Display width of `s` under this screen's capability flags.
    pub fn display_width(&self, s: &str) -> usize {
        display_width_with(s, self.caps)
    }

    /// Whether color is suppressed; `put_line`/`put_line_with_highlight`
    /// skip the reverse-video highlight attribute when set.
    pub fn mono(&self) -> bool {
        self.mono
    }

    pub fn set_mono(&mut self, mono: bool) {
        self.mono = mono;
    }

    /// Move the cursor to `(row, col)`, tracked for [`Screen::getpos`].
    pub fn setpos(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.cursor_row = row;
        self.cursor_col = col;
        if !self.good {
            return Ok(());
        }
        queue!(io::stdout(), cursor::MoveTo(col, row))
    }

    /// Last position set via [`Screen::setpos`] (or `(0, 0)` after
    /// [`Screen::home`]/[`Screen::clear`]).
    pub fn getpos(&self) -> (u16, u16) {
        (self.cursor_row, self.cursor_col)
    }

    /// Move the cursor to the top-left corner without clearing.
    pub fn home(&mut self) -> io::Result<()> {
        self.setpos(0, 0)
    }

    /// Clear the screen and move the cursor home.
    pub fn clear(&mut self) -> io::Result<()> {
        self.cursor_row = 0;
        self.cursor_col = 0;
        if !self.good {
            return Ok(());
        }
        queue!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    /// Clear from the cursor to the end of the screen, leaving the cursor
    /// position untouched (unlike [`Screen::clear`], which also homes it).
    pub fn erase(&self) -> io::Result<()> {
        if !self.good {
            return Ok(());
        }
        queue!(io::stdout(), terminal::Clear(terminal::ClearType::FromCursorDown))
    }

    /// Switch to reverse-video (selection) rendering. A no-op in mono mode.
    pub fn invert(&mut self) -> io::Result<()> {
        self.selection = true;
        if !self.good || self.mono {
            return Ok(());
        }
        queue!(io::stdout(), SetAttribute(Attribute::Reverse))
    }

    /// Leave reverse-video rendering.
    pub fn noinvert(&mut self) -> io::Result<()> {
        self.selection = false;
        if !self.good || self.mono {
            return Ok(());
        }
        queue!(io::stdout(), SetAttribute(Attribute::NoReverse))
    }

    /// True while a selection/highlight span is being rendered.
    pub fn selection(&self) -> bool {
        self.selection
    }

    /// Reset all SGR attributes to the terminal default.
    pub fn normal(&mut self) -> io::Result<()> {
        self.selection = false;
        if !self.good {
            return Ok(());
        }
        queue!(io::stdout(), SetAttribute(Attribute::Reset))
    }

    /// Put a line of text at `row`, truncated to the screen width. Control
    /// sequences embedded in `text` (SGR highlight spans) pass through
    /// untouched.
    pub fn put_line(&self, row: u16, text: &str) -> io::Result<()> {
        if !self.good || row >= self.height {
            return Ok(());
        }
        let truncated = truncate_to_width(text, self.width as usize);
        queue!(
            io::stdout(),
            cursor::MoveTo(0, row),
            terminal::Clear(terminal::ClearType::CurrentLine),
            Print(truncated)
        )
    }

    /// Put a line of text at `row`, rendering `text[highlight_start..
    /// highlight_end]` in reverse video (a no-op in mono mode). Byte offsets
    /// are clamped to `text`'s length so a caller's mismatched span can
    /// never panic; truncation to the screen width applies across all three
    /// segments together.
    pub fn put_line_with_highlight(
        &self,
        row: u16,
        text: &str,
        highlight_start: usize,
        highlight_end: usize,
    ) -> io::Result<()> {
        if !self.good || row >= self.height {
            return Ok(());
        }
        let start = highlight_start.min(text.len());
        let end = highlight_end.max(start).min(text.len());
        let (before, rest) = text.split_at(start);
        let (mid, after) = rest.split_at(end - start);

        let mut stdout = io::stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;

        let mut budget = self.width as usize;
        let before = truncate_to_width(before, budget);
        budget = budget.saturating_sub(display_width(&before));
        queue!(stdout, Print(before))?;

        let mid = truncate_to_width(mid, budget);
        budget = budget.saturating_sub(display_width(&mid));
        if !mid.is_empty() {
            if self.mono {
                queue!(stdout, Print(mid))?;
            } else {
                queue!(
                    stdout,
                    SetAttribute(Attribute::Reverse),
                    Print(mid),
                    SetAttribute(Attribute::NoReverse)
                )?;
            }
        }

        let after = truncate_to_width(after, budget);
        queue!(stdout, Print(after))
    }

    pub fn flush(&self) -> io::Result<()> {
        io::stdout().flush()
    }

    /// Leave the alternate screen and restore terminal modes.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.good {
            return Ok(());
        }
        self.good = false;
        execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Truncate `text` to at most `max_width` display columns, expanding tabs
/// to spaces and respecting combining-mark widths.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    for c in text.chars() {
        let w = char_width(c);
        if used + w > max_width {
            break;
        }
        if c == '\t' {
            out.push_str(&" ".repeat(w));
        } else {
            out.push(c);
        }
        used += w;
    }
    out
}

#[cfg(test)]
#[path = "screen_tests.rs"]
mod tests;
