// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! XML output formatter: one `<file>` element per searched file, one
//! `<match>` child per hit. Buffered like JSON, since the root element's
//! closing tag can't be written until every file is known.

use std::io::Write;

use crate::search::FileResult;

/// Buffered XML formatter.
pub struct XmlFormatter<W: Write> {
    writer: W,
    results: Vec<FileResult>,
}

impl<W: Write> XmlFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: FileResult) {
        self.results.push(result);
    }

    pub fn finish(mut self) -> std::io::Result<()> {
        writeln!(self.writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(self.writer, "<results>")?;
        for result in &self.results {
            writeln!(
                self.writer,
                "  <file path=\"{}\" matchCount=\"{}\" binary=\"{}\">",
                escape_attr(&result.path.display().to_string()),
                result.match_count,
                result.binary
            )?;
            for m in &result.matches {
                writeln!(
                    self.writer,
                    "    <match line=\"{}\" column=\"{}\">{}</match>",
                    m.line_number,
                    m.match_start + 1,
                    escape_text(&m.line_text)
                )?;
            }
            writeln!(self.writer, "  </file>")?;
        }
        writeln!(self.writer, "</results>")
    }
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
#[path = "xml_tests.rs"]
mod tests;
