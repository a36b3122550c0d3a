// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CSV output formatter: `path,line_number,column,text` per match, streamed
//! one file at a time like the text formatter.

use std::io::Write;

use crate::search::FileResult;

/// Streaming CSV formatter.
pub struct CsvFormatter<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> CsvFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    /// Write one file's matches as CSV rows, emitting the header first.
    pub fn write_file_result(&mut self, result: &FileResult) -> std::io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "path,line_number,column,text")?;
            self.header_written = true;
        }
        for m in &result.matches {
            writeln!(
                self.writer,
                "{},{},{},{}",
                escape_field(&result.path.display().to_string()),
                m.line_number,
                m.match_start + 1,
                escape_field(&m.line_text)
            )?;
        }
        Ok(())
    }
}

/// Quote a field if it contains a comma, quote, or newline, doubling
/// embedded quotes per RFC 4180.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
