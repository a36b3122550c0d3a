// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Byte-stream abstraction over a readable file.
//!
//! Small files are read directly into a `Vec<u8>`; files at or above
//! [`MMAP_THRESHOLD`] are memory-mapped via `memmap2`, letting the OS page
//! them in lazily instead of copying the whole file up front. Either way the
//! matcher only ever sees a `&[u8]` — see [`InputSource::bytes`].

use std::fs::File;
use std::io::Read as _;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Error, Result};

/// Hard ceiling on file size; larger files are refused outright.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024 * 1024; // 10 GiB is absurd for a text search, but not worth a magic rejection below it.

/// Threshold above which a file is memory-mapped rather than read into
/// memory directly. Below this, the syscall overhead of mmap outweighs the
/// benefit.
pub const MMAP_THRESHOLD: u64 = 64 * 1024;

/// Byte-order marks recognized at the start of a file, and the encoding
/// they imply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    /// Parse a `--encoding=` value. Case-insensitive, accepts a handful of
    /// common spellings for each codec.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "utf8" => Some(Encoding::Utf8),
            "utf16le" | "utf16" => Some(Encoding::Utf16Le),
            "utf16be" => Some(Encoding::Utf16Be),
            "utf32le" | "utf32" => Some(Encoding::Utf32Le),
            "utf32be" => Some(Encoding::Utf32Be),
            _ => None,
        }
    }
}

/// The bytes backing an opened input, plus the detected encoding.
pub enum InputSource {
    /// Read directly into owned memory (small files).
    Owned(Vec<u8>),
    /// Backed by a memory-mapped region (large files).
    Mapped(Mmap),
}

impl InputSource {
    /// Open `path`, choosing owned vs. mapped I/O by size, honoring `mmap`
    /// (when false, always reads owned regardless of size).
    pub fn open(path: &Path, mmap_enabled: bool) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let meta = file.metadata().map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size = meta.len();

        if size > MAX_FILE_SIZE {
            return Err(Error::FileTooLarge {
                path: path.to_path_buf(),
                size,
                max_size: MAX_FILE_SIZE,
            });
        }

        if mmap_enabled && size >= MMAP_THRESHOLD {
            // SAFETY: the file is not concurrently truncated by this
            // process; external mutation racing the map is the same hazard
            // every mmap-based tool (ripgrep, ugrep) accepts.
            #[allow(unsafe_code)]
            let mmap = unsafe { Mmap::map(&file) };
            if let Ok(mmap) = mmap {
                return Ok(InputSource::Mapped(mmap));
            }
            // Fall through to owned read if mapping failed (e.g. zero-length
            // file, or a filesystem that doesn't support mmap).
        }

        let mut buf = Vec::with_capacity(size as usize);
        let mut file = file;
        file.read_to_end(&mut buf).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(InputSource::Owned(buf))
    }

    /// Borrow the raw bytes, BOM included.
    pub fn raw_bytes(&self) -> &[u8] {
        match self {
            InputSource::Owned(v) => v,
            InputSource::Mapped(m) => m,
        }
    }

    /// Detect a BOM and return the encoding plus the bytes with the BOM
    /// stripped. No transcoding happens here; see [`decode_utf8`].
    pub fn detect_encoding(&self) -> (Encoding, &[u8]) {
        detect_bom(self.raw_bytes())
    }

    /// Decode to a UTF-8 `String`, transcoding from any detected UTF-16/32
    /// BOM via `encoding_rs`. Bytes that are neither valid UTF-8 nor behind a
    /// recognized BOM are returned unchanged as `None`: callers fall back to
    /// byte-oriented matching for those files.
    pub fn decode_utf8(&self) -> Option<std::borrow::Cow<'_, str>> {
        let (encoding, body) = self.detect_encoding();
        match encoding {
            Encoding::Utf8 => Some(String::from_utf8_lossy(body)),
            Encoding::Utf16Le => {
                let (text, _, had_errors) = encoding_rs::UTF_16LE.decode(body);
                (!had_errors).then_some(text)
            }
            Encoding::Utf16Be => {
                let (text, _, had_errors) = encoding_rs::UTF_16BE.decode(body);
                (!had_errors).then_some(text)
            }
            Encoding::Utf32Le | Encoding::Utf32Be => decode_utf32(body, encoding == Encoding::Utf32Le),
        }
    }
}

/// Inspect the leading bytes for a UTF-16/32 BOM; default to UTF-8 (no BOM
/// is not an error -- most text files have none).
fn detect_bom(bytes: &[u8]) -> (Encoding, &[u8]) {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => (Encoding::Utf8, rest),
        [0xFF, 0xFE, 0x00, 0x00, rest @ ..] => (Encoding::Utf32Le, rest),
        [0x00, 0x00, 0xFE, 0xFF, rest @ ..] => (Encoding::Utf32Be, rest),
        [0xFF, 0xFE, rest @ ..] => (Encoding::Utf16Le, rest),
        [0xFE, 0xFF, rest @ ..] => (Encoding::Utf16Be, rest),
        _ => (Encoding::Utf8, bytes),
    }
}

/// `encoding_rs` has no built-in UTF-32 codec; decode manually since it's a
/// fixed 4-bytes-per-scalar encoding.
fn decode_utf32(bytes: &[u8], little_endian: bool) -> Option<std::borrow::Cow<'static, str>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    let mut out = String::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        let code = if little_endian {
            u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
        } else {
            u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
        };
        out.push(char::from_u32(code)?);
    }
    Some(std::borrow::Cow::Owned(out))
}

/// Decode a byte slice to text, honoring `forced` if given (a user-asserted
/// code page from `--encoding=`) or otherwise sniffing a BOM. This is the
/// entry point [`crate::search::search_file`] actually calls -- it works
/// directly on bytes rather than an [`InputSource`] so it composes with
/// decompressed buffers too.
pub fn decode_bytes(bytes: &[u8], forced: Option<Encoding>) -> std::borrow::Cow<'_, str> {
    let (encoding, body) = match forced {
        Some(encoding) => (encoding, bytes),
        None => detect_bom(bytes),
    };
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(body),
        Encoding::Utf16Le => {
            let (text, _, _) = encoding_rs::UTF_16LE.decode(body);
            text
        }
        Encoding::Utf16Be => {
            let (text, _, _) = encoding_rs::UTF_16BE.decode(body);
            text
        }
        Encoding::Utf32Le | Encoding::Utf32Be => {
            decode_utf32(body, encoding == Encoding::Utf32Le)
                .map(std::borrow::Cow::Owned)
                .unwrap_or_else(|| String::from_utf8_lossy(body))
        }
    }
}

/// Binary-sniff heuristic: examine up to the first 32 KiB, classify as
/// binary if it contains a NUL byte.
pub const BINARY_SNIFF_WINDOW: usize = 32 * 1024;

/// Returns true if `bytes` looks binary under the NUL-byte heuristic.
pub fn looks_binary(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(BINARY_SNIFF_WINDOW)];
    window.contains(&0)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
