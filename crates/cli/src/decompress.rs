// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Gzip decompression transducer.
//!
//! A single byte-stream transducer is wired in: gzip, via `flate2`. Other
//! formats (bzip2, lzma, zstd, lz4, brotli, 7-zip) have the same shape --
//! compressed bytes in, a flat byte stream out -- but aren't implemented.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{Error, Result};

/// Decompress a gzip member fully into memory.
///
/// `current_depth` is the nesting depth already reached by the caller (0
/// for a plain top-level file). Expanding this archive would reach
/// `current_depth + 1`; if that exceeds `zmax` the archive is refused
/// rather than expanded, so recursive gzip bombs can't blow the budget.
pub fn decompress_gzip(path: &Path, bytes: &[u8], current_depth: u32, zmax: u32) -> Result<Vec<u8>> {
    if current_depth + 1 > zmax {
        return Err(Error::Walk {
            message: format!(
                "{}: nested archive depth {} exceeds zmax {}",
                path.display(),
                current_depth + 1,
                zmax
            ),
        });
    }

    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(out)
}

/// Whether `path` names a gzip member by extension.
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "gz")
}

#[cfg(test)]
#[path = "decompress_tests.rs"]
mod tests;
