//! Local document loading and trimming.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Synchronous Comprehend calls accept at most 5,000 bytes of text.
pub const SYNC_TEXT_LIMIT_BYTES: usize = 5_000;

/// Read a text file and trim it to a byte budget.
///
/// A positive `length` keeps the first `length` bytes, a negative `length`
/// keeps the last `|length|` bytes, and zero returns the file unmodified.
/// Cuts land on UTF-8 character boundaries, so a cut that would split a
/// multi-byte character shrinks the kept slice by up to three bytes.
///
/// The result is not checked against [`SYNC_TEXT_LIMIT_BYTES`]; callers pick
/// a safe budget or guard with [`ensure_sync_limit`].
pub fn load_and_trim<P: AsRef<Path>>(path: P, length: i64) -> Result<String> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(trim(content, length))
}

/// Guard for the service's synchronous size ceiling.
///
/// The remote call would reject oversized text anyway; checking locally
/// turns that into a clear error before any bytes leave the process.
pub fn ensure_sync_limit(text: &str) -> Result<()> {
    if text.len() > SYNC_TEXT_LIMIT_BYTES {
        bail!(
            "text is {} bytes, over the {SYNC_TEXT_LIMIT_BYTES}-byte synchronous limit; \
             trim the document first",
            text.len()
        );
    }
    Ok(())
}

fn trim(content: String, length: i64) -> String {
    if length == 0 {
        return content;
    }
    if length > 0 {
        let keep = floor_char_boundary(&content, (length as u64).min(content.len() as u64) as usize);
        content[..keep].to_string()
    } else {
        let cut = content.len().saturating_sub(length.unsigned_abs() as usize);
        let start = ceil_char_boundary(&content, cut);
        content[start..].to_string()
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
