//! IO Utilities for file reads and extension checks

use std::{fs, io, path::Path};

/// Returns true if path has one of the allowed extensions (compared case-insensitively).
pub fn has_allowed_extension<S: AsRef<str>>(path: &Path, allowed: &[S]) -> bool {
    match path.extension() {
        Some(ext) => allowed.iter().any(|e| {
            let e: &str = e.as_ref();
            ext.eq_ignore_ascii_case(e)
        }),
        None => false,
    }
}

/// Reads a file as text, skipping byte sequences that are not valid UTF-8.
pub fn read_text_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_skipping_invalid(&bytes))
}

/// Decodes UTF-8, dropping invalid sequences instead of failing.
pub fn decode_skipping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Checks whether a directory has no entries left.
pub fn is_empty_dir(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}
