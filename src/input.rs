//! Input decoding for the CLI and HTTP adapters
//!
//! Bytes are decoded as UTF-8, falling back to Latin-1 (every byte maps to
//! the code point of the same value) when the input is not valid UTF-8.

use crate::error::Result;
use std::path::Path;
use tracing::{debug, warn};

/// Encoding a byte buffer was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
}

/// Decode bytes into text, trying UTF-8 first
pub fn decode_text(bytes: Vec<u8>) -> (String, Encoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, Encoding::Utf8),
        Err(err) => {
            let bytes = err.into_bytes();
            let text = bytes.iter().map(|&b| char::from(b)).collect();
            (text, Encoding::Latin1)
        }
    }
}

/// Decode bytes into lines without their trailing `\n` or `\r\n`
pub fn decode_lines(bytes: Vec<u8>) -> (Vec<String>, Encoding) {
    let (text, encoding) = decode_text(bytes);
    let lines = text.lines().map(str::to_string).collect();
    (lines, encoding)
}

/// Read a file into lines, falling back to Latin-1 for non-UTF-8 content
pub async fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = tokio::fs::read(path).await?;
    let (lines, encoding) = decode_lines(bytes);
    match encoding {
        Encoding::Utf8 => debug!("Read {} lines from {}", lines.len(), path.display()),
        Encoding::Latin1 => warn!(
            "{} is not valid UTF-8, decoded {} lines as Latin-1",
            path.display(),
            lines.len()
        ),
    }
    Ok(lines)
}
