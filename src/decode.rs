/*!
 * Reading file contents as text
 */

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

/// Bytes inspected by the binary-content heuristic
const SAMPLE_SIZE: usize = 8192;

/// Character encodings tried when decoding a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, strict unless it is the last attempt
    Utf8,
    /// ISO-8859-1, maps every byte to a character
    Latin1,
}

impl TextEncoding {
    /// Decode bytes; `lenient` replaces invalid sequences instead of failing
    pub fn decode(&self, bytes: &[u8], lenient: bool) -> Option<String> {
        match self {
            Self::Utf8 if lenient => Some(String::from_utf8_lossy(bytes).into_owned()),
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            Self::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

/// Whether a byte sample looks like binary data
///
/// A NUL byte, or more than 10% control bytes other than common whitespace
/// and escape, marks the content as binary.
pub fn looks_binary(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }

    let control = sample
        .iter()
        .filter(|&&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0c | 0x1b))
        .count();
    control as f32 / sample.len() as f32 > 0.1
}

/// Decode bytes with the ordered encodings, the last attempt being lenient
pub fn decode_bytes(bytes: &[u8], encodings: &[TextEncoding]) -> Option<String> {
    let last = encodings.len().checked_sub(1)?;
    encodings
        .iter()
        .enumerate()
        .find_map(|(i, encoding)| {
            let text = encoding.decode(bytes, i == last);
            if text.is_none() {
                debug!("Decoding as {:?} failed, trying next encoding", encoding);
            }
            text
        })
        .map(|text| text.replace(['\u{2028}', '\u{2029}'], "\n"))
}

/// Read a whole file and decode it as text
///
/// Returns `Ok(None)` when the content is binary or no encoding applies.
pub fn read_text(path: &Path, encodings: &[TextEncoding]) -> io::Result<Option<String>> {
    let bytes = fs::read(path)?;

    if looks_binary(&bytes) {
        debug!("Binary content detected in {}", path.display());
        return Ok(None);
    }

    let text = decode_bytes(&bytes, encodings);
    if text.is_none() {
        warn!("No encoding could decode {}", path.display());
    }
    Ok(text)
}
