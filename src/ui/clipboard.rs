//! System clipboard access via the OSC 52 escape sequence.
//!
//! Works in any terminal that understands OSC 52 (most modern emulators and
//! multiplexers). Failure is non-fatal; callers surface a notice instead of
//! propagating the error.

use std::io::{self, Write};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("clipboard copy failed: {0}")]
pub struct ClipboardError(String);

/// Copy `text` to the system clipboard.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    let payload = base64_encode(text.as_bytes());
    let seq = format!("\u{1b}]52;c;{payload}\u{7}");
    let mut stdout = io::stdout();
    stdout
        .write_all(seq.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| ClipboardError(e.to_string()))
}

const BASE64_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn base64_encode(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len().div_ceil(3) * 4);
    for chunk in input.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;

        output.push(BASE64_ALPHABET[(triple >> 18) as usize & 0x3f] as char);
        output.push(BASE64_ALPHABET[(triple >> 12) as usize & 0x3f] as char);
        output.push(if chunk.len() > 1 {
            BASE64_ALPHABET[(triple >> 6) as usize & 0x3f] as char
        } else {
            '='
        });
        output.push(if chunk.len() > 2 {
            BASE64_ALPHABET[triple as usize & 0x3f] as char
        } else {
            '='
        });
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_standard_vectors() {
        assert_eq!(base64_encode(b""), "");
        assert_eq!(base64_encode(b"f"), "Zg==");
        assert_eq!(base64_encode(b"fo"), "Zm8=");
        assert_eq!(base64_encode(b"foo"), "Zm9v");
        assert_eq!(base64_encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn encodes_a_hash_sized_value() {
        let hash = "a".repeat(64);
        let encoded = base64_encode(hash.as_bytes());
        assert_eq!(encoded.len(), 88);
        assert!(!encoded.contains('='));
    }
}
