//! URI component encoding
//!
//! File keys are embedded in a single path segment, so every reserved
//! character (including `/`) must be escaped. The unescaped set matches
//! what browsers leave alone for a URI component:
//! `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.

use crate::error::NavigationError;
use crate::Result;

fn is_unreserved(byte: u8) -> bool {
    matches!(
        byte,
        b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')'
    )
}

/// Percent-encode a string for use as one path segment
pub fn encode_component(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        if is_unreserved(byte) {
            result.push(byte as char);
        } else {
            result.push_str(&format!("%{:02X}", byte));
        }
    }
    result
}

/// Decode a percent-encoded path segment
pub fn decode_component(input: &str) -> Result<String> {
    if !input.contains('%') {
        return Ok(input.to_string());
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16));
            let lo = bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16));
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    out.push((hi * 16 + lo) as u8);
                    i += 3;
                }
                _ => return Err(NavigationError::MalformedEscape(input.to_string())),
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| NavigationError::InvalidUtf8(input.to_string()))
}
