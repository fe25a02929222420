//! Text encoding capability and codec
//!
//! Encodings are `encoding_rs` encodings looked up by WHATWG label
//! ("utf-8", "latin1", "utf-16le", ...). Conversion is strict in both
//! directions: malformed bytes and unmappable characters are errors, never
//! replacement characters.
//!
//! `encoding_rs` only encodes to ASCII-compatible encodings, so UTF-16 is
//! encoded here directly.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

use crate::error::EncodingFailure;

/// Environment capability: the encoding used for text I/O
pub trait HasEncoding {
    /// Encoding for text read and written in this environment
    fn encoding(&self) -> &'static Encoding;
}

/// Look up an encoding by WHATWG label, case-insensitively
pub fn for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Encode `text` without a byte order mark
///
/// # Errors
///
/// `Unmappable` if `text` has characters `encoding` cannot represent.
pub fn encode(encoding: &'static Encoding, text: &str) -> Result<Vec<u8>, EncodingFailure> {
    if encoding == UTF_16LE {
        return Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
    }
    if encoding == UTF_16BE {
        return Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect());
    }
    if encoding.output_encoding() != encoding {
        // replacement encoding: nothing can be written in it
        return Err(EncodingFailure::Unmappable);
    }

    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(EncodingFailure::Unmappable);
    }
    Ok(bytes.into_owned())
}

/// Encode each line followed by `\n`
///
/// # Errors
///
/// `Unmappable` if any line cannot be represented; nothing is returned for
/// the lines that could.
pub fn encode_lines<S: AsRef<str>>(
    encoding: &'static Encoding,
    lines: &[S],
) -> Result<Vec<u8>, EncodingFailure> {
    let newline = encode(encoding, "\n")?;
    let mut out = Vec::new();
    for line in lines {
        out.extend_from_slice(&encode(encoding, line.as_ref())?);
        out.extend_from_slice(&newline);
    }
    Ok(out)
}

/// Decode `bytes`, dropping a leading byte order mark of `encoding`
///
/// # Errors
///
/// `Malformed` if `bytes` are not valid in `encoding`.
pub fn decode(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, EncodingFailure> {
    let body = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
        _ => bytes,
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or(EncodingFailure::Malformed)
}

/// Split text into lines on `\n` or `\r\n`; a final terminator does not
/// start an extra empty line. A `\r` not followed by `\n` stays in the line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        let line = &rest[..pos];
        lines.push(line.strip_suffix('\r').unwrap_or(line).to_string());
        rest = &rest[pos + 1..];
    }
    if !rest.is_empty() {
        lines.push(rest.to_string());
    }
    lines
}
