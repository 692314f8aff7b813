//! # TLV Parser - Static Payload Decoding
//!
//! Decodes the flat top-level TLV grammar of a QRIS payload into an ordered
//! [`TlvEntry`] list. The scanner is a single left-to-right pass over a
//! cursor with no backtracking: read a 2-digit tag, a 2-digit length, then
//! exactly `length` characters of value, repeating until fewer than 4
//! characters remain. A non-empty remainder after the loop means the input
//! could not have been produced by a conformant serializer and is rejected.
//!
//! The parser never panics on malformed input: every bounds condition is an
//! explicit [`TlvError`]. Inputs are restricted to ASCII up front so that
//! byte offsets, character counts, and declared lengths all agree.

use super::{Tag, TlvEntry, TlvError, TlvResult};

/// Strip control characters a QR scanner or copy-paste may introduce.
///
/// Removes every carriage-return, line-feed, and tab, then trims
/// leading/trailing whitespace. Total: never fails, and an empty result is
/// for the caller to judge.
pub fn normalize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect();
    cleaned.trim().to_string()
}

/// Decode a payload into its ordered top-level entries.
///
/// # Errors
/// - [`TlvError::NonAscii`] - a byte outside the ASCII subset
/// - [`TlvError::InvalidTag`] - tag field is not two decimal digits
/// - [`TlvError::InvalidLength`] - length field is not two decimal digits
/// - [`TlvError::Truncated`] - declared length overruns the payload
/// - [`TlvError::TrailingData`] - leftover fragment shorter than a header
pub fn parse_entries(payload: &str) -> TlvResult<Vec<TlvEntry>> {
    let bytes = payload.as_bytes();
    if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(TlvError::NonAscii { offset });
    }

    let mut entries = Vec::new();
    let mut cursor = 0;

    while cursor + 4 <= bytes.len() {
        let tag = Tag::from_digits(bytes[cursor], bytes[cursor + 1])
            .ok_or(TlvError::InvalidTag { offset: cursor })?;
        cursor += 2;

        let (hi, lo) = (bytes[cursor], bytes[cursor + 1]);
        if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
            return Err(TlvError::InvalidLength { offset: cursor });
        }
        let length = ((hi - b'0') * 10 + (lo - b'0')) as usize;
        cursor += 2;

        let value_end = cursor + length;
        if value_end > bytes.len() {
            return Err(TlvError::Truncated {
                offset: cursor,
                need: length,
                got: bytes.len() - cursor,
            });
        }

        // ASCII was checked above, so byte offsets are char boundaries.
        entries.push(TlvEntry {
            tag,
            value: payload[cursor..value_end].to_string(),
        });
        cursor = value_end;
    }

    if cursor != bytes.len() {
        return Err(TlvError::TrailingData { offset: cursor });
    }

    Ok(entries)
}

/// Linear scan for the first entry carrying `tag`.
pub fn find_tag(entries: &[TlvEntry], tag: Tag) -> Option<&str> {
    entries
        .iter()
        .find(|entry| entry.tag == tag)
        .map(|entry| entry.value.as_str())
}
