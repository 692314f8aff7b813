//! # Static Payload Validation
//!
//! Structural checks performed before a static payload is used as the base
//! for dynamic generation. Validation fails loudly rather than returning a
//! boolean: a merchant template that is corrupted or hand-edited must never
//! silently become the basis of a payment code.
//!
//! An embedded CRC (tag `63`) is verified only when present; payloads
//! shipped without one skip the check. The verification itself is compiled
//! under the default `checksum-validation` feature.

use crate::crc::crc_hex;
use crate::tlv::{find_tag, Tag, TlvEntry};
use crate::{QrisError, Result};

/// Validate the structure of a parsed static payload.
///
/// `raw` must be the exact (normalized, ASCII) payload text `entries` were
/// parsed from; the embedded CRC covers everything but its own 4-character
/// value, so the check recomputes over `raw` minus its final 4 characters.
///
/// # Errors
/// - [`QrisError::MissingPayloadFormatIndicator`] - no tag `00` entry
/// - [`QrisError::CrcMismatch`] - embedded CRC does not match the payload
pub fn validate_static_payload(entries: &[TlvEntry], raw: &str) -> Result<()> {
    if find_tag(entries, Tag::PAYLOAD_FORMAT_INDICATOR).is_none() {
        return Err(QrisError::MissingPayloadFormatIndicator);
    }

    #[cfg(feature = "checksum-validation")]
    if let Some(embedded) = find_tag(entries, Tag::CRC) {
        let body = &raw[..raw.len().saturating_sub(4)];
        let calculated = crc_hex(body);
        if calculated != embedded {
            return Err(QrisError::CrcMismatch {
                expected: embedded.to_string(),
                calculated,
            });
        }
    }
    #[cfg(not(feature = "checksum-validation"))]
    let _ = raw;

    Ok(())
}

/// Check whether a payload's final 4 characters are the CRC-16/CCITT-FALSE
/// of everything before them.
///
/// Useful as a template health probe; generation goes through
/// [`validate_static_payload`] instead, which reports *why* a payload is
/// rejected.
pub fn verify_embedded_crc(payload: &str) -> bool {
    if payload.len() < 4 || !payload.is_ascii() {
        return false;
    }
    let (body, tail) = payload.split_at(payload.len() - 4);
    crc_hex(body) == tail
}
