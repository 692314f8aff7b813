//! # qris-codec - QRIS Dynamic Payload Generation
//!
//! Pure, synchronous codec for QRIS (Quick Response Code Indonesian
//! Standard, EMVCo-derived) payment payloads. Its job: take a merchant's
//! *static* payload (long-lived, amount-less QR content) and produce a
//! *dynamic* payload with an embedded transaction amount and a freshly
//! computed CRC-16/CCITT-FALSE checksum.
//!
//! ## Quick Start
//!
//! ```
//! use qris_codec::generate_dynamic_payload;
//!
//! let static_payload = "00020126380016ID.CO.QRIS.WWW0215ID102002112233445204839853033605802ID5910BAITULMAAL6007JAKARTA61051243062070703A016304A5B0";
//!
//! let dynamic = generate_dynamic_payload(static_payload, 15000.0)?;
//!
//! // Point of Initiation Method flipped to dynamic, amount injected,
//! // checksum recomputed over the new content.
//! assert!(dynamic.contains("010212"));
//! assert!(dynamic.contains("540515000"));
//! assert!(qris_codec::verify_embedded_crc(&dynamic));
//! # Ok::<(), qris_codec::QrisError>(())
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! static payload ─► normalize ─► parse TLV ─► validate ─► mutate ─► serialize ─► CRC ─► dynamic payload
//! ```
//!
//! Every stage is pure: no I/O, no shared state, no allocation beyond
//! local strings. Identical inputs yield byte-identical outputs, and the
//! input string is never modified, so it is safe to call from any number of
//! threads without coordination.
//!
//! ## Module Organization
//!
//! - [`tlv`] - **TLV layer** (tags, entries, parser, serializer, upsert)
//! - [`crc`] - **CRC-16/CCITT-FALSE engines** (bit-loop and table-driven)
//! - [`validation`] - **Static payload structure and checksum checks**
//! - [`amount`] - **Transaction amount validation and formatting**
//! - [`dynamic`] - **The end-to-end generation pipeline**
//!
//! ## Error Handling
//!
//! All failures are immediate, typed, and attributable: [`TlvError`] and
//! the validation variants of [`QrisError`] point at bad merchant
//! configuration, [`AmountError`] at caller-side input. There is no retry
//! (the functions are deterministic) and no partial output; callers catch,
//! log, and decide user-facing messaging.

use thiserror::Error;

pub mod amount;
pub mod crc;
pub mod dynamic;
pub mod tlv;
pub mod validation;

pub use amount::{format_amount, AmountError};
pub use crc::{crc16_ccitt_false, crc16_ccitt_false_tabular, crc_hex};
pub use dynamic::generate_dynamic_payload;
pub use tlv::{
    find_tag, initiation_method, normalize, parse_entries, serialize_entries, InitiationMethod,
    Tag, TlvEntry, TlvError,
};
pub use validation::{validate_static_payload, verify_embedded_crc};

/// Hard ceiling on a single transaction amount.
pub const MAX_AMOUNT: f64 = 100_000_000.0;

/// Crate-level error: everything [`generate_dynamic_payload`] can raise.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QrisError {
    /// Static payload is not valid TLV, or an entry cannot be serialized.
    #[error("TLV error: {0}")]
    Tlv(#[from] TlvError),

    /// Transaction amount is non-finite, non-positive, or above ceiling.
    #[error("amount error: {0}")]
    Amount(#[from] AmountError),

    /// Static payload is empty after normalization.
    #[error("static payload is empty")]
    EmptyPayload,

    /// Static payload lacks the mandatory tag 00 entry.
    #[error("payload is missing the Payload Format Indicator (tag 00)")]
    MissingPayloadFormatIndicator,

    /// Embedded CRC of the static payload does not match its content.
    #[error("static payload CRC mismatch: payload claims {expected}, calculated {calculated}")]
    CrcMismatch {
        expected: String,
        calculated: String,
    },
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, QrisError>;
