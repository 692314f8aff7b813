//! TLV layer for EMVCo/QRIS payloads.
//!
//! A QRIS payload is a flat, non-nested sequence of Tag-Length-Value
//! triplets rendered as ASCII text: a 2-digit tag, a 2-digit zero-padded
//! length, then `length` characters of value. This module holds the types
//! shared by the parsing ([`parser`]) and construction ([`builder`]) sides.
//!
//! Lengths are a serialization detail: [`TlvEntry`] stores only the tag and
//! the value, and the length field is re-derived from `value.len()` every
//! time the entry is emitted.

use std::fmt;
use thiserror::Error;

pub mod builder;
pub mod parser;

pub use builder::{remove_tag, serialize_entries, upsert};
pub use parser::{find_tag, normalize, parse_entries};

/// Largest value length representable in the 2-digit length field.
pub const MAX_VALUE_LEN: usize = 99;

/// Errors raised while parsing or serializing the TLV layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TlvError {
    /// Payload contains a byte outside the printable-ASCII subset QRIS
    /// payloads are constrained to.
    #[error("non-ASCII character at offset {offset}")]
    NonAscii { offset: usize },

    /// Tag field is not two decimal digits.
    #[error("invalid tag segment at offset {offset}")]
    InvalidTag { offset: usize },

    /// Length field is not two decimal digits.
    #[error("invalid length segment at offset {offset}")]
    InvalidLength { offset: usize },

    /// Declared value length overruns the end of the payload.
    #[error("payload truncated at offset {offset}: value needs {need} characters, {got} remain")]
    Truncated {
        offset: usize,
        need: usize,
        got: usize,
    },

    /// A trailing fragment remains that cannot form a tag+length header.
    #[error("invalid payload format: trailing data at offset {offset}")]
    TrailingData { offset: usize },

    /// Entry value cannot be represented in the 2-digit length field.
    #[error("tag {tag} value is {len} characters, exceeds the {MAX_VALUE_LEN}-character limit")]
    ValueTooLong { tag: Tag, len: usize },
}

/// Result alias for TLV-layer operations.
pub type TlvResult<T> = Result<T, TlvError>;

/// A top-level QRIS field identifier: two ASCII decimal digits, `00`-`99`.
///
/// Stored as the decoded number; rendered zero-padded. Well-known tags this
/// crate interprets are provided as associated constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag(u8);

impl Tag {
    /// Payload Format Indicator, mandatory first field of every payload.
    pub const PAYLOAD_FORMAT_INDICATOR: Tag = Tag(0);
    /// Point of Initiation Method: `"11"` static, `"12"` dynamic.
    pub const POINT_OF_INITIATION: Tag = Tag(1);
    /// Transaction currency, ISO 4217 numeric (IDR is `"360"`).
    pub const TRANSACTION_CURRENCY: Tag = Tag(53);
    /// Transaction amount, present only in dynamic payloads.
    pub const TRANSACTION_AMOUNT: Tag = Tag(54);
    /// CRC-16/CCITT-FALSE checksum, always the final field.
    pub const CRC: Tag = Tag(63);

    /// Build a tag from its numeric form. Returns `None` above 99.
    pub const fn new(n: u8) -> Option<Tag> {
        if n <= 99 {
            Some(Tag(n))
        } else {
            None
        }
    }

    /// Decode a tag from its two ASCII digit characters.
    pub fn from_digits(hi: u8, lo: u8) -> Option<Tag> {
        if hi.is_ascii_digit() && lo.is_ascii_digit() {
            Some(Tag((hi - b'0') * 10 + (lo - b'0')))
        } else {
            None
        }
    }

    /// Numeric form of the tag.
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// One decoded top-level field.
///
/// `value` must stay within [`MAX_VALUE_LEN`] characters to be
/// serializable; the bound is enforced at emit time, never by truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct TlvEntry {
    pub tag: Tag,
    pub value: String,
}

impl TlvEntry {
    pub fn new(tag: Tag, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }
}

/// Point of Initiation Method field values (tag `01`).
///
/// `Static` codes are reusable and amount-less; `Dynamic` codes embed a
/// transaction amount and are intended for single use.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, num_enum::TryFromPrimitive)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum InitiationMethod {
    Static = 11,
    Dynamic = 12,
}

impl InitiationMethod {
    /// The two-digit field value carried in tag `01`.
    pub const fn field_value(self) -> &'static str {
        match self {
            InitiationMethod::Static => "11",
            InitiationMethod::Dynamic => "12",
        }
    }
}

/// Read the initiation method out of a parsed entry list, if tag `01` is
/// present and carries a known value.
pub fn initiation_method(entries: &[TlvEntry]) -> Option<InitiationMethod> {
    let value = find_tag(entries, Tag::POINT_OF_INITIATION)?;
    let code: u8 = value.parse().ok()?;
    InitiationMethod::try_from(code).ok()
}
