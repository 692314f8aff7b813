//! # Dynamic Payload Generation
//!
//! The crate's externally visible surface: take a merchant's static QRIS
//! payload and a transaction amount, produce a fresh dynamic payload. The
//! pipeline is strictly sequential and pure: normalize, parse, validate,
//! mutate, serialize, checksum. Every failure is surfaced at the point
//! of detection, with no partial output.

use crate::amount::format_amount;
use crate::crc::crc_hex;
use crate::tlv::{
    normalize, parse_entries, remove_tag, serialize_entries, upsert, InitiationMethod, Tag,
};
use crate::validation::validate_static_payload;
use crate::{AmountError, QrisError, Result, MAX_AMOUNT};

/// Serialized tag/length header of the CRC field.
///
/// The checksum covers its own tag and length but not its own value, so
/// this header is appended before the CRC is computed and the 4 hex digits
/// of the value after.
const CRC_FIELD_HEADER: &str = "6304";

/// Build a dynamic (single-use, amount-bearing) payload from a static one.
///
/// Steps, in order:
/// 1. normalize and reject empty input;
/// 2. reject amounts above [`MAX_AMOUNT`] before any parsing work
///    ([`format_amount`] re-validates later, together with the finite and
///    positive checks);
/// 3. parse and validate the static payload (tag `00` present, embedded
///    CRC consistent when present);
/// 4. drop the stale CRC entry, upsert tag `01` to `"12"` (dynamic) right
///    after tag `00`, upsert tag `54` to the formatted amount right after
///    tag `53`;
/// 5. re-serialize, append the `"6304"` CRC header, checksum, append.
///
/// The input string is never modified; identical inputs yield
/// byte-identical outputs.
///
/// # Errors
/// [`QrisError`] wrapping the TLV, validation, or amount failure. The
/// caller owns user-facing messaging and any fallback.
pub fn generate_dynamic_payload(static_payload: &str, amount: f64) -> Result<String> {
    let normalized = normalize(static_payload);
    if normalized.is_empty() {
        return Err(QrisError::EmptyPayload);
    }

    if amount > MAX_AMOUNT {
        return Err(AmountError::ExceedsMaximum {
            amount,
            max: MAX_AMOUNT,
        }
        .into());
    }

    let mut entries = parse_entries(&normalized)?;
    validate_static_payload(&entries, &normalized)?;

    remove_tag(&mut entries, Tag::CRC);
    upsert(
        &mut entries,
        Tag::POINT_OF_INITIATION,
        InitiationMethod::Dynamic.field_value(),
        Some(Tag::PAYLOAD_FORMAT_INDICATOR),
    );
    let amount_field = format_amount(amount)?;
    upsert(
        &mut entries,
        Tag::TRANSACTION_AMOUNT,
        &amount_field,
        Some(Tag::TRANSACTION_CURRENCY),
    );

    let mut payload = serialize_entries(&entries)?;
    payload.push_str(CRC_FIELD_HEADER);
    let crc = crc_hex(&payload);
    payload.push_str(&crc);

    #[cfg(feature = "observability")]
    tracing::debug!(
        entries = entries.len(),
        amount = %amount_field,
        crc = %crc,
        "generated dynamic payload"
    );

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIC_TEMPLATE: &str = "00020126380016ID.CO.QRIS.WWW0215ID102002112233445204839853033605802ID5910BAITULMAAL6007JAKARTA61051243062070703A016304A5B0";

    #[test]
    fn injects_method_and_amount() {
        let dynamic = generate_dynamic_payload(STATIC_TEMPLATE, 15000.0).unwrap();
        assert_eq!(
            dynamic,
            "00020101021226380016ID.CO.QRIS.WWW0215ID102002112233445204839853033605405150005802ID5910BAITULMAAL6007JAKARTA61051243062070703A0163042E51"
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            generate_dynamic_payload("  \r\n\t ", 15000.0),
            Err(QrisError::EmptyPayload)
        ));
    }

    #[test]
    fn rejects_over_ceiling_before_parsing() {
        // Garbage payload, but the ceiling check fires first.
        assert!(matches!(
            generate_dynamic_payload("not-a-payload", 100_000_001.0),
            Err(QrisError::Amount(AmountError::ExceedsMaximum { .. }))
        ));
    }

    #[test]
    fn tolerates_scanner_whitespace() {
        let wrapped = format!("  {}\r\n", STATIC_TEMPLATE);
        assert_eq!(
            generate_dynamic_payload(&wrapped, 15000.0).unwrap(),
            generate_dynamic_payload(STATIC_TEMPLATE, 15000.0).unwrap()
        );
    }
}
