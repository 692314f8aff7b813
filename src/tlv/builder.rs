//! # TLV Builder - Entry Mutation and Serialization
//!
//! Construction side of the TLV layer: re-encode an ordered entry list back
//! into payload text, and the positional edits the dynamic-payload flow
//! needs (drop a tag, upsert a singleton field next to its anchor).
//!
//! Serialization re-derives every length field from the value at emit time;
//! an entry whose value cannot fit the 2-digit length field is an error,
//! never a truncation.

use super::{Tag, TlvEntry, TlvError, TlvResult, MAX_VALUE_LEN};

/// Re-encode entries into payload text, in list order.
///
/// Emits `tag + zero-padded length + value` per entry.
///
/// # Errors
/// [`TlvError::ValueTooLong`] if any value exceeds [`MAX_VALUE_LEN`]
/// characters.
pub fn serialize_entries(entries: &[TlvEntry]) -> TlvResult<String> {
    let mut payload = String::with_capacity(entries.iter().map(|e| 4 + e.value.len()).sum());

    for entry in entries {
        let len = entry.value.len();
        if len > MAX_VALUE_LEN {
            return Err(TlvError::ValueTooLong {
                tag: entry.tag,
                len,
            });
        }
        payload.push_str(&format!("{}{:02}{}", entry.tag, len, entry.value));
    }

    Ok(payload)
}

/// Replace-or-insert a singleton field.
///
/// If `tag` already exists, every occurrence has its value replaced in
/// place and ordering is untouched. Otherwise a new entry is inserted
/// immediately after the first `anchor` entry, falling back to appending at
/// the end when the anchor is absent (or not given).
pub fn upsert(entries: &mut Vec<TlvEntry>, tag: Tag, value: &str, anchor: Option<Tag>) {
    let mut replaced = false;
    for entry in entries.iter_mut().filter(|entry| entry.tag == tag) {
        entry.value = value.to_string();
        replaced = true;
    }
    if replaced {
        return;
    }

    let entry = TlvEntry::new(tag, value);
    let insert_at = anchor
        .and_then(|anchor| entries.iter().position(|e| e.tag == anchor))
        .map(|idx| idx + 1);

    match insert_at {
        Some(idx) => entries.insert(idx, entry),
        None => entries.push(entry),
    }
}

/// Drop every entry carrying `tag`.
pub fn remove_tag(entries: &mut Vec<TlvEntry>, tag: Tag) {
    entries.retain(|entry| entry.tag != tag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv::parse_entries;

    fn entries(payload: &str) -> Vec<TlvEntry> {
        parse_entries(payload).unwrap()
    }

    #[test]
    fn serialize_round_trips_parse() {
        let payload = "00020153033605802ID";
        assert_eq!(serialize_entries(&entries(payload)).unwrap(), payload);
    }

    #[test]
    fn serialize_pads_short_lengths() {
        let one = vec![TlvEntry::new(Tag::PAYLOAD_FORMAT_INDICATOR, "1")];
        assert_eq!(serialize_entries(&one).unwrap(), "00011");
    }

    #[test]
    fn serialize_rejects_oversized_value() {
        let long = vec![TlvEntry::new(Tag::TRANSACTION_AMOUNT, "9".repeat(100))];
        assert_eq!(
            serialize_entries(&long),
            Err(TlvError::ValueTooLong {
                tag: Tag::TRANSACTION_AMOUNT,
                len: 100,
            })
        );
    }

    #[test]
    fn serialize_accepts_maximum_value() {
        let max = vec![TlvEntry::new(Tag::TRANSACTION_AMOUNT, "9".repeat(99))];
        let payload = serialize_entries(&max).unwrap();
        assert!(payload.starts_with("5499"));
        assert_eq!(payload.len(), 103);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut list = entries("000201010211");
        upsert(
            &mut list,
            Tag::POINT_OF_INITIATION,
            "12",
            Some(Tag::PAYLOAD_FORMAT_INDICATOR),
        );
        assert_eq!(serialize_entries(&list).unwrap(), "000201010212");
    }

    #[test]
    fn upsert_inserts_after_anchor() {
        let mut list = entries("0002015303360");
        upsert(
            &mut list,
            Tag::POINT_OF_INITIATION,
            "12",
            Some(Tag::PAYLOAD_FORMAT_INDICATOR),
        );
        assert_eq!(serialize_entries(&list).unwrap(), "0002010102125303360");
    }

    #[test]
    fn upsert_appends_when_anchor_missing() {
        let mut list = entries("000201");
        upsert(
            &mut list,
            Tag::TRANSACTION_AMOUNT,
            "15000",
            Some(Tag::TRANSACTION_CURRENCY),
        );
        assert_eq!(serialize_entries(&list).unwrap(), "000201540515000");
    }

    #[test]
    fn upsert_rewrites_every_duplicate() {
        let mut list = entries("010211010211");
        upsert(&mut list, Tag::POINT_OF_INITIATION, "12", None);
        assert_eq!(serialize_entries(&list).unwrap(), "010212010212");
    }

    #[test]
    fn remove_tag_drops_all_occurrences() {
        let mut list = entries("000201630412346304ABCD");
        remove_tag(&mut list, Tag::CRC);
        assert_eq!(serialize_entries(&list).unwrap(), "000201");
    }
}
