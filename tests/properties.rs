//! Property tests for the generation pipeline and the CRC engines.

use proptest::prelude::*;
use qris_codec::{
    crc16_ccitt_false, crc16_ccitt_false_tabular, crc_hex, find_tag, format_amount,
    generate_dynamic_payload, parse_entries, serialize_entries, verify_embedded_crc, Tag,
};

fn tlv(tag: &str, value: &str) -> String {
    format!("{}{:02}{}", tag, value.len(), value)
}

prop_compose! {
    /// A structurally valid static template: mandatory tag 00, an opaque
    /// merchant-account field, currency, merchant name, and optionally a
    /// correct embedded CRC.
    fn static_template()(
        merchant in "[A-Z0-9.]{1,38}",
        name in "[A-Z]{1,25}",
        with_crc in any::<bool>(),
    ) -> String {
        let body = format!(
            "{}{}{}{}",
            tlv("00", "01"),
            tlv("26", &merchant),
            tlv("53", "360"),
            tlv("59", &name),
        );
        if with_crc {
            let prefix = format!("{body}6304");
            let crc = crc_hex(&prefix);
            format!("{prefix}{crc}")
        } else {
            body
        }
    }
}

fn amounts() -> impl Strategy<Value = f64> {
    prop_oneof![
        // Integral rupiah, the donation-flow common case.
        (1u32..=100_000_000).prop_map(f64::from),
        // Cent-precision amounts up to the ceiling.
        (1u64..=10_000_000_000).prop_map(|cents| cents as f64 / 100.0),
    ]
}

proptest! {
    #[test]
    fn generation_is_deterministic(template in static_template(), amount in amounts()) {
        let first = generate_dynamic_payload(&template, amount).unwrap();
        let second = generate_dynamic_payload(&template, amount).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_always_ends_in_its_own_crc(template in static_template(), amount in amounts()) {
        let dynamic = generate_dynamic_payload(&template, amount).unwrap();
        prop_assert!(verify_embedded_crc(&dynamic));
    }

    #[test]
    fn tag_54_carries_the_formatted_amount(template in static_template(), amount in amounts()) {
        let dynamic = generate_dynamic_payload(&template, amount).unwrap();
        let entries = parse_entries(&dynamic).unwrap();
        let carried = find_tag(&entries, Tag::TRANSACTION_AMOUNT).unwrap();
        prop_assert_eq!(carried, format_amount(amount).unwrap());
    }

    #[test]
    fn regeneration_keeps_singleton_tags(
        template in static_template(),
        first_amount in amounts(),
        second_amount in amounts(),
    ) {
        let dynamic = generate_dynamic_payload(&template, first_amount).unwrap();
        let regenerated = generate_dynamic_payload(&dynamic, second_amount).unwrap();

        let entries = parse_entries(&regenerated).unwrap();
        prop_assert_eq!(
            entries.iter().filter(|e| e.tag == Tag::POINT_OF_INITIATION).count(),
            1
        );
        prop_assert_eq!(
            entries.iter().filter(|e| e.tag == Tag::TRANSACTION_AMOUNT).count(),
            1
        );
        prop_assert_eq!(find_tag(&entries, Tag::POINT_OF_INITIATION), Some("12"));
    }

    #[test]
    fn parse_then_serialize_reproduces_the_payload(template in static_template()) {
        let entries = parse_entries(&template).unwrap();
        prop_assert_eq!(serialize_entries(&entries).unwrap(), template);
    }

    #[test]
    fn crc_engines_are_equivalent(input in "[ -~]{0,200}") {
        prop_assert_eq!(
            crc16_ccitt_false(&input),
            crc16_ccitt_false_tabular(&input)
        );
    }
}
