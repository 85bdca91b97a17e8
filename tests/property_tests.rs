//! Property-based tests for inspection call numbers and input normalization.

use inspection_engine::dto::normalize::{normalize_text, parse_decimal};
use inspection_engine::entities::inspection::CallStage;
use inspection_engine::errors::ServiceError;
use inspection_engine::services::sequence::IcNumber;
use proptest::prelude::*;

fn stage_strategy() -> impl Strategy<Value = CallStage> {
    prop_oneof![
        Just(CallStage::RawMaterial),
        Just(CallStage::Process),
        Just(CallStage::Final),
    ]
}

// Property: formatted numbers parse back to the same parts
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn formatted_numbers_parse_back(
        stage in stage_strategy(),
        year in 1000i32..=9999,
        sequence in 1u32..100_000,
    ) {
        let ic = IcNumber::new(stage, year, sequence);
        let text = ic.to_string();
        prop_assert!(text.starts_with(stage.prefix()));
        prop_assert_eq!(IcNumber::parse(&text).unwrap(), ic);
    }

    #[test]
    fn sequence_field_is_at_least_four_digits(stage in stage_strategy(), sequence in 1u32..10_000) {
        let text = IcNumber::new(stage, 2025, sequence).to_string();
        let seq_part = text.rsplit('-').next().unwrap();
        prop_assert_eq!(seq_part.len(), 4);
    }

    #[test]
    fn lexical_order_matches_numeric_order_within_a_year(
        stage in stage_strategy(),
        a in 1u32..10_000,
        b in 1u32..10_000,
    ) {
        let left = IcNumber::new(stage, 2025, a).to_string();
        let right = IcNumber::new(stage, 2025, b).to_string();
        prop_assert_eq!(left.cmp(&right), a.cmp(&b));
    }
}

// Property: garbage is rejected, never panics
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn arbitrary_text_never_panics(raw in "\\PC*") {
        let _ = IcNumber::parse(&raw);
    }

    #[test]
    fn unknown_prefixes_are_unknown_sequence_types(prefix in "[A-Z]{2,6}-IC", seq in 1u32..10_000) {
        prop_assume!(CallStage::from_prefix(&prefix).is_none());
        let raw = format!("{}-2025-{:04}", prefix, seq);
        let is_unknown_type = matches!(IcNumber::parse(&raw), Err(ServiceError::UnknownSequenceType(_)));
        prop_assert!(is_unknown_type);
    }
}

// Property: normalization drops blank input
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn blank_text_normalizes_to_none(ws in "[ \\t\\n]*") {
        prop_assert_eq!(normalize_text(Some(&ws)), None);
    }

    #[test]
    fn integers_parse_as_decimals(n in -1_000_000i64..1_000_000) {
        let parsed = parse_decimal(&n.to_string());
        prop_assert_eq!(parsed, Some(rust_decimal::Decimal::from(n)));
    }
}
