//! Property-based tests for token derivation and locale resolution

use mock_ida_core::crypto::{challenge_key, derive_psut};
use mock_ida_core::{ClaimsPolicyEngine, IdentityRecord, LanguageValue};
use proptest::prelude::*;

proptest! {
    /// The same (individual, relying party) pair always maps to the same PSUT
    #[test]
    fn prop_psut_is_deterministic(
        individual in "[0-9]{6,12}",
        relying_party in "[a-z-]{3,16}",
    ) {
        let first = derive_psut(&individual, &relying_party);
        let second = derive_psut(&individual, &relying_party);
        prop_assert_eq!(first, second);
    }

    /// Different relying parties see different pseudonyms for one individual
    #[test]
    fn prop_psut_differs_per_relying_party(
        individual in "[0-9]{6,12}",
        rp_x in "[a-z]{3,16}",
        rp_y in "[a-z]{3,16}",
    ) {
        prop_assume!(rp_x != rp_y);
        prop_assert_ne!(
            derive_psut(&individual, &rp_x),
            derive_psut(&individual, &rp_y)
        );
    }

    /// Challenge keys are stable for arbitrary transaction identifiers
    #[test]
    fn prop_challenge_key_stable(
        transaction in "\\PC{0,40}",
        individual in "[0-9]{6,12}",
    ) {
        prop_assert_eq!(
            challenge_key(&transaction, &individual, "111111"),
            challenge_key(&transaction, &individual, "111111")
        );
    }

    /// Locales after the first never contribute keys
    #[test]
    fn prop_only_first_locale_contributes(
        extra_locales in prop::collection::vec("[a-z]{3}", 1..4),
    ) {
        prop_assume!(extra_locales.iter().all(|l| l != "eng"));

        let identity = IdentityRecord::new("ind-1").with_full_name(
            std::iter::once(LanguageValue::new("eng", "John"))
                .chain(extra_locales.iter().map(|l| LanguageValue::new(l.clone(), "other")))
                .collect(),
        );

        let mut locales = vec!["eng".to_string()];
        locales.extend(extra_locales.iter().cloned());

        let engine = ClaimsPolicyEngine::new("eng");
        let doc = engine.build(&identity, &["name".to_string()], &locales).unwrap();

        prop_assert_eq!(doc.len(), 1);
        prop_assert!(doc.contains_key("name#eng"));
    }
}
