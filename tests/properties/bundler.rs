//! Property tests for joining resolved bodies.

use proptest::prelude::*;

use caboose::domain::services::bundler::join;
use caboose::AssetKind;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every body appears in order, separated by exactly one newline.
    #[test]
    fn property_join_cadence(
        kind in prop::sample::select(vec![AssetKind::Script, AssetKind::Stylesheet]),
        bodies in proptest::collection::vec("[a-z@./\\n]{0,12}", 0..=8),
    ) {
        let joined = join(kind, &bodies);

        let expected_len = bodies.iter().map(String::len).sum::<usize>()
            + bodies.len().saturating_sub(1);
        prop_assert_eq!(joined.len(), expected_len);

        let mut rest = joined.as_str();
        for (i, body) in bodies.iter().enumerate() {
            prop_assert!(rest.starts_with(body.as_str()));
            rest = &rest[body.len()..];
            if i + 1 < bodies.len() {
                prop_assert!(rest.starts_with('\n'));
                rest = &rest[1..];
            }
        }
        prop_assert!(rest.is_empty());
    }
}
