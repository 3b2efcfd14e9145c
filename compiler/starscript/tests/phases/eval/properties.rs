//! Text round-trip properties.

use proptest::prelude::*;

use crate::common::render_empty;

/// A piece of literal template text and what it renders to.
fn piece() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        "[^{#]{1,12}".prop_map(|s| (s.clone(), s)),
        Just(("{{".to_string(), "{".to_string())),
        Just(("##".to_string(), "#".to_string())),
    ]
}

proptest! {
    #[test]
    fn literal_templates_render_verbatim(pieces in prop::collection::vec(piece(), 0..12)) {
        let source: String = pieces.iter().map(|(s, _)| s.as_str()).collect();
        let expected: String = pieces.iter().map(|(_, r)| r.as_str()).collect();
        prop_assert_eq!(render_empty(&source), expected);
    }

    #[test]
    fn integers_render_without_fraction(n in -1_000_000i32..1_000_000) {
        prop_assert_eq!(render_empty(&format!("{{{n} + 0}}")), n.to_string());
    }
}
