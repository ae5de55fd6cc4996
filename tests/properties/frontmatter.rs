//! Property tests for front-matter rendering.

use proptest::prelude::*;

use nbpost::{FrontMatter, FrontMatterValue};

fn value() -> impl Strategy<Value = FrontMatterValue> {
    prop_oneof![
        "[a-zA-Z0-9 :#-]{0,12}".prop_map(FrontMatterValue::Str),
        any::<i64>().prop_map(FrontMatterValue::Int),
        proptest::collection::vec("[a-z]{1,6}", 0..5).prop_map(FrontMatterValue::List),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the header is delimited and has one line per scalar and
    /// one line per list plus one per item.
    #[test]
    fn property_front_matter_shape(
        entries in proptest::collection::btree_map("[a-z]{1,8}", value(), 0..8)
    ) {
        let mut fm = FrontMatter::new();
        let mut expected_lines = 2;
        for (key, value) in &entries {
            expected_lines += match value {
                FrontMatterValue::List(items) => 1 + items.len(),
                _ => 1,
            };
            fm.insert(key.clone(), value.clone()).unwrap();
        }

        let rendered = fm.render();
        prop_assert!(rendered.starts_with("---\n"));
        prop_assert!(rendered.ends_with("\n---\n"));
        prop_assert_eq!(rendered.lines().count(), expected_lines);
    }

    /// PROPERTY: keys appear in insertion order.
    #[test]
    fn property_front_matter_key_order(
        entries in proptest::collection::btree_map("[a-z]{1,8}", value(), 1..8)
    ) {
        let mut fm = FrontMatter::new();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.reverse();
        for key in &keys {
            fm.insert(key.clone(), entries[key].clone()).unwrap();
        }

        prop_assert_eq!(fm.keys().map(str::to_string).collect::<Vec<_>>(), keys);
    }
}
