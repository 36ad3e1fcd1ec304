use std::collections::BTreeSet;

use proptest::prelude::*;

use lore::entity::{FacetValue, Facets};
use lore::facets::merge_facets;

fn arb_value() -> impl Strategy<Value = FacetValue> {
    prop_oneof![
        any::<bool>().prop_map(FacetValue::Flag),
        "[a-z]{1,6}".prop_map(FacetValue::Text),
        prop::collection::btree_set("[a-z]{1,6}", 0..5)
            .prop_map(|items| FacetValue::List(items.into_iter().collect())),
    ]
}

fn arb_facets() -> impl Strategy<Value = Facets> {
    prop::collection::btree_map("[a-c]", arb_value(), 0..4)
}

fn as_set(value: &FacetValue) -> BTreeSet<String> {
    match value {
        FacetValue::List(items) => items.iter().cloned().collect(),
        _ => BTreeSet::new(),
    }
}

proptest! {
    #[test]
    fn test_merge_keeps_every_key(target in arb_facets(), source in arb_facets()) {
        let mut merged = target.clone();
        merge_facets(&mut merged, &source);
        for key in target.keys().chain(source.keys()) {
            prop_assert!(merged.contains_key(key));
        }
        prop_assert_eq!(
            merged.len(),
            target.keys().chain(source.keys()).collect::<BTreeSet<_>>().len()
        );
    }

    #[test]
    fn test_merge_is_idempotent(target in arb_facets(), source in arb_facets()) {
        let mut once = target.clone();
        merge_facets(&mut once, &source);
        let mut twice = once.clone();
        merge_facets(&mut twice, &source);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_self_merge_is_identity(facets in arb_facets()) {
        let mut merged = facets.clone();
        merge_facets(&mut merged, &facets);
        prop_assert_eq!(merged, facets);
    }

    #[test]
    fn test_list_collisions_union(target in arb_facets(), source in arb_facets()) {
        let mut merged = target.clone();
        merge_facets(&mut merged, &source);
        for (key, existing) in &target {
            let Some(incoming) = source.get(key) else { continue };
            if existing.is_list() && incoming.is_list() {
                let expected: BTreeSet<String> =
                    as_set(existing).union(&as_set(incoming)).cloned().collect();
                prop_assert_eq!(as_set(&merged[key]), expected);
                if let FacetValue::List(items) = &merged[key] {
                    prop_assert_eq!(items.len(), as_set(&merged[key]).len());
                }
            }
        }
    }

    #[test]
    fn test_scalar_collisions_keep_existing(target in arb_facets(), source in arb_facets()) {
        let mut merged = target.clone();
        merge_facets(&mut merged, &source);
        for (key, existing) in &target {
            if !(existing.is_list() && source.get(key).is_some_and(FacetValue::is_list)) {
                prop_assert_eq!(&merged[key], existing);
            }
        }
    }
}
