use proptest::prelude::*;

use lore::entity::{Entity, EntityStore};
use lore::graph::RelationshipResolver;

/// A store of `n` entities named `N{i}` with edges picked from `edges`.
fn store(n: usize, edges: &[(usize, usize)]) -> EntityStore {
    (0..n)
        .map(|i| {
            edges
                .iter()
                .filter(|(from, _)| *from % n == i)
                .fold(
                    Entity::new(format!("e{i}"), "thing", format!("N{i}")),
                    |entity, (_, to)| entity.with_relationship("link", format!("e{}", to % n)),
                )
        })
        .collect()
}

fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..8).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..20),
        )
    })
}

proptest! {
    #[test]
    fn test_related_names_are_distinct((n, edges) in arb_graph(), hops in 1usize..4) {
        let store = store(n, &edges);
        let resolver = RelationshipResolver::new(&store).with_max_hops(hops);
        for entity in store.iter() {
            let names = resolver.related_names(entity);
            let mut deduped = names.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), names.len());
        }
    }

    #[test]
    fn test_reciprocal_pair_excludes_origin_at_hop_two(a in 0usize..4, b in 4usize..8) {
        let store = store(8, &[(a, b), (b, a)]);
        let resolver = RelationshipResolver::new(&store);
        let origin = store.get(&format!("e{a}")).unwrap();
        prop_assert_eq!(resolver.related_names(origin), vec![format!("N{b}")]);
    }

    #[test]
    fn test_more_hops_never_lose_names((n, edges) in arb_graph()) {
        let store = store(n, &edges);
        for entity in store.iter() {
            let shallow = RelationshipResolver::new(&store).with_max_hops(1).related_names(entity);
            let deep = RelationshipResolver::new(&store).with_max_hops(3).related_names(entity);
            prop_assert!(shallow.iter().all(|name| deep.contains(name)));
            prop_assert_eq!(&deep[..shallow.len()], &shallow[..]);
        }
    }
}
