//! Facet inheritance
//!
//! Dependent entities (characters, items, vehicles, locations) pick up the
//! facets of the works they relate to (movies, books), so filtering a work's
//! facet also surfaces the things that belong to it. Inheritance looks at
//! direct relationships only and never flows between two providers.

use std::collections::btree_map::Entry;

use itertools::Itertools;
use serde::Serialize;
use tracing::trace;

use crate::entity::{Entity, EntityStore, FacetValue, Facets};

/// Entity types that may receive facets from related entities.
pub const INHERITING_TYPES: &[&str] = &["character", "item", "vehicle", "location"];

/// Entity types whose facets may be inherited.
pub const PROVIDING_TYPES: &[&str] = &["movie", "book"];

#[must_use]
pub fn inherits_facets(kind: &str) -> bool {
    INHERITING_TYPES.contains(&kind)
}

#[must_use]
pub fn provides_facets(kind: &str) -> bool {
    PROVIDING_TYPES.contains(&kind)
}

/// Merge `source` into `target`.
///
/// New keys are copied. When both sides hold lists the result is their
/// deduplicated union. Any other collision keeps the value already in
/// `target`, so the first scalar seen for a key sticks.
pub fn merge_facets(target: &mut Facets, source: &Facets) {
    for (key, incoming) in source {
        match target.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(incoming.clone());
            }
            Entry::Occupied(mut slot) => {
                if let (FacetValue::List(existing), FacetValue::List(items)) =
                    (slot.get_mut(), incoming)
                {
                    *existing = existing.iter().chain(items).unique().cloned().collect();
                }
            }
        }
    }
}

/// Own, inherited, and merged facets for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedFacets {
    pub inherited: Facets,
    pub merged: Facets,
}

/// Computes inherited facets against an entity store.
#[derive(Debug, Clone, Copy)]
pub struct FacetEngine<'a> {
    store: &'a EntityStore,
}

impl<'a> FacetEngine<'a> {
    #[must_use]
    pub const fn new(store: &'a EntityStore) -> Self {
        Self { store }
    }

    /// Facets `entity` inherits from its directly related providers, merged
    /// in relationship order.
    #[must_use]
    pub fn inherited_facets(&self, entity: &Entity) -> Facets {
        let mut inherited = Facets::new();
        if !inherits_facets(&entity.kind) {
            return inherited;
        }

        for relationship in &entity.relationships {
            let Some(related) = self.store.get(&relationship.target) else {
                continue;
            };
            if !provides_facets(&related.kind) || related.facets.is_empty() {
                continue;
            }
            trace!(
                target: "facets",
                entity = %entity.id,
                provider = %related.id,
                keys = related.facets.len(),
                "inheriting facets"
            );
            merge_facets(&mut inherited, &related.facets);
        }
        inherited
    }

    /// The entity's own facets with inherited facets merged underneath.
    #[must_use]
    pub fn resolve(&self, entity: &Entity) -> ResolvedFacets {
        let inherited = self.inherited_facets(entity);
        let mut merged = entity.facets.clone();
        merge_facets(&mut merged, &inherited);
        ResolvedFacets { inherited, merged }
    }
}
