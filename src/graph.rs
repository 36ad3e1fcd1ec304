//! Relationship resolution
//!
//! Walks relationship edges breadth-first up to a fixed number of hops and
//! collects the distinct names reached, so searching for a related entity's
//! name (a director, a city) surfaces the entity that links to it.

use std::collections::HashSet;

use tracing::trace;

use crate::entity::{Entity, EntityStore};

/// Default traversal depth.
pub const DEFAULT_MAX_HOPS: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct RelationshipResolver<'a> {
    store: &'a EntityStore,
    max_hops: usize,
}

impl<'a> RelationshipResolver<'a> {
    #[must_use]
    pub const fn new(store: &'a EntityStore) -> Self {
        Self {
            store,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// Override the hop bound. Zero is treated as one.
    #[must_use]
    pub const fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = if max_hops == 0 { 1 } else { max_hops };
        self
    }

    #[must_use]
    pub const fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Distinct names reachable from `origin`, in discovery order.
    ///
    /// Edges to unknown ids are skipped. From the second hop on, edges that
    /// lead back to `origin` are skipped too. Each entity is expanded at most
    /// once, at the earliest hop it was reached.
    #[must_use]
    pub fn related_names(&self, origin: &Entity) -> Vec<String> {
        let mut names = Vec::new();
        let mut seen_names = HashSet::new();
        let mut expanded: HashSet<&str> = HashSet::from([origin.id.as_str()]);
        let mut frontier: Vec<&Entity> = vec![origin];

        for hop in 1..=self.max_hops {
            let mut next = Vec::new();
            for entity in frontier {
                for relationship in &entity.relationships {
                    let Some(target) = self.store.get(&relationship.target) else {
                        continue;
                    };
                    if hop > 1 && target.id == origin.id {
                        continue;
                    }
                    if seen_names.insert(target.name.as_str()) {
                        names.push(target.name.clone());
                    }
                    if expanded.insert(target.id.as_str()) {
                        next.push(target);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        trace!(target: "graph", entity = %origin.id, related = names.len(), "resolved related names");
        names
    }
}
