//! Document assembly
//!
//! Flattens each entity, its inherited facets and its related names into a
//! [`SearchDocument`] for full-text indexing, plus a [`StoredRecord`] that
//! keeps the structured data for filtering and display after a search.

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::{Entity, EntityStore, FacetValue, Facets, Relationship};
use crate::facets::FacetEngine;
use crate::graph::RelationshipResolver;

/// Separator placed between content section bodies.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Flat text fields handed to the full-text indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub body: String,
    pub aliases: String,
    pub tags: String,
    pub facet_text: String,
    pub related: String,
}

/// Structured fields kept alongside the text index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub facets: Facets,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledEntity {
    pub document: SearchDocument,
    pub stored: StoredRecord,
}

/// Space-joined text of a facet map. List elements become separate tokens
/// and flags are left out; they are filterable but not searchable text.
#[must_use]
pub fn facet_text(facets: &Facets) -> String {
    facets
        .values()
        .flat_map(|value| match value {
            FacetValue::Flag(_) => Vec::new(),
            FacetValue::Text(text) => vec![text.as_str()],
            FacetValue::List(items) => items.iter().map(String::as_str).collect(),
        })
        .join(" ")
}

fn join_non_empty<'s>(parts: impl IntoIterator<Item = &'s str>) -> String {
    parts.into_iter().filter(|part| !part.is_empty()).join(" ")
}

pub struct DocumentAssembler<'a> {
    facets: FacetEngine<'a>,
    resolver: RelationshipResolver<'a>,
}

impl<'a> DocumentAssembler<'a> {
    #[must_use]
    pub const fn new(store: &'a EntityStore) -> Self {
        Self {
            facets: FacetEngine::new(store),
            resolver: RelationshipResolver::new(store),
        }
    }

    #[must_use]
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.resolver = self.resolver.with_max_hops(max_hops);
        self
    }

    #[must_use]
    pub fn assemble(&self, entity: &Entity) -> AssembledEntity {
        let resolved = self.facets.resolve(entity);
        let related = self.resolver.related_names(entity);
        let description = entity.description.clone().unwrap_or_default();

        let document = SearchDocument {
            id: entity.id.clone(),
            kind: entity.kind.clone(),
            name: entity.name.clone(),
            description: description.clone(),
            body: entity
                .content
                .iter()
                .map(|section| section.body.as_str())
                .join(SECTION_SEPARATOR),
            aliases: entity.aliases.join(" "),
            tags: entity.tags.join(" "),
            facet_text: join_non_empty([
                facet_text(&entity.facets).as_str(),
                facet_text(&resolved.inherited).as_str(),
            ]),
            related: related.join(" "),
        };

        let stored = StoredRecord {
            id: entity.id.clone(),
            kind: entity.kind.clone(),
            name: entity.name.clone(),
            description,
            facets: resolved.merged,
            tags: entity.tags.clone(),
            relationships: entity.relationships.clone(),
        };

        AssembledEntity { document, stored }
    }

    /// Assemble every entity in the store, in store order.
    #[must_use]
    pub fn assemble_all(&self, store: &EntityStore, parallel: bool) -> Vec<AssembledEntity> {
        let assembled: Vec<AssembledEntity> = if parallel {
            store
                .as_slice()
                .par_iter()
                .map(|entity| self.assemble(entity))
                .collect()
        } else {
            store.iter().map(|entity| self.assemble(entity)).collect()
        };
        debug!(target: "assemble", documents = assembled.len(), parallel, "assembled documents");
        assembled
    }
}
