//! Search filters applied on top of the text query.

use serde::Serialize;

use crate::document::StoredRecord;
use crate::error::{LoreError, Result};
use crate::taxonomy::expand_tag;

/// Exact `key=value` predicate over a record's merged facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetFilter {
    pub key: String,
    pub value: String,
}

impl FacetFilter {
    /// Parse `key=value`.
    pub fn parse(raw: &str) -> Result<Self> {
        let (key, value) = raw.split_once('=').ok_or_else(|| {
            LoreError::Query(format!("facet filter {raw:?} must look like key=value"))
        })?;
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return Err(LoreError::Query(format!(
                "facet filter {raw:?} needs both a key and a value"
            )));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    #[must_use]
    pub fn matches(&self, record: &StoredRecord) -> bool {
        record
            .facets
            .get(&self.key)
            .is_some_and(|value| value.matches(&self.value))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchFilters {
    pub kind: Option<String>,
    pub tag: Option<String>,
    pub facets: Vec<FacetFilter>,
}

impl SearchFilters {
    /// Tags that satisfy the tag filter. A category matches all its children.
    #[must_use]
    pub fn tag_set(&self) -> Option<Vec<String>> {
        self.tag.as_deref().map(expand_tag)
    }

    /// Checks that can only run on stored records.
    #[must_use]
    pub fn matches_record(&self, record: &StoredRecord) -> bool {
        self.facets.iter().all(|filter| filter.matches(record))
    }
}
