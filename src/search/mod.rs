//! Full-text search over assembled entity documents
//!
//! Documents are written into a tantivy index with one text field per
//! document field, so each can be weighted at query time. Tag filters go
//! through the taxonomy, so filtering by a category matches its children.

pub mod filters;
pub mod tantivy_index;

pub use filters::{FacetFilter, SearchFilters};
pub use tantivy_index::{EntityFields, EntityIndex, SearchHit, SearchRequest};
