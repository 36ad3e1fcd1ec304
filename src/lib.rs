//! lore - Resolve an entity graph into flat full-text search documents
//!
//! Entities are loaded from JSON files, enriched with facets inherited from
//! the entities they depend on and with the names of entities reachable
//! through their relationships, then written into a tantivy index.

pub mod app;
pub mod cli;
pub mod config;
pub mod document;
pub mod entity;
pub mod error;
pub mod facets;
pub mod graph;
pub mod pipeline;
pub mod search;
pub mod taxonomy;

pub use error::{LoreError, Result};
