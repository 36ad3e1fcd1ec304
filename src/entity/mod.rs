//! Entity records, the in-memory store, and the directory loader.

pub mod loader;
pub mod store;
pub mod types;

pub use loader::{LoadReport, LoadedEntities, RejectedFile, load_entities};
pub use store::EntityStore;
pub use types::{ContentSection, Entity, FacetValue, Facets, Relationship};
