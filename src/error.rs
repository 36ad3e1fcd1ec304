//! Error types for lore

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoreError>;

#[derive(Debug, Error)]
pub enum LoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("invalid entity {}: {reason}", path.display())]
    InvalidEntity { path: PathBuf, reason: String },

    #[error("no entities to index in {0}")]
    EmptyCollection(PathBuf),

    #[error("index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    #[error("query error: {0}")]
    Query(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl LoreError {
    /// Stable machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Config(_) | Self::MissingConfig(_) => "config",
            Self::ValidationFailed(_) => "validation_failed",
            Self::InvalidEntity { .. } => "invalid_entity",
            Self::EmptyCollection(_) => "empty_collection",
            Self::Index(_) => "index",
            Self::Query(_) => "query",
            Self::NotFound(_) => "not_found",
        }
    }
}
