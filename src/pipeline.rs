//! Build pipeline: load entities, assemble documents, write the index.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::document::{AssembledEntity, DocumentAssembler};
use crate::entity::{EntityStore, LoadReport, RejectedFile, load_entities};
use crate::error::{LoreError, Result};
use crate::search::EntityIndex;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub entities_dir: PathBuf,
    pub extension: String,
    pub output_dir: PathBuf,
    pub max_hops: usize,
    pub parallel: bool,
    pub writer_heap_bytes: usize,
}

impl BuildOptions {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            entities_dir: config.content.entities_dir.clone(),
            extension: config.content.extension.clone(),
            output_dir: config.index.output_dir.clone(),
            max_hops: config.graph.max_hops,
            parallel: config.index.parallel,
            writer_heap_bytes: config.index.writer_heap_bytes(),
        }
    }

    /// Override the hop bound. Zero is raised to one, matching the config rule.
    pub fn set_max_hops(&mut self, max_hops: usize) {
        self.max_hops = max_hops.max(1);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub files_read: usize,
    pub rejected: Vec<RejectedFile>,
    pub entities: usize,
    pub documents: usize,
    pub with_related: usize,
    pub output_dir: PathBuf,
    pub elapsed_ms: u128,
}

/// Load the store for `options`, failing when nothing usable was found.
pub fn load_store(options: &BuildOptions) -> Result<(EntityStore, LoadReport)> {
    let loaded = load_entities(&options.entities_dir, &options.extension)?;
    for rejected in &loaded.report.rejected {
        warn!(target: "build", path = %rejected.path.display(), reason = %rejected.reason, "rejected entity file");
    }
    let store = EntityStore::from_entities(loaded.entities);
    if store.is_empty() {
        return Err(LoreError::EmptyCollection(options.entities_dir.clone()));
    }
    Ok((store, loaded.report))
}

/// Assemble every document in `store`.
#[must_use]
pub fn assemble(store: &EntityStore, max_hops: usize, parallel: bool) -> Vec<AssembledEntity> {
    DocumentAssembler::new(store)
        .with_max_hops(max_hops)
        .assemble_all(store, parallel)
}

/// Stages reported while a build runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Loading,
    Assembling,
    Writing,
}

impl BuildStage {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading entities",
            Self::Assembling => "resolving facets and relationships",
            Self::Writing => "writing index",
        }
    }
}

/// Run a full build and persist the index at `options.output_dir`.
pub fn build_index(options: &BuildOptions) -> Result<BuildReport> {
    build_index_with_progress(options, |_| {})
}

/// [`build_index`], calling `on_stage` as each stage starts.
pub fn build_index_with_progress(
    options: &BuildOptions,
    mut on_stage: impl FnMut(BuildStage),
) -> Result<BuildReport> {
    let start = Instant::now();

    on_stage(BuildStage::Loading);
    let (store, load_report) = load_store(options)?;
    info!(target: "build", entities = store.len(), dir = %options.entities_dir.display(), "entities loaded");

    on_stage(BuildStage::Assembling);
    let assembled = assemble(&store, options.max_hops, options.parallel);
    let with_related = assembled
        .iter()
        .filter(|entity| !entity.document.related.is_empty())
        .count();

    on_stage(BuildStage::Writing);
    let documents =
        EntityIndex::rebuild(&options.output_dir, &assembled, options.writer_heap_bytes)?;

    let report = BuildReport {
        files_read: load_report.files_read,
        rejected: load_report.rejected,
        entities: store.len(),
        documents,
        with_related,
        output_dir: options.output_dir.clone(),
        elapsed_ms: start.elapsed().as_millis(),
    };
    info!(
        target: "build",
        documents = report.documents,
        rejected = report.rejected.len(),
        elapsed_ms = report.elapsed_ms,
        "build complete"
    );
    Ok(report)
}
