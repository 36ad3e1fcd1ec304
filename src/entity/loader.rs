//! Load entity records from a content directory.
//!
//! One JSON file holds one entity. Files that fail to parse or validate are
//! skipped and reported; they never abort the load.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{LoreError, Result};

use super::types::Entity;

/// A file the loader refused, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub files_read: usize,
    pub rejected: Vec<RejectedFile>,
}

#[derive(Debug, Default)]
pub struct LoadedEntities {
    pub entities: Vec<Entity>,
    pub report: LoadReport,
}

/// Read every `*.{extension}` file under `dir` in path order.
pub fn load_entities(dir: &Path, extension: &str) -> Result<LoadedEntities> {
    if !dir.is_dir() {
        return Err(LoreError::NotFound(format!(
            "entities directory {}",
            dir.display()
        )));
    }

    let mut loaded = LoadedEntities::default();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !has_extension(path, extension) {
            continue;
        }
        loaded.report.files_read += 1;

        match parse_entity_file(path) {
            Ok(entity) => loaded.entities.push(entity),
            Err(err) => {
                warn!(target: "store", path = %path.display(), error = %err, "skipping entity file");
                loaded.report.rejected.push(RejectedFile {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
            }
        }
    }

    debug!(
        target: "store",
        dir = %dir.display(),
        loaded = loaded.entities.len(),
        rejected = loaded.report.rejected.len(),
        "entity load complete"
    );
    Ok(loaded)
}

pub fn parse_entity_file(path: &Path) -> Result<Entity> {
    let raw = std::fs::read_to_string(path)?;
    let entity: Entity = serde_json::from_str(&raw).map_err(|err| LoreError::InvalidEntity {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    entity.validate().map_err(|err| LoreError::InvalidEntity {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    Ok(entity)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
