use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoreError, Result};
use crate::graph::DEFAULT_MAX_HOPS;

/// Smallest writer heap tantivy accepts for a single indexing thread.
const MIN_WRITER_HEAP_MB: u32 = 15;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Defaults, then the global and project files (or one explicit file),
    /// then `LORE_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("LORE_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                LoreError::MissingConfig(format!("config file {}", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_root.join("lore.toml"))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| LoreError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("lore/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| LoreError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| LoreError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.content {
            self.content.merge(patch);
        }
        if let Some(patch) = patch.index {
            self.index.merge(patch);
        }
        if let Some(patch) = patch.graph {
            self.graph.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("LORE_ENTITIES_DIR") {
            self.content.entities_dir = PathBuf::from(value);
        }
        if let Some(value) = env_string("LORE_CONTENT_EXTENSION") {
            self.content.extension = value;
        }

        if let Some(value) = env_string("LORE_INDEX_OUTPUT_DIR") {
            self.index.output_dir = PathBuf::from(value);
        }
        if let Some(value) = env_u32("LORE_INDEX_WRITER_HEAP_MB")? {
            self.index.writer_heap_mb = value;
        }
        if let Some(value) = env_bool("LORE_INDEX_PARALLEL")? {
            self.index.parallel = value;
        }

        if let Some(value) = env_usize("LORE_GRAPH_MAX_HOPS")? {
            self.graph.max_hops = value;
        }

        if let Some(value) = env_usize("LORE_SEARCH_LIMIT")? {
            self.search.limit = value;
        }
        if let Some(value) = env_bool("LORE_SEARCH_FUZZY")? {
            self.search.fuzzy = value;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.graph.max_hops == 0 {
            return Err(LoreError::Config(
                "graph.max_hops must be at least 1".to_string(),
            ));
        }
        if self.index.writer_heap_mb < MIN_WRITER_HEAP_MB {
            return Err(LoreError::Config(format!(
                "index.writer_heap_mb must be at least {MIN_WRITER_HEAP_MB}"
            )));
        }
        if self.search.limit == 0 {
            return Err(LoreError::Config(
                "search.limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub entities_dir: PathBuf,
    #[serde(default)]
    pub extension: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            entities_dir: PathBuf::from("data/content/entities"),
            extension: "json".to_string(),
        }
    }
}

impl ContentConfig {
    fn merge(&mut self, patch: ContentPatch) {
        if let Some(value) = patch.entities_dir {
            self.entities_dir = value;
        }
        if let Some(value) = patch.extension {
            self.extension = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub writer_heap_mb: u32,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build/search-index"),
            writer_heap_mb: 50,
            parallel: true,
        }
    }
}

impl IndexConfig {
    fn merge(&mut self, patch: IndexPatch) {
        if let Some(value) = patch.output_dir {
            self.output_dir = value;
        }
        if let Some(value) = patch.writer_heap_mb {
            self.writer_heap_mb = value;
        }
        if let Some(value) = patch.parallel {
            self.parallel = value;
        }
    }

    #[must_use]
    pub const fn writer_heap_bytes(&self) -> usize {
        self.writer_heap_mb as usize * 1_000_000
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub max_hops: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl GraphConfig {
    fn merge(&mut self, patch: GraphPatch) {
        if let Some(value) = patch.max_hops {
            self.max_hops = value;
        }
    }
}

/// Query-time settings. Field boosts belong to the indexer, not to
/// document assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub fuzzy: bool,
    #[serde(default)]
    pub boost_name: f32,
    #[serde(default)]
    pub boost_aliases: f32,
    #[serde(default)]
    pub boost_description: f32,
    #[serde(default)]
    pub boost_body: f32,
    #[serde(default)]
    pub boost_tags: f32,
    #[serde(default)]
    pub boost_facets: f32,
    #[serde(default)]
    pub boost_related: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            fuzzy: true,
            boost_name: 3.0,
            boost_aliases: 2.0,
            boost_description: 1.5,
            boost_body: 1.0,
            boost_tags: 1.0,
            boost_facets: 1.0,
            boost_related: 1.0,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.limit {
            self.limit = value;
        }
        if let Some(value) = patch.fuzzy {
            self.fuzzy = value;
        }
        if let Some(value) = patch.boost_name {
            self.boost_name = value;
        }
        if let Some(value) = patch.boost_aliases {
            self.boost_aliases = value;
        }
        if let Some(value) = patch.boost_description {
            self.boost_description = value;
        }
        if let Some(value) = patch.boost_body {
            self.boost_body = value;
        }
        if let Some(value) = patch.boost_tags {
            self.boost_tags = value;
        }
        if let Some(value) = patch.boost_facets {
            self.boost_facets = value;
        }
        if let Some(value) = patch.boost_related {
            self.boost_related = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub content: Option<ContentPatch>,
    pub index: Option<IndexPatch>,
    pub graph: Option<GraphPatch>,
    pub search: Option<SearchPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ContentPatch {
    pub entities_dir: Option<PathBuf>,
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct IndexPatch {
    pub output_dir: Option<PathBuf>,
    pub writer_heap_mb: Option<u32>,
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GraphPatch {
    pub max_hops: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub limit: Option<usize>,
    pub fuzzy: Option<bool>,
    pub boost_name: Option<f32>,
    pub boost_aliases: Option<f32>,
    pub boost_description: Option<f32>,
    pub boost_body: Option<f32>,
    pub boost_tags: Option<f32>,
    pub boost_facets: Option<f32>,
    pub boost_related: Option<f32>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Result<Option<bool>> {
    match std::env::var(key) {
        Ok(value) => parse_bool(key, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoreError::Config(format!(
            "invalid {key} value {value}: expected true/false, yes/no, on/off or 1/0"
        ))),
    }
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|err| LoreError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| LoreError::Config(format!("invalid {key} value {value}: {err}"))),
        Err(_) => Ok(None),
    }
}
