//! Tantivy full-text index over assembled entity documents

use std::path::{Path, PathBuf};

use serde::Serialize;
use tantivy::collector::TopDocs;
use tantivy::query::{AllQuery, BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, STORED, STRING, Schema, TEXT, Value};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::document::{AssembledEntity, StoredRecord};
use crate::error::{LoreError, Result};

use super::filters::SearchFilters;

/// Field handles for the entity schema.
#[derive(Debug, Clone, Copy)]
pub struct EntityFields {
    pub id: Field,
    pub kind: Field,
    pub name: Field,
    pub description: Field,
    pub body: Field,
    pub aliases: Field,
    pub tags: Field,
    pub facets: Field,
    pub related: Field,
    /// One raw term per tag, for exact category filtering.
    pub tag: Field,
    /// JSON of the [`StoredRecord`], stored only.
    pub record: Field,
}

impl EntityFields {
    fn build() -> (Schema, Self) {
        let mut builder = Schema::builder();
        let fields = Self {
            id: builder.add_text_field("id", STRING | STORED),
            kind: builder.add_text_field("type", STRING | STORED),
            name: builder.add_text_field("name", TEXT | STORED),
            description: builder.add_text_field("description", TEXT),
            body: builder.add_text_field("body", TEXT),
            aliases: builder.add_text_field("aliases", TEXT),
            tags: builder.add_text_field("tags", TEXT),
            facets: builder.add_text_field("facetText", TEXT),
            related: builder.add_text_field("related", TEXT),
            tag: builder.add_text_field("tag", STRING),
            record: builder.add_text_field("record", STORED),
        };
        (builder.build(), fields)
    }

    fn from_schema(schema: &Schema) -> Result<Self> {
        Ok(Self {
            id: schema.get_field("id")?,
            kind: schema.get_field("type")?,
            name: schema.get_field("name")?,
            description: schema.get_field("description")?,
            body: schema.get_field("body")?,
            aliases: schema.get_field("aliases")?,
            tags: schema.get_field("tags")?,
            facets: schema.get_field("facetText")?,
            related: schema.get_field("related")?,
            tag: schema.get_field("tag")?,
            record: schema.get_field("record")?,
        })
    }

    fn weighted_text_fields(&self, config: &SearchConfig) -> [(Field, f32); 7] {
        [
            (self.name, config.boost_name),
            (self.description, config.boost_description),
            (self.body, config.boost_body),
            (self.aliases, config.boost_aliases),
            (self.tags, config.boost_tags),
            (self.facets, config.boost_facets),
            (self.related, config.boost_related),
        ]
    }
}

/// A search request against the entity index.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: String,
    pub filters: SearchFilters,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub score: f32,
    pub record: StoredRecord,
}

pub struct EntityIndex {
    index: Index,
    reader: IndexReader,
    fields: EntityFields,
    path: Option<PathBuf>,
}

impl EntityIndex {
    /// Create an empty index at `path`, replacing a previous index there.
    ///
    /// Refuses to touch a directory that holds anything other than an index.
    pub fn create(path: &Path) -> Result<Self> {
        ensure_replaceable(path)?;
        if path.exists() {
            debug!(target: "search", path = %path.display(), "removing previous index");
            std::fs::remove_dir_all(path)?;
        }
        std::fs::create_dir_all(path)?;

        let (schema, fields) = EntityFields::build();
        let index = Index::create_in_dir(path, schema)?;
        Self::from_index(index, fields, Some(path.to_path_buf()))
    }

    /// Write `assembled` into a fresh index at `path` and return the count.
    ///
    /// Documents go into a sibling staging directory first. The previous
    /// index at `path` is only swapped out after the new one has committed.
    pub fn rebuild(path: &Path, assembled: &[AssembledEntity], heap_bytes: usize) -> Result<usize> {
        ensure_replaceable(path)?;
        let staging = staging_path(path)?;
        if staging.exists() {
            debug!(target: "search", path = %staging.display(), "removing stale staging index");
            std::fs::remove_dir_all(&staging)?;
        }

        let written = Self::create(&staging)?.write_all(assembled, heap_bytes)?;

        if path.exists() {
            std::fs::remove_dir_all(path)?;
        }
        std::fs::rename(&staging, path)?;
        debug!(target: "search", path = %path.display(), "index swapped into place");
        Ok(written)
    }

    /// Create an empty index held in memory.
    pub fn create_in_ram() -> Result<Self> {
        let (schema, fields) = EntityFields::build();
        let index = Index::create_in_ram(schema);
        Self::from_index(index, fields, None)
    }

    /// Open an index previously written by [`EntityIndex::create`].
    pub fn open(path: &Path) -> Result<Self> {
        if !path.join("meta.json").exists() {
            return Err(LoreError::NotFound(format!(
                "search index at {} (run `lore build` first)",
                path.display()
            )));
        }
        let index = Index::open_in_dir(path)?;
        let fields = EntityFields::from_schema(&index.schema())?;
        Self::from_index(index, fields, Some(path.to_path_buf()))
    }

    fn from_index(index: Index, fields: EntityFields, path: Option<PathBuf>) -> Result<Self> {
        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        Ok(Self {
            index,
            reader,
            fields,
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn document_count(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Add all documents and commit. Returns the number written.
    pub fn write_all(&self, assembled: &[AssembledEntity], heap_bytes: usize) -> Result<usize> {
        let mut writer: IndexWriter = self.index.writer(heap_bytes)?;
        for entity in assembled {
            writer.add_document(self.to_tantivy(entity)?)?;
        }
        writer.commit()?;
        self.reader.reload()?;

        info!(target: "search", documents = assembled.len(), "index committed");
        Ok(assembled.len())
    }

    fn to_tantivy(&self, entity: &AssembledEntity) -> Result<TantivyDocument> {
        let f = &self.fields;
        let doc = &entity.document;

        let mut out = TantivyDocument::default();
        out.add_text(f.id, &doc.id);
        out.add_text(f.kind, &doc.kind);
        out.add_text(f.name, &doc.name);
        out.add_text(f.description, &doc.description);
        out.add_text(f.body, &doc.body);
        out.add_text(f.aliases, &doc.aliases);
        out.add_text(f.tags, &doc.tags);
        out.add_text(f.facets, &doc.facet_text);
        out.add_text(f.related, &doc.related);
        for tag in &entity.stored.tags {
            out.add_text(f.tag, tag);
        }
        out.add_text(f.record, serde_json::to_string(&entity.stored)?);
        Ok(out)
    }

    /// Run a weighted text query with optional type, tag and facet filters.
    ///
    /// An empty query string matches every document, so filters alone can
    /// be used to browse.
    pub fn search(&self, request: &SearchRequest, config: &SearchConfig) -> Result<Vec<SearchHit>> {
        let limit = if request.limit == 0 {
            config.limit
        } else {
            request.limit
        };
        let query = self.build_query(request, config)?;
        let searcher = self.reader.searcher();

        // facet predicates run after retrieval, so they need every candidate
        let candidates = if request.filters.facets.is_empty() {
            limit
        } else {
            usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX)
        }
        .max(1);

        let top_docs = searcher.search(&*query, &TopDocs::with_limit(candidates))?;

        let mut hits = Vec::new();
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address)?;
            let Some(raw) = doc.get_first(self.fields.record).and_then(|v| v.as_str()) else {
                continue;
            };
            let record: StoredRecord = serde_json::from_str(raw)?;
            if !request.filters.matches_record(&record) {
                continue;
            }
            hits.push(SearchHit { score, record });
            if hits.len() >= limit {
                break;
            }
        }

        debug!(
            target: "search",
            query = %request.query,
            filters = ?request.filters,
            hits = hits.len(),
            "search complete"
        );
        Ok(hits)
    }

    fn build_query(&self, request: &SearchRequest, config: &SearchConfig) -> Result<Box<dyn Query>> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();

        let text = request.query.trim();
        if text.is_empty() {
            clauses.push((Occur::Must, Box::new(AllQuery)));
        } else {
            let weighted = self.fields.weighted_text_fields(config);
            let mut parser =
                QueryParser::for_index(&self.index, weighted.iter().map(|(f, _)| *f).collect());
            for (field, boost) in weighted {
                parser.set_field_boost(field, boost);
                if config.fuzzy {
                    parser.set_field_fuzzy(field, true, 1, true);
                }
            }
            let parsed = parser
                .parse_query(&escape_query(text))
                .map_err(|err| LoreError::Query(err.to_string()))?;
            clauses.push((Occur::Must, parsed));
        }

        if let Some(kind) = &request.filters.kind {
            clauses.push((Occur::Must, self.term_query(self.fields.kind, kind)));
        }

        if let Some(tags) = request.filters.tag_set() {
            let any_tag: Vec<(Occur, Box<dyn Query>)> = tags
                .iter()
                .map(|tag| (Occur::Should, self.term_query(self.fields.tag, tag)))
                .collect();
            clauses.push((Occur::Must, Box::new(BooleanQuery::new(any_tag))));
        }

        Ok(Box::new(BooleanQuery::new(clauses)))
    }

    fn term_query(&self, field: Field, value: &str) -> Box<dyn Query> {
        Box::new(TermQuery::new(
            Term::from_field_text(field, value),
            IndexRecordOption::Basic,
        ))
    }
}

/// A path may be replaced when it is missing, empty, or holds an index.
fn ensure_replaceable(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if !path.is_dir() {
        return Err(LoreError::Config(format!(
            "index output {} is not a directory",
            path.display()
        )));
    }
    if path.join("meta.json").is_file() || std::fs::read_dir(path)?.next().is_none() {
        return Ok(());
    }
    Err(LoreError::Config(format!(
        "index output {} is not empty and holds no search index; refusing to replace it",
        path.display()
    )))
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        LoreError::Config(format!("index output {} has no directory name", path.display()))
    })?;
    let mut staging = name.to_os_string();
    staging.push(".staging");
    Ok(path.with_file_name(staging))
}

/// Escape characters the tantivy query grammar treats as operators.
fn escape_query(query: &str) -> String {
    const SPECIAL: &[char] = &[
        '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\',
        '/',
    ];
    let mut escaped = String::with_capacity(query.len() * 2);
    for c in query.chars() {
        if SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
