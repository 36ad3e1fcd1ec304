//! lore search - Query a built index

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use serde_json::json;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::search::{EntityIndex, FacetFilter, SearchFilters, SearchHit, SearchRequest};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (omit to browse by filters alone)
    pub query: Option<String>,

    /// Only return entities of this type
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Only return entities with this tag (a category matches its children)
    #[arg(long)]
    pub tag: Option<String>,

    /// Facet predicate as key=value (repeatable)
    #[arg(long)]
    pub facet: Vec<String>,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Index directory (defaults to index.output_dir)
    #[arg(long)]
    pub index: Option<PathBuf>,
}

impl SearchArgs {
    fn request(&self, default_limit: usize) -> Result<SearchRequest> {
        let facets = self
            .facet
            .iter()
            .map(|raw| FacetFilter::parse(raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(SearchRequest {
            query: self.query.clone().unwrap_or_default(),
            filters: SearchFilters {
                kind: self.kind.clone(),
                tag: self.tag.clone(),
                facets,
            },
            limit: self.limit.unwrap_or(default_limit),
        })
    }
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let request = args.request(ctx.config.search.limit)?;
    let index_dir = ctx.resolve_path(
        args.index
            .as_deref()
            .unwrap_or(&ctx.config.index.output_dir),
    );
    let index = EntityIndex::open(&index_dir)?;
    let hits = index.search(&request, &ctx.config.search)?;

    if ctx.robot {
        return emit_robot(&robot_ok(json!({
            "query": request.query,
            "filters": request.filters,
            "count": hits.len(),
            "hits": hits,
        })));
    }

    if hits.is_empty() {
        println!("{}", "No matching entities".yellow());
        return Ok(());
    }
    emit_human(layout(&hits));
    Ok(())
}

fn layout(hits: &[SearchHit]) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout.title(&format!("{} result(s)", hits.len()));
    for hit in hits {
        let record = &hit.record;
        layout.push_line(format!(
            "{} {} {}",
            format!("{:>6.2}", hit.score).dimmed(),
            record.name.bold(),
            format!("[{}:{}]", record.kind, record.id).cyan()
        ));
        if !record.description.is_empty() {
            layout.push_line(format!("       {}", record.description));
        }
        if !record.tags.is_empty() {
            layout.push_line(format!("       tags: {}", record.tags.join(", ")));
        }
    }
    layout
}
