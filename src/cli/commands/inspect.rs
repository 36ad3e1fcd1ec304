//! lore inspect - Show the assembled document for one entity

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::document::{AssembledEntity, DocumentAssembler};
use crate::entity::EntityStore;
use crate::error::{LoreError, Result};
use crate::pipeline::{BuildOptions, load_store};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Entity id
    pub id: String,

    /// Directory of entity JSON files
    #[arg(long)]
    pub entities: Option<PathBuf>,

    /// Relationship hops followed when collecting related names
    #[arg(long)]
    pub max_hops: Option<usize>,
}

impl InspectArgs {
    fn options(&self, ctx: &AppContext) -> BuildOptions {
        let mut options = BuildOptions::from_config(&ctx.config);
        let entities = self.entities.as_deref().unwrap_or(&options.entities_dir);
        options.entities_dir = ctx.resolve_path(entities);
        if let Some(hops) = self.max_hops {
            options.set_max_hops(hops);
        }
        options
    }
}

pub fn run(ctx: &AppContext, args: &InspectArgs) -> Result<()> {
    let options = args.options(ctx);
    let (store, _) = load_store(&options)?;
    let assembled = inspect(&store, &args.id, options.max_hops)?;

    if ctx.robot {
        return emit_robot(&robot_ok(assembled));
    }
    emit_human(layout(&assembled));
    Ok(())
}

/// Assemble the document for `id` against `store`.
pub fn inspect(store: &EntityStore, id: &str, max_hops: usize) -> Result<AssembledEntity> {
    let entity = store
        .get(id)
        .ok_or_else(|| LoreError::NotFound(format!("entity {id:?}")))?;
    Ok(DocumentAssembler::new(store)
        .with_max_hops(max_hops)
        .assemble(entity))
}

fn layout(assembled: &AssembledEntity) -> HumanLayout {
    let doc = &assembled.document;
    let mut layout = HumanLayout::new();
    layout
        .title(&format!("{} {}", doc.name, format!("[{}:{}]", doc.kind, doc.id).cyan()))
        .kv("Description", &doc.description)
        .kv("Aliases", &doc.aliases)
        .kv("Tags", &doc.tags)
        .kv("Facet text", &doc.facet_text)
        .kv("Related", &doc.related)
        .blank()
        .section("Merged facets");
    for (key, value) in &assembled.stored.facets {
        let rendered = serde_json::to_string(value).unwrap_or_default();
        layout.kv(key, &rendered);
    }
    if !doc.body.is_empty() {
        layout.blank().section("Body").push_line(doc.body.clone());
    }
    layout
}
