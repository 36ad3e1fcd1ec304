//! lore tags - Browse the tag taxonomy

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::taxonomy::{TAG_TAXONOMY, expand_tag, is_category, tag_parent, tag_to_label};

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Tag or category to explain (lists every category when omitted)
    pub tag: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TagInfo {
    pub tag: String,
    pub label: String,
    pub is_category: bool,
    pub parent: Option<&'static str>,
    pub expands_to: Vec<String>,
}

impl TagInfo {
    #[must_use]
    pub fn describe(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            label: tag_to_label(tag),
            is_category: is_category(tag),
            parent: tag_parent(tag),
            expands_to: expand_tag(tag),
        }
    }
}

pub fn run(ctx: &AppContext, args: &TagsArgs) -> Result<()> {
    match &args.tag {
        Some(tag) => show_tag(ctx, tag),
        None => list_categories(ctx),
    }
}

fn show_tag(ctx: &AppContext, tag: &str) -> Result<()> {
    let info = TagInfo::describe(tag);
    if ctx.robot {
        return emit_robot(&robot_ok(info));
    }

    let mut layout = HumanLayout::new();
    layout
        .title(&format!("{} ({})", info.label, info.tag.cyan()))
        .kv("Category", if info.is_category { "yes" } else { "no" })
        .kv("Parent", info.parent.unwrap_or("-"))
        .blank()
        .section("Matches");
    for expanded in &info.expands_to {
        layout.bullet(expanded);
    }
    emit_human(layout);
    Ok(())
}

fn list_categories(ctx: &AppContext) -> Result<()> {
    if ctx.robot {
        return emit_robot(&robot_ok(TAG_TAXONOMY));
    }

    let mut layout = HumanLayout::new();
    layout.title("Tag taxonomy");
    for category in TAG_TAXONOMY {
        layout.push_line(format!(
            "{} {} {}",
            category.label.bold(),
            format!("({})", category.id).cyan(),
            format!("{} tags", category.children.len()).dimmed()
        ));
        layout.push_line(format!("  {}", category.children.join(", ")));
    }
    emit_human(layout);
    Ok(())
}
