//! CLI command implementations
//!
//! Each subcommand has its own module with an Args struct and a run()
//! function.

use clap::Subcommand;

pub mod build;
pub mod inspect;
pub mod search;
pub mod tags;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Build(args) => build::run(ctx, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Tags(args) => tags::run(ctx, args),
        Commands::Inspect(args) => inspect::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load entities, resolve facets and relationships, write the index
    Build(build::BuildArgs),

    /// Query a built index
    Search(search::SearchArgs),

    /// Browse the tag taxonomy
    Tags(tags::TagsArgs),

    /// Show the assembled document for one entity
    Inspect(inspect::InspectArgs),
}
