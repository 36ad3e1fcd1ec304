//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "lore", version, about = "Resolve an entity graph into a full-text search index")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Machine-readable JSON output
    #[arg(long, global = true, env = "LORE_ROBOT")]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Path to a config file (replaces global and project config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_with_filters() {
        let cli = Cli::try_parse_from([
            "lore", "--robot", "search", "nolan", "--type", "movie", "--tag", "genre", "--facet",
            "genre=heist", "-n", "5",
        ])
        .unwrap();
        assert!(cli.robot);
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.query.as_deref(), Some("nolan"));
        assert_eq!(args.kind.as_deref(), Some("movie"));
        assert_eq!(args.tag.as_deref(), Some("genre"));
        assert_eq!(args.facet, vec!["genre=heist"]);
        assert_eq!(args.limit, Some(5));
    }

    #[test]
    fn parses_build_overrides() {
        let cli = Cli::try_parse_from([
            "lore", "build", "--entities", "content", "--max-hops", "3", "--sequential", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.entities, Some(PathBuf::from("content")));
        assert_eq!(args.max_hops, Some(3));
        assert!(args.sequential);
    }
}
