//! lore - entity graph search index builder

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use lore::LoreError;
use lore::app::AppContext;
use lore::cli::output::{emit_robot, robot_error};
use lore::cli::{Cli, commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.quiet {
        init_tracing(cli.verbose, cli.robot);
    }

    let outcome =
        AppContext::from_cli(&cli).and_then(|ctx| commands::run(&ctx, &cli.command));
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, cli.robot);
            ExitCode::FAILURE
        }
    }
}

fn report_error(err: &LoreError, robot: bool) {
    if robot && emit_robot(&robot_error(err.code(), err.to_string())).is_ok() {
        return;
    }
    eprintln!("Error: {err}");
}

/// Default filter for a `-v` count; `RUST_LOG` takes precedence.
const fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn,lore=info",
        1 => "info,lore=debug",
        2 => "debug,lore=trace",
        _ => "trace",
    }
}

fn init_tracing(verbosity: u8, json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
