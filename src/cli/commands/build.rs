//! lore build - Resolve the entity graph and write the search index

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok, robot_partial};
use crate::error::Result;
use crate::pipeline::{BuildOptions, BuildReport, build_index_with_progress};

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory of entity JSON files
    #[arg(long)]
    pub entities: Option<PathBuf>,

    /// Directory the index is written to (recreated on every build)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Relationship hops followed when collecting related names
    #[arg(long)]
    pub max_hops: Option<usize>,

    /// Assemble documents on a single thread
    #[arg(long)]
    pub sequential: bool,
}

impl BuildArgs {
    fn options(&self, ctx: &AppContext) -> BuildOptions {
        let mut options = BuildOptions::from_config(&ctx.config);
        if let Some(dir) = &self.entities {
            options.entities_dir = ctx.resolve_path(dir);
        } else {
            options.entities_dir = ctx.resolve_path(&options.entities_dir);
        }
        if let Some(dir) = &self.output {
            options.output_dir = ctx.resolve_path(dir);
        } else {
            options.output_dir = ctx.resolve_path(&options.output_dir);
        }
        if let Some(hops) = self.max_hops {
            options.set_max_hops(hops);
        }
        if self.sequential {
            options.parallel = false;
        }
        options
    }
}

pub fn run(ctx: &AppContext, args: &BuildArgs) -> Result<()> {
    let options = args.options(ctx);

    if ctx.robot {
        let report = build_index_with_progress(&options, |_| {})?;
        return emit_report_robot(report);
    }

    let pb = ProgressBar::new(3);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:20.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = build_index_with_progress(&options, |stage| {
        if pb.message().is_empty() {
            pb.set_message(stage.label());
        } else {
            pb.inc(1);
            pb.set_message(stage.label());
        }
    });
    pb.finish_and_clear();

    let report = result?;
    for rejected in &report.rejected {
        println!(
            "{} {} - {}",
            "✗".red(),
            rejected.path.display(),
            rejected.reason
        );
    }
    emit_human(summary(&report));
    Ok(())
}

fn emit_report_robot(report: BuildReport) -> Result<()> {
    if report.rejected.is_empty() {
        return emit_robot(&robot_ok(report));
    }
    let warnings = report
        .rejected
        .iter()
        .map(|rejected| format!("{}: {}", rejected.path.display(), rejected.reason))
        .collect();
    let completed = report.documents;
    emit_robot(&robot_partial(report, completed, warnings))
}

fn summary(report: &BuildReport) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout
        .title(&format!("{} Index built", "✓".green()))
        .kv("Files read", &report.files_read.to_string())
        .kv("Documents", &report.documents.to_string().green().to_string())
        .kv("With related", &report.with_related.to_string())
        .kv(
            "Rejected",
            &if report.rejected.is_empty() {
                "0".to_string()
            } else {
                report.rejected.len().to_string().yellow().to_string()
            },
        )
        .kv("Output", &report.output_dir.display().to_string())
        .kv("Elapsed", &format!("{}ms", report.elapsed_ms));
    layout
}
