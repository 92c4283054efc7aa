//! Batch command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::batch::{run_batch, seed_range, BatchOptions};
use crate::error::{FlockError, Result};
use crate::output::plural;
use crate::render::MAX_SCALE;
use crate::stamp::StampBackend;

use super::Context;

/// Generate (and optionally stamp) a range of seeds
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Number of sheep to generate
    #[arg(long, default_value = "10")]
    pub num: u64,

    /// First seed of the range
    #[arg(long, default_value = "1")]
    pub start: u64,

    /// Worker threads (defaults to the manifest's jobs)
    #[arg(long, short)]
    pub jobs: Option<usize>,

    /// Output directory (defaults to the manifest's output)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor for written PNGs
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64))]
    pub scale: Option<u32>,

    /// Stamp each sheep with the configured backend
    #[arg(long)]
    pub stamp: bool,
}

pub fn run(args: BatchArgs, ctx: &Context) -> Result<()> {
    let style = ctx.load_style()?;

    let options = BatchOptions {
        output: args.output.unwrap_or_else(|| ctx.manifest.output.clone()),
        jobs: args.jobs.unwrap_or_else(|| ctx.manifest.effective_jobs()).max(1),
        scale: args.scale.unwrap_or_else(|| ctx.manifest.effective_scale()).max(1),
    };

    let service = if args.stamp {
        Some(ctx.stamp_service()?)
    } else {
        None
    };
    let stamper = service.as_ref().map(|s| s as &dyn StampBackend);

    let seeds = seed_range(args.start, args.num);
    ctx.printer.status(
        "Generating",
        &format!(
            "{} on {}",
            plural(seeds.len(), "sheep", "sheep"),
            plural(options.jobs, "thread", "threads")
        ),
    );

    let report = run_batch(&style, &seeds, &options, stamper)?;

    for failure in &report.failures {
        ctx.printer
            .error("Failed", &format!("seed {}: {}", failure.seed, failure.message));
    }

    let mut summary = format!(
        "{} to {}",
        plural(report.generated.len(), "sheep", "sheep"),
        ctx.printer.path(&options.output)
    );
    if let Some(service) = &service {
        summary.push_str(&format!(
            " ({} via {})",
            plural(report.stamped(), "stamp", "stamps"),
            service.name()
        ));
    }
    ctx.printer.status("Finished", &summary);

    if report.is_ok() {
        Ok(())
    } else {
        Err(FlockError::BatchFailed {
            failed: report.failures.len(),
            total: seeds.len(),
        })
    }
}
