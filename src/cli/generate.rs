//! Generate command implementation.
//!
//! Writes `flock_<seed>.png` and `meta_<seed>.json` for one sheep.

use std::fs;
use std::path::PathBuf;

use clap::{ArgGroup, Args};

use crate::batch::{meta_filename, png_filename};
use crate::error::{FlockError, Result};
use crate::flock::Flock;
use crate::output::plural;
use crate::render::{write_png, MAX_SCALE};

use super::{generate_one, Context};

/// Generate one sheep from a seed or txid
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["seed", "txid"])))]
pub struct GenerateArgs {
    /// Positive integer seed
    #[arg(long)]
    pub seed: Option<String>,

    /// 64-character transaction id to derive the seed from
    #[arg(long)]
    pub txid: Option<String>,

    /// Output directory (defaults to the manifest's output)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor for the written PNG (integer upscaling)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64))]
    pub scale: Option<u32>,

    /// Print the metadata as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let style = ctx.load_style()?;
    let flock = Flock::new(&style);
    let result = generate_one(&flock, args.seed.as_deref(), args.txid.as_deref())?;

    let output = args.output.unwrap_or_else(|| ctx.manifest.output.clone());
    let scale = args.scale.unwrap_or_else(|| ctx.manifest.effective_scale()).max(1);

    fs::create_dir_all(&output).map_err(|e| FlockError::Io {
        path: output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let seed = result.seed.get();
    let png_path = output.join(png_filename(seed));
    write_png(&result.image.image, &png_path, scale)?;

    let json = serde_json::to_string_pretty(&result.metadata).map_err(|e| FlockError::Encode {
        message: format!("Failed to serialize metadata: {}", e),
    })?;
    let meta_path = output.join(meta_filename(seed));
    fs::write(&meta_path, &json).map_err(|e| FlockError::Io {
        path: meta_path.clone(),
        message: format!("Failed to write metadata: {}", e),
    })?;

    let size = style.grid().saturating_mul(scale);
    ctx.printer.status(
        "Generated",
        &format!(
            "{} ({}x{}, {})",
            ctx.printer.path(&png_path),
            size,
            size,
            plural(result.png_bytes().len(), "byte", "bytes")
        ),
    );
    ctx.printer.info(
        "Traits",
        &format!(
            "wool {} x{}, jitter {}, ears {}, legs {}, accessory {}",
            result.traits.wool_shape,
            result.traits.wool_density,
            result.traits.edge_jitter,
            result.traits.ear_tilt,
            result.traits.leg_pose,
            result.traits.accessory
        ),
    );

    if args.json {
        println!("{}", json);
    }

    Ok(())
}
