pub mod batch;
pub mod completions;
pub mod fee;
pub mod generate;
pub mod inspect;
pub mod stamp;
pub mod traits;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::flock::GenerationResult;
use crate::manifest::Manifest;
use crate::output::Printer;
use crate::stamp::StampService;
use crate::style::StyleStore;

/// hexaflock - Deterministic pixel sheep generator
#[derive(Parser, Debug)]
#[command(name = "hexaflock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Manifest file (defaults to ./flock.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Style directory with palette.json and masks.json
    #[arg(long, global = true)]
    pub style: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one sheep from a seed or txid
    Generate(generate::GenerateArgs),

    /// Print the traits for a seed or txid
    Traits(traits::TraitsArgs),

    /// Generate (and optionally stamp) a range of seeds
    Batch(batch::BatchArgs),

    /// Generate the sheep for a txid and stamp it
    Stamp(stamp::StampArgs),

    /// Estimate the fee for stamping the sheep for a txid
    Fee(fee::FeeArgs),

    /// Check a style's palette and masks
    Validate(validate::ValidateArgs),

    /// Report the palette and colours of a PNG
    Inspect(inspect::InspectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Settings shared by every command.
pub struct Context {
    pub manifest: Manifest,
    pub printer: Printer,
    style_override: Option<PathBuf>,
}

impl Context {
    pub fn new(manifest: Manifest, style_override: Option<PathBuf>) -> Self {
        Self {
            manifest,
            printer: Printer::new(),
            style_override,
        }
    }

    /// `--style` if given, else the manifest's `style`.
    pub fn style_dir(&self) -> Option<&Path> {
        self.style_override
            .as_deref()
            .or(self.manifest.style.as_deref())
    }

    pub fn load_style(&self) -> Result<StyleStore> {
        StyleStore::load_or_builtin(self.style_dir())
    }

    pub fn stamp_service(&self) -> Result<StampService> {
        StampService::from_config(&self.manifest.stamp)
    }
}

/// Resolve a seed or txid argument pair into a generation.
pub(crate) fn generate_one(
    flock: &crate::flock::Flock<'_>,
    seed: Option<&str>,
    txid: Option<&str>,
) -> Result<GenerationResult> {
    match (seed, txid) {
        (_, Some(txid)) => flock.generate_from_txid(txid),
        (Some(seed), None) => flock.generate_seed(seed.parse()?),
        (None, None) => Err(crate::error::FlockError::InvalidSeed {
            value: String::new(),
        }),
    }
}
