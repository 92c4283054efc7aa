//! Batch generation: many seeds, written to an output directory.
//!
//! Each seed produces `flock_<seed>.png` and `meta_<seed>.json`. Seeds run
//! in parallel on a dedicated rayon pool and finish in no particular order;
//! the report is sorted by seed.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{FlockError, Result};
use crate::flock::{Flock, FlockMetadata, GenerationResult};
use crate::render::write_png;
use crate::stamp::{StampBackend, StampRequest};
use crate::style::StyleStore;

/// Options for a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub output: PathBuf,
    pub jobs: usize,
    /// Upscale factor for the written PNG files. Metadata always carries the
    /// unscaled image.
    pub scale: u32,
}

/// Metadata file contents: the sheep metadata plus the stamp result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadata {
    #[serde(flatten)]
    pub metadata: FlockMetadata,
    pub tx_hash: Option<String>,
}

/// One successfully written seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub seed: u64,
    pub png_path: PathBuf,
    pub meta_path: PathBuf,
    pub tx_hash: Option<String>,
}

/// One failed seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub seed: u64,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub generated: Vec<BatchEntry>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of entries that got a transaction id.
    pub fn stamped(&self) -> usize {
        self.generated.iter().filter(|e| e.tx_hash.is_some()).count()
    }
}

/// Seeds `start..start + count`.
pub fn seed_range(start: u64, count: u64) -> Vec<u64> {
    (start..start.saturating_add(count)).collect()
}

pub fn png_filename(seed: u64) -> String {
    format!("flock_{}.png", seed)
}

pub fn meta_filename(seed: u64) -> String {
    format!("meta_{}.json", seed)
}

/// Generate, optionally stamp, and write every seed.
///
/// Only setup problems (output directory, thread pool) fail the whole run;
/// per-seed errors are collected in the report.
pub fn run_batch(
    style: &StyleStore,
    seeds: &[u64],
    options: &BatchOptions,
    stamper: Option<&dyn StampBackend>,
) -> Result<BatchReport> {
    fs::create_dir_all(&options.output).map_err(|e| FlockError::Io {
        path: options.output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.max(1))
        .build()
        .map_err(|e| FlockError::config(format!("Failed to start worker pool: {}", e)))?;

    let flock = Flock::new(style);

    let results: Vec<(u64, Result<BatchEntry>)> = pool.install(|| {
        seeds
            .par_iter()
            .map(|&seed| (seed, process_seed(&flock, seed, options, stamper)))
            .collect()
    });

    let mut report = BatchReport::default();
    for (seed, result) in results {
        match result {
            Ok(entry) => report.generated.push(entry),
            Err(e) => {
                error!(seed, error = %e, "seed failed");
                report.failures.push(BatchFailure {
                    seed,
                    message: e.to_string(),
                });
            }
        }
    }
    report.generated.sort_by_key(|e| e.seed);
    report.failures.sort_by_key(|f| f.seed);

    info!(
        generated = report.generated.len(),
        failed = report.failures.len(),
        stamped = report.stamped(),
        "batch complete"
    );

    Ok(report)
}

fn process_seed(
    flock: &Flock<'_>,
    seed: u64,
    options: &BatchOptions,
    stamper: Option<&dyn StampBackend>,
) -> Result<BatchEntry> {
    let result = flock.generate(seed)?;
    let tx_hash = stamper.and_then(|backend| stamp(backend, &result));

    let png_path = options.output.join(png_filename(seed));
    write_png(&result.image.image, &png_path, options.scale)?;

    let meta_path = options.output.join(meta_filename(seed));
    let record = BatchMetadata {
        metadata: result.metadata,
        tx_hash: tx_hash.clone(),
    };
    write_json(&meta_path, &record)?;

    info!(seed, tx_hash = tx_hash.as_deref().unwrap_or("-"), "processed seed");

    Ok(BatchEntry {
        seed,
        png_path,
        meta_path,
        tx_hash,
    })
}

/// Stamp a finished sheep. Failures are logged and leave the sheep unstamped.
fn stamp(backend: &dyn StampBackend, result: &GenerationResult) -> Option<String> {
    let outcome =
        StampRequest::from_metadata(&result.metadata).and_then(|request| backend.create_stamp(&request));

    match outcome {
        Ok(tx_hash) => Some(tx_hash),
        Err(e) => {
            warn!(seed = result.seed.get(), backend = backend.name(), error = %e, "stamping failed");
            None
        }
    }
}

fn write_json(path: &Path, record: &BatchMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(record).map_err(|e| FlockError::Encode {
        message: format!("Failed to serialize metadata: {}", e),
    })?;

    fs::write(path, json).map_err(|e| FlockError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write metadata: {}", e),
    })
}
