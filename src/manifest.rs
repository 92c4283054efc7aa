//! Project manifest (flock.yaml) parsing.
//!
//! The manifest holds defaults for the CLI: where the style lives, where
//! output goes, how many workers to run, logging, and the stamp backend.
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FlockError, Result};
use crate::logging::LogFormat;
use crate::render::MAX_SCALE;
use crate::stamp::StampConfig;

pub const MANIFEST_FILENAME: &str = "flock.yaml";

/// Project manifest loaded from flock.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Style directory holding palette.json and masks.json.
    /// The builtin style is used when absent.
    pub style: Option<PathBuf>,

    /// Output directory for generated files.
    pub output: PathBuf,

    /// Integer upscale factor for exported PNG files.
    pub scale: u32,

    /// Worker threads for batch runs.
    pub jobs: usize,

    /// Log filter used when RUST_LOG is unset.
    pub log_level: String,

    pub log_format: LogFormat,

    pub stamp: StampConfig,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            style: None,
            output: PathBuf::from("flocks"),
            scale: 1,
            jobs: 2,
            log_level: "warn".to_string(),
            log_format: LogFormat::default(),
            stamp: StampConfig::default(),
        }
    }
}

impl Manifest {
    /// Load manifest from a flock.yaml file.
    ///
    /// A relative `style` path is taken relative to the manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FlockError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        let mut manifest = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            manifest.style = manifest
                .style
                .map(|style| if style.is_relative() { base.join(style) } else { style });
        }

        Ok(manifest)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let manifest: Self = serde_yaml::from_str(content).map_err(|e| FlockError::ConfigLoad {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check flock.yaml syntax".to_string()),
        })?;

        if manifest.scale > MAX_SCALE {
            return Err(FlockError::ConfigLoad {
                message: format!("Invalid manifest: scale {} is larger than {}", manifest.scale, MAX_SCALE),
                help: Some(format!("Use a scale between 1 and {}", MAX_SCALE)),
            });
        }

        Ok(manifest)
    }

    /// Load an explicit manifest, or `./flock.yaml` if present, or defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(MANIFEST_FILENAME);
                if local.is_file() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the effective scale factor (never below 1).
    pub fn effective_scale(&self) -> u32 {
        self.scale.max(1)
    }

    /// Get the effective worker count (never below 1).
    pub fn effective_jobs(&self) -> usize {
        self.jobs.max(1)
    }
}
