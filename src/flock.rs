//! Generation façade: seed in, sheep image and metadata out.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::render::{quantize_and_encode, render, EncodedImage, DATA_URI_PREFIX};
use crate::resolve::{resolve_traits_with, seeded_rng};
use crate::seed::{normalize_txid, seed_from_txid, Seed};
use crate::style::StyleStore;
use crate::types::Traits;

/// Description attached to every sheep.
pub const DESCRIPTION: &str = "Pixel sheep variant with controlled wool and pose.";

/// Generates sheep against one style.
#[derive(Debug, Clone, Copy)]
pub struct Flock<'a> {
    style: &'a StyleStore,
}

/// Everything produced for one seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub seed: Seed,
    pub traits: Traits,
    pub image: EncodedImage,
    pub metadata: FlockMetadata,
}

impl GenerationResult {
    pub fn png_bytes(&self) -> &[u8] {
        &self.image.png
    }

    pub fn image_base64(&self) -> &str {
        &self.image.base64
    }
}

/// Public metadata record for a sheep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlockMetadata {
    pub seed: u64,
    pub traits: Traits,
    pub description: String,
    pub image_uri: String,
    pub size: u32,
    pub palette: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_txid: Option<String>,
}

impl FlockMetadata {
    /// The base64 payload of `image_uri`, if it is a PNG data URI.
    pub fn image_base64(&self) -> Option<&str> {
        self.image_uri.strip_prefix(DATA_URI_PREFIX)
    }
}

impl<'a> Flock<'a> {
    pub fn new(style: &'a StyleStore) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &'a StyleStore {
        self.style
    }

    /// Generate the sheep for a seed. Zero is rejected with `InvalidSeed`.
    pub fn generate(&self, seed: u64) -> Result<GenerationResult> {
        self.generate_seed(Seed::new(seed)?)
    }

    /// Derive the seed from a txid and generate; metadata records the txid.
    pub fn generate_from_txid(&self, txid: &str) -> Result<GenerationResult> {
        let normalized = normalize_txid(txid)?;
        let seed = seed_from_txid(&normalized)?;
        debug!(txid = %normalized, %seed, "derived seed from txid");

        let mut result = self.generate_seed(seed)?;
        result.metadata.source_txid = Some(normalized);
        Ok(result)
    }

    /// Generate from an already-validated seed.
    ///
    /// Traits and wool jitter come from one stream, so the same seed always
    /// yields the same image bytes.
    #[instrument(level = "debug", skip(self))]
    pub fn generate_seed(&self, seed: Seed) -> Result<GenerationResult> {
        let mut rng = seeded_rng(seed);
        let traits = resolve_traits_with(&mut rng)?;

        let grid = render(&traits, self.style.masks(), &mut rng);
        let image = quantize_and_encode(&grid, self.style.palette())?;

        let metadata = FlockMetadata {
            seed: seed.get(),
            traits,
            description: DESCRIPTION.to_string(),
            image_uri: image.data_uri(),
            size: self.style.grid(),
            palette: self.style.palette().to_hex(),
            source_txid: None,
        };

        info!(
            %seed,
            bytes = image.png.len(),
            accessory = %traits.accessory,
            "generated sheep"
        );

        Ok(GenerationResult {
            seed,
            traits,
            image,
            metadata,
        })
    }

    /// Resolve only the traits for a seed, without rendering.
    pub fn traits(&self, seed: u64) -> Result<Traits> {
        crate::resolve::resolve_traits(seed)
    }
}
