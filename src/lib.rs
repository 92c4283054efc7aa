//! hexaflock - Deterministic pixel sheep generator
//!
//! A seed (or a transaction id reduced to one) picks a sheep's traits, the
//! traits are painted onto a small pixel grid, and the grid is stored as a
//! palette-mode PNG with a metadata record. The same seed always produces
//! the same bytes.

pub mod batch;
pub mod cli;
pub mod error;
pub mod flock;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod render;
pub mod resolve;
pub mod seed;
pub mod stamp;
pub mod style;
pub mod types;
pub mod validation;

pub use batch::{run_batch, BatchOptions, BatchReport};
pub use error::{FlockError, Result};
pub use flock::{Flock, FlockMetadata, GenerationResult, DESCRIPTION};
pub use manifest::Manifest;
pub use render::{encode_png, quantize, quantize_and_encode, render, EncodedImage, IndexedImage, PixelGrid};
pub use resolve::resolve_traits;
pub use seed::{seed_from_txid, Seed};
pub use stamp::{HttpStampBackend, MockStampBackend, StampBackend, StampRequest, StampService};
pub use style::StyleStore;
pub use types::{Accessory, Colour, EarTilt, LegPose, Palette, StyleMasks, Traits, WoolShape};
pub use validation::{validate_style, Diagnostic, Severity, ValidationResult};
