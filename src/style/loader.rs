//! Parsing of the palette and masks documents.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{FlockError, Result};
use crate::types::{Colour, MasksDocument, Palette, StyleMasks};

pub const PALETTE_FILENAME: &str = "palette.json";
pub const MASKS_FILENAME: &str = "masks.json";

#[derive(Debug, Deserialize)]
struct PaletteDocument {
    palette: Vec<Colour>,
}

/// Parse a palette document: `{"palette": ["#RRGGBB", ...]}`.
pub fn parse_palette(content: &str) -> Result<Palette> {
    let doc: PaletteDocument = serde_json::from_str(content).map_err(|e| FlockError::ConfigLoad {
        message: format!("Invalid palette document: {}", e),
        help: Some("Expected {\"palette\": [\"#RRGGBB\", ...]}".to_string()),
    })?;
    Palette::new(doc.palette)
}

/// Parse a masks document.
pub fn parse_masks(content: &str) -> Result<StyleMasks> {
    let doc: MasksDocument = serde_json::from_str(content).map_err(|e| FlockError::ConfigLoad {
        message: format!("Invalid masks document: {}", e),
        help: Some("Required keys: head, eyes.left, eyes.right, snout, legs, wool_seeds".to_string()),
    })?;
    Ok(StyleMasks::from_document(doc))
}

pub(super) fn load_palette(path: &Path) -> Result<Palette> {
    parse_palette(&read(path)?)
}

pub(super) fn load_masks(path: &Path) -> Result<StyleMasks> {
    parse_masks(&read(path)?)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| FlockError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read style document: {}", e),
    })
}
