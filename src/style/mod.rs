//! Style store: the palette and pixel masks shared by every generation.
//!
//! A style is two JSON documents, `palette.json` and `masks.json`. The
//! default style ships inside the binary; a directory with both files can
//! replace it. Loading validates the pair and refuses styles with errors.

mod loader;

pub use loader::{parse_masks, parse_palette, MASKS_FILENAME, PALETTE_FILENAME};

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{Palette, StyleMasks};
use crate::validation::{first_error, validate_style};

const BUILTIN_PALETTE: &str = include_str!("../../style/palette.json");
const BUILTIN_MASKS: &str = include_str!("../../style/masks.json");

/// Immutable palette + masks pair.
///
/// Built once at startup and shared by reference across generations and
/// worker threads.
#[derive(Debug, Clone)]
pub struct StyleStore {
    palette: Palette,
    masks: StyleMasks,
}

impl StyleStore {
    /// Build a store from already-parsed parts, validating them.
    pub fn new(palette: Palette, masks: StyleMasks) -> Result<Self> {
        let result = validate_style(&palette, &masks);

        for diagnostic in result.iter() {
            warn!(code = %diagnostic.code, "{}", diagnostic.message);
        }

        if let Some(err) = first_error(&result) {
            return Err(err);
        }

        debug!(
            colours = palette.len(),
            grid = masks.grid(),
            "style loaded"
        );

        Ok(Self { palette, masks })
    }

    /// The style compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let (palette, masks) = load_documents(None)?;
        Self::new(palette, masks)
    }

    /// Load `palette.json` and `masks.json` from a directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let (palette, masks) = load_documents(Some(dir))?;
        Self::new(palette, masks)
    }

    /// Load from a directory when given one, otherwise use the builtin style.
    pub fn load_or_builtin(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Self::builtin(),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn masks(&self) -> &StyleMasks {
        &self.masks
    }

    /// Grid width and height in pixels.
    pub fn grid(&self) -> u32 {
        self.masks.grid()
    }
}

/// Parse a style's documents without validating them.
///
/// Reads `dir` when given, otherwise the builtin documents.
pub fn load_documents(dir: Option<&Path>) -> Result<(Palette, StyleMasks)> {
    match dir {
        Some(dir) => Ok((
            loader::load_palette(&dir.join(PALETTE_FILENAME))?,
            loader::load_masks(&dir.join(MASKS_FILENAME))?,
        )),
        None => Ok((parse_palette(BUILTIN_PALETTE)?, parse_masks(BUILTIN_MASKS)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlockError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_loads() {
        let store = StyleStore::builtin().unwrap();
        assert_eq!(store.grid(), 24);
        assert!(store.palette().len() <= 256);
        assert!(!store.masks().head().is_empty());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PALETTE_FILENAME), BUILTIN_PALETTE).unwrap();
        fs::write(dir.path().join(MASKS_FILENAME), BUILTIN_MASKS).unwrap();

        let store = StyleStore::load(dir.path()).unwrap();
        let builtin = StyleStore::builtin().unwrap();
        assert_eq!(store.palette(), builtin.palette());
        assert_eq!(store.masks(), builtin.masks());
    }

    #[test]
    fn test_load_missing_files() {
        let dir = tempdir().unwrap();
        let err = StyleStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, FlockError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_palette() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PALETTE_FILENAME), "{\"palette\": [\"#nothex\"]}").unwrap();
        fs::write(dir.path().join(MASKS_FILENAME), BUILTIN_MASKS).unwrap();

        let err = StyleStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, FlockError::ConfigLoad { .. }));
    }

    #[test]
    fn test_palette_missing_render_colour_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(PALETTE_FILENAME),
            r##"{"palette": ["#000000", "#FFFFFF"]}"##,
        )
        .unwrap();
        fs::write(dir.path().join(MASKS_FILENAME), BUILTIN_MASKS).unwrap();

        let err = StyleStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, FlockError::PaletteMismatch { .. }));
    }

    #[test]
    fn test_oversized_grid_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PALETTE_FILENAME), BUILTIN_PALETTE).unwrap();
        let masks = BUILTIN_MASKS.replacen("\"grid\": 24", "\"grid\": 100000", 1);
        assert_ne!(masks, BUILTIN_MASKS);
        fs::write(dir.path().join(MASKS_FILENAME), masks).unwrap();

        let err = StyleStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, FlockError::ConfigLoad { .. }));
    }

    #[test]
    fn test_load_or_builtin() {
        let store = StyleStore::load_or_builtin(None).unwrap();
        assert_eq!(store.grid(), 24);
    }
}
