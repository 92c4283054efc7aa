//! Exact palette quantization.

use crate::error::{FlockError, Result};
use crate::types::{Colour, Palette};

use super::PixelGrid;

/// An image stored as palette indices (row-major) plus its palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: usize,
    height: usize,
    indices: Vec<u8>,
    palette: Palette,
}

impl IndexedImage {
    /// Build an image from raw indices.
    ///
    /// Fails if the index count does not match the dimensions or an index
    /// points past the end of the palette.
    pub fn new(width: usize, height: usize, indices: Vec<u8>, palette: Palette) -> Result<Self> {
        if indices.len() != width * height {
            return Err(FlockError::Encode {
                message: format!(
                    "Expected {} indices for a {}x{} image, got {}",
                    width * height,
                    width,
                    height,
                    indices.len()
                ),
            });
        }
        if let Some(&bad) = indices.iter().find(|&&i| usize::from(i) >= palette.len()) {
            return Err(FlockError::Encode {
                message: format!("Index {} is outside a palette of {} colours", bad, palette.len()),
            });
        }

        Ok(Self {
            width,
            height,
            indices,
            palette,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index at a position.
    pub fn index_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.indices.get(y * self.width + x).copied()
    }

    /// Colour at a position.
    pub fn colour_at(&self, x: usize, y: usize) -> Option<Colour> {
        self.index_at(x, y).and_then(|i| self.palette.get(i))
    }
}

/// Map every pixel to its palette index.
///
/// No dithering or nearest-colour search: a pixel whose colour is not in
/// the palette is a `PaletteMismatch`.
pub fn quantize(grid: &PixelGrid, palette: &Palette) -> Result<IndexedImage> {
    let mut indices = Vec::with_capacity(grid.width() * grid.height());

    for (x, y, colour) in grid.iter() {
        let index = palette
            .index_of(colour)
            .ok_or_else(|| FlockError::PaletteMismatch {
                colour: colour.to_string(),
                location: format!("pixel ({}, {})", x, y),
            })?;
        indices.push(index);
    }

    IndexedImage::new(grid.width(), grid.height(), indices, palette.clone())
}
