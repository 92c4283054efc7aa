//! Mutable RGB canvas painted by the renderer.

use crate::types::{Colour, Point};

/// A grid of colours (row-major: `pixels[y][x]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Vec<Vec<Colour>>,
    width: usize,
    height: usize,
}

impl PixelGrid {
    /// Create a grid filled with one colour.
    pub fn new(width: usize, height: usize, fill: Colour) -> Self {
        Self {
            pixels: vec![vec![fill; width]; height],
            width,
            height,
        }
    }

    /// Create a grid from rows of pixels.
    pub fn from_rows(pixels: Vec<Vec<Colour>>) -> Self {
        let height = pixels.len();
        let width = pixels.first().map_or(0, |row| row.len());
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Paint one point. Points outside the grid are ignored.
    pub fn paint(&mut self, (x, y): Point, colour: Colour) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(pixel) = self
            .pixels
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *pixel = colour;
        }
    }

    pub fn rows(&self) -> &[Vec<Colour>] {
        &self.pixels
    }

    /// Iterate pixels as `(x, y, colour)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Colour)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &c)| (x, y, c)))
    }
}
