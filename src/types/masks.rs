//! Pixel-position masks describing where each sheep part is painted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A grid coordinate as `(x, y)`.
///
/// Signed so that neighbour offsets and jitter can step outside the grid
/// before bounds checks reject them.
pub type Point = (i32, i32);

/// Default grid size when a masks document omits it.
pub const DEFAULT_GRID: u32 = 24;

/// Eye positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eyes {
    pub left: Point,
    pub right: Point,
}

/// The masks document as written on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasksDocument {
    #[serde(default = "default_grid")]
    pub grid: u32,
    pub head: Vec<Point>,
    pub eyes: Eyes,
    pub snout: Point,
    pub legs: Vec<Point>,
    pub wool_seeds: Vec<Point>,
}

fn default_grid() -> u32 {
    DEFAULT_GRID
}

/// Read-only mask set used by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMasks {
    grid: u32,
    head: Vec<Point>,
    head_lookup: HashSet<Point>,
    eyes: Eyes,
    snout: Point,
    legs: Vec<Point>,
    wool_seeds: Vec<Point>,
}

impl StyleMasks {
    /// Build masks from a parsed document.
    pub fn from_document(doc: MasksDocument) -> Self {
        let head_lookup = doc.head.iter().copied().collect();
        Self {
            grid: doc.grid,
            head: doc.head,
            head_lookup,
            eyes: doc.eyes,
            snout: doc.snout,
            legs: doc.legs,
            wool_seeds: doc.wool_seeds,
        }
    }

    /// Grid width and height in pixels.
    pub fn grid(&self) -> u32 {
        self.grid
    }

    pub fn head(&self) -> &[Point] {
        &self.head
    }

    /// Check whether a point belongs to the head.
    pub fn is_head(&self, point: Point) -> bool {
        self.head_lookup.contains(&point)
    }

    pub fn eyes(&self) -> Eyes {
        self.eyes
    }

    pub fn snout(&self) -> Point {
        self.snout
    }

    /// Leg pixels in order; poses shift the first or second entry.
    pub fn legs(&self) -> &[Point] {
        &self.legs
    }

    pub fn wool_seeds(&self) -> &[Point] {
        &self.wool_seeds
    }

    /// Check whether a point lies inside the grid.
    pub fn in_bounds(&self, (x, y): Point) -> bool {
        let grid = i64::from(self.grid);
        (0..grid).contains(&i64::from(x)) && (0..grid).contains(&i64::from(y))
    }

    /// Every mask coordinate with the name of the part it belongs to.
    pub fn labelled_points(&self) -> impl Iterator<Item = (&'static str, Point)> + '_ {
        self.head
            .iter()
            .map(|&p| ("head", p))
            .chain([("eyes", self.eyes.left), ("eyes", self.eyes.right)])
            .chain(std::iter::once(("snout", self.snout)))
            .chain(self.legs.iter().map(|&p| ("legs", p)))
            .chain(self.wool_seeds.iter().map(|&p| ("wool_seeds", p)))
    }
}
