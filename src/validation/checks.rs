//! Validation checks for a loaded style.
//!
//! Each check inspects the palette or masks and returns a `ValidationResult`.

use std::collections::HashSet;

use crate::render::{paintable_colours, WOOL_BOTTOM_MARGIN, WOOL_MIN_Y};
use crate::types::{Palette, StyleMasks};

use super::warning::{Diagnostic, ValidationResult};

pub const CODE_PALETTE_SIZE: &str = "hexaflock::style::palette-size";
pub const CODE_PALETTE_MISSING: &str = "hexaflock::style::palette-missing";
pub const CODE_PALETTE_DUPLICATE: &str = "hexaflock::style::palette-duplicate";
pub const CODE_GRID_SIZE: &str = "hexaflock::style::grid-size";
pub const CODE_MASK_BOUNDS: &str = "hexaflock::style::mask-bounds";
pub const CODE_WOOL_SEED_ON_HEAD: &str = "hexaflock::style::wool-seed-on-head";

/// The palette must have at least one entry (the 256 cap is enforced on construction).
pub fn check_palette_size(palette: &Palette) -> ValidationResult {
    let mut result = ValidationResult::new();

    if palette.is_empty() {
        result.push(
            Diagnostic::error(CODE_PALETTE_SIZE, "Palette is empty")
                .with_help("List at least the colours the renderer paints"),
        );
    }

    result
}

/// Every colour the renderer can paint must be in the palette.
pub fn check_palette_coverage(palette: &Palette) -> ValidationResult {
    let mut result = ValidationResult::new();

    for colour in paintable_colours() {
        if !palette.contains(colour) {
            result.push(
                Diagnostic::error(
                    CODE_PALETTE_MISSING,
                    format!("{} can be painted but is not in the palette", colour),
                )
                .with_help(format!("Add \"{}\" to palette.json", colour))
                .with_subject(colour.to_string()),
            );
        }
    }

    result
}

/// Repeated palette entries are legal but only the first is ever used.
pub fn check_palette_duplicates(palette: &Palette) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();

    for (i, colour) in palette.colours().iter().enumerate() {
        if !seen.insert(*colour) {
            result.push(Diagnostic::warning(
                CODE_PALETTE_DUPLICATE,
                format!("{} at index {} repeats an earlier entry", colour, i),
            ));
        }
    }

    result
}

/// Largest accepted grid edge. Keeps the canvas small and coordinates in `i32`.
pub const MAX_GRID: u32 = 256;

/// The grid must leave room for the wool band and stay sprite-sized.
pub fn check_grid_size(masks: &StyleMasks) -> ValidationResult {
    let mut result = ValidationResult::new();
    let min_grid = (WOOL_MIN_Y + WOOL_BOTTOM_MARGIN) as u32;

    if masks.grid() < min_grid {
        result.push(
            Diagnostic::error(
                CODE_GRID_SIZE,
                format!("Grid size {} leaves no room for wool", masks.grid()),
            )
            .with_help(format!("Use a grid of at least {}", min_grid)),
        );
    } else if masks.grid() > MAX_GRID {
        result.push(
            Diagnostic::error(
                CODE_GRID_SIZE,
                format!("Grid size {} is larger than {}", masks.grid(), MAX_GRID),
            )
            .with_help(format!("Use a grid of at most {}", MAX_GRID)),
        );
    }

    result
}

/// All mask coordinates must lie inside the grid.
pub fn check_mask_bounds(masks: &StyleMasks) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (part, (x, y)) in masks.labelled_points() {
        if !masks.in_bounds((x, y)) {
            result.push(Diagnostic::error(
                CODE_MASK_BOUNDS,
                format!(
                    "{} point ({}, {}) is outside the {}x{} grid",
                    part,
                    x,
                    y,
                    masks.grid(),
                    masks.grid()
                ),
            ));
        }
    }

    result
}

/// Wool seeds on the head are painted white over the face.
pub fn check_wool_seeds(masks: &StyleMasks) -> ValidationResult {
    let mut result = ValidationResult::new();

    for &(x, y) in masks.wool_seeds() {
        if masks.is_head((x, y)) {
            result.push(
                Diagnostic::warning(
                    CODE_WOOL_SEED_ON_HEAD,
                    format!("Wool seed ({}, {}) overlaps the head", x, y),
                )
                .with_help("Move the seed into the body area"),
            );
        }
    }

    result
}
