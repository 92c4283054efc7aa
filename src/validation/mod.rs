//! Validation for style configuration.
//!
//! Runs a suite of checks against a palette and mask set. Errors make the
//! style unusable; warnings are reported but generation proceeds. Used by
//! `StyleStore` loading and by `hexaflock validate`.

mod checks;
mod warning;

pub use checks::{
    CODE_GRID_SIZE, CODE_MASK_BOUNDS, CODE_PALETTE_DUPLICATE, CODE_PALETTE_MISSING,
    CODE_PALETTE_SIZE, CODE_WOOL_SEED_ON_HEAD, MAX_GRID,
};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::error::FlockError;
use crate::types::{Palette, StyleMasks};

/// Run all validation checks against a style.
pub fn validate_style(palette: &Palette, masks: &StyleMasks) -> ValidationResult {
    [
        checks::check_palette_size(palette),
        checks::check_palette_coverage(palette),
        checks::check_palette_duplicates(palette),
        checks::check_grid_size(masks),
        checks::check_mask_bounds(masks),
        checks::check_wool_seeds(masks),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Convert the first error diagnostic into a startup error.
///
/// Missing palette colours become `PaletteMismatch`; everything else is a
/// `ConfigLoad` error.
pub fn first_error(result: &ValidationResult) -> Option<FlockError> {
    let diagnostic = result.errors().next()?;

    if diagnostic.code == CODE_PALETTE_MISSING {
        return Some(FlockError::PaletteMismatch {
            colour: diagnostic.subject.clone().unwrap_or_default(),
            location: "painted by the renderer".to_string(),
        });
    }

    Some(FlockError::ConfigLoad {
        message: diagnostic.message.clone(),
        help: diagnostic.help.clone(),
    })
}
