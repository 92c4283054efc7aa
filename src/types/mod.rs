//! Core types for hexaflock.

mod colour;
mod masks;
mod palette;
mod traits;

pub use colour::Colour;
pub use masks::{Eyes, MasksDocument, Point, StyleMasks, DEFAULT_GRID};
pub use palette::{Palette, MAX_PALETTE_LEN};
pub use traits::{Accessory, EarTilt, LegPose, Traits, WoolShape};
