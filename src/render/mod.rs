//! Rendering: traits to pixels, pixels to an indexed PNG.
//!
//! The pipeline is `render` (paint an RGB grid), `quantize` (map each pixel
//! to its palette index) and `encode_png` (palette-mode PNG bytes).

mod encode;
mod grid;
mod quantize;
mod sheep;
mod wool;

pub use encode::{
    decode_indexed, encode_png, quantize_and_encode, scale_pixels, write_png, EncodedImage,
    DATA_URI_PREFIX, MAX_SCALE,
};
pub use grid::PixelGrid;
pub use quantize::{quantize, IndexedImage};
pub use sheep::{paintable_colours, render, BELL_GOLD, HAT_BLACK, LEG_BROWN, SCARF_RED};
pub use wool::{
    grow_wool, neighbours, BLOCK_NEIGHBOURS, HEX_NEIGHBOURS, WOOL_BOTTOM_MARGIN, WOOL_MIN_Y,
};
