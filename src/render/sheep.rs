//! The sheep painter.

use rand::Rng;
use tracing::debug;

use crate::resolve::{BODY_COLOURS, EYE_COLOURS, SNOUT_COLOURS};
use crate::types::{Accessory, Colour, LegPose, StyleMasks, Traits};

use super::wool::grow_wool;
use super::PixelGrid;

pub const LEG_BROWN: Colour = Colour::rgb(0x6B, 0x4E, 0x3D);
pub const SCARF_RED: Colour = Colour::rgb(0xFF, 0x00, 0x00);
pub const BELL_GOLD: Colour = Colour::rgb(0xFF, 0xD7, 0x00);
pub const HAT_BLACK: Colour = Colour::BLACK;

/// Scarf row and columns.
const SCARF_Y: i32 = 14;
const SCARF_X: std::ops::RangeInclusive<i32> = 4..=9;

const BELL_AT: (i32, i32) = (6, 14);

/// Hat brim row and columns.
const HAT_Y: i32 = 9;
const HAT_X: std::ops::RangeInclusive<i32> = 2..=5;

/// Every colour `render` can put on the canvas.
pub fn paintable_colours() -> Vec<Colour> {
    let mut colours = vec![Colour::BLACK, Colour::WHITE, LEG_BROWN];
    colours.extend(BODY_COLOURS);
    colours.extend(EYE_COLOURS);
    colours.extend(SNOUT_COLOURS.iter().map(|(c, _)| *c));
    colours.extend([SCARF_RED, BELL_GOLD, HAT_BLACK]);

    colours.sort();
    colours.dedup();
    colours
}

/// Paint a sheep.
///
/// Parts are painted back to front: head, eyes, snout, legs, wool, then the
/// accessory. Wool growth draws its jitter from `rng`, which should be the
/// same stream the traits were resolved from.
pub fn render<R: Rng + ?Sized>(traits: &Traits, masks: &StyleMasks, rng: &mut R) -> PixelGrid {
    let size = masks.grid() as usize;
    let mut canvas = PixelGrid::new(size, size, Colour::BLACK);

    for &point in masks.head() {
        canvas.paint(point, traits.body_color);
    }

    let eyes = masks.eyes();
    canvas.paint(eyes.left, traits.eye_color);
    canvas.paint(eyes.right, traits.eye_color);

    canvas.paint(masks.snout(), traits.snout_color);

    paint_legs(&mut canvas, traits.leg_pose, masks);

    let wool = grow_wool(traits, masks, rng);
    debug!(pixels = wool.len(), shape = %traits.wool_shape, "grew wool");
    for &point in &wool {
        canvas.paint(point, Colour::WHITE);
    }

    paint_accessory(&mut canvas, traits.accessory);

    canvas
}

fn paint_legs(canvas: &mut PixelGrid, pose: LegPose, masks: &StyleMasks) {
    let max_x = masks.grid() as i32 - 1;

    for (i, &(x, y)) in masks.legs().iter().enumerate() {
        let dx = match (pose, i) {
            (LegPose::Step1, 0) => -1,
            (LegPose::Step2, 1) => 1,
            _ => 0,
        };
        let nx = (x + dx).min(max_x).max(0);
        canvas.paint((nx, y), LEG_BROWN);
    }
}

fn paint_accessory(canvas: &mut PixelGrid, accessory: Accessory) {
    match accessory {
        Accessory::None => {}
        Accessory::Scarf => {
            for x in SCARF_X {
                canvas.paint((x, SCARF_Y), SCARF_RED);
            }
        }
        Accessory::Bell => canvas.paint(BELL_AT, BELL_GOLD),
        Accessory::Hat => {
            for x in HAT_X {
                canvas.paint((x, HAT_Y), HAT_BLACK);
            }
        }
    }
}
