//! Trait resolution: seed -> `Traits`.
//!
//! A seed initializes a ChaCha8 stream and the traits are drawn from it in
//! a fixed order: body, eyes, snout, wool density, wool shape, edge jitter,
//! ear tilt, leg pose, accessory. Changing the order or any table below
//! changes which sheep every existing seed produces.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::error::{FlockError, Result};
use crate::seed::Seed;
use crate::types::{Accessory, Colour, EarTilt, LegPose, Traits, WoolShape};

/// Body colours (oranges), drawn uniformly.
pub const BODY_COLOURS: [Colour; 3] = [
    Colour::rgb(0xFF, 0x8C, 0x00),
    Colour::rgb(0xFF, 0xA5, 0x00),
    Colour::rgb(0xFF, 0x45, 0x00),
];

/// Eye colours (greens), drawn uniformly.
pub const EYE_COLOURS: [Colour; 2] = [Colour::rgb(0x00, 0xFF, 0x00), Colour::rgb(0x32, 0xCD, 0x32)];

/// Snout colours with weights: red, crimson, and a rare gold.
pub const SNOUT_COLOURS: [(Colour, u32); 3] = [
    (Colour::rgb(0xFF, 0x00, 0x00), 89),
    (Colour::rgb(0xDC, 0x14, 0x3C), 10),
    (Colour::rgb(0xFF, 0xD7, 0x00), 1),
];

pub const MIN_WOOL_DENSITY: u8 = 3;
pub const MAX_WOOL_DENSITY: u8 = 7;
pub const MAX_EDGE_JITTER: u8 = 2;

const WOOL_SHAPES: [WoolShape; 2] = [WoolShape::Hex, WoolShape::Block];
const EAR_TILTS: [EarTilt; 3] = [EarTilt::Up, EarTilt::Neutral, EarTilt::Down];
const LEG_POSES: [LegPose; 3] = [LegPose::Static, LegPose::Step1, LegPose::Step2];

/// Accessories with weights; most sheep wear nothing.
pub const ACCESSORIES: [(Accessory, u32); 4] = [
    (Accessory::None, 92),
    (Accessory::Scarf, 4),
    (Accessory::Bell, 3),
    (Accessory::Hat, 1),
];

/// The random stream every generation for `seed` draws from.
pub fn seeded_rng(seed: Seed) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.get())
}

/// Resolve the traits for a seed.
///
/// Fails with `InvalidSeed` when the seed is zero.
pub fn resolve_traits(seed: u64) -> Result<Traits> {
    let seed = Seed::new(seed)?;
    let mut rng = seeded_rng(seed);
    resolve_traits_with(&mut rng)
}

/// Draw a trait record from an existing stream.
///
/// The stream is left positioned after the last trait draw so callers can
/// keep drawing from it (wool growth does).
pub fn resolve_traits_with<R: Rng + ?Sized>(rng: &mut R) -> Result<Traits> {
    let body_color = pick(rng, &BODY_COLOURS);
    let eye_color = pick(rng, &EYE_COLOURS);
    let snout_color = pick_weighted(rng, &SNOUT_COLOURS)?;
    let wool_density = rng.gen_range(MIN_WOOL_DENSITY..=MAX_WOOL_DENSITY);
    let wool_shape = pick(rng, &WOOL_SHAPES);
    let edge_jitter = rng.gen_range(0..=MAX_EDGE_JITTER);
    let ear_tilt = pick(rng, &EAR_TILTS);
    let leg_pose = pick(rng, &LEG_POSES);
    let accessory = pick_weighted(rng, &ACCESSORIES)?;

    let traits = Traits {
        body_color,
        eye_color,
        snout_color,
        wool_density,
        wool_shape,
        edge_jitter,
        ear_tilt,
        leg_pose,
        accessory,
    };
    trace!(?traits, "resolved traits");

    Ok(traits)
}

/// Uniform choice from a non-empty table.
fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, table: &[T]) -> T {
    table[rng.gen_range(0..table.len())]
}

/// Weighted choice from a `(value, weight)` table.
fn pick_weighted<R: Rng + ?Sized, T: Copy>(rng: &mut R, table: &[(T, u32)]) -> Result<T> {
    table
        .choose_weighted(rng, |(_, weight)| *weight)
        .map(|(value, _)| *value)
        .map_err(|e| FlockError::config(format!("Invalid trait weight table: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_traits() {
        let a = resolve_traits(123).unwrap();
        let b = resolve_traits(123).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_seed_rejected() {
        assert!(matches!(resolve_traits(0), Err(FlockError::InvalidSeed { .. })));
    }

    #[test]
    fn test_traits_within_bounds() {
        for seed in 1..=500 {
            let t = resolve_traits(seed).unwrap();
            assert!((MIN_WOOL_DENSITY..=MAX_WOOL_DENSITY).contains(&t.wool_density));
            assert!(t.edge_jitter <= MAX_EDGE_JITTER);
            assert!(BODY_COLOURS.contains(&t.body_color));
            assert!(EYE_COLOURS.contains(&t.eye_color));
            assert!(SNOUT_COLOURS.iter().any(|(c, _)| *c == t.snout_color));
            assert!(ACCESSORIES.iter().any(|(a, _)| *a == t.accessory));
        }
    }

    #[test]
    fn test_seeds_vary() {
        let distinct: HashSet<Traits> = (1..=50).map(|s| resolve_traits(s).unwrap()).collect();
        assert!(distinct.len() > 25, "only {} distinct trait sets", distinct.len());
    }

    #[test]
    fn test_weights_favour_common_values() {
        let traits: Vec<Traits> = (1..=2000).map(|s| resolve_traits(s).unwrap()).collect();

        let red = traits.iter().filter(|t| t.snout_color == SNOUT_COLOURS[0].0).count();
        let plain = traits.iter().filter(|t| t.accessory == Accessory::None).count();

        // Expected ~89% and ~92%; leave generous slack.
        assert!(red > 1600, "red snouts: {}", red);
        assert!(plain > 1700, "no accessory: {}", plain);
    }

    #[test]
    fn test_with_stream_matches_seeded() {
        let seed = Seed::new(77).unwrap();
        let mut rng = seeded_rng(seed);
        assert_eq!(resolve_traits_with(&mut rng).unwrap(), resolve_traits(77).unwrap());
    }

    #[test]
    fn test_stream_continues_after_traits() {
        let seed = Seed::new(5).unwrap();

        let mut a = seeded_rng(seed);
        resolve_traits_with(&mut a).unwrap();
        let after_traits: u64 = a.gen();

        let mut b = seeded_rng(seed);
        let first: u64 = b.gen();

        assert_ne!(after_traits, first);
    }
}
