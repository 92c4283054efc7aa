//! Wool growth.
//!
//! Wool starts at the mask's seed points and spreads outward one ring per
//! pass. Each neighbour offset is nudged by a random jitter so the blob
//! edges come out ragged, and the neighbour topology (hex or block) sets
//! the overall shape. Wool stays inside the body band and never covers the
//! head.

use std::collections::BTreeSet;

use rand::Rng;

use crate::types::{Point, StyleMasks, Traits, WoolShape};

/// Hex-adjacent neighbour offsets (axial layout).
pub const HEX_NEIGHBOURS: [Point; 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// Cardinal neighbour offsets.
pub const BLOCK_NEIGHBOURS: [Point; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Topmost row wool may occupy.
pub const WOOL_MIN_Y: i32 = 8;

/// Wool may not grow into the bottom rows, where the legs are: `y <= grid - 5`.
pub const WOOL_BOTTOM_MARGIN: i32 = 5;

/// Neighbour offsets for a wool shape.
pub fn neighbours(shape: WoolShape) -> &'static [Point] {
    match shape {
        WoolShape::Hex => &HEX_NEIGHBOURS,
        WoolShape::Block => &BLOCK_NEIGHBOURS,
    }
}

/// Grow wool from the mask seeds.
///
/// Runs `wool_density` passes. Within a pass, points are visited in sorted
/// order and, for each neighbour offset, two jitter values (x then y) are
/// drawn from `rng`, so the result is fully determined by the stream.
pub fn grow_wool<R: Rng + ?Sized>(
    traits: &Traits,
    masks: &StyleMasks,
    rng: &mut R,
) -> BTreeSet<Point> {
    let grid = masks.grid() as i32;
    let offsets = neighbours(traits.wool_shape);
    let jitter = i32::from(traits.edge_jitter);

    let mut wool: BTreeSet<Point> = masks.wool_seeds().iter().copied().collect();

    for _ in 0..traits.wool_density {
        let mut pending = BTreeSet::new();

        for &(x, y) in &wool {
            for &(dx, dy) in offsets {
                let jx = rng.gen_range(-jitter..=jitter);
                let jy = rng.gen_range(-jitter..=jitter);
                let candidate = (x + dx + jx, y + dy + jy);

                if in_wool_band(candidate, grid)
                    && !wool.contains(&candidate)
                    && !masks.is_head(candidate)
                {
                    pending.insert(candidate);
                }
            }
        }

        wool.extend(pending);
    }

    wool
}

/// Inside the grid horizontally and within `[WOOL_MIN_Y, grid - WOOL_BOTTOM_MARGIN]`.
fn in_wool_band((x, y): Point, grid: i32) -> bool {
    (0..grid).contains(&x) && y >= WOOL_MIN_Y && y <= grid - WOOL_BOTTOM_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{resolve_traits, seeded_rng};
    use crate::seed::Seed;
    use crate::style::StyleStore;
    use crate::types::{Accessory, Colour, EarTilt, LegPose};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn traits(shape: WoolShape, density: u8, jitter: u8) -> Traits {
        Traits {
            body_color: Colour::rgb(0xFF, 0x8C, 0x00),
            eye_color: Colour::rgb(0x00, 0xFF, 0x00),
            snout_color: Colour::rgb(0xFF, 0x00, 0x00),
            wool_density: density,
            wool_shape: shape,
            edge_jitter: jitter,
            ear_tilt: EarTilt::Up,
            leg_pose: LegPose::Static,
            accessory: Accessory::None,
        }
    }

    #[test]
    fn test_deterministic_for_same_stream() {
        let store = StyleStore::builtin().unwrap();
        let t = resolve_traits(42).unwrap();

        let a = grow_wool(&t, store.masks(), &mut seeded_rng(Seed::new(42).unwrap()));
        let b = grow_wool(&t, store.masks(), &mut seeded_rng(Seed::new(42).unwrap()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_contains_seeds() {
        let store = StyleStore::builtin().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let wool = grow_wool(&traits(WoolShape::Hex, 3, 1), store.masks(), &mut rng);

        for seed in store.masks().wool_seeds() {
            assert!(wool.contains(seed));
        }
    }

    #[test]
    fn test_growth_respects_band_and_head() {
        let store = StyleStore::builtin().unwrap();
        let masks = store.masks();
        let grid = masks.grid() as i32;
        let seeds: BTreeSet<Point> = masks.wool_seeds().iter().copied().collect();

        for s in 0..50u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(s);
            let shape = if s % 2 == 0 { WoolShape::Hex } else { WoolShape::Block };
            let wool = grow_wool(&traits(shape, 7, 2), masks, &mut rng);

            for p in wool.difference(&seeds) {
                assert!(in_wool_band(*p, grid), "{:?} outside band", p);
                assert!(!masks.is_head(*p), "{:?} on head", p);
            }
        }
    }

    #[test]
    fn test_no_jitter_block_growth_is_a_diamond() {
        let store = StyleStore::builtin().unwrap();
        let masks = store.masks();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let wool = grow_wool(&traits(WoolShape::Block, 1, 0), masks, &mut rng);

        // One pass of cardinal growth with zero jitter adds exactly the
        // in-band, off-head cardinal neighbours of each seed.
        let grid = masks.grid() as i32;
        let mut expected: BTreeSet<Point> = masks.wool_seeds().iter().copied().collect();
        for &(x, y) in masks.wool_seeds() {
            for &(dx, dy) in &BLOCK_NEIGHBOURS {
                let p = (x + dx, y + dy);
                if in_wool_band(p, grid) && !masks.is_head(p) {
                    expected.insert(p);
                }
            }
        }
        assert_eq!(wool, expected);
    }

    #[test]
    fn test_density_grows_more_wool() {
        let store = StyleStore::builtin().unwrap();
        let masks = store.masks();

        let thin = grow_wool(&traits(WoolShape::Hex, 3, 0), masks, &mut ChaCha8Rng::seed_from_u64(3));
        let thick = grow_wool(&traits(WoolShape::Hex, 7, 0), masks, &mut ChaCha8Rng::seed_from_u64(3));
        assert!(thick.len() > thin.len());
        assert!(thin.is_subset(&thick));
    }

    #[test]
    fn test_band_edges() {
        assert!(in_wool_band((0, 8), 24));
        assert!(in_wool_band((23, 19), 24));
        assert!(!in_wool_band((0, 7), 24));
        assert!(!in_wool_band((0, 20), 24));
        assert!(!in_wool_band((-1, 10), 24));
        assert!(!in_wool_band((24, 10), 24));
    }
}
