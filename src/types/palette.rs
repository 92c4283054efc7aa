//! Ordered colour palette used as the quantization table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{FlockError, Result};

use super::Colour;

/// Maximum number of entries an indexed image can address.
pub const MAX_PALETTE_LEN: usize = 256;

/// An ordered list of at most 256 colours.
///
/// The position of a colour is its index in encoded images. When a colour
/// appears more than once, the first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Colour>", into = "Vec<Colour>")]
pub struct Palette {
    colours: Vec<Colour>,

    /// Colour -> first index.
    lookup: HashMap<Colour, u8>,
}

impl Palette {
    /// Build a palette from an ordered list of colours.
    pub fn new(colours: Vec<Colour>) -> Result<Self> {
        if colours.len() > MAX_PALETTE_LEN {
            return Err(FlockError::ConfigLoad {
                message: format!(
                    "Palette has {} colours, at most {} are allowed",
                    colours.len(),
                    MAX_PALETTE_LEN
                ),
                help: Some("Indexed PNG output addresses 256 palette entries".to_string()),
            });
        }

        let mut lookup = HashMap::with_capacity(colours.len());
        for (i, colour) in colours.iter().enumerate() {
            // Bounded by the length check above.
            lookup.entry(*colour).or_insert(i as u8);
        }

        Ok(Self { colours, lookup })
    }

    /// Parse a palette from hex strings.
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let colours = entries
            .iter()
            .map(|s| Colour::from_hex(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colours)
    }

    /// Palette index of a colour, if present.
    pub fn index_of(&self, colour: Colour) -> Option<u8> {
        self.lookup.get(&colour).copied()
    }

    /// Check whether the palette contains a colour.
    pub fn contains(&self, colour: Colour) -> bool {
        self.lookup.contains_key(&colour)
    }

    /// Colour at an index.
    pub fn get(&self, index: u8) -> Option<Colour> {
        self.colours.get(index as usize).copied()
    }

    /// All colours in index order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Colours as hex strings, in index order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colours.iter().map(|c| c.to_string()).collect()
    }

    /// Number of colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// The PLTE chunk payload: RGB triples in index order.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colours.iter().flat_map(|c| c.to_rgb()).collect()
    }
}

impl TryFrom<Vec<Colour>> for Palette {
    type Error = FlockError;

    fn try_from(colours: Vec<Colour>) -> Result<Self> {
        Self::new(colours)
    }
}

impl From<Palette> for Vec<Colour> {
    fn from(palette: Palette) -> Self {
        palette.colours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order() {
        let palette = Palette::from_hex(&["#000000", "#FFFFFF", "#FF0000"]).unwrap();
        assert_eq!(palette.index_of(Colour::BLACK), Some(0));
        assert_eq!(palette.index_of(Colour::WHITE), Some(1));
        assert_eq!(palette.index_of(Colour::rgb(255, 0, 0)), Some(2));
        assert_eq!(palette.index_of(Colour::rgb(1, 2, 3)), None);
        assert_eq!(palette.get(2), Some(Colour::rgb(255, 0, 0)));
        assert_eq!(palette.get(3), None);
    }

    #[test]
    fn test_duplicate_first_wins() {
        let palette = Palette::from_hex(&["#FFFFFF", "#000000", "#FFFFFF"]).unwrap();
        assert_eq!(palette.index_of(Colour::WHITE), Some(0));
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn test_too_many_colours() {
        let colours: Vec<Colour> = (0..=256u32)
            .map(|i| Colour::rgb((i % 256) as u8, (i / 256) as u8, 0))
            .collect();
        assert!(Palette::new(colours).is_err());
    }

    #[test]
    fn test_exactly_256_colours() {
        let colours: Vec<Colour> = (0..256u32).map(|i| Colour::rgb(i as u8, 0, 0)).collect();
        let palette = Palette::new(colours).unwrap();
        assert_eq!(palette.index_of(Colour::rgb(255, 0, 0)), Some(255));
    }

    #[test]
    fn test_rgb_bytes() {
        let palette = Palette::from_hex(&["#010203", "#0A0B0C"]).unwrap();
        assert_eq!(palette.to_rgb_bytes(), vec![1, 2, 3, 10, 11, 12]);
    }

    #[test]
    fn test_serde_round_trip_rebuilds_lookup() {
        let palette: Palette = serde_json::from_str(r##"["#000000", "#ffffff"]"##).unwrap();
        assert_eq!(palette.index_of(Colour::WHITE), Some(1));
        assert_eq!(palette.to_hex(), vec!["#000000", "#FFFFFF"]);
    }
}
