//! The trait record describing one generated sheep.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Colour;

/// Neighbour topology used when growing wool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WoolShape {
    /// Six hex-adjacent neighbours.
    Hex,
    /// Four cardinal neighbours.
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarTilt {
    Up,
    Neutral,
    Down,
}

/// Which leg, if any, is shifted sideways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegPose {
    Static,
    /// First leg steps one pixel left.
    Step1,
    /// Second leg steps one pixel right.
    Step2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessory {
    None,
    Scarf,
    Bell,
    Hat,
}

/// Resolved attributes of one sheep.
///
/// Field order matches the serialized metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Traits {
    pub body_color: Colour,
    pub eye_color: Colour,
    pub snout_color: Colour,
    /// Number of wool growth passes (3..=7).
    pub wool_density: u8,
    pub wool_shape: WoolShape,
    /// Maximum per-axis jitter applied to neighbour offsets (0..=2).
    pub edge_jitter: u8,
    pub ear_tilt: EarTilt,
    pub leg_pose: LegPose,
    pub accessory: Accessory,
}

impl fmt::Display for WoolShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WoolShape::Hex => write!(f, "hex"),
            WoolShape::Block => write!(f, "block"),
        }
    }
}

impl fmt::Display for EarTilt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EarTilt::Up => write!(f, "up"),
            EarTilt::Neutral => write!(f, "neutral"),
            EarTilt::Down => write!(f, "down"),
        }
    }
}

impl fmt::Display for LegPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegPose::Static => write!(f, "static"),
            LegPose::Step1 => write!(f, "step1"),
            LegPose::Step2 => write!(f, "step2"),
        }
    }
}

impl fmt::Display for Accessory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessory::None => write!(f, "none"),
            Accessory::Scarf => write!(f, "scarf"),
            Accessory::Bell => write!(f, "bell"),
            Accessory::Hat => write!(f, "hat"),
        }
    }
}
