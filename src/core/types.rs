//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

pub use glam::Vec3;

/// Simulation clock stamp in seconds
///
/// Monotonically increasing within a session; no wraparound handling.
pub type SimTime = f32;

/// Identifier for a concealment site (locker, wardrobe, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(pub u32);

impl SiteId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Identifier for whoever may occupy a concealment site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupantId(pub u32);

/// Identifier for a physics collider (what a raycast reports as struck)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// Identifier for an antagonist inside an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Bit set of physics layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing a single layer index (0..32)
    pub fn layer(index: u8) -> Self {
        Self(1u32.checked_shl(u32::from(index)).unwrap_or(0))
    }

    pub fn contains_layer(&self, index: u8) -> bool {
        self.0 & Self::layer(index).0 != 0
    }

    pub fn union(self, other: LayerMask) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Flatten a vector onto the ground plane
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
