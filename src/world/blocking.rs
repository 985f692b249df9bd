//! Box obstacles and the ray queries run against them
//!
//! Everything solid in the sandbox (walls, lockers, bodies) is an
//! axis-aligned box tagged with a collider id and a physics layer.

use serde::{Deserialize, Serialize};

use crate::core::types::{ColliderId, Vec3};

/// Static level geometry
pub const LAYER_WALLS: u8 = 0;
/// Furniture, including concealment sites
pub const LAYER_PROPS: u8 = 1;
pub const LAYER_PLAYER: u8 = 3;
pub const LAYER_ANTAGONIST: u8 = 6;

const PARALLEL_EPSILON: f32 = 1e-8;

/// Axis-aligned solid box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub collider: ColliderId,
    pub min: Vec3,
    pub max: Vec3,
    pub layer: u8,
}

impl Obstacle {
    pub fn new(collider: ColliderId, center: Vec3, half_extents: Vec3, layer: u8) -> Self {
        let half_extents = half_extents.abs();
        Self {
            collider,
            min: center - half_extents,
            max: center + half_extents,
            layer,
        }
    }

    /// Upright box standing on `feet` (bodies)
    pub fn standing(collider: ColliderId, feet: Vec3, radius: f32, height: f32, layer: u8) -> Self {
        Self {
            collider,
            min: feet - Vec3::new(radius, 0.0, radius),
            max: feet + Vec3::new(radius, height, radius),
            layer,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Whether the ground-plane footprint, grown by `margin`, covers (x, z)
    pub fn footprint_contains(&self, x: f32, z: f32, margin: f32) -> bool {
        x >= self.min.x - margin
            && x <= self.max.x + margin
            && z >= self.min.z - margin
            && z <= self.max.z + margin
    }

    /// Distance along the ray to where it enters the box
    ///
    /// A ray starting inside the box never reports it.
    pub fn ray_entry(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        if self.contains(origin) {
            return None;
        }

        let mut t_enter = 0.0_f32;
        let mut t_exit = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < PARALLEL_EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter)
    }
}
