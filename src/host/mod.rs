//! Collaborator interfaces the decision core consumes
//!
//! The pursuit core never moves bodies, casts rays or builds navigation data
//! itself. A host (game engine, sandbox, test double) implements these traits
//! and hands them to the core each tick.
//!
//! - `Locomotion`: "move toward point / am I there yet"
//! - `Physics`: straight-line raycasts against layered colliders
//! - `Navigation`: snapping a point onto walkable space

use crate::core::types::{ColliderId, LayerMask, Vec3};

/// First collider struck by a raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub collider: ColliderId,
    pub distance: f32,
}

/// Movement primitive driving one body
pub trait Locomotion {
    fn set_speed(&mut self, speed: f32);

    fn set_destination(&mut self, point: Vec3);

    /// True when no destination is pending or the current one was reached
    fn has_arrived(&self) -> bool;

    fn current_position(&self) -> Vec3;

    fn current_velocity(&self) -> Vec3;

    /// Facing direction (need not be normalized)
    fn forward(&self) -> Vec3;
}

/// Geometric queries against the scene
pub trait Physics {
    /// Nearest hit along `direction` (normalized) within `max_distance`,
    /// considering only colliders whose layer is in `mask`
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit>;
}

/// Walkable-space sampling
pub trait Navigation {
    /// Closest reachable point within `radius` of `near`, if any
    fn sample_reachable_point(&self, near: Vec3, radius: f32) -> Option<Vec3>;
}

/// What the antagonist aims its senses at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    /// Feet position
    pub position: Vec3,
    /// Collider a raycast reports when it strikes the target
    pub collider: ColliderId,
    /// Physics layer of that collider
    pub layer: u8,
}
