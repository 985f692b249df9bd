//! Perception - what the antagonist sees and hears
//!
//! Sight is a straight ray from the eye anchor to the target's head anchor,
//! optionally gated by a field-of-view cone. Hearing turns a noise into an
//! alert level from distance and loudness. Nothing here keeps state between
//! calls; every query is evaluated fresh against current positions.

use serde::{Deserialize, Serialize};

use crate::core::config::AntagonistConfig;
use crate::core::types::{LayerMask, Vec3};
use crate::host::{Physics, TargetView};

/// Below this distance the anchors are treated as coincident
const MIN_RAY_LENGTH: f32 = 1e-4;

/// A sound the antagonist may react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseEvent {
    pub position: Vec3,
    /// Normalized loudness in [0, 1]
    pub loudness: f32,
}

impl NoiseEvent {
    pub fn new(position: Vec3, loudness: f32) -> Self {
        Self {
            position,
            loudness: loudness.clamp(0.0, 1.0),
        }
    }
}

/// Sight and hearing evaluation for one antagonist
#[derive(Debug, Clone)]
pub struct PerceptionTracker {
    pub use_fov: bool,
    /// Full cone angle in degrees
    pub fov_angle: f32,
    pub eye_height: f32,
    pub target_height: f32,
    pub blockers: LayerMask,
    pub hearing_radius: f32,
    pub noise_alert_threshold: f32,
}

impl PerceptionTracker {
    pub fn from_config(config: &AntagonistConfig) -> Self {
        Self {
            use_fov: config.use_fov,
            fov_angle: config.fov_angle,
            eye_height: config.eye_height,
            target_height: config.target_height,
            blockers: config.blockers,
            hearing_radius: config.hearing_radius,
            noise_alert_threshold: config.noise_alert_threshold,
        }
    }

    pub fn eye_anchor(&self, agent_position: Vec3) -> Vec3 {
        agent_position + Vec3::Y * self.eye_height
    }

    pub fn head_anchor(&self, target_position: Vec3) -> Vec3 {
        target_position + Vec3::Y * self.target_height
    }

    /// Can the agent draw an unobstructed line to the target right now?
    pub fn has_line_of_sight(
        &self,
        agent_position: Vec3,
        agent_forward: Vec3,
        target: &TargetView,
        physics: &dyn Physics,
    ) -> bool {
        let origin = self.eye_anchor(agent_position);
        let head = self.head_anchor(target.position);

        if self.use_fov && !self.within_fov(agent_forward, head - origin) {
            return false;
        }

        let mask = self.blockers.union(LayerMask::layer(target.layer));
        unobstructed(physics, origin, head, target, mask)
    }

    /// Is `to_target` inside half the cone angle either side of `forward`?
    pub fn within_fov(&self, forward: Vec3, to_target: Vec3) -> bool {
        if forward.length_squared() < MIN_RAY_LENGTH || to_target.length_squared() < MIN_RAY_LENGTH {
            return true;
        }
        let angle = forward.angle_between(to_target).to_degrees();
        angle <= self.fov_angle * 0.5
    }

    /// Alert level of a noise in [0, 1]: proximity times loudness
    pub fn alert_level(&self, agent_position: Vec3, noise: &NoiseEvent) -> f32 {
        let distance = agent_position.distance(noise.position);
        hearing_proximity(distance, self.hearing_radius) * noise.loudness
    }

    /// Position to investigate if the noise is alarming enough
    pub fn hear(&self, agent_position: Vec3, noise: &NoiseEvent) -> Option<Vec3> {
        if self.alert_level(agent_position, noise) >= self.noise_alert_threshold {
            Some(noise.position)
        } else {
            None
        }
    }
}

/// `1 - distance / radius`, clamped to [0, 1]; zero beyond the radius
pub fn hearing_proximity(distance: f32, hearing_radius: f32) -> f32 {
    if hearing_radius <= 0.0 || distance > hearing_radius {
        return 0.0;
    }
    (1.0 - distance / hearing_radius).clamp(0.0, 1.0)
}

/// Ray test from `origin` to `target_point`
///
/// True when nothing in `mask` is struck before the target's distance, or
/// when the first thing struck is the target itself.
pub fn unobstructed(
    physics: &dyn Physics,
    origin: Vec3,
    target_point: Vec3,
    target: &TargetView,
    mask: LayerMask,
) -> bool {
    let ray = target_point - origin;
    let distance = ray.length();
    if distance < MIN_RAY_LENGTH {
        return true;
    }

    match physics.raycast(origin, ray / distance, distance, mask) {
        Some(hit) => hit.collider == target.collider,
        None => true,
    }
}
