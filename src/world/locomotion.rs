//! Kinematic mover: straight-line steering over the sandbox grid

use serde::{Deserialize, Serialize};

use crate::core::types::{horizontal, SimTime, Vec3};
use crate::host::Locomotion;
use crate::world::arena::Arena;

/// Arrival never triggers closer than this
pub const MIN_ARRIVAL_TOLERANCE: f32 = 0.2;

/// A body that walks toward its destination at a set speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicMover {
    pub position: Vec3,
    forward: Vec3,
    velocity: Vec3,
    speed: f32,
    destination: Option<Vec3>,
    pub stopping_distance: f32,
}

impl KinematicMover {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            forward: Vec3::Z,
            velocity: Vec3::ZERO,
            speed: 0.0,
            destination: None,
            stopping_distance: 0.0,
        }
    }

    pub fn with_stopping_distance(mut self, stopping_distance: f32) -> Self {
        self.stopping_distance = stopping_distance.max(0.0);
        self
    }

    pub fn facing(mut self, forward: Vec3) -> Self {
        if horizontal(forward).length_squared() > 0.0 {
            self.forward = horizontal(forward).normalize();
        }
        self
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn arrival_tolerance(&self) -> f32 {
        self.stopping_distance.max(MIN_ARRIVAL_TOLERANCE)
    }

    /// Drop the destination and stand still
    pub fn halt(&mut self) {
        self.destination = None;
        self.velocity = Vec3::ZERO;
    }

    /// Teleport (concealment entry) and stand still
    pub fn warp(&mut self, position: Vec3) {
        self.position = position;
        self.halt();
    }

    /// Move for `dt` seconds, staying on walkable cells of `arena`
    pub fn advance(&mut self, dt: SimTime, arena: &Arena) {
        let Some(destination) = self.destination else {
            self.velocity = Vec3::ZERO;
            return;
        };
        if dt <= 0.0 {
            return;
        }

        let to_destination = horizontal(destination - self.position);
        let remaining = to_destination.length();
        if remaining <= self.arrival_tolerance() {
            self.velocity = Vec3::ZERO;
            return;
        }

        let direction = to_destination / remaining;
        let step = (self.speed * dt).min(remaining);
        let wanted = self.position + direction * step;
        let resolved = arena.resolve_step(self.position, wanted);

        self.velocity = (resolved - self.position) / dt;
        self.forward = direction;
        self.position = resolved;
    }
}

impl Locomotion for KinematicMover {
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    fn has_arrived(&self) -> bool {
        match self.destination {
            None => true,
            Some(destination) => {
                horizontal(destination - self.position).length() <= self.arrival_tolerance()
            }
        }
    }

    fn current_position(&self) -> Vec3 {
        self.position
    }

    fn current_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }
}
