//! Footstep noise emitted while the player moves

use serde::{Deserialize, Serialize};

use crate::antagonist::NoiseEvent;
use crate::core::config::PlayerConfig;
use crate::core::types::{SimTime, Vec3};

/// Step timer; one noise per walk or sprint interval while moving
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootstepEmitter {
    timer: SimTime,
}

impl FootstepEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timer(&self) -> SimTime {
        self.timer
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    /// Accumulate `dt` of movement at `horizontal_speed`
    ///
    /// Standing still (at or below the moving threshold) resets the timer.
    pub fn advance(
        &mut self,
        dt: SimTime,
        horizontal_speed: f32,
        sprinting: bool,
        position: Vec3,
        config: &PlayerConfig,
    ) -> Option<NoiseEvent> {
        if horizontal_speed <= config.moving_threshold {
            self.timer = 0.0;
            return None;
        }

        let (interval, loudness) = if sprinting {
            (config.step_interval_sprint, config.footstep_loudness_sprint)
        } else {
            (config.step_interval_walk, config.footstep_loudness_walk)
        };

        self.timer += dt;
        if self.timer < interval {
            return None;
        }
        self.timer = 0.0;
        Some(NoiseEvent::new(position, loudness))
    }
}
