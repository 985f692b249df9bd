//! The hunted target: movement, footsteps, hiding
//!
//! The player owns the interaction side of the concealment contract. Entering
//! a site snaps the body to the entry point and freezes it; the sight check
//! made at that moment decides whether antagonists learn which site it was.

pub mod footsteps;

pub use footsteps::FootstepEmitter;

use serde::{Deserialize, Serialize};

use crate::antagonist::perception::unobstructed;
use crate::antagonist::NoiseEvent;
use crate::concealment::ConcealmentSite;
use crate::core::config::PlayerConfig;
use crate::core::types::{horizontal, ColliderId, LayerMask, OccupantId, SimTime, SiteId, Vec3};
use crate::host::{Physics, TargetView};
use crate::world::arena::Arena;
use crate::world::blocking::{Obstacle, LAYER_PLAYER};

pub const PLAYER_RADIUS: f32 = 0.3;
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Movement request for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Desired ground-plane direction; zero means stand still
    pub direction: Vec3,
    pub sprint: bool,
}

impl MoveIntent {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn walk(direction: Vec3) -> Self {
        Self { direction, sprint: false }
    }

    pub fn sprint(direction: Vec3) -> Self {
        Self { direction, sprint: true }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: OccupantId,
    pub collider: ColliderId,
    pub config: PlayerConfig,
    position: Vec3,
    forward: Vec3,
    velocity: Vec3,
    concealed_in: Option<SiteId>,
    footsteps: FootstepEmitter,
}

impl Player {
    pub fn new(id: OccupantId, collider: ColliderId, position: Vec3, config: PlayerConfig) -> Self {
        Self {
            id,
            collider,
            config,
            position,
            forward: Vec3::Z,
            velocity: Vec3::ZERO,
            concealed_in: None,
            footsteps: FootstepEmitter::new(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_forward(&mut self, forward: Vec3) {
        let flat = horizontal(forward);
        if flat.length_squared() > 0.0 {
            self.forward = flat.normalize();
        }
    }

    pub fn concealed_in(&self) -> Option<SiteId> {
        self.concealed_in
    }

    pub fn is_concealed(&self) -> bool {
        self.concealed_in.is_some()
    }

    /// What antagonists aim their senses at
    pub fn target_view(&self) -> TargetView {
        TargetView {
            position: self.position,
            collider: self.collider,
            layer: LAYER_PLAYER,
        }
    }

    /// Physics box for the arena
    pub fn body(&self) -> Obstacle {
        Obstacle::standing(self.collider, self.position, PLAYER_RADIUS, PLAYER_HEIGHT, LAYER_PLAYER)
    }

    /// Move for `dt` seconds; returns a footstep noise when one falls due
    ///
    /// A concealed player does not move.
    pub fn step(&mut self, dt: SimTime, intent: MoveIntent, arena: &Arena) -> Option<NoiseEvent> {
        if self.is_concealed() || dt <= 0.0 {
            self.velocity = Vec3::ZERO;
            return None;
        }

        let direction = horizontal(intent.direction);
        let from = self.position;
        if direction.length_squared() > 0.0 {
            let direction = direction.normalize();
            let speed = if intent.sprint {
                self.config.sprint_speed
            } else {
                self.config.walk_speed
            };
            self.forward = direction;
            self.position = arena.resolve_step(from, from + direction * speed * dt);
        }
        self.velocity = (self.position - from) / dt;

        let horizontal_speed = horizontal(self.velocity).length();
        self.footsteps
            .advance(dt, horizontal_speed, intent.sprint, self.position, &self.config)
    }

    /// Can an antagonist standing at `enemy_position` see this player?
    ///
    /// Eye-to-head ray against every layer, no view cone.
    pub fn seen_from(&self, enemy_position: Vec3, physics: &dyn Physics) -> bool {
        let origin = enemy_position + Vec3::Y * self.config.enemy_eye_height;
        let head = self.position + Vec3::Y * self.config.head_height;
        unobstructed(physics, origin, head, &self.target_view(), LayerMask::ALL)
    }

    /// Whether any of the antagonists at `enemy_positions` can see this player
    pub fn exposed_to<I>(&self, enemy_positions: I, physics: &dyn Physics) -> bool
    where
        I: IntoIterator<Item = Vec3>,
    {
        enemy_positions
            .into_iter()
            .any(|enemy| self.seen_from(enemy, physics))
    }

    pub fn within_reach(&self, site: &ConcealmentSite) -> bool {
        self.position.distance(site.position) <= self.config.interact_distance
    }

    /// Hide in `site` if it is within reach and free
    pub fn enter_site(&mut self, site: &mut ConcealmentSite) -> bool {
        if self.is_concealed() || !self.within_reach(site) {
            return false;
        }
        if !site.try_enter(self.id) {
            return false;
        }
        self.position = site.entry_point();
        self.velocity = Vec3::ZERO;
        self.concealed_in = Some(site.id);
        self.footsteps.reset();
        tracing::info!("Player hid in site {:?}", site.id);
        true
    }

    /// Leave `site`, stepping out to `exit_point`
    pub fn exit_site(&mut self, site: &mut ConcealmentSite, exit_point: Vec3) -> bool {
        if self.concealed_in != Some(site.id) || !site.try_exit(self.id) {
            return false;
        }
        self.position = exit_point;
        self.concealed_in = None;
        tracing::info!("Player left site {:?}", site.id);
        true
    }
}
