//! Shared collaborators for the integration tests
#![allow(dead_code)]

use ashes_beneath::antagonist::{Antagonist, PresentationSignals, Surroundings};
use ashes_beneath::concealment::SiteRegistry;
use ashes_beneath::core::types::{ColliderId, LayerMask, Vec3};
use ashes_beneath::host::{Locomotion, Navigation, Physics, RaycastHit, TargetView};

pub const TARGET_COLLIDER: ColliderId = ColliderId(1);
pub const WALL_COLLIDER: ColliderId = ColliderId(999);

/// Body that records orders but never moves
#[derive(Debug, Clone)]
pub struct Statue {
    pub position: Vec3,
    pub speed: f32,
    pub destination: Option<Vec3>,
}

impl Statue {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            speed: 0.0,
            destination: None,
        }
    }
}

impl Locomotion for Statue {
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    fn has_arrived(&self) -> bool {
        self.destination.is_none()
    }

    fn current_position(&self) -> Vec3 {
        self.position
    }

    fn current_velocity(&self) -> Vec3 {
        Vec3::ZERO
    }

    fn forward(&self) -> Vec3 {
        Vec3::Z
    }
}

/// Scene where every ray is either clear or blocked, and every point is walkable
pub struct FlatScene {
    pub walled: bool,
}

impl FlatScene {
    pub fn open() -> Self {
        Self { walled: false }
    }

    pub fn walled() -> Self {
        Self { walled: true }
    }
}

impl Physics for FlatScene {
    fn raycast(
        &self,
        _origin: Vec3,
        _direction: Vec3,
        max_distance: f32,
        _mask: LayerMask,
    ) -> Option<RaycastHit> {
        self.walled.then(|| RaycastHit {
            collider: WALL_COLLIDER,
            distance: max_distance * 0.5,
        })
    }
}

impl Navigation for FlatScene {
    fn sample_reachable_point(&self, near: Vec3, _radius: f32) -> Option<Vec3> {
        Some(near)
    }
}

pub fn target_at(position: Vec3) -> TargetView {
    TargetView {
        position,
        collider: TARGET_COLLIDER,
        layer: 3,
    }
}

/// One tick of `antagonist` against a stationary body and target
pub fn tick(
    antagonist: &mut Antagonist,
    body: &mut Statue,
    target: Vec3,
    scene: &FlatScene,
    sites: &SiteRegistry,
    dt: f32,
) -> PresentationSignals {
    let surroundings = Surroundings {
        physics: scene,
        navigation: scene,
        sites,
    };
    antagonist
        .tick(dt, Some(body as &mut dyn Locomotion), Some(&target_at(target)), &surroundings)
        .expect("body and target were supplied")
}
