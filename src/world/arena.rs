//! The sandbox scene: obstacles, moving bodies and walkable space
//!
//! Implements the `Physics` and `Navigation` collaborators so the decision
//! core can run headless.

use ahash::AHashMap;

use crate::core::types::{ColliderId, LayerMask, Vec3};
use crate::host::{Navigation, Physics, RaycastHit};
use crate::world::blocking::Obstacle;
use crate::world::navigation::NavGrid;

/// Extra footprint blocked around static obstacles for navigation
pub const AGENT_CLEARANCE: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Arena {
    obstacles: Vec<Obstacle>,
    /// Dynamic boxes keyed by collider (player, antagonists)
    bodies: AHashMap<ColliderId, Obstacle>,
    nav: NavGrid,
    next_collider: u32,
}

impl Arena {
    pub fn new(nav: NavGrid) -> Self {
        Self {
            obstacles: Vec::new(),
            bodies: AHashMap::new(),
            nav,
            next_collider: 1,
        }
    }

    /// Fresh collider id, unique within this arena
    pub fn allocate_collider(&mut self) -> ColliderId {
        let id = ColliderId(self.next_collider);
        self.next_collider += 1;
        id
    }

    /// Add static geometry; its footprint stops being walkable
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.nav.block_obstacle(&obstacle, AGENT_CLEARANCE);
        self.obstacles.push(obstacle);
    }

    /// Insert or move a dynamic body
    pub fn place_body(&mut self, body: Obstacle) {
        self.bodies.insert(body.collider, body);
    }

    pub fn remove_body(&mut self, collider: ColliderId) -> Option<Obstacle> {
        self.bodies.remove(&collider)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn body(&self, collider: ColliderId) -> Option<&Obstacle> {
        self.bodies.get(&collider)
    }

    pub fn nav(&self) -> &NavGrid {
        &self.nav
    }

    pub fn is_walkable(&self, position: Vec3) -> bool {
        self.nav.is_walkable(position)
    }

    /// Where a body moving from `from` toward `to` ends up
    ///
    /// Slides along one axis when the straight step is blocked and stays put
    /// when both are.
    pub fn resolve_step(&self, from: Vec3, to: Vec3) -> Vec3 {
        if self.is_walkable(to) {
            return to;
        }
        let along_x = Vec3::new(to.x, from.y, from.z);
        if to.x != from.x && self.is_walkable(along_x) {
            return along_x;
        }
        let along_z = Vec3::new(from.x, from.y, to.z);
        if to.z != from.z && self.is_walkable(along_z) {
            return along_z;
        }
        from
    }
}

impl Physics for Arena {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        self.obstacles
            .iter()
            .chain(self.bodies.values())
            .filter(|obstacle| mask.contains_layer(obstacle.layer))
            .filter_map(|obstacle| {
                obstacle
                    .ray_entry(origin, direction, max_distance)
                    .map(|distance| RaycastHit {
                        collider: obstacle.collider,
                        distance,
                    })
            })
            .min_by(|a, b| {
                a.distance
                    .total_cmp(&b.distance)
                    .then(a.collider.0.cmp(&b.collider.0))
            })
    }
}

impl Navigation for Arena {
    fn sample_reachable_point(&self, near: Vec3, radius: f32) -> Option<Vec3> {
        self.nav.nearest_walkable(near, radius)
    }
}
