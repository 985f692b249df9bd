//! Grid navigation for the sandbox
//!
//! Walkable space is a bounded rectangle on the ground plane divided into
//! square cells; cells under obstacles are blocked. Uses a HashSet of blocked
//! cells for O(1) lookup.

use ahash::AHashSet;
use glam::Vec2;

use crate::core::types::Vec3;
use crate::world::blocking::Obstacle;

/// Bounded cell grid with blocked cells
#[derive(Debug, Clone)]
pub struct NavGrid {
    blocked: AHashSet<(i32, i32)>,
    cell_size: f32,
    /// Ground-plane bounds as (x, z)
    min: Vec2,
    max: Vec2,
}

impl NavGrid {
    pub fn new(min: Vec2, max: Vec2, cell_size: f32) -> Self {
        Self {
            blocked: AHashSet::new(),
            cell_size: cell_size.max(0.05),
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.min, self.max)
    }

    pub fn block(&mut self, cx: i32, cz: i32) {
        self.blocked.insert((cx, cz));
    }

    pub fn unblock(&mut self, cx: i32, cz: i32) {
        self.blocked.remove(&(cx, cz));
    }

    pub fn is_blocked(&self, cx: i32, cz: i32) -> bool {
        self.blocked.contains(&(cx, cz))
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Convert a world position to cell coordinates
    pub fn world_to_cell(&self, position: Vec3) -> (i32, i32) {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.z / self.cell_size).floor() as i32,
        )
    }

    /// Center of a cell at height `y`
    pub fn cell_center(&self, cx: i32, cz: i32, y: f32) -> Vec3 {
        Vec3::new(
            (cx as f32 + 0.5) * self.cell_size,
            y,
            (cz as f32 + 0.5) * self.cell_size,
        )
    }

    pub fn in_bounds(&self, position: Vec3) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.z >= self.min.y
            && position.z <= self.max.y
    }

    pub fn is_walkable(&self, position: Vec3) -> bool {
        if !self.in_bounds(position) {
            return false;
        }
        let (cx, cz) = self.world_to_cell(position);
        !self.is_blocked(cx, cz)
    }

    /// Block every cell whose center lies under the obstacle footprint grown
    /// by `clearance`
    pub fn block_obstacle(&mut self, obstacle: &Obstacle, clearance: f32) {
        let start_x = ((obstacle.min.x - clearance) / self.cell_size).floor() as i32;
        let start_z = ((obstacle.min.z - clearance) / self.cell_size).floor() as i32;
        let end_x = ((obstacle.max.x + clearance) / self.cell_size).ceil() as i32;
        let end_z = ((obstacle.max.z + clearance) / self.cell_size).ceil() as i32;

        for cz in start_z..end_z {
            for cx in start_x..end_x {
                let center = self.cell_center(cx, cz, 0.0);
                if obstacle.footprint_contains(center.x, center.z, clearance) {
                    self.block(cx, cz);
                }
            }
        }
    }

    /// Closest walkable point within `radius` of `near`
    ///
    /// A walkable `near` is returned as-is; otherwise the nearest walkable
    /// cell center wins (ties broken by cell coordinates).
    pub fn nearest_walkable(&self, near: Vec3, radius: f32) -> Option<Vec3> {
        if self.is_walkable(near) {
            return Some(near);
        }
        if radius <= 0.0 {
            return None;
        }

        let (ncx, ncz) = self.world_to_cell(near);
        let reach = (radius / self.cell_size).ceil() as i32 + 1;
        let mut best: Option<(f32, (i32, i32), Vec3)> = None;

        for cz in (ncz - reach)..=(ncz + reach) {
            for cx in (ncx - reach)..=(ncx + reach) {
                let center = self.cell_center(cx, cz, near.y);
                if !self.is_walkable(center) {
                    continue;
                }
                let distance = center.distance(near);
                if distance > radius {
                    continue;
                }
                let better = match best {
                    None => true,
                    Some((d, cell, _)) => {
                        distance < d || (distance == d && (cz, cx) < (cell.1, cell.0))
                    }
                };
                if better {
                    best = Some((distance, (cx, cz), center));
                }
            }
        }

        best.map(|(_, _, point)| point)
    }
}
