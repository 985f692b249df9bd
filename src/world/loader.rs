//! Load arena layouts from TOML files
//!
//! A layout describes the walkable bounds, static walls, concealment sites
//! and spawn points. `ArenaLayout::build` turns it into an `Arena` plus the
//! matching `SiteRegistry`.

use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::concealment::{ConcealmentSite, SiteRegistry};
use crate::core::error::{AshesError, Result};
use crate::core::types::{SiteId, Vec3};
use crate::world::arena::Arena;
use crate::world::blocking::{Obstacle, LAYER_PROPS, LAYER_WALLS};
use crate::world::navigation::NavGrid;

fn default_cell_size() -> f32 {
    0.5
}

fn default_site_half_extents() -> Vec3 {
    Vec3::new(0.5, 1.0, 0.5)
}

/// Walkable rectangle on the ground plane, as (x, z) corners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsSpec {
    pub min: Vec2,
    pub max: Vec2,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSpec {
    pub center: Vec3,
    pub half_extents: Vec3,
}

/// A concealment site; `position` is the floor point under its center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSpec {
    pub id: u32,
    pub position: Vec3,
    #[serde(default)]
    pub entry_anchor: Option<Vec3>,
    #[serde(default)]
    pub attack_anchor: Option<Vec3>,
    #[serde(default = "default_site_half_extents")]
    pub half_extents: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntagonistSpawn {
    pub position: Vec3,
    /// Profile under `data/antagonist/`; defaults when absent
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub position: Vec3,
    #[serde(default)]
    pub forward: Option<Vec3>,
}

/// Everything in one arena file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaLayout {
    #[serde(default)]
    pub name: String,
    pub bounds: BoundsSpec,
    #[serde(default)]
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub sites: Vec<SiteSpec>,
    #[serde(default)]
    pub antagonists: Vec<AntagonistSpawn>,
    pub player: PlayerSpawn,
}

impl ArenaLayout {
    /// Load and validate a layout from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let layout = Self::from_toml(&contents)?;
        tracing::debug!("Loaded arena '{}' from {:?}", layout.name, path);
        Ok(layout)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let layout: Self = toml::from_str(contents)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.bounds.min, self.bounds.max);
        if min.x >= max.x || min.y >= max.y {
            return Err(AshesError::InvalidConfig(format!(
                "arena '{}' has empty bounds",
                self.name
            )));
        }
        if self.bounds.cell_size <= 0.0 {
            return Err(AshesError::InvalidConfig(
                "cell_size must be positive".to_string(),
            ));
        }

        let inside = |p: Vec3| p.x >= min.x && p.x <= max.x && p.z >= min.y && p.z <= max.y;
        if !inside(self.player.position) {
            return Err(AshesError::InvalidConfig(
                "player spawn is outside the arena bounds".to_string(),
            ));
        }
        if let Some(spawn) = self.antagonists.iter().find(|a| !inside(a.position)) {
            return Err(AshesError::InvalidConfig(format!(
                "antagonist spawn {:?} is outside the arena bounds",
                spawn.position
            )));
        }

        let mut seen = AHashSet::new();
        for site in &self.sites {
            if !seen.insert(site.id) {
                return Err(AshesError::DuplicateSite(SiteId(site.id)));
            }
        }
        Ok(())
    }

    /// Build the scene and its concealment sites
    pub fn build(&self) -> Result<(Arena, SiteRegistry)> {
        let nav = NavGrid::new(self.bounds.min, self.bounds.max, self.bounds.cell_size);
        let mut arena = Arena::new(nav);
        let mut sites = SiteRegistry::new();

        for wall in &self.walls {
            let collider = arena.allocate_collider();
            arena.add_obstacle(Obstacle::new(collider, wall.center, wall.half_extents, LAYER_WALLS));
        }

        for spec in &self.sites {
            let collider = arena.allocate_collider();
            let half = spec.half_extents.abs();
            let center = spec.position + Vec3::Y * half.y;
            arena.add_obstacle(Obstacle::new(collider, center, half, LAYER_PROPS));

            let mut site = ConcealmentSite::new(SiteId(spec.id), spec.position);
            if let Some(anchor) = spec.entry_anchor {
                site = site.with_entry_anchor(anchor);
            }
            if let Some(anchor) = spec.attack_anchor {
                site = site.with_attack_anchor(anchor);
            }
            sites.insert(site)?;
        }

        tracing::info!(
            "Built arena '{}': {} walls, {} sites, {} blocked cells",
            self.name,
            self.walls.len(),
            sites.len(),
            arena.nav().blocked_count()
        );
        Ok((arena, sites))
    }
}

/// Load a named layout from `data/arenas/<name>.toml`
pub fn load_arena(name: &str) -> Result<ArenaLayout> {
    let mut layout = ArenaLayout::load(&arena_path(name))?;
    if layout.name.is_empty() {
        layout.name = name.to_string();
    }
    Ok(layout)
}

fn arena_path(name: &str) -> PathBuf {
    PathBuf::from("data/arenas").join(format!("{}.toml", name))
}
