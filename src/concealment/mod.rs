//! Concealment sites (hide/seek contract)
//!
//! Sites live for the whole session and are looked up by `SiteId`; nothing
//! outside the registry holds them by reference.

pub mod site;

pub use site::ConcealmentSite;

use ahash::AHashMap;

use crate::core::error::{AshesError, Result};
use crate::core::types::{SiteId, Vec3};

/// Storage for all concealment sites in a scene
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: AHashMap<SiteId, ConcealmentSite>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a site; ids must be unique
    pub fn insert(&mut self, site: ConcealmentSite) -> Result<()> {
        if self.sites.contains_key(&site.id) {
            return Err(AshesError::DuplicateSite(site.id));
        }
        self.sites.insert(site.id, site);
        Ok(())
    }

    pub fn get(&self, id: SiteId) -> Option<&ConcealmentSite> {
        self.sites.get(&id)
    }

    pub fn get_mut(&mut self, id: SiteId) -> Option<&mut ConcealmentSite> {
        self.sites.get_mut(&id)
    }

    /// Like `get`, but unknown ids are an error
    pub fn require(&self, id: SiteId) -> Result<&ConcealmentSite> {
        self.sites.get(&id).ok_or(AshesError::UnknownSite(id))
    }

    pub fn require_mut(&mut self, id: SiteId) -> Result<&mut ConcealmentSite> {
        self.sites.get_mut(&id).ok_or(AshesError::UnknownSite(id))
    }

    /// Closest site within `max_distance` of `point` (ties go to the lower id)
    pub fn nearest_within(&self, point: Vec3, max_distance: f32) -> Option<SiteId> {
        self.sites
            .values()
            .map(|site| (site.id, site.position.distance(point)))
            .filter(|(_, distance)| *distance <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map(|(id, _)| id)
    }

    /// Sites ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &ConcealmentSite> {
        let mut sites: Vec<_> = self.sites.values().collect();
        sites.sort_by_key(|site| site.id);
        sites.into_iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
