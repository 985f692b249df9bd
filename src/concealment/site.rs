//! A single concealment site and its exclusive occupancy slot

use serde::{Deserialize, Serialize};

use crate::core::types::{OccupantId, SiteId, Vec3};

/// Somewhere a target can hide (a locker, a wardrobe)
///
/// Occupancy changes only through `try_enter` / `try_exit`. Relocating the
/// occupant to the entry point and freezing its movement is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcealmentSite {
    pub id: SiteId,
    pub position: Vec3,
    /// Where an occupant is placed while hidden
    pub entry_anchor: Option<Vec3>,
    /// Where an attacker stands
    pub attack_anchor: Option<Vec3>,
    occupant: Option<OccupantId>,
    attacks_received: u32,
}

impl ConcealmentSite {
    pub fn new(id: SiteId, position: Vec3) -> Self {
        Self {
            id,
            position,
            entry_anchor: None,
            attack_anchor: None,
            occupant: None,
            attacks_received: 0,
        }
    }

    pub fn with_entry_anchor(mut self, anchor: Vec3) -> Self {
        self.entry_anchor = Some(anchor);
        self
    }

    pub fn with_attack_anchor(mut self, anchor: Vec3) -> Self {
        self.attack_anchor = Some(anchor);
        self
    }

    /// Entry anchor, falling back to the site position
    pub fn entry_point(&self) -> Vec3 {
        self.entry_anchor.unwrap_or(self.position)
    }

    /// Attack anchor, falling back to the site position
    pub fn attack_point(&self) -> Vec3 {
        self.attack_anchor.unwrap_or(self.position)
    }

    pub fn occupant(&self) -> Option<OccupantId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn attacks_received(&self) -> u32 {
        self.attacks_received
    }

    /// Claim the site; false if someone is already inside
    pub fn try_enter(&mut self, occupant: OccupantId) -> bool {
        if self.occupant.is_some() {
            return false;
        }
        self.occupant = Some(occupant);
        true
    }

    /// Release the site; false unless `occupant` is the one inside
    pub fn try_exit(&mut self, occupant: OccupantId) -> bool {
        if self.occupant != Some(occupant) {
            return false;
        }
        self.occupant = None;
        true
    }

    /// Terminal attack signal; returns whoever was inside
    ///
    /// Damage or game-over handling belongs to the caller.
    pub fn attack(&mut self) -> Option<OccupantId> {
        self.attacks_received += 1;
        tracing::info!(
            "Site {:?} attacked (occupant: {:?})",
            self.id,
            self.occupant
        );
        self.occupant
    }
}
