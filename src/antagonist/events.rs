//! Event notifications delivered to an antagonist outside its tick

use serde::{Deserialize, Serialize};

use crate::antagonist::perception::NoiseEvent;
use crate::core::types::{SiteId, Vec3};

/// Something the surrounding systems tell the antagonist about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PerceptionEvent {
    /// A sound somewhere in the level
    Noise(NoiseEvent),
    /// The target hid inside a concealment site
    TargetEnteredConcealment {
        site: SiteId,
        /// Whether any antagonist could see the target at that moment
        had_line_of_sight: bool,
        /// Where the target now is (the site's entry point)
        position: Vec3,
    },
    /// The target came back out
    TargetExitedConcealment,
}
