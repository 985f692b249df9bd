//! Pursuit states and the per-tick signals handed to the presentation layer

use serde::{Deserialize, Serialize};

use crate::core::types::{SimTime, SiteId, Vec3};

/// Antagonist behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PursuitState {
    /// Roaming between random reachable points
    #[default]
    Wandering,
    /// Hovering around a nearby target without having seen it
    Tracking,
    /// Chasing at full speed
    Hunting,
}

impl PursuitState {
    /// Integer consumed by animation state parameters
    pub fn as_int(&self) -> i32 {
        match self {
            PursuitState::Wandering => 0,
            PursuitState::Tracking => 1,
            PursuitState::Hunting => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PursuitState::Wandering => "wandering",
            PursuitState::Tracking => "tracking",
            PursuitState::Hunting => "hunting",
        }
    }
}

impl std::fmt::Display for PursuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a state change happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// Line of sight escalated to Hunting
    Sighted,
    /// Target came within tracking radius
    Proximity,
    /// A loud enough noise was heard
    Noise,
    /// Target was seen slipping into a concealment site
    SawConcealment,
    /// Target left the release radius
    Outrun,
    /// Concealed target stayed unseen past the forget timeout
    Forgot,
    /// The tracked concealment site was attacked
    SiteAttacked,
}

/// A recorded state change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    pub at: SimTime,
    pub from: PursuitState,
    pub to: PursuitState,
    pub cause: TransitionCause,
}

/// Output of one decision tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PresentationSignals {
    pub state: PursuitState,
    /// Magnitude of the locomotion velocity
    pub speed: f32,
    /// Where locomotion was told to go this tick
    pub destination: Option<Vec3>,
    /// One-shot scream animation trigger (once per hunting episode)
    pub scream_cue: bool,
    /// Scream sound (at most once per cooldown window)
    pub scream_audio: bool,
    /// Site whose attack signal fired this tick
    pub attacked_site: Option<SiteId>,
}

impl PresentationSignals {
    pub fn state_int(&self) -> i32 {
        self.state.as_int()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_wandering() {
        assert_eq!(PursuitState::default(), PursuitState::Wandering);
    }

    #[test]
    fn test_state_ints_match_animator_order() {
        assert_eq!(PursuitState::Wandering.as_int(), 0);
        assert_eq!(PursuitState::Tracking.as_int(), 1);
        assert_eq!(PursuitState::Hunting.as_int(), 2);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PursuitState::Hunting.to_string(), "hunting");
    }
}
