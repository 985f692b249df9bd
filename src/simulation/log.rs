//! Encounter event log

use serde::{Deserialize, Serialize};

use crate::antagonist::{PursuitState, TransitionCause};
use crate::core::types::{AgentId, OccupantId, SimTime, SiteId, Vec3};

/// Something that happened during an encounter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterEvent {
    pub time: SimTime,
    pub kind: EventKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    // Antagonists
    Transition { agent: AgentId, from: PursuitState, to: PursuitState, cause: TransitionCause },
    ScreamCue { agent: AgentId },
    ScreamAudio { agent: AgentId },
    NoiseHeard { agent: AgentId, position: Vec3, loudness: f32 },
    SiteAttacked { agent: AgentId, site: SiteId, occupant: Option<OccupantId> },

    // Player
    Footstep { position: Vec3, loudness: f32 },
    PlayerHid { site: SiteId, seen: bool },
    PlayerLeft { site: SiteId },
}

/// Ordered record of everything that happened
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EncounterLog {
    pub events: Vec<EncounterEvent>,
}

impl EncounterLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, time: SimTime, kind: EventKind) {
        self.events.push(EncounterEvent { time, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count events matching `predicate`
    pub fn count(&self, predicate: impl Fn(&EventKind) -> bool) -> u32 {
        self.events.iter().filter(|e| predicate(&e.kind)).count() as u32
    }

    pub fn transitions_of(&self, agent: AgentId) -> impl Iterator<Item = &EncounterEvent> {
        self.events.iter().filter(move |e| {
            matches!(e.kind, EventKind::Transition { agent: a, .. } if a == agent)
        })
    }

    /// Events recorded at or after `time`
    pub fn since(&self, time: SimTime) -> impl Iterator<Item = &EncounterEvent> {
        self.events.iter().filter(move |e| e.time >= time)
    }

    /// One human-readable line per event
    pub fn describe(event: &EncounterEvent) -> String {
        let what = match &event.kind {
            EventKind::Transition { agent, from, to, cause } => {
                format!("antagonist {} {} -> {} ({:?})", agent.0, from, to, cause)
            }
            EventKind::ScreamCue { agent } => format!("antagonist {} screams", agent.0),
            EventKind::ScreamAudio { agent } => format!("antagonist {} scream audio", agent.0),
            EventKind::NoiseHeard { agent, position, loudness } => format!(
                "antagonist {} heard noise {:.2} at ({:.1}, {:.1})",
                agent.0, loudness, position.x, position.z
            ),
            EventKind::SiteAttacked { agent, site, occupant } => match occupant {
                Some(_) => format!("antagonist {} attacked site {} with the player inside", agent.0, site.0),
                None => format!("antagonist {} attacked empty site {}", agent.0, site.0),
            },
            EventKind::Footstep { position, loudness } => format!(
                "footstep {:.2} at ({:.1}, {:.1})",
                loudness, position.x, position.z
            ),
            EventKind::PlayerHid { site, seen } => {
                format!("player hid in site {} ({})", site.0, if *seen { "seen" } else { "unseen" })
            }
            EventKind::PlayerLeft { site } => format!("player left site {}", site.0),
        };
        format!("[{:7.2}] {}", event.time, what)
    }
}
