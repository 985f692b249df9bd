//! Encounter output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::antagonist::PursuitState;
use crate::core::types::{AgentId, SimTime};
use crate::simulation::encounter::{Encounter, Outcome};
use crate::simulation::log::{EncounterLog, EventKind};

/// Complete encounter output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncounterOutput {
    pub arena: String,
    pub seed: u64,
    pub script: String,
    pub outcome: Outcome,
    pub statistics: EncounterStats,
    pub antagonists: Vec<AntagonistReport>,
    pub log: EncounterLog,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncounterStats {
    pub seconds_simulated: SimTime,
    pub steps: u64,
    pub simulation_time_ms: u64,
    pub total_events: u32,
    pub footsteps: u32,
    pub noises_heard: u32,
    pub times_hidden: u32,
    pub times_hidden_seen: u32,
    pub site_attacks: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AntagonistReport {
    pub id: AgentId,
    pub profile: String,
    pub final_state: PursuitState,
    pub transitions: u32,
    pub scream_cues: u32,
    pub screams_audible: u32,
    pub seconds_hunting: SimTime,
}

impl EncounterOutput {
    pub fn new(encounter: &Encounter, script: &str, elapsed: Duration) -> Self {
        let log = encounter.log();
        let outcome = encounter.outcome().unwrap_or(Outcome::Survived);

        let antagonists = encounter
            .antagonists()
            .iter()
            .map(|slot| AntagonistReport {
                id: slot.id,
                profile: slot.brain.config().name.clone(),
                final_state: slot.brain.state(),
                transitions: log.transitions_of(slot.id).count() as u32,
                scream_cues: log.count(|k| matches!(k, EventKind::ScreamCue { agent } if *agent == slot.id)),
                screams_audible: log
                    .count(|k| matches!(k, EventKind::ScreamAudio { agent } if *agent == slot.id)),
                seconds_hunting: time_hunting(log, slot.id, encounter.clock()),
            })
            .collect();

        Self {
            arena: encounter.name.clone(),
            seed: encounter.seed,
            script: script.to_string(),
            outcome,
            statistics: EncounterStats {
                seconds_simulated: encounter.clock(),
                steps: encounter.steps(),
                simulation_time_ms: elapsed.as_millis() as u64,
                total_events: log.len() as u32,
                footsteps: log.count(|k| matches!(k, EventKind::Footstep { .. })),
                noises_heard: log.count(|k| matches!(k, EventKind::NoiseHeard { .. })),
                times_hidden: log.count(|k| matches!(k, EventKind::PlayerHid { .. })),
                times_hidden_seen: log.count(|k| matches!(k, EventKind::PlayerHid { seen: true, .. })),
                site_attacks: log.count(|k| matches!(k, EventKind::SiteAttacked { .. })),
            },
            antagonists,
            log: log.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let outcome = match self.outcome {
            Outcome::Caught { agent, site, at } => {
                format!("caught by antagonist {} in site {} at {:.1}s", agent.0, site.0, at)
            }
            Outcome::Survived => "survived".to_string(),
        };
        format!(
            "Arena '{}' (seed {}, script {}): {}\n{:.1}s in {} steps, {} events, {} noises heard, hid {} times ({} seen), {} site attacks",
            self.arena,
            self.seed,
            self.script,
            outcome,
            self.statistics.seconds_simulated,
            self.statistics.steps,
            self.statistics.total_events,
            self.statistics.noises_heard,
            self.statistics.times_hidden,
            self.statistics.times_hidden_seen,
            self.statistics.site_attacks,
        )
    }
}

/// Total time `agent` spent hunting, from its transition history
fn time_hunting(log: &EncounterLog, agent: AgentId, end: SimTime) -> SimTime {
    let mut total = 0.0;
    let mut hunting_since: Option<SimTime> = None;
    for event in log.transitions_of(agent) {
        if let EventKind::Transition { to, .. } = event.kind {
            match (to == PursuitState::Hunting, hunting_since) {
                (true, None) => hunting_since = Some(event.time),
                (false, Some(since)) => {
                    total += event.time - since;
                    hunting_since = None;
                }
                _ => {}
            }
        }
    }
    if let Some(since) = hunting_since {
        total += end - since;
    }
    total
}
