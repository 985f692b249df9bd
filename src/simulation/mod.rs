//! Encounter simulation: stepping, scripted players, output
//!
//! Ties the pieces together: player -> broadcasts -> antagonist decisions ->
//! site attacks -> locomotion, one fixed-size step at a time.

pub mod encounter;
pub mod log;
pub mod output;
pub mod script;

pub use encounter::{AntagonistSlot, Encounter, EncounterOptions, Interaction, Outcome};
pub use log::{EncounterEvent, EncounterLog, EventKind};
pub use output::{AntagonistReport, EncounterOutput, EncounterStats};
pub use script::{PlayerScript, ScriptAction};

use crate::core::types::SimTime;

/// Step `encounter` under `script` until someone is caught or
/// `max_seconds` of simulated time have passed
pub fn run_encounter(
    encounter: &mut Encounter,
    script: &mut PlayerScript,
    dt: SimTime,
    max_seconds: SimTime,
) -> Outcome {
    if dt <= 0.0 {
        tracing::warn!("Non-positive step size {}, nothing simulated", dt);
        return encounter.finish();
    }

    let total_steps = (max_seconds / dt).ceil().max(0.0) as u64;
    for _ in 0..total_steps {
        let action = script.decide(encounter);
        if let Some(interaction) = action.interaction {
            encounter.queue(interaction);
        }
        if let Some(outcome) = encounter.step(dt, action.intent) {
            return outcome;
        }
    }

    let outcome = encounter.finish();
    tracing::info!("Encounter '{}' ended: {:?} at {:.2}s", encounter.name, outcome, encounter.clock());
    outcome
}
