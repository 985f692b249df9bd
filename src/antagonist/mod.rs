//! Antagonist decision core: senses, pursuit states, event intake

pub mod events;
pub mod perception;
pub mod pursuit;
pub mod state;

pub use events::PerceptionEvent;
pub use perception::{NoiseEvent, PerceptionTracker};
pub use pursuit::{Antagonist, Surroundings};
pub use state::{PresentationSignals, PursuitState, StateTransition, TransitionCause};
