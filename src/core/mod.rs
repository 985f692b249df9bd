pub mod config;
pub mod error;
pub mod types;

pub use config::{load_profile, AntagonistConfig, PlayerConfig};
pub use error::{AshesError, Result};
pub use types::{AgentId, ColliderId, LayerMask, OccupantId, SimTime, SiteId, Vec3};
