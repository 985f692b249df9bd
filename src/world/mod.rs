//! Headless sandbox: box obstacles, grid navigation, kinematic bodies

pub mod arena;
pub mod blocking;
pub mod loader;
pub mod locomotion;
pub mod navigation;

pub use arena::Arena;
pub use blocking::{Obstacle, LAYER_ANTAGONIST, LAYER_PLAYER, LAYER_PROPS, LAYER_WALLS};
pub use loader::{load_arena, ArenaLayout};
pub use locomotion::KinematicMover;
pub use navigation::NavGrid;
