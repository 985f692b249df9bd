//! Ashes Beneath - antagonist perception and pursuit

pub mod antagonist;
pub mod concealment;
pub mod core;
pub mod host;
pub mod player;
pub mod simulation;
pub mod world;
