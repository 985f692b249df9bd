//! Antagonist and player tuning with documented constants
//!
//! Every value here is a scenario parameter, not a behavior branch. Profiles
//! are TOML files whose missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{AshesError, Result};
use crate::core::types::LayerMask;

/// Tuning for one antagonist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AntagonistConfig {
    /// Name of this profile (set from filename when loaded by name)
    pub name: String,

    // === RADII ===
    /// How far from its current position a wander destination may be picked
    pub wander_radius: f32,
    /// Proximity that moves Wandering into Tracking
    pub tracking_radius: f32,
    /// Extra margin beyond `tracking_radius` before pursuit is dropped
    ///
    /// Entering happens at `tracking_radius`, leaving only beyond
    /// `tracking_radius + tracking_hysteresis`.
    pub tracking_hysteresis: f32,
    /// Noises farther than this are never heard
    pub hearing_radius: f32,

    // === SPEEDS ===
    pub wander_speed: f32,
    pub track_speed: f32,
    /// Kept below the player's sprint speed so a sprint can outrun a hunt
    pub hunt_speed: f32,

    // === VISION ===
    /// Gate line of sight by the field-of-view cone
    pub use_fov: bool,
    /// Full cone angle in degrees; the gate uses half of it either side
    pub fov_angle: f32,
    /// Eye anchor above the agent's feet
    pub eye_height: f32,
    /// Head anchor above the target's feet
    pub target_height: f32,
    /// Layers that obstruct sight (the target's own layer is always added)
    pub blockers: LayerMask,

    // === TIMERS (seconds) ===
    pub wander_repick_interval: f32,
    /// Time a concealed, unseen target takes to be forgotten
    pub hide_forget_seconds: f32,
    /// Minimum gap between two scream sounds
    pub scream_cooldown: f32,

    // === RESOLUTION ===
    /// Distance to a tracked site at which it gets attacked
    pub attack_proximity: f32,
    /// Minimum `proximity * loudness` that escalates to Hunting
    pub noise_alert_threshold: f32,
    /// Radius of the lateral jitter added to the tracking destination
    pub tracking_jitter: f32,
    /// Random candidates tried before a wander pick falls back in place
    pub wander_sample_attempts: u32,
    /// How far from a candidate the navigation sampler may snap
    pub nav_sample_distance: f32,
}

impl Default for AntagonistConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),

            wander_radius: 20.0,
            tracking_radius: 18.0,
            tracking_hysteresis: 2.0,
            hearing_radius: 25.0,

            wander_speed: 2.0,
            track_speed: 2.5,
            hunt_speed: 4.5,

            use_fov: false,
            fov_angle: 120.0,
            eye_height: 1.7,
            target_height: 1.6,
            blockers: LayerMask::ALL,

            wander_repick_interval: 4.0,
            hide_forget_seconds: 5.0,
            scream_cooldown: 200.0,

            attack_proximity: 1.6,
            noise_alert_threshold: 0.35,
            tracking_jitter: 2.0,
            wander_sample_attempts: 10,
            nav_sample_distance: 3.0,
        }
    }
}

impl AntagonistConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance beyond which any pursuit is abandoned
    pub fn release_radius(&self) -> f32 {
        self.tracking_radius + self.tracking_hysteresis
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("wander_radius", self.wander_radius),
            ("tracking_radius", self.tracking_radius),
            ("hearing_radius", self.hearing_radius),
            ("wander_speed", self.wander_speed),
            ("track_speed", self.track_speed),
            ("hunt_speed", self.hunt_speed),
            ("attack_proximity", self.attack_proximity),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(AshesError::InvalidConfig(format!(
                    "{} must be positive (got {})",
                    field, value
                )));
            }
        }

        let non_negative = [
            ("tracking_hysteresis", self.tracking_hysteresis),
            ("wander_repick_interval", self.wander_repick_interval),
            ("hide_forget_seconds", self.hide_forget_seconds),
            ("scream_cooldown", self.scream_cooldown),
            ("tracking_jitter", self.tracking_jitter),
            ("nav_sample_distance", self.nav_sample_distance),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(AshesError::InvalidConfig(format!(
                    "{} must not be negative (got {})",
                    field, value
                )));
            }
        }

        if !(self.fov_angle > 0.0 && self.fov_angle <= 360.0) {
            return Err(AshesError::InvalidConfig(format!(
                "fov_angle ({}) must be in (0, 360]",
                self.fov_angle
            )));
        }

        if !(0.0..=1.0).contains(&self.noise_alert_threshold) {
            return Err(AshesError::InvalidConfig(format!(
                "noise_alert_threshold ({}) must be in [0, 1]",
                self.noise_alert_threshold
            )));
        }

        Ok(())
    }

    /// Load and validate a profile from an arbitrary TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!("Loaded antagonist profile from {:?}", path);
        Ok(config)
    }

    /// Parse and validate a profile from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }
}

/// Tuning for the player (the hunted target)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub walk_speed: f32,
    /// Kept slightly above the antagonist's hunt speed
    pub sprint_speed: f32,
    /// Seconds between footsteps while walking
    pub step_interval_walk: f32,
    /// Seconds between footsteps while sprinting
    pub step_interval_sprint: f32,
    /// Loudness in [0, 1] reported for a walking footstep
    pub footstep_loudness_walk: f32,
    /// Loudness in [0, 1] reported for a sprinting footstep
    pub footstep_loudness_sprint: f32,
    /// Horizontal speed below which no footsteps are produced
    pub moving_threshold: f32,
    /// How close a concealment site must be to be entered
    pub interact_distance: f32,
    /// Head anchor used by the player-side sight check
    pub head_height: f32,
    /// Eye anchor assumed for antagonists by the player-side sight check
    pub enemy_eye_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.5,
            sprint_speed: 7.0,
            step_interval_walk: 0.48,
            step_interval_sprint: 0.36,
            footstep_loudness_walk: 0.45,
            footstep_loudness_sprint: 0.9,
            moving_threshold: 0.2,
            interact_distance: 2.2,
            head_height: 1.6,
            enemy_eye_height: 1.7,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.step_interval_walk > 0.0 && self.step_interval_sprint > 0.0) {
            return Err(AshesError::InvalidConfig(
                "step intervals must be positive".into(),
            ));
        }
        let loudness = [self.footstep_loudness_walk, self.footstep_loudness_sprint];
        if loudness.iter().any(|l| !(0.0..=1.0).contains(l)) {
            return Err(AshesError::InvalidConfig(
                "footstep loudness must be in [0, 1]".into(),
            ));
        }
        if self.walk_speed < 0.0 || self.sprint_speed < 0.0 {
            return Err(AshesError::InvalidConfig("speeds must not be negative".into()));
        }
        Ok(())
    }
}

/// Load a named antagonist profile
///
/// Loads from `data/antagonist/{name}.toml`
pub fn load_profile(name: &str) -> Result<AntagonistConfig> {
    let path = profile_path(name);
    let mut config = AntagonistConfig::load(&path)?;
    config.name = name.to_string();
    Ok(config)
}

/// Get path to profile file
fn profile_path(name: &str) -> PathBuf {
    PathBuf::from("data/antagonist").join(format!("{}.toml", name))
}
