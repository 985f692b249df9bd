//! Scripted players for headless runs

use serde::{Deserialize, Serialize};

use crate::core::types::{horizontal, SimTime, SiteId, Vec3};
use crate::player::MoveIntent;
use crate::simulation::encounter::{Encounter, Interaction};

/// Waypoints closer than this count as reached
const WAYPOINT_TOLERANCE: f32 = 0.5;
/// Default time spent hidden before stepping out again
pub const DEFAULT_HIDE_SECONDS: SimTime = 10.0;

/// What the script wants this step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScriptAction {
    pub intent: MoveIntent,
    pub interaction: Option<Interaction>,
}

impl ScriptAction {
    fn moving(intent: MoveIntent) -> Self {
        Self { intent, interaction: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerScript {
    /// Stand still
    Idle,
    /// Walk a loop of waypoints
    Patrol { waypoints: Vec<Vec3>, next: usize },
    /// Walk to the nearest free site and hide once anything hunts; step out
    /// again after `hide_seconds`
    HideWhenHunted { hide_seconds: SimTime, hidden_at: Option<SimTime> },
    /// Run along a fixed direction
    Sprint { direction: Vec3 },
}

impl PlayerScript {
    /// Square patrol of half-size `half` around `center`
    pub fn patrol_around(center: Vec3, half: f32) -> Self {
        let waypoints = vec![
            center + Vec3::new(half, 0.0, half),
            center + Vec3::new(half, 0.0, -half),
            center + Vec3::new(-half, 0.0, -half),
            center + Vec3::new(-half, 0.0, half),
        ];
        PlayerScript::Patrol { waypoints, next: 0 }
    }

    pub fn hide_when_hunted() -> Self {
        PlayerScript::HideWhenHunted { hide_seconds: DEFAULT_HIDE_SECONDS, hidden_at: None }
    }

    /// Look up a script by name: idle, patrol, hide, sprint
    pub fn from_name(name: &str, spawn: Vec3, forward: Vec3) -> Option<Self> {
        match name {
            "idle" => Some(PlayerScript::Idle),
            "patrol" => Some(Self::patrol_around(spawn, 4.0)),
            "hide" => Some(Self::hide_when_hunted()),
            "sprint" => Some(PlayerScript::Sprint { direction: forward }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerScript::Idle => "idle",
            PlayerScript::Patrol { .. } => "patrol",
            PlayerScript::HideWhenHunted { .. } => "hide",
            PlayerScript::Sprint { .. } => "sprint",
        }
    }

    /// Choose this step's movement and interaction
    pub fn decide(&mut self, encounter: &Encounter) -> ScriptAction {
        let player = encounter.player();
        match self {
            PlayerScript::Idle => ScriptAction::default(),

            PlayerScript::Patrol { waypoints, next } => {
                if waypoints.is_empty() {
                    return ScriptAction::default();
                }
                let mut target = waypoints[*next % waypoints.len()];
                if horizontal(target - player.position()).length() <= WAYPOINT_TOLERANCE {
                    *next = (*next + 1) % waypoints.len();
                    target = waypoints[*next];
                }
                ScriptAction::moving(MoveIntent::walk(target - player.position()))
            }

            PlayerScript::HideWhenHunted { hide_seconds, hidden_at } => {
                if player.is_concealed() {
                    let since = *hidden_at.get_or_insert(encounter.clock());
                    if encounter.clock() - since >= *hide_seconds {
                        *hidden_at = None;
                        return ScriptAction { intent: MoveIntent::idle(), interaction: Some(Interaction::Leave) };
                    }
                    return ScriptAction::default();
                }
                *hidden_at = None;

                if !encounter.any_hunting() {
                    return ScriptAction::default();
                }
                match nearest_free_site(encounter) {
                    Some((site, position)) => {
                        if player.position().distance(position) <= player.config.interact_distance {
                            ScriptAction {
                                intent: MoveIntent::idle(),
                                interaction: Some(Interaction::Hide(Some(site))),
                            }
                        } else {
                            ScriptAction::moving(MoveIntent::sprint(position - player.position()))
                        }
                    }
                    None => ScriptAction::default(),
                }
            }

            PlayerScript::Sprint { direction } => ScriptAction::moving(MoveIntent::sprint(*direction)),
        }
    }
}

fn nearest_free_site(encounter: &Encounter) -> Option<(SiteId, Vec3)> {
    let from = encounter.player().position();
    encounter
        .sites()
        .iter()
        .filter(|site| !site.is_occupied())
        .min_by(|a, b| {
            a.position
                .distance(from)
                .total_cmp(&b.position.distance(from))
        })
        .map(|site| (site.id, site.position))
}
