//! One encounter: a player, its pursuers and the places to hide
//!
//! Per step, in order:
//! 1. The player moves; footsteps and queued interactions (hide, leave) are
//!    broadcast to every antagonist.
//! 2. Every antagonist runs its decision tick against current positions.
//! 3. Attack signals are routed to the concealment site; hitting an occupied
//!    site ends the encounter.
//! 4. Antagonist bodies move.

use serde::{Deserialize, Serialize};

use crate::antagonist::{
    Antagonist, NoiseEvent, PerceptionEvent, PresentationSignals, PursuitState, Surroundings,
};
use crate::concealment::SiteRegistry;
use crate::core::config::{load_profile, AntagonistConfig, PlayerConfig};
use crate::core::error::Result;
use crate::core::types::{AgentId, ColliderId, OccupantId, SimTime, SiteId, Vec3};
use crate::host::{Locomotion, Navigation};
use crate::player::{MoveIntent, Player};
use crate::simulation::log::{EncounterLog, EventKind};
use crate::world::arena::Arena;
use crate::world::blocking::{Obstacle, LAYER_ANTAGONIST};
use crate::world::loader::ArenaLayout;
use crate::world::locomotion::KinematicMover;

pub const ANTAGONIST_RADIUS: f32 = 0.4;
pub const ANTAGONIST_HEIGHT: f32 = 2.0;
/// How far from a site's entry point the player looks for floor when leaving
const EXIT_SEARCH_RADIUS: f32 = 2.0;

/// How an encounter ended
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// An antagonist attacked the site the player was hiding in
    Caught { agent: AgentId, site: SiteId, at: SimTime },
    /// Time ran out first
    Survived,
}

/// Player action applied at the start of the next step
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Interaction {
    /// Hide in the given site, or the nearest one in reach
    Hide(Option<SiteId>),
    Leave,
}

/// An antagonist brain with the body it drives
#[derive(Debug, Clone)]
pub struct AntagonistSlot {
    pub id: AgentId,
    pub brain: Antagonist,
    pub body: KinematicMover,
    pub collider: ColliderId,
    pub last_signals: Option<PresentationSignals>,
}

impl AntagonistSlot {
    fn hitbox(&self) -> Obstacle {
        Obstacle::standing(
            self.collider,
            self.body.position,
            ANTAGONIST_RADIUS,
            ANTAGONIST_HEIGHT,
            LAYER_ANTAGONIST,
        )
    }
}

/// Setup knobs for `Encounter::from_layout`
#[derive(Debug, Clone, Default)]
pub struct EncounterOptions {
    /// Base seed; antagonist `i` without its own seed uses `seed + i`
    pub seed: u64,
    /// Replaces every spawn's profile when set
    pub profile: Option<AntagonistConfig>,
    pub player: PlayerConfig,
}

pub struct Encounter {
    pub name: String,
    pub seed: u64,
    arena: Arena,
    sites: SiteRegistry,
    player: Player,
    antagonists: Vec<AntagonistSlot>,
    pending: Vec<Interaction>,
    clock: SimTime,
    steps: u64,
    outcome: Option<Outcome>,
    log: EncounterLog,
}

impl Encounter {
    /// Empty encounter around a prepared scene; the player is placed at `spawn`
    pub fn new(mut arena: Arena, sites: SiteRegistry, spawn: Vec3, player_config: PlayerConfig) -> Self {
        let collider = arena.allocate_collider();
        let player = Player::new(OccupantId(1), collider, spawn, player_config);
        arena.place_body(player.body());

        Self {
            name: String::new(),
            seed: 0,
            arena,
            sites,
            player,
            antagonists: Vec::new(),
            pending: Vec::new(),
            clock: 0.0,
            steps: 0,
            outcome: None,
            log: EncounterLog::new(),
        }
    }

    /// Build everything an arena file describes
    pub fn from_layout(layout: &ArenaLayout, options: EncounterOptions) -> Result<Self> {
        options.player.validate()?;
        let (arena, sites) = layout.build()?;
        let mut encounter = Self::new(arena, sites, layout.player.position, options.player.clone());
        encounter.name = layout.name.clone();
        encounter.seed = options.seed;
        if let Some(forward) = layout.player.forward {
            encounter.player.set_forward(forward);
        }

        for (index, spawn) in layout.antagonists.iter().enumerate() {
            let config = match (&options.profile, &spawn.profile) {
                (Some(config), _) => config.clone(),
                (None, Some(name)) => load_profile(name)?,
                (None, None) => AntagonistConfig::default(),
            };
            config.validate()?;
            let seed = spawn
                .seed
                .unwrap_or_else(|| options.seed.wrapping_add(index as u64));
            encounter.add_antagonist(config, spawn.position, seed);
        }

        tracing::info!(
            "Encounter '{}' ready: {} antagonists, {} sites, seed {}",
            encounter.name,
            encounter.antagonists.len(),
            encounter.sites.len(),
            encounter.seed
        );
        Ok(encounter)
    }

    /// Spawn an antagonist at `position`
    pub fn add_antagonist(&mut self, config: AntagonistConfig, position: Vec3, seed: u64) -> AgentId {
        let id = AgentId(self.antagonists.len() as u32);
        let slot = AntagonistSlot {
            id,
            brain: Antagonist::with_seed(config, seed),
            body: KinematicMover::new(position),
            collider: self.arena.allocate_collider(),
            last_signals: None,
        };
        self.arena.place_body(slot.hitbox());
        self.antagonists.push(slot);
        id
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn sites(&self) -> &SiteRegistry {
        &self.sites
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn antagonists(&self) -> &[AntagonistSlot] {
        &self.antagonists
    }

    pub fn antagonist(&self, id: AgentId) -> Option<&AntagonistSlot> {
        self.antagonists.get(id.0 as usize)
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn log(&self) -> &EncounterLog {
        &self.log
    }

    pub fn any_hunting(&self) -> bool {
        self.antagonists
            .iter()
            .any(|slot| slot.brain.state() == PursuitState::Hunting)
    }

    /// Queue a player interaction for the next step
    pub fn queue(&mut self, interaction: Interaction) {
        self.pending.push(interaction);
    }

    /// Run one step of `dt` seconds; returns the outcome once decided
    pub fn step(&mut self, dt: SimTime, intent: MoveIntent) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        let dt = dt.max(0.0);
        self.clock += dt;
        self.steps += 1;

        // 1. Player
        if let Some(noise) = self.player.step(dt, intent, &self.arena) {
            self.log.record(
                self.clock,
                EventKind::Footstep { position: noise.position, loudness: noise.loudness },
            );
            self.broadcast_noise(noise);
        }
        self.arena.place_body(self.player.body());

        for interaction in std::mem::take(&mut self.pending) {
            match interaction {
                Interaction::Hide(site) => {
                    self.hide(site);
                }
                Interaction::Leave => {
                    self.leave();
                }
            }
        }

        // 2. Decisions
        let target = self.player.target_view();
        let surroundings = Surroundings {
            physics: &self.arena,
            navigation: &self.arena,
            sites: &self.sites,
        };
        let mut attacks = Vec::new();
        for slot in &mut self.antagonists {
            let signals = slot.brain.tick(
                dt,
                Some(&mut slot.body as &mut dyn Locomotion),
                Some(&target),
                &surroundings,
            );

            for transition in slot.brain.take_transitions() {
                self.log.record(
                    self.clock,
                    EventKind::Transition {
                        agent: slot.id,
                        from: transition.from,
                        to: transition.to,
                        cause: transition.cause,
                    },
                );
            }
            if let Some(signals) = signals {
                if signals.scream_cue {
                    self.log.record(self.clock, EventKind::ScreamCue { agent: slot.id });
                }
                if signals.scream_audio {
                    self.log.record(self.clock, EventKind::ScreamAudio { agent: slot.id });
                }
                if let Some(site) = signals.attacked_site {
                    attacks.push((slot.id, site));
                }
            }
            slot.last_signals = signals;
        }

        // 3. Attacks
        for (agent, site_id) in attacks {
            let Some(site) = self.sites.get_mut(site_id) else {
                continue;
            };
            let occupant = site.attack();
            self.log.record(self.clock, EventKind::SiteAttacked { agent, site: site_id, occupant });
            if occupant == Some(self.player.id) && self.outcome.is_none() {
                tracing::info!("Player caught in site {:?} at {:.2}", site_id, self.clock);
                self.outcome = Some(Outcome::Caught { agent, site: site_id, at: self.clock });
            }
        }

        // 4. Locomotion
        for slot in &mut self.antagonists {
            slot.body.advance(dt, &self.arena);
            self.arena.place_body(slot.hitbox());
        }

        self.outcome
    }

    /// Deliver a noise to every antagonist
    pub fn broadcast_noise(&mut self, noise: NoiseEvent) {
        for slot in &mut self.antagonists {
            if slot.brain.notify_noise(slot.body.current_position(), noise) {
                self.log.record(
                    self.clock,
                    EventKind::NoiseHeard {
                        agent: slot.id,
                        position: noise.position,
                        loudness: noise.loudness,
                    },
                );
            }
        }
    }

    fn broadcast(&mut self, event: PerceptionEvent) {
        for slot in &mut self.antagonists {
            slot.brain.handle_event(slot.body.current_position(), &event);
        }
    }

    /// Hide the player now; see `Interaction::Hide`
    pub fn hide(&mut self, site: Option<SiteId>) -> bool {
        let site_id = match site {
            Some(id) => id,
            None => match self
                .sites
                .nearest_within(self.player.position(), self.player.config.interact_distance)
            {
                Some(id) => id,
                None => return false,
            },
        };

        // Decided from where the player stood, before stepping inside
        let seen = self
            .player
            .exposed_to(self.antagonists.iter().map(|slot| slot.body.position), &self.arena);

        let Some(site) = self.sites.get_mut(site_id) else {
            return false;
        };
        if !self.player.enter_site(site) {
            return false;
        }
        let position = site.entry_point();
        self.arena.place_body(self.player.body());

        self.log.record(self.clock, EventKind::PlayerHid { site: site_id, seen });
        self.broadcast(PerceptionEvent::TargetEnteredConcealment {
            site: site_id,
            had_line_of_sight: seen,
            position,
        });
        true
    }

    /// Bring the player back out of its site
    pub fn leave(&mut self) -> bool {
        let Some(site_id) = self.player.concealed_in() else {
            return false;
        };
        let Some(site) = self.sites.get_mut(site_id) else {
            return false;
        };
        let exit_point = self
            .arena
            .sample_reachable_point(site.entry_point(), EXIT_SEARCH_RADIUS)
            .unwrap_or_else(|| site.attack_point());
        if !self.player.exit_site(site, exit_point) {
            return false;
        }
        self.arena.place_body(self.player.body());

        self.log.record(self.clock, EventKind::PlayerLeft { site: site_id });
        self.broadcast(PerceptionEvent::TargetExitedConcealment);
        true
    }

    /// Mark the encounter survived if nothing decided it yet
    pub fn finish(&mut self) -> Outcome {
        *self.outcome.get_or_insert(Outcome::Survived)
    }
}
