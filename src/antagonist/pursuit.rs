//! Pursuit state machine: Wandering -> Tracking -> Hunting
//!
//! One decision step per `tick`. Order inside a tick:
//! 1. Line of sight is evaluated once against current positions; if it holds
//!    the machine escalates to Hunting whatever the current state, and no
//!    release rule can undo that within the same tick.
//! 2. The current state's behavior runs (speed, destination, timers).
//! 3. Signals for the presentation layer are assembled.
//!
//! Noise and concealment notifications may arrive between ticks and are
//! applied immediately.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::antagonist::events::PerceptionEvent;
use crate::antagonist::perception::{NoiseEvent, PerceptionTracker};
use crate::antagonist::state::{
    PresentationSignals, PursuitState, StateTransition, TransitionCause,
};
use crate::concealment::SiteRegistry;
use crate::core::config::AntagonistConfig;
use crate::core::types::{horizontal, SimTime, SiteId, Vec3};
use crate::host::{Locomotion, Navigation, Physics, TargetView};

const DEFAULT_SEED: u64 = 42;

/// Read-only scene access for one tick
#[derive(Clone, Copy)]
pub struct Surroundings<'a> {
    pub physics: &'a dyn Physics,
    pub navigation: &'a dyn Navigation,
    pub sites: &'a SiteRegistry,
}

/// Facts gathered at the top of a tick
struct TickFacts {
    agent_position: Vec3,
    target_position: Vec3,
    distance: f32,
    visible: bool,
}

/// The antagonist's decision core
#[derive(Debug, Clone)]
pub struct Antagonist {
    config: AntagonistConfig,
    perception: PerceptionTracker,
    rng: ChaCha8Rng,

    state: PursuitState,
    clock: SimTime,
    last_known_target_position: Vec3,

    // Timers
    next_wander_pick_at: SimTime,
    /// Set while the target is concealed and unseen
    hidden_since: Option<SimTime>,
    last_scream_at: Option<SimTime>,

    // Concealment tracking; `tracked_site` is only set while the flag is
    saw_target_enter_concealment: bool,
    tracked_site: Option<SiteId>,

    // Target status as reported by notifications
    target_concealed: bool,
    target_site: Option<SiteId>,

    has_screamed_this_hunt: bool,
    pending_scream_cue: bool,
    transitions: Vec<StateTransition>,
}

impl Antagonist {
    pub fn new(config: AntagonistConfig) -> Self {
        Self::with_seed(config, DEFAULT_SEED)
    }

    /// Create with a seeded random source for wander picks and jitter
    pub fn with_seed(config: AntagonistConfig, seed: u64) -> Self {
        let perception = PerceptionTracker::from_config(&config);
        Self {
            config,
            perception,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: PursuitState::Wandering,
            clock: 0.0,
            last_known_target_position: Vec3::ZERO,
            next_wander_pick_at: 0.0,
            hidden_since: None,
            last_scream_at: None,
            saw_target_enter_concealment: false,
            tracked_site: None,
            target_concealed: false,
            target_site: None,
            has_screamed_this_hunt: false,
            pending_scream_cue: false,
            transitions: Vec::new(),
        }
    }

    pub fn config(&self) -> &AntagonistConfig {
        &self.config
    }

    pub fn perception(&self) -> &PerceptionTracker {
        &self.perception
    }

    pub fn state(&self) -> PursuitState {
        self.state
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn last_known_target_position(&self) -> Vec3 {
        self.last_known_target_position
    }

    pub fn hidden_since(&self) -> Option<SimTime> {
        self.hidden_since
    }

    pub fn saw_target_enter_concealment(&self) -> bool {
        self.saw_target_enter_concealment
    }

    pub fn tracked_site(&self) -> Option<SiteId> {
        self.tracked_site
    }

    pub fn target_concealed(&self) -> bool {
        self.target_concealed
    }

    pub fn target_site(&self) -> Option<SiteId> {
        self.target_site
    }

    pub fn has_screamed_this_hunt(&self) -> bool {
        self.has_screamed_this_hunt
    }

    /// Drain the state changes recorded since the last call
    pub fn take_transitions(&mut self) -> Vec<StateTransition> {
        std::mem::take(&mut self.transitions)
    }

    /// Advance the clock by `delta` seconds and run one decision step
    ///
    /// Returns `None` without deciding anything when the body or the target
    /// is missing; the clock still advances.
    pub fn tick(
        &mut self,
        delta: SimTime,
        body: Option<&mut dyn Locomotion>,
        target: Option<&TargetView>,
        surroundings: &Surroundings<'_>,
    ) -> Option<PresentationSignals> {
        self.clock += delta.max(0.0);

        let (Some(body), Some(target)) = (body, target) else {
            return None;
        };

        let agent_position = body.current_position();
        let visible = self.perception.has_line_of_sight(
            agent_position,
            body.forward(),
            target,
            surroundings.physics,
        );
        let facts = TickFacts {
            agent_position,
            target_position: target.position,
            distance: agent_position.distance(target.position),
            visible,
        };

        if facts.visible {
            self.set_state(
                PursuitState::Hunting,
                TransitionCause::Sighted,
                Some(facts.target_position),
            );
        }

        let mut signals = PresentationSignals::default();
        match self.state {
            PursuitState::Wandering => {
                self.tick_wandering(body, &facts, surroundings.navigation, &mut signals)
            }
            PursuitState::Tracking => self.tick_tracking(body, &facts, &mut signals),
            PursuitState::Hunting => {
                self.tick_hunting(body, &facts, surroundings.sites, &mut signals)
            }
        }

        signals.state = self.state;
        signals.speed = body.current_velocity().length();
        signals.scream_cue = std::mem::take(&mut self.pending_scream_cue);
        Some(signals)
    }

    // ---- states ----

    fn tick_wandering(
        &mut self,
        body: &mut dyn Locomotion,
        facts: &TickFacts,
        navigation: &dyn Navigation,
        signals: &mut PresentationSignals,
    ) {
        body.set_speed(self.config.wander_speed);

        if self.clock >= self.next_wander_pick_at || body.has_arrived() {
            let point = self.random_reachable_point(facts.agent_position, navigation);
            steer(body, point, signals);
            self.next_wander_pick_at = self.clock + self.config.wander_repick_interval;
            tracing::debug!("Wander destination {:?} (next pick at {:.2})", point, self.next_wander_pick_at);
        }

        if facts.distance <= self.config.tracking_radius {
            self.set_state(PursuitState::Tracking, TransitionCause::Proximity, None);
        }
    }

    fn tick_tracking(
        &mut self,
        body: &mut dyn Locomotion,
        facts: &TickFacts,
        signals: &mut PresentationSignals,
    ) {
        body.set_speed(self.config.track_speed);

        // Hover around the target instead of beelining
        let jitter = horizontal(self.random_in_unit_sphere()) * self.config.tracking_jitter;
        steer(body, facts.target_position + jitter, signals);
        self.last_known_target_position = facts.target_position;

        if self.target_concealed && !facts.visible {
            self.run_forget_timer();
        } else {
            self.hidden_since = None;
        }

        if !facts.visible && facts.distance > self.config.release_radius() {
            self.set_state(PursuitState::Wandering, TransitionCause::Outrun, None);
        }
    }

    fn tick_hunting(
        &mut self,
        body: &mut dyn Locomotion,
        facts: &TickFacts,
        sites: &SiteRegistry,
        signals: &mut PresentationSignals,
    ) {
        body.set_speed(self.config.hunt_speed);

        let scream_due = self
            .last_scream_at
            .map_or(true, |at| self.clock - at > self.config.scream_cooldown);
        if scream_due {
            signals.scream_audio = true;
            self.last_scream_at = Some(self.clock);
            tracing::info!("Scream at {:.2}", self.clock);
        }

        if facts.visible {
            self.last_known_target_position = facts.target_position;
            steer(body, facts.target_position, signals);
        } else {
            // Keep the pressure on through brief occlusion
            steer(body, self.last_known_target_position, signals);
        }

        if self.target_concealed {
            let tracked = self
                .tracked_site
                .filter(|_| self.saw_target_enter_concealment)
                .and_then(|id| sites.get(id));

            if let Some(site) = tracked {
                let (site_id, site_position) = (site.id, site.position);
                steer(body, site.attack_point(), signals);

                if facts.agent_position.distance(site_position) < self.config.attack_proximity {
                    tracing::info!("Attacking concealment site {:?}", site_id);
                    signals.attacked_site = Some(site_id);
                    self.set_state(PursuitState::Wandering, TransitionCause::SiteAttacked, None);
                }
            } else if !facts.visible {
                self.run_forget_timer();
            } else {
                self.hidden_since = None;
            }
        } else {
            self.hidden_since = None;
            self.saw_target_enter_concealment = false;
            self.tracked_site = None;
        }

        if !facts.visible && facts.distance > self.config.release_radius() {
            self.set_state(PursuitState::Wandering, TransitionCause::Outrun, None);
        }
    }

    /// Start the forget timer if needed; give up once it has run out
    fn run_forget_timer(&mut self) {
        let since = match self.hidden_since {
            Some(since) => since,
            None => {
                tracing::debug!("Target concealed and unseen, forget timer started at {:.2}", self.clock);
                self.hidden_since = Some(self.clock);
                self.clock
            }
        };
        if self.clock - since >= self.config.hide_forget_seconds {
            self.set_state(PursuitState::Wandering, TransitionCause::Forgot, None);
        }
    }

    fn set_state(&mut self, next: PursuitState, cause: TransitionCause, capture: Option<Vec3>) {
        if self.state == next {
            return;
        }
        let previous = self.state;
        self.state = next;

        if next == PursuitState::Hunting {
            if let Some(position) = capture {
                self.last_known_target_position = position;
            }
            if !self.has_screamed_this_hunt {
                self.pending_scream_cue = true;
                self.has_screamed_this_hunt = true;
            }
        } else {
            self.has_screamed_this_hunt = false;
        }

        if next == PursuitState::Wandering {
            self.hidden_since = None;
            self.saw_target_enter_concealment = false;
            self.tracked_site = None;
            // Force a fresh wander pick on the next Wandering tick
            self.next_wander_pick_at = SimTime::NEG_INFINITY;
        }

        tracing::info!("{} -> {} ({:?}) at {:.2}", previous, next, cause, self.clock);
        self.transitions.push(StateTransition {
            at: self.clock,
            from: previous,
            to: next,
            cause,
        });
    }

    // ---- events from other systems ----

    /// React to a noise heard from `agent_position`; true if it escalated
    pub fn notify_noise(&mut self, agent_position: Vec3, noise: NoiseEvent) -> bool {
        let Some(position) = self.perception.hear(agent_position, &noise) else {
            return false;
        };
        self.last_known_target_position = position;
        self.set_state(PursuitState::Hunting, TransitionCause::Noise, Some(position));
        true
    }

    /// The target hid in `site`; `had_line_of_sight` if it was seen doing so
    pub fn notify_target_entered_concealment(
        &mut self,
        site: SiteId,
        had_line_of_sight: bool,
        position: Vec3,
    ) {
        self.target_concealed = true;
        self.target_site = Some(site);

        if had_line_of_sight {
            self.saw_target_enter_concealment = true;
            self.tracked_site = Some(site);
            self.set_state(
                PursuitState::Hunting,
                TransitionCause::SawConcealment,
                Some(position),
            );
        }
    }

    pub fn notify_target_exited_concealment(&mut self) {
        self.target_concealed = false;
        self.target_site = None;
        self.saw_target_enter_concealment = false;
        self.tracked_site = None;
        self.hidden_since = None;
    }

    /// Dispatch any perception event
    pub fn handle_event(&mut self, agent_position: Vec3, event: &PerceptionEvent) {
        match *event {
            PerceptionEvent::Noise(noise) => {
                self.notify_noise(agent_position, noise);
            }
            PerceptionEvent::TargetEnteredConcealment {
                site,
                had_line_of_sight,
                position,
            } => self.notify_target_entered_concealment(site, had_line_of_sight, position),
            PerceptionEvent::TargetExitedConcealment => self.notify_target_exited_concealment(),
        }
    }

    // ---- helpers ----

    fn random_in_unit_sphere(&mut self) -> Vec3 {
        loop {
            let candidate = Vec3::new(
                self.rng.gen_range(-1.0..=1.0),
                self.rng.gen_range(-1.0..=1.0),
                self.rng.gen_range(-1.0..=1.0),
            );
            if candidate.length_squared() <= 1.0 {
                return candidate;
            }
        }
    }

    /// Random reachable point within the wander radius of `center`
    ///
    /// Falls back to `center` when no sample succeeds.
    fn random_reachable_point(&mut self, center: Vec3, navigation: &dyn Navigation) -> Vec3 {
        for _ in 0..self.config.wander_sample_attempts {
            let mut candidate = center + self.random_in_unit_sphere() * self.config.wander_radius;
            candidate.y = center.y;
            if let Some(point) =
                navigation.sample_reachable_point(candidate, self.config.nav_sample_distance)
            {
                return point;
            }
        }
        tracing::debug!("No reachable wander point near {:?}, staying put", center);
        center
    }
}

fn steer(body: &mut dyn Locomotion, point: Vec3, signals: &mut PresentationSignals) {
    body.set_destination(point);
    signals.destination = Some(point);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concealment::ConcealmentSite;
    use crate::core::types::ColliderId;
    use crate::host::doubles::{Scene, StubBody};

    fn target_at(position: Vec3) -> TargetView {
        TargetView {
            position,
            collider: ColliderId(1),
            layer: 3,
        }
    }

    fn step(
        ai: &mut Antagonist,
        body: &mut StubBody,
        target: Vec3,
        scene: &Scene,
        sites: &SiteRegistry,
    ) -> PresentationSignals {
        let surroundings = Surroundings {
            physics: scene,
            navigation: scene,
            sites,
        };
        ai.tick(0.25, Some(body as &mut dyn Locomotion), Some(&target_at(target)), &surroundings)
            .expect("body and target are present")
    }

    #[test]
    fn test_starts_wandering() {
        let ai = Antagonist::new(AntagonistConfig::default());
        assert_eq!(ai.state(), PursuitState::Wandering);
        assert_eq!(ai.hidden_since(), None);
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let scene = Scene::open();
        let sites = SiteRegistry::new();
        let surroundings = Surroundings { physics: &scene, navigation: &scene, sites: &sites };

        assert!(ai
            .tick(0.5, Some(&mut body as &mut dyn Locomotion), None, &surroundings)
            .is_none());
        assert!(ai.tick(0.5, None, Some(&target_at(Vec3::X)), &surroundings).is_none());
        assert_eq!(ai.state(), PursuitState::Wandering);
        assert_eq!(body.destination, None);
        assert_eq!(ai.clock(), 1.0);
    }

    #[test]
    fn test_wandering_picks_destination_on_first_tick() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();

        let signals = step(&mut ai, &mut body, Vec3::new(100.0, 0.0, 0.0), &Scene::walled(), &sites);

        assert_eq!(signals.state, PursuitState::Wandering);
        assert_eq!(body.speed, 2.0);
        let destination = body.destination.expect("wander destination picked");
        assert!(destination.distance(Vec3::ZERO) <= 20.0 + 1e-3);
        assert_eq!(destination.y, 0.0);
    }

    #[test]
    fn test_wander_repick_waits_for_interval() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();
        let far = Vec3::new(100.0, 0.0, 0.0);

        let first = step(&mut ai, &mut body, far, &Scene::walled(), &sites);
        assert!(first.destination.is_some());
        // Not arrived, interval not elapsed
        let second = step(&mut ai, &mut body, far, &Scene::walled(), &sites);
        assert!(second.destination.is_none());
        // Arrival forces a new pick
        body.arrived = true;
        let third = step(&mut ai, &mut body, far, &Scene::walled(), &sites);
        assert!(third.destination.is_some());
    }

    #[test]
    fn test_unreachable_wander_falls_back_to_position() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let start = Vec3::new(4.0, 0.0, -2.0);
        let mut body = StubBody::at(start);
        let sites = SiteRegistry::new();
        let scene = Scene { walled: true, reachable: false };

        step(&mut ai, &mut body, Vec3::new(100.0, 0.0, 0.0), &scene, &sites);
        assert_eq!(body.destination, Some(start));
    }

    #[test]
    fn test_proximity_starts_tracking_without_sight() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();

        let signals = step(&mut ai, &mut body, Vec3::new(10.0, 0.0, 0.0), &Scene::walled(), &sites);
        assert_eq!(signals.state, PursuitState::Tracking);
        assert!(!signals.scream_cue);
    }

    #[test]
    fn test_tracking_destination_stays_near_target() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();
        let target = Vec3::new(10.0, 0.0, 0.0);

        step(&mut ai, &mut body, target, &Scene::walled(), &sites);
        for _ in 0..20 {
            let signals = step(&mut ai, &mut body, target, &Scene::walled(), &sites);
            let destination = signals.destination.expect("tracking steers every tick");
            assert!(horizontal(destination - target).length() <= 2.0 + 1e-4);
            assert_eq!(destination.y, target.y);
            assert_eq!(body.speed, 2.5);
        }
        assert_eq!(ai.last_known_target_position(), target);
    }

    #[test]
    fn test_sight_forces_hunting_with_scream() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();
        let target = Vec3::new(5.0, 0.0, 0.0);

        let signals = step(&mut ai, &mut body, target, &Scene::open(), &sites);
        assert_eq!(signals.state, PursuitState::Hunting);
        assert!(signals.scream_cue);
        assert!(signals.scream_audio);
        assert_eq!(signals.destination, Some(target));
        assert_eq!(body.speed, 4.5);

        let again = step(&mut ai, &mut body, target, &Scene::open(), &sites);
        assert!(!again.scream_cue);
        assert!(!again.scream_audio);
    }

    #[test]
    fn test_hunting_keeps_last_known_when_occluded() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();

        step(&mut ai, &mut body, Vec3::new(5.0, 0.0, 0.0), &Scene::open(), &sites);
        let signals = step(&mut ai, &mut body, Vec3::new(8.0, 0.0, 3.0), &Scene::walled(), &sites);
        assert_eq!(signals.state, PursuitState::Hunting);
        assert_eq!(signals.destination, Some(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_outrun_returns_to_wandering() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();

        step(&mut ai, &mut body, Vec3::new(5.0, 0.0, 0.0), &Scene::open(), &sites);
        let signals = step(&mut ai, &mut body, Vec3::new(21.0, 0.0, 0.0), &Scene::walled(), &sites);
        assert_eq!(signals.state, PursuitState::Wandering);

        let transitions = ai.take_transitions();
        assert_eq!(transitions.last().map(|t| t.cause), Some(TransitionCause::Outrun));
    }

    #[test]
    fn test_sight_beats_outrun() {
        let sites = SiteRegistry::new();
        let far = Vec3::new(24.0, 0.0, 0.0);

        // Already hunting
        let mut hunter = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        step(&mut hunter, &mut body, Vec3::new(5.0, 0.0, 0.0), &Scene::open(), &sites);
        let signals = step(&mut hunter, &mut body, far, &Scene::open(), &sites);
        assert_eq!(signals.state, PursuitState::Hunting);
        assert_eq!(signals.destination, Some(far));

        // Tracking, then the target shows itself beyond the release radius
        let mut tracker = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        step(&mut tracker, &mut body, Vec3::new(10.0, 0.0, 0.0), &Scene::walled(), &sites);
        assert_eq!(tracker.state(), PursuitState::Tracking);
        step(&mut tracker, &mut body, far, &Scene::open(), &sites);
        assert_eq!(tracker.state(), PursuitState::Hunting);
        assert!(tracker
            .take_transitions()
            .iter()
            .all(|t| t.cause != TransitionCause::Outrun));

        // Wandering, first sighting far away
        let mut wanderer = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        step(&mut wanderer, &mut body, far, &Scene::open(), &sites);
        assert_eq!(wanderer.state(), PursuitState::Hunting);
    }

    #[test]
    fn test_hysteresis_band_keeps_tracking() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();

        step(&mut ai, &mut body, Vec3::new(17.0, 0.0, 0.0), &Scene::walled(), &sites);
        assert_eq!(ai.state(), PursuitState::Tracking);
        // Inside (18, 20]: still tracking
        step(&mut ai, &mut body, Vec3::new(19.5, 0.0, 0.0), &Scene::walled(), &sites);
        assert_eq!(ai.state(), PursuitState::Tracking);
        step(&mut ai, &mut body, Vec3::new(20.5, 0.0, 0.0), &Scene::walled(), &sites);
        assert_eq!(ai.state(), PursuitState::Wandering);
    }

    #[test]
    fn test_loud_noise_escalates() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let heard = ai.notify_noise(Vec3::ZERO, NoiseEvent::new(Vec3::new(5.0, 0.0, 5.0), 1.0));
        assert!(heard);
        assert_eq!(ai.state(), PursuitState::Hunting);
        assert_eq!(ai.last_known_target_position(), Vec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn test_quiet_noise_ignored() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let heard = ai.notify_noise(Vec3::ZERO, NoiseEvent::new(Vec3::new(20.0, 0.0, 0.0), 0.45));
        assert!(!heard);
        assert_eq!(ai.state(), PursuitState::Wandering);
    }

    #[test]
    fn test_noise_beyond_hearing_radius_ignored() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        assert!(!ai.notify_noise(Vec3::ZERO, NoiseEvent::new(Vec3::new(30.0, 0.0, 0.0), 1.0)));
    }

    #[test]
    fn test_seen_concealment_forces_hunting() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        ai.notify_target_entered_concealment(SiteId(4), true, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(ai.state(), PursuitState::Hunting);
        assert!(ai.saw_target_enter_concealment());
        assert_eq!(ai.tracked_site(), Some(SiteId(4)));
        assert_eq!(ai.last_known_target_position(), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_unseen_concealment_keeps_state() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        ai.notify_target_entered_concealment(SiteId(4), false, Vec3::ZERO);
        assert_eq!(ai.state(), PursuitState::Wandering);
        assert!(ai.target_concealed());
        assert!(!ai.saw_target_enter_concealment());
        assert_eq!(ai.tracked_site(), None);
        assert_eq!(ai.hidden_since(), None);
    }

    #[test]
    fn test_exit_clears_concealment_tracking() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        ai.notify_target_entered_concealment(SiteId(4), true, Vec3::ZERO);
        ai.notify_target_exited_concealment();
        assert!(!ai.target_concealed());
        assert_eq!(ai.target_site(), None);
        assert!(!ai.saw_target_enter_concealment());
        assert_eq!(ai.tracked_site(), None);
        assert_eq!(ai.state(), PursuitState::Hunting);
    }

    #[test]
    fn test_forget_timer_in_tracking() {
        let mut config = AntagonistConfig::default();
        config.hide_forget_seconds = 1.0;
        let mut ai = Antagonist::new(config);
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();
        let target = Vec3::new(10.0, 0.0, 0.0);

        step(&mut ai, &mut body, target, &Scene::walled(), &sites);
        assert_eq!(ai.state(), PursuitState::Tracking);

        ai.notify_target_entered_concealment(SiteId(1), false, target);
        // Timer starts at 0.5, expires once 1.0 has elapsed (at 1.5)
        for expected_clock in [0.5, 0.75, 1.0, 1.25] {
            step(&mut ai, &mut body, target, &Scene::walled(), &sites);
            assert_eq!(ai.clock(), expected_clock);
            assert_eq!(ai.state(), PursuitState::Tracking);
            assert_eq!(ai.hidden_since(), Some(0.5));
        }
        step(&mut ai, &mut body, target, &Scene::walled(), &sites);
        assert_eq!(ai.state(), PursuitState::Wandering);
        assert_eq!(ai.hidden_since(), None);
    }

    #[test]
    fn test_attack_tracked_site_when_close() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let site_position = Vec3::new(6.0, 0.0, 0.0);
        let mut sites = SiteRegistry::new();
        sites
            .insert(
                ConcealmentSite::new(SiteId(2), site_position)
                    .with_attack_anchor(Vec3::new(5.0, 0.0, 0.0)),
            )
            .unwrap();
        let mut body = StubBody::at(Vec3::ZERO);

        ai.notify_target_entered_concealment(SiteId(2), true, site_position);
        let approach = step(&mut ai, &mut body, site_position, &Scene::walled(), &sites);
        assert_eq!(approach.state, PursuitState::Hunting);
        assert_eq!(approach.destination, Some(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(approach.attacked_site, None);
        assert!(approach.scream_cue);

        body.position = Vec3::new(5.0, 0.0, 0.0);
        let strike = step(&mut ai, &mut body, site_position, &Scene::walled(), &sites);
        assert_eq!(strike.attacked_site, Some(SiteId(2)));
        assert_eq!(strike.state, PursuitState::Wandering);
        assert!(!ai.saw_target_enter_concealment());
        assert_eq!(ai.tracked_site(), None);

        // No immediate re-hunt, no second attack
        let after = step(&mut ai, &mut body, site_position, &Scene::walled(), &sites);
        assert_eq!(after.attacked_site, None);
        assert_ne!(after.state, PursuitState::Hunting);
    }

    #[test]
    fn test_reentering_hunting_rearms_scream_cue() {
        let mut ai = Antagonist::new(AntagonistConfig::default());
        let mut body = StubBody::at(Vec3::ZERO);
        let sites = SiteRegistry::new();

        let first = step(&mut ai, &mut body, Vec3::new(5.0, 0.0, 0.0), &Scene::open(), &sites);
        assert!(first.scream_cue);
        step(&mut ai, &mut body, Vec3::new(30.0, 0.0, 0.0), &Scene::walled(), &sites);
        assert_eq!(ai.state(), PursuitState::Wandering);
        assert!(!ai.has_screamed_this_hunt());

        let second = step(&mut ai, &mut body, Vec3::new(5.0, 0.0, 0.0), &Scene::open(), &sites);
        assert!(second.scream_cue);
        // Audio is still cooling down
        assert!(!second.scream_audio);
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let run = |seed| {
            let mut ai = Antagonist::with_seed(AntagonistConfig::default(), seed);
            let mut body = StubBody::at(Vec3::ZERO);
            let sites = SiteRegistry::new();
            (0..5)
                .map(|_| {
                    body.arrived = true;
                    step(&mut ai, &mut body, Vec3::new(90.0, 0.0, 0.0), &Scene::walled(), &sites)
                        .destination
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }
}
