//! Pursuit state machine driven through the sandbox arena

mod common;

use ashes_beneath::antagonist::{Antagonist, NoiseEvent, PursuitState, Surroundings, TransitionCause};
use ashes_beneath::concealment::{ConcealmentSite, SiteRegistry};
use ashes_beneath::core::config::AntagonistConfig;
use ashes_beneath::core::types::{SiteId, Vec3};
use ashes_beneath::host::{Locomotion, TargetView};
use ashes_beneath::world::{Arena, KinematicMover, NavGrid, Obstacle, LAYER_PLAYER, LAYER_PROPS, LAYER_WALLS};
use common::{tick, FlatScene, Statue};
use glam::Vec2;

fn empty_arena() -> Arena {
    Arena::new(NavGrid::new(Vec2::splat(-30.0), Vec2::splat(30.0), 0.5))
}

fn wall(arena: &mut Arena, center: Vec3, half_extents: Vec3) {
    let collider = arena.allocate_collider();
    arena.add_obstacle(Obstacle::new(collider, center, half_extents, LAYER_WALLS));
}

/// Player-sized target registered in the arena
fn player_in(arena: &mut Arena, position: Vec3) -> TargetView {
    let collider = arena.allocate_collider();
    arena.place_body(Obstacle::standing(collider, position, 0.3, 1.8, LAYER_PLAYER));
    TargetView {
        position,
        collider,
        layer: LAYER_PLAYER,
    }
}

#[test]
fn test_proximity_starts_tracking_on_first_tick() {
    let mut arena = empty_arena();
    wall(&mut arena, Vec3::new(5.0, 1.5, 0.0), Vec3::new(0.2, 1.5, 4.0));
    let target = player_in(&mut arena, Vec3::new(10.0, 0.0, 0.0));
    let sites = SiteRegistry::new();

    let mut antagonist = Antagonist::new(AntagonistConfig::default());
    let mut body = KinematicMover::new(Vec3::ZERO);
    let surroundings = Surroundings {
        physics: &arena,
        navigation: &arena,
        sites: &sites,
    };

    let signals = antagonist
        .tick(0.1, Some(&mut body as &mut dyn Locomotion), Some(&target), &surroundings)
        .expect("tick should run");

    assert_eq!(signals.state, PursuitState::Tracking);
    assert_eq!(antagonist.state(), PursuitState::Tracking);
    let transitions = antagonist.take_transitions();
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].cause, TransitionCause::Proximity);
}

#[test]
fn test_visible_target_is_hunted() {
    let mut arena = empty_arena();
    let target = player_in(&mut arena, Vec3::new(8.0, 0.0, 0.0));
    let sites = SiteRegistry::new();

    let mut antagonist = Antagonist::new(AntagonistConfig::default());
    let mut body = KinematicMover::new(Vec3::ZERO);
    let surroundings = Surroundings {
        physics: &arena,
        navigation: &arena,
        sites: &sites,
    };

    let signals = antagonist
        .tick(0.1, Some(&mut body as &mut dyn Locomotion), Some(&target), &surroundings)
        .expect("tick should run");

    assert_eq!(signals.state, PursuitState::Hunting);
    assert!(signals.scream_cue);
    assert!(signals.scream_audio);
    assert_eq!(signals.destination, Some(target.position));
    assert_eq!(antagonist.last_known_target_position(), target.position);
}

#[test]
fn test_loud_noise_starts_hunt() {
    let mut antagonist = Antagonist::new(AntagonistConfig::default());

    assert!(antagonist.notify_noise(Vec3::ZERO, NoiseEvent::new(Vec3::new(5.0, 0.0, 5.0), 1.0)));
    assert_eq!(antagonist.state(), PursuitState::Hunting);
    assert_eq!(antagonist.last_known_target_position(), Vec3::new(5.0, 0.0, 5.0));
}

#[test]
fn test_hunt_chases_last_known_position_behind_wall() {
    let mut antagonist = Antagonist::new(AntagonistConfig::default());
    let mut body = Statue::at(Vec3::ZERO);
    let sites = SiteRegistry::new();
    let noise_at = Vec3::new(3.0, 0.0, 4.0);
    antagonist.notify_noise(Vec3::ZERO, NoiseEvent::new(noise_at, 1.0));

    let signals = tick(&mut antagonist, &mut body, Vec3::new(6.0, 0.0, 0.0), &FlatScene::walled(), &sites, 0.1);

    assert_eq!(signals.state, PursuitState::Hunting);
    assert_eq!(signals.destination, Some(noise_at));
    assert_eq!(body.speed, antagonist.config().hunt_speed);
}

#[test]
fn test_seen_concealment_gets_attacked_once() {
    let mut arena = empty_arena();
    let locker = arena.allocate_collider();
    arena.add_obstacle(Obstacle::new(
        locker,
        Vec3::new(6.0, 1.0, 0.0),
        Vec3::new(0.5, 1.0, 0.5),
        LAYER_PROPS,
    ));
    let mut sites = SiteRegistry::new();
    sites
        .insert(ConcealmentSite::new(SiteId(1), Vec3::new(6.0, 0.0, 0.0)).with_attack_anchor(Vec3::new(5.0, 0.0, 0.0)))
        .expect("fresh registry");
    // Hidden inside the locker box, so out of sight from outside
    let target = player_in(&mut arena, Vec3::new(6.0, 0.0, 0.0));

    let mut antagonist = Antagonist::new(AntagonistConfig::default());
    let mut body = KinematicMover::new(Vec3::new(-2.0, 0.0, 0.0));
    antagonist.notify_target_entered_concealment(SiteId(1), true, target.position);
    assert_eq!(antagonist.state(), PursuitState::Hunting);
    assert_eq!(antagonist.tracked_site(), Some(SiteId(1)));

    let mut attacks = Vec::new();
    let mut state_after_attack = None;
    for _ in 0..100 {
        let surroundings = Surroundings {
            physics: &arena,
            navigation: &arena,
            sites: &sites,
        };
        let signals = antagonist
            .tick(0.1, Some(&mut body as &mut dyn Locomotion), Some(&target), &surroundings)
            .expect("tick should run");
        if let Some(site) = signals.attacked_site {
            attacks.push(site);
            state_after_attack.get_or_insert(signals.state);
        }
        body.advance(0.1, &arena);
    }

    assert_eq!(attacks, vec![SiteId(1)]);
    assert_eq!(state_after_attack, Some(PursuitState::Wandering));
    assert_eq!(antagonist.tracked_site(), None);
}

#[test]
fn test_unseen_concealment_is_forgotten() {
    let mut config = AntagonistConfig::default();
    config.hide_forget_seconds = 2.0;
    let mut antagonist = Antagonist::new(config);
    let mut body = Statue::at(Vec3::ZERO);
    let sites = SiteRegistry::new();
    let hidden_at = Vec3::new(4.0, 0.0, 0.0);

    antagonist.notify_noise(Vec3::ZERO, NoiseEvent::new(hidden_at, 1.0));
    antagonist.notify_target_entered_concealment(SiteId(7), false, hidden_at);
    assert_eq!(antagonist.state(), PursuitState::Hunting);
    assert!(!antagonist.saw_target_enter_concealment());

    let mut ticks = 0;
    while antagonist.state() == PursuitState::Hunting && ticks < 100 {
        tick(&mut antagonist, &mut body, hidden_at, &FlatScene::walled(), &sites, 0.25);
        ticks += 1;
    }

    // Timer starts on the first tick and needs 2.0s more
    assert_eq!(ticks, 9);
    assert_eq!(antagonist.state(), PursuitState::Wandering);
    let causes: Vec<_> = antagonist.take_transitions().iter().map(|t| t.cause).collect();
    assert_eq!(causes, vec![TransitionCause::Noise, TransitionCause::Forgot]);
}

#[test]
fn test_sprinting_out_of_range_ends_hunt() {
    let mut antagonist = Antagonist::new(AntagonistConfig::default());
    let mut body = Statue::at(Vec3::ZERO);
    let sites = SiteRegistry::new();
    antagonist.notify_noise(Vec3::ZERO, NoiseEvent::new(Vec3::new(2.0, 0.0, 0.0), 1.0));

    tick(&mut antagonist, &mut body, Vec3::new(19.5, 0.0, 0.0), &FlatScene::walled(), &sites, 0.1);
    assert_eq!(antagonist.state(), PursuitState::Hunting);

    tick(&mut antagonist, &mut body, Vec3::new(20.5, 0.0, 0.0), &FlatScene::walled(), &sites, 0.1);
    assert_eq!(antagonist.state(), PursuitState::Wandering);
}

#[test]
fn test_missing_target_skips_decision() {
    let mut antagonist = Antagonist::new(AntagonistConfig::default());
    let mut body = Statue::at(Vec3::ZERO);
    let sites = SiteRegistry::new();
    let scene = FlatScene::open();
    let surroundings = Surroundings {
        physics: &scene,
        navigation: &scene,
        sites: &sites,
    };

    assert!(antagonist
        .tick(0.5, Some(&mut body as &mut dyn Locomotion), None, &surroundings)
        .is_none());
    assert!(antagonist.tick(0.5, None, None, &surroundings).is_none());
    assert_eq!(antagonist.clock(), 1.0);
    assert_eq!(antagonist.state(), PursuitState::Wandering);
    assert!(body.destination.is_none());
}
