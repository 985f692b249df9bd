//! Ashes Beneath - Entry Point
//!
//! Interactive stepping console: loads an arena, then lets you move the
//! player, hide, make noise and watch the antagonists react tick by tick.

use ashes_beneath::antagonist::NoiseEvent;
use ashes_beneath::core::config::PlayerConfig;
use ashes_beneath::core::error::Result;
use ashes_beneath::core::types::{SiteId, Vec3};
use ashes_beneath::player::MoveIntent;
use ashes_beneath::simulation::{Encounter, EncounterLog, EncounterOptions, Interaction, Outcome};
use ashes_beneath::world::load_arena;

use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Simulated seconds per tick
const STEP_SECONDS: f32 = 0.1;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ashes_beneath=info")),
        )
        .init();

    let arena_name = std::env::args().nth(1).unwrap_or_else(|| "basement".to_string());
    tracing::info!("Ashes Beneath starting with arena '{}'...", arena_name);

    let layout = load_arena(&arena_name)?;
    let options = EncounterOptions {
        seed: rand::random(),
        profile: None,
        player: PlayerConfig::default(),
    };
    let mut encounter = Encounter::from_layout(&layout, options)?;
    let mut intent = MoveIntent::idle();
    let mut printed = 0;

    // Display welcome message
    println!("\n=== ASHES BENEATH ===");
    println!("Something is down here with you.");
    println!();
    println!("Commands:");
    println!("  tick / t            - Advance one step ({:.1}s)", STEP_SECONDS);
    println!("  run <n>             - Advance n steps");
    println!("  walk <dx> <dz>      - Walk in a direction (kept until stop)");
    println!("  sprint <dx> <dz>    - Sprint in a direction (kept until stop)");
    println!("  stop                - Stand still");
    println!("  hide [site]         - Hide in a site (nearest in reach by default)");
    println!("  leave               - Leave your hiding place");
    println!("  noise <x> <z> [l]   - Make a noise of loudness l (default 1.0)");
    println!("  status / s          - Show detailed status");
    println!("  quit / q            - Exit");
    println!();

    loop {
        printed = print_new_events(&encounter, printed);
        display_status(&encounter);

        if let Some(outcome) = encounter.outcome() {
            if let Outcome::Caught { at, .. } = outcome {
                println!("You were found at {:.1}s.", at);
            }
            break;
        }

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => break,
            ["tick"] | ["t"] => {
                encounter.step(STEP_SECONDS, intent);
            }
            ["run", n] => match n.parse::<u32>() {
                Ok(n) => {
                    println!("Running {} steps...", n);
                    for _ in 0..n {
                        if encounter.step(STEP_SECONDS, intent).is_some() {
                            break;
                        }
                    }
                }
                Err(_) => println!("Usage: run <number>"),
            },
            [verb @ ("walk" | "sprint"), dx, dz] => match (dx.parse::<f32>(), dz.parse::<f32>()) {
                (Ok(dx), Ok(dz)) => {
                    let direction = Vec3::new(dx, 0.0, dz);
                    intent = if *verb == "sprint" {
                        MoveIntent::sprint(direction)
                    } else {
                        MoveIntent::walk(direction)
                    };
                }
                _ => println!("Usage: {} <dx> <dz>", verb),
            },
            ["stop"] => intent = MoveIntent::idle(),
            ["hide"] => encounter.queue(Interaction::Hide(None)),
            ["hide", id] => match id.parse::<u32>() {
                Ok(id) => encounter.queue(Interaction::Hide(Some(SiteId(id)))),
                Err(_) => println!("Usage: hide [site id]"),
            },
            ["leave"] => encounter.queue(Interaction::Leave),
            ["noise", x, z, rest @ ..] => {
                let loudness = rest.first().and_then(|l| l.parse::<f32>().ok()).unwrap_or(1.0);
                match (x.parse::<f32>(), z.parse::<f32>()) {
                    (Ok(x), Ok(z)) => encounter.broadcast_noise(NoiseEvent::new(Vec3::new(x, 0.0, z), loudness)),
                    _ => println!("Usage: noise <x> <z> [loudness]"),
                }
            }
            ["status"] | ["s"] => display_detailed_status(&encounter),
            _ => println!("Unknown command. Available: tick, run <n>, walk, sprint, stop, hide, leave, noise, status, quit"),
        }
    }

    println!(
        "\nGoodbye! {:.1}s survived, {} events logged.",
        encounter.clock(),
        encounter.log().len()
    );
    Ok(())
}

/// Print log events recorded since the last call
fn print_new_events(encounter: &Encounter, printed: usize) -> usize {
    for event in encounter.log().events.iter().skip(printed) {
        println!("  {}", EncounterLog::describe(event));
    }
    encounter.log().len()
}

/// Display a brief status line
fn display_status(encounter: &Encounter) {
    let player = encounter.player();
    let hiding = match player.concealed_in() {
        Some(site) => format!("hiding in site {}", site.0),
        None => "in the open".to_string(),
    };
    println!();
    println!(
        "--- {:.1}s | You: ({:.1}, {:.1}) {} ---",
        encounter.clock(),
        player.position().x,
        player.position().z,
        hiding
    );
    for slot in encounter.antagonists() {
        let position = slot.body.position;
        println!(
            "  Antagonist {} - {} at ({:.1}, {:.1}), {:.1}m away",
            slot.id.0,
            slot.brain.state(),
            position.x,
            position.z,
            position.distance(player.position())
        );
    }
    println!();
}

/// Display everything the antagonists currently believe
fn display_detailed_status(encounter: &Encounter) {
    println!();
    println!("=== Detailed Status ({:.1}s) ===", encounter.clock());
    println!();

    for slot in encounter.antagonists() {
        let brain = &slot.brain;
        println!("Antagonist {} ({})", slot.id.0, brain.config().name);
        println!("  State: {}", brain.state());
        let last_known = brain.last_known_target_position();
        println!("  Last known target: ({:.1}, {:.1})", last_known.x, last_known.z);
        match brain.hidden_since() {
            Some(since) => println!("  Concealed target unseen since {:.1}s", since),
            None => println!("  Forget timer idle"),
        }
        if let Some(site) = brain.tracked_site() {
            println!("  Tracking concealment site {}", site.0);
        }
        if let Some(signals) = &slot.last_signals {
            println!(
                "  Animator state {}, speed {:.2}, destination {:?}",
                signals.state_int(),
                signals.speed,
                signals.destination
            );
        }
        println!();
    }

    for site in encounter.sites().iter() {
        println!(
            "Site {} at ({:.1}, {:.1}): {}, attacked {} times",
            site.id.0,
            site.position.x,
            site.position.z,
            if site.is_occupied() { "occupied" } else { "empty" },
            site.attacks_received()
        );
    }
    println!();
}
