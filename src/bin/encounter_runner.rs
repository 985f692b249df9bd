//! Headless Encounter Runner
//!
//! Plays a scripted player against the antagonists of an arena and outputs a
//! JSON (or text) report.

use std::time::Instant;

use ashes_beneath::core::config::{load_profile, AntagonistConfig, PlayerConfig};
use ashes_beneath::core::error::{AshesError, Result};
use ashes_beneath::core::types::Vec3;
use ashes_beneath::simulation::{
    run_encounter, Encounter, EncounterLog, EncounterOptions, EncounterOutput, PlayerScript,
};
use ashes_beneath::world::load_arena;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Headless Encounter Runner - scripted player vs antagonists
#[derive(Parser, Debug)]
#[command(name = "encounter_runner")]
#[command(about = "Run a scripted hide-and-seek encounter and report the outcome")]
struct Args {
    /// Arena layout name (loaded from data/arenas/)
    #[arg(long, default_value = "basement")]
    arena: String,

    /// Antagonist profile for every spawn (loaded from data/antagonist/);
    /// spawns keep their own profiles when omitted
    #[arg(long)]
    profile: Option<String>,

    /// Player script: idle, patrol, hide or sprint
    #[arg(long, default_value = "hide")]
    script: String,

    /// Simulated seconds before the player counts as having survived
    #[arg(long, default_value_t = 120.0)]
    max_seconds: f32,

    /// Step size in seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print the event log to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ashes_beneath=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if !(args.dt > 0.0) {
        return Err(AshesError::InvalidConfig("--dt must be positive".to_string()));
    }
    let seed = args.seed.unwrap_or_else(rand::random);

    let profile = args.profile.as_deref().map(|name| {
        load_profile(name).unwrap_or_else(|e| {
            tracing::warn!("Failed to load profile '{}': {}; using defaults", name, e);
            AntagonistConfig::default()
        })
    });

    let layout = load_arena(&args.arena)?;
    let options = EncounterOptions {
        seed,
        profile,
        player: PlayerConfig::default(),
    };
    let mut encounter = Encounter::from_layout(&layout, options)?;

    let forward = layout.player.forward.unwrap_or(Vec3::Z);
    let mut script = PlayerScript::from_name(&args.script, layout.player.position, forward)
        .unwrap_or_else(|| {
            tracing::warn!("Unknown script '{}', defaulting to idle", args.script);
            PlayerScript::Idle
        });

    let started = Instant::now();
    if args.verbose {
        eprintln!("=== Encounter '{}' (seed {}) ===", encounter.name, seed);
    }
    run_encounter(&mut encounter, &mut script, args.dt, args.max_seconds);
    if args.verbose {
        for event in &encounter.log().events {
            eprintln!("  {}", EncounterLog::describe(event));
        }
        eprintln!();
    }

    let output = EncounterOutput::new(&encounter, script.name(), started.elapsed());

    match args.format.as_str() {
        "json" => println!("{}", output.to_json()),
        "text" => {
            println!("Encounter Result");
            println!("================");
            println!("{}", output.summary());
            println!();
            for report in &output.antagonists {
                println!(
                    "Antagonist {} ({}): ends {}, {} transitions, {:.1}s hunting, {} scream cues",
                    report.id.0,
                    report.profile,
                    report.final_state,
                    report.transitions,
                    report.seconds_hunting,
                    report.scream_cues,
                );
            }
        }
        _ => {
            eprintln!("Unknown format '{}', defaulting to json", args.format);
            println!("{}", output.to_json());
        }
    }
    Ok(())
}
