//! claws-headless: run the simulation without a frontend.
//!
//! Usage:
//!   claws-headless run --seed 7 --frames 3600
//!   claws-headless run --tuning tuning.toml --restart
//!   claws-headless tuning

use std::path::PathBuf;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use claws_core::commands::PlayerCommand;
use claws_core::config::Tuning;
use claws_core::enums::RunState;
use claws_core::events::GameEvent;
use claws_core::state::GameStateSnapshot;
use claws_sim::{SimConfig, SimulationEngine};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "tuning" => cmd_tuning(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays clean JSON. `RUST_LOG` overrides the
/// default `info` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!(
        "claws-headless: Claws on the Course headless runner\n\
         \n\
         Commands:\n\
         \n\
         run       Play a run on autopilot and print the final state as JSON\n\
         \n\
           --seed <N>         RNG seed (default: 42)\n\
           --frames <N>       Frames to simulate (default: 3600)\n\
           --tuning <path>    TOML tuning overrides (optional)\n\
           --restart          Start a new run after each death\n\
         \n\
         tuning    Print the effective tuning as JSON\n\
         \n\
           --tuning <path>    TOML tuning overrides (optional)\n\
         \n\
         Examples:\n\
         \n\
           claws-headless run --seed 7 --frames 7200\n\
           RUST_LOG=debug claws-headless run --tuning hard.toml\n"
    );
}

fn parse_value(args: &[String], flag: &str) -> Option<String> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match parse_value(args, flag) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: {flag} expects a number, got {raw}");
            process::exit(1);
        }),
        None => default,
    }
}

fn load_tuning(args: &[String]) -> Tuning {
    let Some(path) = parse_value(args, "--tuning").map(PathBuf::from) else {
        return Tuning::default();
    };
    match Tuning::load(&path) {
        Ok(tuning) => {
            info!(path = %path.display(), "loaded tuning");
            tuning
        }
        Err(e) => {
            eprintln!("Error loading {}: {e}", path.display());
            process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            process::exit(1);
        }
    }
}

fn cmd_tuning(args: &[String]) {
    print_json(&load_tuning(args));
}

fn cmd_run(args: &[String]) {
    let seed: u64 = parse_number(args, "--seed", 42);
    let frames: u64 = parse_number(args, "--frames", 3600);
    let restart = args.iter().any(|a| a == "--restart");
    let tuning = load_tuning(args);

    let mut engine = match SimulationEngine::new(SimConfig {
        seed,
        tuning,
        ..Default::default()
    }) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: invalid configuration: {e}");
            process::exit(1);
        }
    };
    engine.queue_command(PlayerCommand::StartRun);

    info!(seed, frames, restart, "headless run starting");

    let mut runs = 1u32;
    let mut last = GameStateSnapshot::default();
    for frame in 0..frames {
        last = engine.tick();
        for event in &last.events {
            if let GameEvent::PlayerDied { kills } = event {
                info!(frame, kills, "run ended");
            }
        }

        match last.run_state {
            Some(RunState::SelectingUpgrade) => engine.queue_command(PlayerCommand::Confirm),
            Some(RunState::Dead) if restart => {
                runs += 1;
                engine.queue_command(PlayerCommand::Restart);
            }
            Some(RunState::Dead) => break,
            _ => {}
        }
    }

    info!(
        runs,
        kills = last.hud.kills,
        level = last.hud.level,
        timer = %last.hud.timer,
        "headless run finished"
    );
    print_json(&summary(&last));
}

/// Final-state summary. Per-entity lists are reduced to counts.
fn summary(snapshot: &GameStateSnapshot) -> serde_json::Value {
    serde_json::json!({
        "run_state": snapshot.run_state,
        "frames": snapshot.time.tick,
        "hud": snapshot.hud,
        "player": snapshot.player,
        "enemies": snapshot.enemies.len(),
        "projectiles": snapshot.projectiles.len(),
        "pickups": snapshot.pickups.len(),
    })
}
