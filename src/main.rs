//! StickRivals - Stick-Figure Duel Autobattler
//!
//! Headless simulator entry point: loads a match configuration (or falls
//! back to an exhibition match), runs the duel, and prints the result.

use stickrivals::cli;
use stickrivals::headless::{run_headless_match, run_simulation, HeadlessMatchConfig, MatchResult};

fn main() {
    let args = cli::parse_args();

    let mut config = match &args.headless {
        Some(path) => match HeadlessMatchConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        },
        None => HeadlessMatchConfig::exhibition(),
    };

    if let Some(output) = &args.output {
        config.output_path = Some(output.to_string_lossy().into_owned());
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }

    println!("Starting match simulation...");
    println!("  Player: {} hp, {} attack", config.player.max_hp, config.player.base_attack);
    println!("  Enemy: {} hp, {} attack", config.enemy.max_hp, config.enemy.base_attack);
    if let Some(seed) = config.random_seed {
        println!("  Seed: {}", seed);
    }

    let result = if let Some(ticks) = args.simulate {
        run_simulation(&config, ticks)
    } else {
        run_headless_match(config)
    };

    match result {
        Ok(result) => print_result(&result),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_result(result: &MatchResult) {
    println!(
        "Match over after {} ticks ({:.1}s): {}",
        result.ticks,
        result.match_time,
        result.outcome.label()
    );
    println!(
        "  Player: {}/{} hp, dealt {}, took {}",
        result.player.final_hp, result.player.max_hp, result.player.damage_dealt, result.player.damage_taken
    );
    println!(
        "  Enemy: {}/{} hp, dealt {}, took {}",
        result.enemy.final_hp, result.enemy.max_hp, result.enemy.damage_dealt, result.enemy.damage_taken
    );
}
