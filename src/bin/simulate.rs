// Batch simulation tool: plays many seeded games in parallel and reports
// win and elimination statistics
//
// Usage:
//   cargo run --release --bin simulate -- [options]
//
// Options:
//   --games <n>         Number of games to play (default: 100)
//   --ruleset <name>    Override the configured ruleset
//   --seed <n>          First seed; game i uses seed + i (default: 0)
//   --config <path>     Path to Rules.toml (default: Rules.toml)

use log::{info, warn};
use rayon::prelude::*;
use std::env;
use std::ops::Range;
use std::process;
use std::time::Instant;

use snake_rules::autopilot::Autopilot;
use snake_rules::config::Config;
use snake_rules::game::{Game, GameResult, SimulationStats};
use snake_rules::ruleset;
use snake_rules::RulesError;

fn print_usage() {
    eprintln!("Battlesnake Rules Simulator");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  simulate [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --games <n>             Number of games to play (default: 100)");
    eprintln!("  --ruleset <name>        standard, wrapped or constrictor");
    eprintln!("  --seed <n>              First seed; game i uses seed + i (default: 0)");
    eprintln!("  --config <path>         Path to Rules.toml (default: Rules.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # 1000 constrictor games");
    eprintln!("  simulate --games 1000 --ruleset constrictor");
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    let value = value.ok_or_else(|| format!("{} requires a number", flag))?;
    value
        .parse::<T>()
        .map_err(|e| format!("Invalid value for {} '{}': {}", flag, value, e))
}

/// Seeds for a batch, stopping short at `u64::MAX` instead of overflowing
fn seed_range(first_seed: u64, games: u64) -> Range<u64> {
    first_seed..first_seed.saturating_add(games)
}

fn play_one(config: &Config, ruleset_name: &str, seed: u64) -> Result<GameResult, RulesError> {
    let ruleset = ruleset::from_name(ruleset_name, config.settings.to_settings(seed))?;
    let autopilot = Autopilot::for_ruleset(config.autopilot.strategy, ruleset.as_ref());
    let mut game = Game::new(
        ruleset,
        config.game.width,
        config.game.height,
        &config.game.snake_ids(),
    )?;
    game.run(&autopilot, config.game.max_turns)
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let mut games: u64 = 100;
    let mut first_seed: u64 = 0;
    let mut ruleset_override: Option<String> = None;
    let mut config_path: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let parsed = match arg.as_str() {
            "--games" => parse_number("--games", args.next()).map(|n| games = n),
            "--seed" => parse_number("--seed", args.next()).map(|n| first_seed = n),
            "--ruleset" => args
                .next()
                .map(|name| ruleset_override = Some(name))
                .ok_or_else(|| "--ruleset requires a name".to_string()),
            "--config" => args
                .next()
                .map(|path| config_path = Some(path))
                .ok_or_else(|| "--config requires a path".to_string()),
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => Err(format!("Unknown argument: {}", other)),
        };

        if let Err(e) = parsed {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    }

    let config = match &config_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => Config::load_or_default(),
    };
    let ruleset_name = ruleset_override.unwrap_or_else(|| config.game.ruleset.clone());

    info!(
        "Simulating {} {} games on {} threads",
        games,
        ruleset_name,
        rayon::current_num_threads()
    );
    let start_time = Instant::now();

    let seeds = seed_range(first_seed, games);
    let expected = seeds.end - seeds.start;
    let outcomes: Vec<(u64, Result<GameResult, RulesError>)> = seeds
        .into_par_iter()
        .map(|seed| (seed, play_one(&config, &ruleset_name, seed)))
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    for (seed, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => warn!("Game with seed {} failed: {}", seed, e),
        }
    }

    let stats = SimulationStats::from_results(&results);
    stats.print_report();
    println!(
        "Completed {} games in {}ms",
        results.len(),
        start_time.elapsed().as_millis()
    );

    if results.len() as u64 != expected {
        process::exit(1);
    }
}
