// Plays a single local game with autopilot snakes and prints the final board
//
// Usage:
//   cargo run --bin snake-rules -- [options]
//
// Options:
//   --config <path>     Path to Rules.toml (default: Rules.toml)
//   --ruleset <name>    Override the configured ruleset
//   --seed <n>          Override the configured seed

use log::{error, info};
use std::env;
use std::process;

use snake_rules::autopilot::Autopilot;
use snake_rules::config::Config;
use snake_rules::game::Game;
use snake_rules::random::SeededRand;
use snake_rules::ruleset;

fn print_usage() {
    eprintln!("Battlesnake Rules Engine");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  snake-rules [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --config <path>         Path to Rules.toml (default: Rules.toml)");
    eprintln!("  --ruleset <name>        standard, wrapped or constrictor");
    eprintln!("  --seed <n>              Seed for a reproducible game");
    eprintln!("  --help                  Show this help message");
}

struct Args {
    config_path: Option<String>,
    ruleset: Option<String>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: None,
        ruleset: None,
        seed: None,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config_path = Some(iter.next().ok_or("--config requires a path")?);
            }
            "--ruleset" => {
                args.ruleset = Some(iter.next().ok_or("--ruleset requires a name")?);
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed requires a number")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|e| format!("Invalid seed '{}': {}", value, e))?;
                args.seed = Some(seed);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(args)
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let config = match &args.config_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => Config::load_or_default(),
    };

    let seed = args
        .seed
        .or(config.game.seed)
        .unwrap_or_else(|| SeededRand::from_entropy().seed());
    let ruleset_name = args.ruleset.as_deref().unwrap_or(&config.game.ruleset);
    info!("Starting {} game with seed {}", ruleset_name, seed);

    let ruleset = match ruleset::from_name(ruleset_name, config.settings.to_settings(seed)) {
        Ok(ruleset) => ruleset,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    let autopilot = Autopilot::for_ruleset(config.autopilot.strategy, ruleset.as_ref());

    let mut game = match Game::new(
        ruleset,
        config.game.width,
        config.game.height,
        &config.game.snake_ids(),
    ) {
        Ok(game) => game,
        Err(e) => {
            error!("Failed to create game: {}", e);
            process::exit(1);
        }
    };

    let result = match game.run(&autopilot, config.game.max_turns) {
        Ok(result) => result,
        Err(e) => {
            error!("Game failed on turn {}: {}", game.turn(), e);
            process::exit(1);
        }
    };

    for elimination in &result.eliminations {
        info!(
            "Turn {}: {} eliminated ({}{})",
            elimination.turn,
            elimination.id,
            elimination.cause.as_str(),
            if elimination.by.is_empty() {
                String::new()
            } else {
                format!(" by {}", elimination.by)
            }
        );
    }

    match serde_json::to_string_pretty(&result.final_state) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize final board: {}", e);
            process::exit(1);
        }
    }
}
