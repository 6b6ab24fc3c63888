// Game driver: plays a ruleset from turn 0 until game over
//
// This module provides:
// 1. Board creation and turn 0 setup for a ruleset
// 2. Turn-by-turn advancement, keeping the previous board when a turn fails
// 3. Full autopilot games with an elimination log
// 4. Aggregate statistics over many games

use log::{debug, info};
use std::collections::BTreeMap;

use crate::autopilot::Autopilot;
use crate::board::create_default_board_state;
use crate::error::RulesError;
use crate::ruleset::Ruleset;
use crate::types::{BoardState, EliminationCause, SnakeMove};

/// Record of one snake leaving play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elimination {
    pub turn: u32,
    pub id: String,
    pub cause: EliminationCause,
    pub by: String,
}

/// Outcome of a complete game
#[derive(Debug, Clone)]
pub struct GameResult {
    pub ruleset: String,
    pub turns: u32,
    /// False when the turn limit was reached before the game ended
    pub finished: bool,
    pub winner: Option<String>,
    pub eliminations: Vec<Elimination>,
    pub final_state: BoardState,
}

/// A single game in progress
pub struct Game {
    ruleset: Box<dyn Ruleset>,
    state: BoardState,
    turn: u32,
}

impl Game {
    /// Creates the default board for `snake_ids` and runs the ruleset's
    /// turn 0 setup on it
    pub fn new(
        ruleset: Box<dyn Ruleset>,
        width: i32,
        height: i32,
        snake_ids: &[&str],
    ) -> Result<Self, RulesError> {
        let settings = ruleset.settings();
        let initial = create_default_board_state(width, height, snake_ids, settings.rand())?;
        let state = ruleset.modify_initial_board_state(&initial)?;

        info!(
            "New {} game on {}x{} with {} snakes",
            ruleset.name(),
            width,
            height,
            state.snakes.len()
        );
        Ok(Game {
            ruleset,
            state,
            turn: 0,
        })
    }

    /// Resumes play from an existing board
    pub fn from_state(ruleset: Box<dyn Ruleset>, state: BoardState, turn: u32) -> Self {
        Game {
            ruleset,
            state,
            turn,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> Result<bool, RulesError> {
        self.ruleset.is_game_over(&self.state)
    }

    /// Advances one turn. On error the board stays at the previous turn.
    /// Returns whether the game is over afterwards.
    pub fn step(&mut self, moves: &[SnakeMove]) -> Result<bool, RulesError> {
        let next = self.ruleset.create_next_board_state(&self.state, moves)?;
        self.state = next;
        self.turn += 1;
        self.is_over()
    }

    /// Plays until the game is over or `max_turns` turns have been taken
    pub fn run(&mut self, autopilot: &Autopilot, max_turns: u32) -> Result<GameResult, RulesError> {
        let settings = self.ruleset.settings();
        let mut eliminations = Vec::new();
        let mut finished = self.is_over()?;

        while !finished && self.turn < max_turns {
            let moves = autopilot.choose_moves(&self.state, settings.rand());
            let before = self.state.clone();
            finished = self.step(&moves)?;

            for (old, new) in before.snakes.iter().zip(self.state.snakes.iter()) {
                if !old.is_eliminated() && new.is_eliminated() {
                    debug!(
                        "Turn {}: {} eliminated ({})",
                        self.turn,
                        new.id,
                        new.eliminated_cause.as_str()
                    );
                    eliminations.push(Elimination {
                        turn: self.turn,
                        id: new.id.clone(),
                        cause: new.eliminated_cause,
                        by: new.eliminated_by.clone(),
                    });
                }
            }
        }

        let winner = if finished {
            self.state.living_snakes().next().map(|s| s.id.clone())
        } else {
            None
        };

        info!(
            "{} game {} after {} turns, winner: {}",
            self.ruleset.name(),
            if finished { "over" } else { "stopped" },
            self.turn,
            winner.as_deref().unwrap_or("none")
        );

        Ok(GameResult {
            ruleset: self.ruleset.name().to_string(),
            turns: self.turn,
            finished,
            winner,
            eliminations,
            final_state: self.state.clone(),
        })
    }
}

/// Statistics for a batch of games
#[derive(Debug, Default)]
pub struct SimulationStats {
    pub total_games: usize,
    pub finished_games: usize,
    pub draws: usize,
    pub average_turns: f64,
    pub longest_game: u32,
    pub wins: BTreeMap<String, usize>,
    pub eliminations_by_cause: BTreeMap<String, usize>,
}

impl SimulationStats {
    /// Generates statistics from game results
    pub fn from_results(results: &[GameResult]) -> Self {
        let mut stats = SimulationStats {
            total_games: results.len(),
            ..Default::default()
        };

        for result in results {
            if result.finished {
                stats.finished_games += 1;
                match &result.winner {
                    Some(id) => *stats.wins.entry(id.clone()).or_insert(0) += 1,
                    None => stats.draws += 1,
                }
            }
            stats.longest_game = stats.longest_game.max(result.turns);
            for elimination in &result.eliminations {
                *stats
                    .eliminations_by_cause
                    .entry(elimination.cause.as_str().to_string())
                    .or_insert(0) += 1;
            }
        }

        if !results.is_empty() {
            stats.average_turns =
                results.iter().map(|r| r.turns as f64).sum::<f64>() / results.len() as f64;
        }
        stats
    }

    /// Prints a summary report
    pub fn print_report(&self) {
        println!("\n═══════════════════════════════════════════════════════════");
        println!("                  SIMULATION REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Games:          {}", self.total_games);
        println!("Finished:       {}", self.finished_games);
        println!("Draws:          {}", self.draws);
        println!("Average Turns:  {:.1}", self.average_turns);
        println!("Longest Game:   {}", self.longest_game);
        println!("═══════════════════════════════════════════════════════════\n");

        if !self.wins.is_empty() {
            println!("Wins:");
            for (id, count) in &self.wins {
                println!("  {:<20} {}", id, count);
            }
            println!();
        }

        if !self.eliminations_by_cause.is_empty() {
            println!("Eliminations:");
            for (cause, count) in &self.eliminations_by_cause {
                println!("  {:<20} {}", cause, count);
            }
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autopilot::Strategy;
    use crate::random::MinRand;
    use crate::ruleset::StandardRuleset;
    use crate::settings::Settings;
    use crate::types::{Direction, Point, Snake};
    use std::sync::Arc;

    #[test]
    fn test_step_keeps_previous_state_on_error() {
        let mut board = BoardState::new(5, 5);
        board.snakes.push(Snake::new("one", vec![Point::new(1, 1), Point::new(1, 0)]));
        board.snakes.push(Snake::new("two", vec![Point::new(3, 3), Point::new(3, 2)]));
        let mut game = Game::from_state(Box::new(StandardRuleset::default()), board.clone(), 4);

        let result = game.step(&[SnakeMove::new("one", Direction::Up)]);
        assert_eq!(result, Err(RulesError::NoMoveFound("two".to_string())));
        assert_eq!(game.state(), &board);
        assert_eq!(game.turn(), 4);
    }

    #[test]
    fn test_run_records_eliminations() {
        // No food beyond the initial placement, so both snakes starve eventually
        let settings = Settings::new(0, 0, 14, 100).with_rand(Arc::new(MinRand));
        let ruleset = Box::new(StandardRuleset::new(settings));
        let mut game = Game::new(ruleset, 7, 7, &["one", "two"]).unwrap();

        let autopilot = Autopilot::new(Strategy::Random, false);
        let result = game.run(&autopilot, 1000).unwrap();

        assert!(result.finished);
        let eliminated = result.final_state.snakes.iter().filter(|s| s.is_eliminated()).count();
        assert_eq!(result.eliminations.len(), eliminated);
        assert!(eliminated >= 1);
    }

    #[test]
    fn test_stats() {
        let result = |winner: Option<&str>, turns: u32, finished: bool| GameResult {
            ruleset: "standard".to_string(),
            turns,
            finished,
            winner: winner.map(str::to_string),
            eliminations: vec![Elimination {
                turn: turns,
                id: "x".to_string(),
                cause: EliminationCause::OutOfHealth,
                by: String::new(),
            }],
            final_state: BoardState::new(1, 1),
        };
        let results = vec![
            result(Some("one"), 10, true),
            result(None, 20, true),
            result(None, 30, false),
        ];

        let stats = SimulationStats::from_results(&results);
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.finished_games, 2);
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.wins.get("one"), Some(&1));
        assert_eq!(stats.longest_game, 30);
        assert_eq!(stats.average_turns, 20.0);
        assert_eq!(stats.eliminations_by_cause.get("out-of-health"), Some(&3));
    }
}
