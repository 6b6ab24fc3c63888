// Per-game rule settings passed unmodified to every stage

use std::fmt;
use std::sync::Arc;

use crate::random::{Rand, SeededRand};
use crate::types::SNAKE_MAX_HEALTH;

/// Seed used when no other source is configured, so default games replay
pub const DEFAULT_SEED: u64 = 0;

/// Tunable rule values plus the randomness handle stages draw from.
/// Cloning shares the randomness stream.
#[derive(Clone)]
pub struct Settings {
    /// Percent chance (0-100) of spawning one extra food per turn
    pub food_spawn_chance: i32,
    /// Food count the board is topped up to every turn
    pub minimum_food: i32,
    pub hazard_damage_per_turn: i32,
    pub snake_max_health: i32,
    rand: Arc<dyn Rand>,
}

impl Settings {
    pub fn new(
        food_spawn_chance: i32,
        minimum_food: i32,
        hazard_damage_per_turn: i32,
        snake_max_health: i32,
    ) -> Self {
        Settings {
            food_spawn_chance,
            minimum_food,
            hazard_damage_per_turn,
            snake_max_health,
            rand: Arc::new(SeededRand::new(DEFAULT_SEED)),
        }
    }

    /// Replaces the randomness source
    pub fn with_rand(mut self, rand: Arc<dyn Rand>) -> Self {
        self.rand = rand;
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rand(Arc::new(SeededRand::new(seed)))
    }

    pub fn rand(&self) -> &dyn Rand {
        self.rand.as_ref()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new(15, 1, 14, SNAKE_MAX_HEALTH)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("food_spawn_chance", &self.food_spawn_chance)
            .field("minimum_food", &self.minimum_food)
            .field("hazard_damage_per_turn", &self.hazard_damage_per_turn)
            .field("snake_max_health", &self.snake_max_health)
            .finish_non_exhaustive()
    }
}
