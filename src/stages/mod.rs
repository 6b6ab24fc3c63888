// Built-in pipeline stages and their registry names

pub mod constrictor;
pub mod standard;
pub mod wrapped;

use crate::pipeline::StageFn;
use crate::settings::Settings;
use crate::types::{BoardState, SnakeMove};

pub const MOVEMENT_STANDARD: &str = "snake.movement.standard";
pub const HEALTH_REDUCE_STANDARD: &str = "health.reduce.standard";
pub const HAZARD_DAMAGE_STANDARD: &str = "hazard.damage.standard";
pub const EAT_FOOD_STANDARD: &str = "snake.eatfood.standard";
pub const SPAWN_FOOD_STANDARD: &str = "food.spawn.standard";
pub const ELIMINATE_STANDARD: &str = "snake.eliminate.standard";
pub const GAME_OVER_STANDARD: &str = "gameover.standard";

pub const MOVEMENT_WRAPPED: &str = "snake.movement.wrapped";

pub const FOOD_REMOVE_CONSTRICTOR: &str = "food.remove.constrictor";
pub const GROW_CONSTRICTOR: &str = "snake.grow.constrictor";

/// Every stage the global registry is populated with
pub const BUILTIN_STAGES: &[(&str, StageFn)] = &[
    (MOVEMENT_STANDARD, standard::move_snakes),
    (HEALTH_REDUCE_STANDARD, standard::reduce_snake_health),
    (HAZARD_DAMAGE_STANDARD, standard::damage_hazards),
    (EAT_FOOD_STANDARD, standard::feed_snakes),
    (SPAWN_FOOD_STANDARD, standard::spawn_food),
    (ELIMINATE_STANDARD, standard::eliminate_snakes),
    (GAME_OVER_STANDARD, standard::game_over),
    (MOVEMENT_WRAPPED, wrapped::move_snakes),
    (FOOD_REMOVE_CONSTRICTOR, constrictor::remove_food),
    (GROW_CONSTRICTOR, constrictor::grow_snakes),
];

/// True on the turn 0 setup pass, which runs the pipeline with no moves
pub fn is_initialisation(_board: &BoardState, _settings: &Settings, moves: &[SnakeMove]) -> bool {
    moves.is_empty()
}
