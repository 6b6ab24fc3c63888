// Standard stages: the base turn every ruleset builds on
//
// Order matters. Movement comes first, health and hazards are applied to the
// moved heads, food is eaten before new food spawns, and eliminations are
// decided last so that every snake that reached food this turn still eats.

use log::debug;
use std::collections::HashSet;

use crate::board::place_food_randomly;
use crate::error::RulesError;
use crate::settings::Settings;
use crate::stages::is_initialisation;
use crate::types::{BoardState, Direction, EliminationCause, Point, Snake, SnakeMove};

/// Moves every living snake one cell: new head in front, tail dropped.
/// A snake that grew last turn keeps its length because the dropped tail is
/// the duplicated segment.
pub fn move_snakes(
    board: &mut BoardState,
    settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if is_initialisation(board, settings, moves) {
        return Ok(false);
    }

    let mut seen = HashSet::new();
    for mv in moves {
        if board.snake(&mv.id).is_none() {
            return Err(RulesError::UnknownSnake(mv.id.clone()));
        }
        if !seen.insert(mv.id.as_str()) {
            return Err(RulesError::DuplicateMove(mv.id.clone()));
        }
    }

    // Every living snake is checked before any of them moves
    for snake in board.living_snakes() {
        if snake.body.is_empty() {
            return Err(RulesError::ZeroLengthSnake(snake.id.clone()));
        }
        if !moves.iter().any(|m| m.id == snake.id) {
            return Err(RulesError::NoMoveFound(snake.id.clone()));
        }
    }

    for snake in board.snakes.iter_mut() {
        if snake.is_eliminated() {
            continue;
        }

        let direction = moves
            .iter()
            .find(|m| m.id == snake.id)
            .and_then(|m| m.direction)
            .unwrap_or_else(|| default_move(&snake.body));

        let new_head = direction.apply(&snake.body[0]);
        snake.body.pop();
        snake.body.insert(0, new_head);
    }

    Ok(false)
}

/// Direction a snake continues in when it has no valid move: the way its
/// head last travelled, read from head and neck. Heads that just wrapped
/// across an edge are anchored on the zero axis.
pub fn default_move(body: &[Point]) -> Direction {
    if body.len() < 2 {
        return Direction::Up;
    }

    let (head, neck) = (body[0], body[1]);
    if head.x == neck.x + 1 {
        Direction::Right
    } else if head.x == neck.x - 1 {
        Direction::Left
    } else if head.y == neck.y + 1 {
        Direction::Up
    } else if head.y == neck.y - 1 {
        Direction::Down
    } else if head.x == 0 && neck.x > 0 {
        Direction::Right
    } else if neck.x == 0 && head.x > 0 {
        Direction::Left
    } else if head.y == 0 && neck.y > 0 {
        Direction::Up
    } else if neck.y == 0 && head.y > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

pub fn reduce_snake_health(
    board: &mut BoardState,
    settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if is_initialisation(board, settings, moves) {
        return Ok(false);
    }

    for snake in board.snakes.iter_mut().filter(|s| !s.is_eliminated()) {
        snake.health -= 1;
    }
    Ok(false)
}

/// Damages snakes whose head sits in a hazard. Food in the same cell cancels
/// the damage; stacked hazards apply it once per copy.
pub fn damage_hazards(
    board: &mut BoardState,
    settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if is_initialisation(board, settings, moves) {
        return Ok(false);
    }

    let BoardState {
        snakes,
        food,
        hazards,
        ..
    } = board;

    for snake in snakes.iter_mut() {
        if snake.is_eliminated() {
            continue;
        }
        let head = match snake.head() {
            Some(head) => head,
            None => return Err(RulesError::ZeroLengthSnake(snake.id.clone())),
        };

        for hazard in hazards.iter().filter(|&&h| h == head) {
            if food.contains(hazard) {
                continue;
            }

            snake.health = (snake.health - settings.hazard_damage_per_turn).max(0);
            if snake.health == 0 {
                debug!("Snake {} ran out of health in a hazard", snake.id);
                snake.eliminate(EliminationCause::OutOfHealth, "");
                break;
            }
        }
    }

    Ok(false)
}

/// Feeds every living snake whose head is on food. A food reached by two
/// heads at once feeds both and is consumed once.
pub fn feed_snakes(
    board: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    let mut remaining = Vec::with_capacity(board.food.len());

    for &food in &board.food {
        let mut eaten = false;
        for snake in board.snakes.iter_mut() {
            if snake.is_eliminated() || snake.body.is_empty() {
                continue;
            }
            if snake.body[0] == food {
                feed_snake(snake, settings);
                eaten = true;
            }
        }
        if !eaten {
            remaining.push(food);
        }
    }

    board.food = remaining;
    Ok(false)
}

fn feed_snake(snake: &mut Snake, settings: &Settings) {
    snake.grow();
    snake.health = settings.snake_max_health;
}

/// Tops the board up to the minimum food count, otherwise spawns one food
/// with the configured percent chance.
pub fn spawn_food(
    board: &mut BoardState,
    settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if is_initialisation(board, settings, moves) {
        return Ok(false);
    }

    let current = board.food.len() as i32;
    if current < settings.minimum_food {
        place_food_randomly(
            settings.rand(),
            board,
            (settings.minimum_food - current) as usize,
        );
    } else if settings.food_spawn_chance > 0
        && (settings.rand().intn(100) as i32) < settings.food_spawn_chance
    {
        place_food_randomly(settings.rand(), board, 1);
    }

    Ok(false)
}

struct CollisionElimination {
    index: usize,
    cause: EliminationCause,
    by: String,
}

/// Marks snakes that starved, left the board or collided.
///
/// Collisions are all decided against the same post-move board and applied
/// together, so two snakes can eliminate each other.
pub fn eliminate_snakes(
    board: &mut BoardState,
    settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if is_initialisation(board, settings, moves) {
        return Ok(false);
    }

    let (width, height) = (board.width, board.height);
    for snake in board.snakes.iter_mut() {
        if snake.is_eliminated() {
            continue;
        }
        if snake.body.is_empty() {
            return Err(RulesError::ZeroLengthSnake(snake.id.clone()));
        }

        if snake.health <= 0 {
            debug!("Snake {} is out of health", snake.id);
            snake.eliminate(EliminationCause::OutOfHealth, "");
        } else if snake
            .body
            .iter()
            .any(|p| p.x < 0 || p.x >= width || p.y < 0 || p.y >= height)
        {
            debug!("Snake {} moved out of bounds", snake.id);
            snake.eliminate(EliminationCause::OutOfBounds, "");
        }
    }

    let collisions = find_collisions(&board.snakes);
    for collision in collisions {
        let snake = &mut board.snakes[collision.index];
        let by = if collision.by.is_empty() {
            "itself"
        } else {
            collision.by.as_str()
        };
        debug!(
            "Snake {} eliminated by {} ({})",
            snake.id,
            by,
            collision.cause.as_str()
        );
        snake.eliminate(collision.cause, &collision.by);
    }

    Ok(false)
}

fn find_collisions(snakes: &[Snake]) -> Vec<CollisionElimination> {
    // Longest snakes are checked first so a head that hits several bodies is
    // credited to the longest one. The sort is stable for equal lengths.
    let mut by_length: Vec<&Snake> = snakes.iter().filter(|s| !s.is_eliminated()).collect();
    by_length.sort_by(|a, b| b.body.len().cmp(&a.body.len()));

    let mut collisions = Vec::new();
    for (index, snake) in snakes.iter().enumerate() {
        if snake.is_eliminated() {
            continue;
        }

        if has_body_collided(snake, snake) {
            collisions.push(CollisionElimination {
                index,
                cause: EliminationCause::SelfCollision,
                by: String::new(),
            });
            continue;
        }

        let body_hit = by_length
            .iter()
            .find(|other| other.id != snake.id && has_body_collided(snake, other));
        if let Some(other) = body_hit {
            collisions.push(CollisionElimination {
                index,
                cause: EliminationCause::Collision,
                by: other.id.clone(),
            });
            continue;
        }

        let head_loss = by_length
            .iter()
            .find(|other| other.id != snake.id && has_lost_head_to_head(snake, other));
        if let Some(other) = head_loss {
            collisions.push(CollisionElimination {
                index,
                cause: EliminationCause::Collision,
                by: other.id.clone(),
            });
        }
    }

    collisions
}

/// Whether `snake`'s head lies on any non-head segment of `other`
fn has_body_collided(snake: &Snake, other: &Snake) -> bool {
    match snake.body.first() {
        Some(head) => other.body.iter().skip(1).any(|segment| segment == head),
        None => false,
    }
}

/// Whether `snake` shares a head cell with `other` and is not longer
fn has_lost_head_to_head(snake: &Snake, other: &Snake) -> bool {
    match (snake.body.first(), other.body.first()) {
        (Some(head), Some(other_head)) => {
            head == other_head && snake.body.len() <= other.body.len()
        }
        _ => false,
    }
}

/// Halts the pipeline once at most one snake is left in play
pub fn game_over(
    board: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    Ok(board.living_snakes().count() <= 1)
}
