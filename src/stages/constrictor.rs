// Constrictor stages: no food economy, every snake grows every turn

use crate::error::RulesError;
use crate::settings::Settings;
use crate::types::{BoardState, SnakeMove};

/// Removes all food from the board, on every pass including setup
pub fn remove_food(
    board: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    board.food.clear();
    Ok(false)
}

/// Restores every snake to max health and makes sure it grows by one
/// segment this turn. Snakes that already carry a growth marker (they ate)
/// are not grown twice.
///
/// Applies to eliminated snakes as well; their bodies and health keep
/// changing after elimination.
pub fn grow_snakes(
    board: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    for snake in board.snakes.iter_mut() {
        if snake.body.is_empty() {
            return Err(RulesError::ZeroLengthSnake(snake.id.clone()));
        }

        snake.health = settings.snake_max_health;
        if !snake.has_growth_marker() {
            snake.grow();
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EliminationCause, Point, Snake};

    #[test]
    fn test_remove_food() {
        let mut board = BoardState::new(5, 5);
        board.food = vec![Point::new(1, 1), Point::new(2, 2), Point::new(9, 9)];

        assert_eq!(remove_food(&mut board, &Settings::default(), &[]), Ok(false));
        assert!(board.food.is_empty());
    }

    #[test]
    fn test_grow_duplicates_tail_once() {
        let mut board = BoardState::new(5, 5);
        board.snakes = vec![
            Snake::new("plain", vec![Point::new(1, 1), Point::new(1, 0)]).with_health(12),
            Snake::new("fed", vec![Point::new(3, 3), Point::new(3, 2), Point::new(3, 2)]),
            Snake::new("single", vec![Point::new(4, 4)]).with_health(1),
        ];

        grow_snakes(&mut board, &Settings::default(), &[]).unwrap();

        assert_eq!(
            board.snakes[0].body,
            vec![Point::new(1, 1), Point::new(1, 0), Point::new(1, 0)]
        );
        assert_eq!(board.snakes[0].health, 100);
        assert_eq!(board.snakes[1].body.len(), 3, "Already grew this turn");
        assert_eq!(board.snakes[2].body, vec![Point::new(4, 4); 2]);
        assert_eq!(board.snakes[2].health, 100);
    }

    #[test]
    fn test_grow_uses_configured_max_health() {
        let mut board = BoardState::new(5, 5);
        board.snakes = vec![Snake::new("one", vec![Point::new(1, 1), Point::new(1, 0)])];
        let settings = Settings::new(15, 1, 14, 80);

        grow_snakes(&mut board, &settings, &[]).unwrap();
        assert_eq!(board.snakes[0].health, 80);
    }

    #[test]
    fn test_grow_applies_to_eliminated_snakes() {
        let mut dead = Snake::new("dead", vec![Point::new(2, 2), Point::new(2, 1)]).with_health(0);
        dead.eliminate(EliminationCause::OutOfBounds, "");
        let mut board = BoardState::new(5, 5);
        board.snakes = vec![dead];

        grow_snakes(&mut board, &Settings::default(), &[]).unwrap();

        assert_eq!(board.snakes[0].body.len(), 3);
        assert_eq!(board.snakes[0].health, 100);
        assert_eq!(board.snakes[0].eliminated_cause, EliminationCause::OutOfBounds);
    }

    #[test]
    fn test_grow_rejects_zero_length_snake() {
        let mut board = BoardState::new(5, 5);
        board.snakes = vec![Snake::new("empty", vec![])];

        let result = grow_snakes(&mut board, &Settings::default(), &[]);
        assert_eq!(result, Err(RulesError::ZeroLengthSnake("empty".to_string())));
    }
}
