// Wrapped movement: heads leaving one edge re-enter on the opposite edge

use crate::error::RulesError;
use crate::settings::Settings;
use crate::stages::{is_initialisation, standard};
use crate::types::{BoardState, SnakeMove};

/// Standard movement followed by wrapping every living head back onto the
/// board. Must run before elimination so wrapped heads are never treated as
/// out of bounds.
pub fn move_snakes(
    board: &mut BoardState,
    settings: &Settings,
    moves: &[SnakeMove],
) -> Result<bool, RulesError> {
    if is_initialisation(board, settings, moves) {
        return Ok(false);
    }

    standard::move_snakes(board, settings, moves)?;

    let (max_x, max_y) = (board.width - 1, board.height - 1);
    for snake in board.snakes.iter_mut().filter(|s| !s.is_eliminated()) {
        if let Some(head) = snake.body.first_mut() {
            head.x = wrap(head.x, 0, max_x);
            head.y = wrap(head.y, 0, max_y);
        }
    }

    Ok(false)
}

/// Maps a value one step past either end of `[min, max]` to the other end
pub fn wrap(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        max
    } else if value > max {
        min
    } else {
        value
    }
}
