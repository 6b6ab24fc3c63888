// Turn 0 board creation: snake start positions and initial food
//
// Square boards of the known sizes get fixed, fair start positions. Any other
// size falls back to random placement on the even checkerboard colour so two
// snakes can never start adjacent to each other's heads.

use log::debug;

use crate::error::RulesError;
use crate::random::{shuffle_slice, Rand};
use crate::types::{BoardState, Point, Snake, SNAKE_START_SIZE};

pub const BOARD_SIZE_SMALL: i32 = 7;
pub const BOARD_SIZE_MEDIUM: i32 = 11;
pub const BOARD_SIZE_LARGE: i32 = 19;

/// Creates a board with every snake placed and initial food spawned
pub fn create_default_board_state(
    width: i32,
    height: i32,
    snake_ids: &[&str],
    rand: &dyn Rand,
) -> Result<BoardState, RulesError> {
    if width <= 0 || height <= 0 {
        return Err(RulesError::InvalidBoardSize { width, height });
    }

    let mut board = BoardState::new(width, height);
    place_snakes_automatically(rand, &mut board, snake_ids)?;
    place_food_automatically(rand, &mut board)?;

    debug!(
        "Created {}x{} board with {} snakes and {} food",
        width,
        height,
        board.snakes.len(),
        board.food.len()
    );
    Ok(board)
}

pub fn is_known_board_size(board: &BoardState) -> bool {
    board.width == board.height
        && matches!(
            board.width,
            BOARD_SIZE_SMALL | BOARD_SIZE_MEDIUM | BOARD_SIZE_LARGE
        )
}

pub fn place_snakes_automatically(
    rand: &dyn Rand,
    board: &mut BoardState,
    snake_ids: &[&str],
) -> Result<(), RulesError> {
    if is_known_board_size(board) {
        place_snakes_fixed(rand, board, snake_ids)
    } else {
        place_snakes_randomly(rand, board, snake_ids)
    }
}

/// Places snakes on the corners first, then on the edge midpoints, one cell
/// in from the wall. Each group is shuffled.
pub fn place_snakes_fixed(
    rand: &dyn Rand,
    board: &mut BoardState,
    snake_ids: &[&str],
) -> Result<(), RulesError> {
    let (mn, md, mx) = (1, (board.width - 1) / 2, board.width - 2);
    let mut corners = [
        Point::new(mn, mn),
        Point::new(mn, mx),
        Point::new(mx, mn),
        Point::new(mx, mx),
    ];
    let mut cardinals = [
        Point::new(mn, md),
        Point::new(md, mn),
        Point::new(md, mx),
        Point::new(mx, md),
    ];

    let max = corners.len() + cardinals.len();
    if snake_ids.len() > max {
        return Err(RulesError::TooManySnakes {
            snakes: snake_ids.len(),
            max,
        });
    }

    shuffle_slice(rand, &mut corners);
    shuffle_slice(rand, &mut cardinals);

    let start_points = corners.iter().chain(cardinals.iter());
    for (id, &start) in snake_ids.iter().zip(start_points) {
        board.snakes.push(Snake::new(id, vec![start; SNAKE_START_SIZE]));
    }
    Ok(())
}

pub fn place_snakes_randomly(
    rand: &dyn Rand,
    board: &mut BoardState,
    snake_ids: &[&str],
) -> Result<(), RulesError> {
    for id in snake_ids {
        let unoccupied = board.even_unoccupied_points();
        if unoccupied.is_empty() {
            return Err(RulesError::NoRoomForSnake);
        }

        let start = unoccupied[rand.intn(unoccupied.len())];
        board.snakes.push(Snake::new(id, vec![start; SNAKE_START_SIZE]));
    }
    Ok(())
}

pub fn place_food_automatically(rand: &dyn Rand, board: &mut BoardState) -> Result<(), RulesError> {
    if is_known_board_size(board) {
        place_food_fixed(rand, board)
    } else {
        let n = board.snakes.len();
        place_food_randomly(rand, board, n);
        Ok(())
    }
}

/// Places one food two moves away from each snake, never toward the centre
/// and never in a corner, then one food in the centre.
pub fn place_food_fixed(rand: &dyn Rand, board: &mut BoardState) -> Result<(), RulesError> {
    let center = Point::new((board.width - 1) / 2, (board.height - 1) / 2);

    for i in 0..board.snakes.len() {
        let head = board.snakes[i]
            .head()
            .ok_or_else(|| RulesError::ZeroLengthSnake(board.snakes[i].id.clone()))?;

        let candidates = [
            Point::new(head.x - 1, head.y - 1),
            Point::new(head.x - 1, head.y + 1),
            Point::new(head.x + 1, head.y - 1),
            Point::new(head.x + 1, head.y + 1),
        ];

        let available: Vec<Point> = candidates
            .iter()
            .copied()
            .filter(|p| !board.food.contains(p))
            .filter(|p| {
                (p.x < head.x && head.x < center.x)
                    || (center.x < head.x && head.x < p.x)
                    || (p.y < head.y && head.y < center.y)
                    || (center.y < head.y && head.y < p.y)
            })
            .filter(|p| {
                let is_corner = (p.x == 0 || p.x == board.width - 1)
                    && (p.y == 0 || p.y == board.height - 1);
                !is_corner
            })
            .collect();

        if available.is_empty() {
            return Err(RulesError::NoRoomForFood);
        }
        board.food.push(available[rand.intn(available.len())]);
    }

    let center_occupied = board.food.contains(&center)
        || board.snakes.iter().any(|s| s.body.contains(&center));
    if center_occupied {
        return Err(RulesError::NoRoomForFood);
    }
    board.food.push(center);
    Ok(())
}

/// Places up to `n` food on random unoccupied cells.
/// Stops early, without error, once the board has no room left.
pub fn place_food_randomly(rand: &dyn Rand, board: &mut BoardState, n: usize) {
    for _ in 0..n {
        let unoccupied = board.unoccupied_points(false);
        if unoccupied.is_empty() {
            debug!("No room to place food");
            return;
        }
        board.food.push(unoccupied[rand.intn(unoccupied.len())]);
    }
}
