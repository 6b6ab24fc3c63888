// Autopilot: simple move selection for locally driven games
//
// This is not a competitive bot. It exists so the binaries and integration
// tests can play full games without a network client: it avoids walls (when
// the board does not wrap), necks and bodies, and otherwise either heads for
// the nearest food or picks a legal move at random.

use log::debug;
use serde::Deserialize;

use crate::random::Rand;
use crate::ruleset::{Ruleset, GAME_TYPE_WRAPPED};
use crate::stages::wrapped::wrap;
use crate::types::{BoardState, Direction, Point, Snake, SnakeMove};

/// Move selection strategy
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Move toward the closest food
    Hungry,
    /// Any legal move, chosen uniformly
    Random,
}

/// Chooses moves for every living snake on a board
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    strategy: Strategy,
    wrapped: bool,
}

impl Autopilot {
    /// # Arguments
    /// * `strategy` - How to pick among legal moves
    /// * `wrapped` - Whether heads leaving the board re-enter on the other side
    pub fn new(strategy: Strategy, wrapped: bool) -> Self {
        Autopilot { strategy, wrapped }
    }

    /// Creates an autopilot that understands the board edges of `ruleset`
    pub fn for_ruleset(strategy: Strategy, ruleset: &dyn Ruleset) -> Self {
        Self::new(strategy, ruleset.name() == GAME_TYPE_WRAPPED)
    }

    /// One move per living snake, in board order
    pub fn choose_moves(&self, board: &BoardState, rand: &dyn Rand) -> Vec<SnakeMove> {
        board
            .living_snakes()
            .map(|snake| self.choose_move(board, snake, rand))
            .collect()
    }

    /// Picks a move for one snake. Falls back to the engine's default move
    /// (no direction) when the snake is trapped.
    pub fn choose_move(&self, board: &BoardState, snake: &Snake, rand: &dyn Rand) -> SnakeMove {
        let legal_moves = self.generate_legal_moves(board, snake);
        if legal_moves.is_empty() {
            debug!("Snake {} has no legal moves", snake.id);
            return SnakeMove::default_for(&snake.id);
        }

        let direction = match self.strategy {
            Strategy::Hungry => self.choose_move_towards_food(board, snake, &legal_moves),
            Strategy::Random => legal_moves[rand.intn(legal_moves.len())],
        };
        SnakeMove::new(&snake.id, direction)
    }

    /// Generates all legal moves for a snake
    /// A move is legal if it:
    /// - Doesn't go out of bounds (on boards that don't wrap)
    /// - Doesn't collide with snake bodies (excluding tails which will move)
    /// - Doesn't reverse into the neck
    pub fn generate_legal_moves(&self, board: &BoardState, snake: &Snake) -> Vec<Direction> {
        let head = match snake.head() {
            Some(head) => head,
            None => return vec![],
        };
        let neck = snake.body.get(1).copied().filter(|&n| n != head);

        Direction::all()
            .iter()
            .filter(|&&dir| {
                let next = dir.apply(&head);
                if !self.wrapped && board.is_out_of_bounds(&next) {
                    return false;
                }

                let next = self.on_board(board, next);
                if neck == Some(next) {
                    return false;
                }

                !Self::is_collision(&next, board)
            })
            .copied()
            .collect()
    }

    fn on_board(&self, board: &BoardState, point: Point) -> Point {
        if self.wrapped {
            Point {
                x: wrap(point.x, 0, board.width - 1),
                y: wrap(point.y, 0, board.height - 1),
            }
        } else {
            point
        }
    }

    /// Checks if a coordinate collides with any living snake body.
    /// Tails are free unless the snake just grew, in which case it stays put.
    fn is_collision(point: &Point, board: &BoardState) -> bool {
        board.living_snakes().any(|snake| {
            let check_len = if snake.has_growth_marker() {
                snake.body.len()
            } else {
                snake.body.len().saturating_sub(1)
            };
            snake.body[..check_len].contains(point)
        })
    }

    /// Choose the legal move that gets closest to the nearest food
    fn choose_move_towards_food(
        &self,
        board: &BoardState,
        snake: &Snake,
        legal_moves: &[Direction],
    ) -> Direction {
        let head = snake.body[0];

        let closest_food = board
            .food
            .iter()
            .min_by_key(|&&food| self.distance(board, head, food))
            .copied();

        match closest_food {
            Some(food) => legal_moves
                .iter()
                .min_by_key(|&&dir| {
                    let next = self.on_board(board, dir.apply(&head));
                    self.distance(board, next, food)
                })
                .copied()
                .unwrap_or(legal_moves[0]),
            None => legal_moves[0],
        }
    }

    /// Manhattan distance, taking the short way round on wrapped boards
    fn distance(&self, board: &BoardState, a: Point, b: Point) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        if self.wrapped {
            dx.min(board.width - dx) + dy.min(board.height - dy)
        } else {
            dx + dy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::MinRand;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_legal_moves_avoid_walls_and_neck() {
        let mut board = BoardState::new(5, 5);
        board.snakes.push(Snake::new("one", pts(&[(0, 0), (1, 0), (2, 0)])));

        let autopilot = Autopilot::new(Strategy::Hungry, false);
        let moves = autopilot.generate_legal_moves(&board, &board.snakes[0]);
        assert_eq!(moves, vec![Direction::Up]);
    }

    #[test]
    fn test_wrapped_boards_allow_edge_moves() {
        let mut board = BoardState::new(5, 5);
        board.snakes.push(Snake::new("one", pts(&[(0, 0), (1, 0), (2, 0)])));

        let autopilot = Autopilot::new(Strategy::Hungry, true);
        let moves = autopilot.generate_legal_moves(&board, &board.snakes[0]);
        assert_eq!(moves, vec![Direction::Up, Direction::Down, Direction::Left]);
    }

    #[test]
    fn test_tail_is_free_unless_snake_grew() {
        let mut board = BoardState::new(5, 5);
        // Head at (1,1) with the tail directly above
        board.snakes.push(Snake::new(
            "one",
            pts(&[(1, 1), (2, 1), (2, 2), (1, 2)]),
        ));
        let autopilot = Autopilot::new(Strategy::Random, false);
        let moves = autopilot.generate_legal_moves(&board, &board.snakes[0]);
        assert!(moves.contains(&Direction::Up));

        board.snakes[0].grow();
        let moves = autopilot.generate_legal_moves(&board, &board.snakes[0]);
        assert!(!moves.contains(&Direction::Up));
    }

    #[test]
    fn test_hungry_heads_for_food() {
        let mut board = BoardState::new(11, 11);
        board.snakes.push(Snake::new("one", pts(&[(5, 5), (5, 4)])));
        board.food.push(Point::new(9, 5));

        let autopilot = Autopilot::new(Strategy::Hungry, false);
        let mv = autopilot.choose_move(&board, &board.snakes[0], &MinRand);
        assert_eq!(mv, SnakeMove::new("one", Direction::Right));
    }

    #[test]
    fn test_hungry_takes_short_way_round_when_wrapped() {
        let mut board = BoardState::new(11, 11);
        board.snakes.push(Snake::new("one", pts(&[(1, 5), (2, 5)])));
        board.food.push(Point::new(10, 5));

        let autopilot = Autopilot::new(Strategy::Hungry, true);
        let mv = autopilot.choose_move(&board, &board.snakes[0], &MinRand);
        assert_eq!(mv, SnakeMove::new("one", Direction::Left));
    }

    #[test]
    fn test_trapped_snake_uses_default_move() {
        let mut board = BoardState::new(2, 1);
        board.snakes.push(Snake::new("one", pts(&[(0, 0), (1, 0), (1, 0)])));

        let autopilot = Autopilot::new(Strategy::Random, false);
        let mv = autopilot.choose_move(&board, &board.snakes[0], &MinRand);
        assert_eq!(mv, SnakeMove::default_for("one"));
    }

    #[test]
    fn test_moves_only_for_living_snakes() {
        let mut board = BoardState::new(7, 7);
        board.snakes.push(Snake::new("one", pts(&[(1, 1), (1, 0)])));
        let mut dead = Snake::new("two", pts(&[(5, 5), (5, 4)]));
        dead.eliminate(crate::types::EliminationCause::OutOfBounds, "");
        board.snakes.push(dead);

        let autopilot = Autopilot::new(Strategy::Random, false);
        let moves = autopilot.choose_moves(&board, &MinRand);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].id, "one");
    }
}
