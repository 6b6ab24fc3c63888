// Shared fixtures for ruleset integration tests
#![allow(dead_code)]

use snake_rules::{BoardState, Direction, Point, Ruleset, RulesError, Snake, SnakeMove};

/// A previous board, the moves applied to it, and the expected outcome
pub struct GameTestCase {
    pub name: &'static str,
    pub prev_state: BoardState,
    pub moves: Vec<SnakeMove>,
    pub expected_error: Option<RulesError>,
    pub expected_state: Option<BoardState>,
}

impl GameTestCase {
    /// Runs the case through `create_next_board_state` and checks the result.
    /// The previous board must come back unmodified either way.
    pub fn require_valid_next_state(&self, ruleset: &dyn Ruleset) {
        let prev = self.prev_state.clone();
        let result = ruleset.create_next_board_state(&prev, &self.moves);

        match (&self.expected_error, result) {
            (Some(expected), Err(actual)) => {
                assert_eq!(&actual, expected, "{}: wrong error", self.name)
            }
            (Some(expected), Ok(_)) => {
                panic!("{}: expected error {:?}, got a board", self.name, expected)
            }
            (None, Err(actual)) => panic!("{}: unexpected error {:?}", self.name, actual),
            (None, Ok(next)) => {
                if let Some(expected) = &self.expected_state {
                    assert_eq!(&next, expected, "{}: wrong next board", self.name);
                }
            }
        }

        assert_eq!(prev, self.prev_state, "{}: previous board was mutated", self.name);
    }
}

pub fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

pub fn board(width: i32, height: i32, snakes: Vec<Snake>, food: Vec<Point>) -> BoardState {
    BoardState {
        width,
        height,
        snakes,
        food,
        hazards: vec![],
    }
}

/// One living snake has no move
pub fn standard_case_err_no_move_found() -> GameTestCase {
    GameTestCase {
        name: "Standard Case Error No Move Found",
        prev_state: board(
            10,
            10,
            vec![
                Snake::new("one", pts(&[(1, 1), (1, 2)])),
                Snake::new("two", pts(&[(3, 4), (3, 3)])),
            ],
            pts(&[(0, 0), (1, 0)]),
        ),
        moves: vec![SnakeMove::new("one", Direction::Up)],
        expected_error: Some(RulesError::NoMoveFound("two".to_string())),
        expected_state: None,
    }
}

/// A living snake has no body
pub fn standard_case_err_zero_length_snake() -> GameTestCase {
    GameTestCase {
        name: "Standard Case Error Zero Length Snake",
        prev_state: board(
            10,
            10,
            vec![
                Snake::new("one", pts(&[(1, 1), (1, 2)])),
                Snake::new("two", vec![]),
            ],
            pts(&[(0, 0), (1, 0)]),
        ),
        moves: vec![
            SnakeMove::new("one", Direction::Up),
            SnakeMove::new("two", Direction::Down),
        ],
        expected_error: Some(RulesError::ZeroLengthSnake("two".to_string())),
        expected_state: None,
    }
}

/// A move names a snake that is not on the board
pub fn standard_case_err_unknown_snake() -> GameTestCase {
    GameTestCase {
        name: "Standard Case Error Unknown Snake",
        prev_state: board(
            10,
            10,
            vec![Snake::new("one", pts(&[(1, 1), (1, 2)]))],
            vec![],
        ),
        moves: vec![
            SnakeMove::new("one", Direction::Up),
            SnakeMove::new("ghost", Direction::Down),
        ],
        expected_error: Some(RulesError::UnknownSnake("ghost".to_string())),
        expected_state: None,
    }
}
