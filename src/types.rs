// Board state types shared by every stage and ruleset
// Field names and string forms follow the Battlesnake API so boards can be
// exchanged as JSON with other tools.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum (and starting) health of a snake
pub const SNAKE_MAX_HEALTH: i32 = 100;

/// Number of stacked segments a snake starts the game with
pub const SNAKE_START_SIZE: usize = 3;

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Represents the four possible movement directions for a snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to its lowercase string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, point: &Point) -> Point {
        match self {
            Direction::Up => Point { x: point.x, y: point.y + 1 },
            Direction::Down => Point { x: point.x, y: point.y - 1 },
            Direction::Left => Point { x: point.x - 1, y: point.y },
            Direction::Right => Point { x: point.x + 1, y: point.y },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One agent's intent for one turn.
/// A missing direction means no valid move was submitted, in which case the
/// movement stage continues the snake in its current direction.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SnakeMove {
    pub id: String,
    #[serde(rename = "move")]
    pub direction: Option<Direction>,
}

impl SnakeMove {
    pub fn new(id: &str, direction: Direction) -> Self {
        SnakeMove {
            id: id.to_string(),
            direction: Some(direction),
        }
    }

    /// A move entry for a snake that failed to choose a direction
    pub fn default_for(id: &str) -> Self {
        SnakeMove {
            id: id.to_string(),
            direction: None,
        }
    }
}

/// Reason a snake was removed from play
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EliminationCause {
    #[default]
    #[serde(rename = "")]
    NotEliminated,
    #[serde(rename = "snake-collision")]
    Collision,
    #[serde(rename = "snake-self-collision")]
    SelfCollision,
    #[serde(rename = "out-of-health")]
    OutOfHealth,
    #[serde(rename = "wall-collision")]
    OutOfBounds,
}

impl EliminationCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            EliminationCause::NotEliminated => "",
            EliminationCause::Collision => "snake-collision",
            EliminationCause::SelfCollision => "snake-self-collision",
            EliminationCause::OutOfHealth => "out-of-health",
            EliminationCause::OutOfBounds => "wall-collision",
        }
    }
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub id: String,
    pub body: Vec<Point>,
    pub health: i32,
    #[serde(default)]
    pub eliminated_cause: EliminationCause,
    #[serde(default)]
    pub eliminated_by: String,
}

impl Snake {
    /// Creates a living snake at full health
    pub fn new(id: &str, body: Vec<Point>) -> Self {
        Snake {
            id: id.to_string(),
            body,
            health: SNAKE_MAX_HEALTH,
            eliminated_cause: EliminationCause::NotEliminated,
            eliminated_by: String::new(),
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn head(&self) -> Option<Point> {
        self.body.first().copied()
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated_cause != EliminationCause::NotEliminated
    }

    pub fn eliminate(&mut self, cause: EliminationCause, by: &str) {
        self.eliminated_cause = cause;
        self.eliminated_by = by.to_string();
    }

    /// True when the last two segments share a cell, i.e. the snake grew on
    /// its previous mutation and will not shrink on its next move.
    pub fn has_growth_marker(&self) -> bool {
        let len = self.body.len();
        len >= 2 && self.body[len - 1] == self.body[len - 2]
    }

    /// Grows the snake by duplicating its tail segment
    pub fn grow(&mut self) {
        if let Some(&tail) = self.body.last() {
            self.body.push(tail);
        }
    }
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub width: i32,
    pub height: i32,
    pub snakes: Vec<Snake>,
    #[serde(default)]
    pub food: Vec<Point>,
    #[serde(default)]
    pub hazards: Vec<Point>,
}

impl BoardState {
    /// Creates an empty board of the given size
    pub fn new(width: i32, height: i32) -> Self {
        BoardState {
            width,
            height,
            snakes: Vec::new(),
            food: Vec::new(),
            hazards: Vec::new(),
        }
    }

    /// Checks if a coordinate lies outside the board
    pub fn is_out_of_bounds(&self, point: &Point) -> bool {
        point.x < 0 || point.x >= self.width || point.y < 0 || point.y >= self.height
    }

    pub fn snake(&self, id: &str) -> Option<&Snake> {
        self.snakes.iter().find(|s| s.id == id)
    }

    /// Snakes still in play, in board order
    pub fn living_snakes(&self) -> impl Iterator<Item = &Snake> {
        self.snakes.iter().filter(|s| !s.is_eliminated())
    }

    /// Every cell of the board that holds no food, no living snake segment
    /// and, unless `include_possible_moves` is set, no cell a living head could
    /// step into next turn. Ordered column by column.
    pub fn unoccupied_points(&self, include_possible_moves: bool) -> Vec<Point> {
        let mut occupied = std::collections::HashSet::new();
        occupied.extend(self.food.iter().copied());

        for snake in self.living_snakes() {
            for (i, segment) in snake.body.iter().enumerate() {
                occupied.insert(*segment);
                if i == 0 && !include_possible_moves {
                    occupied.extend(Direction::all().iter().map(|d| d.apply(segment)));
                }
            }
        }

        let mut points = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let p = Point { x, y };
                if !occupied.contains(&p) {
                    points.push(p);
                }
            }
        }
        points
    }

    /// Unoccupied cells on the even checkerboard colour
    pub fn even_unoccupied_points(&self) -> Vec<Point> {
        self.unoccupied_points(true)
            .into_iter()
            .filter(|p| (p.x + p.y) % 2 == 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_apply_uses_y_up() {
        let origin = Point::new(3, 3);
        assert_eq!(Direction::Up.apply(&origin), Point::new(3, 4));
        assert_eq!(Direction::Down.apply(&origin), Point::new(3, 2));
        assert_eq!(Direction::Left.apply(&origin), Point::new(2, 3));
        assert_eq!(Direction::Right.apply(&origin), Point::new(4, 3));
    }

    #[test]
    fn test_snake_move_json() {
        let mv: SnakeMove = serde_json::from_str(r#"{"id": "one", "move": "left"}"#).unwrap();
        assert_eq!(mv, SnakeMove::new("one", Direction::Left));

        let missing: SnakeMove = serde_json::from_str(r#"{"id": "two", "move": null}"#).unwrap();
        assert_eq!(missing, SnakeMove::default_for("two"));

        assert!(serde_json::from_str::<SnakeMove>(r#"{"id": "x", "move": "sideways"}"#).is_err());
    }

    #[test]
    fn test_growth_marker() {
        let mut snake = Snake::new("one", vec![Point::new(1, 1), Point::new(1, 0)]);
        assert!(!snake.has_growth_marker());

        snake.grow();
        assert!(snake.has_growth_marker());
        assert_eq!(snake.body.len(), 3);

        let single = Snake::new("two", vec![Point::new(0, 0)]);
        assert!(!single.has_growth_marker(), "One segment carries no marker");
    }

    #[test]
    fn test_unoccupied_points_excludes_bodies_food_and_head_moves() {
        let mut board = BoardState::new(3, 3);
        board.snakes.push(Snake::new("one", vec![Point::new(0, 0), Point::new(0, 1)]));
        board.food.push(Point::new(2, 2));

        let with_moves = board.unoccupied_points(true);
        assert_eq!(with_moves.len(), 6);
        assert!(with_moves.contains(&Point::new(1, 0)));

        let without_moves = board.unoccupied_points(false);
        assert!(!without_moves.contains(&Point::new(1, 0)));
        assert!(!without_moves.contains(&Point::new(2, 2)));
        assert_eq!(without_moves.len(), 5);
    }

    #[test]
    fn test_eliminated_snakes_do_not_occupy_cells() {
        let mut board = BoardState::new(2, 1);
        let mut snake = Snake::new("gone", vec![Point::new(0, 0)]);
        snake.eliminate(EliminationCause::OutOfHealth, "");
        board.snakes.push(snake);

        assert_eq!(board.unoccupied_points(true).len(), 2);
    }

    #[test]
    fn test_board_json_uses_api_names() {
        let mut board = BoardState::new(2, 2);
        let mut snake = Snake::new("one", vec![Point::new(0, 0)]);
        snake.eliminate(EliminationCause::OutOfBounds, "");
        board.snakes.push(snake);

        let json = serde_json::to_value(&board).expect("board should serialize");
        assert_eq!(json["snakes"][0]["eliminated_cause"], "wall-collision");

        let moves: SnakeMove =
            serde_json::from_str(r#"{"id":"one","move":"left"}"#).expect("move should parse");
        assert_eq!(moves, SnakeMove::new("one", Direction::Left));
    }
}
