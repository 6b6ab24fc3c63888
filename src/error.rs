// Errors raised by the rules engine
//
// Game events such as collisions or starvation are recorded on the board as
// elimination causes. Only misconfiguration, bad input and broken board
// invariants surface as errors.

use thiserror::Error;

/// Errors that can occur while building pipelines or advancing a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A ruleset referenced a stage name the registry does not know
    #[error("unknown pipeline stage: {0}")]
    UnknownStage(String),
    /// A stage was registered twice under the same name
    #[error("pipeline stage already registered: {0}")]
    DuplicateStage(String),
    /// No ruleset exists with the requested name
    #[error("unknown ruleset: {0}")]
    UnknownRuleset(String),
    /// A living snake was not given a move
    #[error("move not provided for snake {0}")]
    NoMoveFound(String),
    /// A move referenced a snake that is not on the board
    #[error("move provided for unknown snake {0}")]
    UnknownSnake(String),
    /// More than one move was submitted for the same snake
    #[error("more than one move provided for snake {0}")]
    DuplicateMove(String),
    /// A snake with an empty body was encountered
    #[error("snake {0} is length zero")]
    ZeroLengthSnake(String),
    #[error("invalid board size {width}x{height}")]
    InvalidBoardSize { width: i32, height: i32 },
    #[error("too many snakes for board size ({snakes} requested, {max} start positions)")]
    TooManySnakes { snakes: usize, max: usize },
    #[error("not enough space to place snake")]
    NoRoomForSnake,
    #[error("not enough space to place food")]
    NoRoomForFood,
}
