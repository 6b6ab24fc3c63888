// Library exports for the Battlesnake rules engine
// The binaries and integration tests drive games through these modules

pub mod autopilot;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod random;
pub mod ruleset;
pub mod settings;
pub mod stages;
pub mod types;

pub use error::RulesError;
pub use pipeline::{Pipeline, PipelineFailure, PipelineOutcome, Stage, StageRegistry};
pub use ruleset::{ConstrictorRuleset, Ruleset, StandardRuleset, WrappedRuleset};
pub use settings::Settings;
pub use types::{BoardState, Direction, EliminationCause, Point, Snake, SnakeMove};
