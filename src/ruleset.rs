// Rulesets: named bundles of settings and a stage list
//
// A variant lists the same stage names as standard wherever it behaves the
// same and swaps in its own stage exactly where it diverges.

use log::debug;

use crate::error::RulesError;
use crate::pipeline::{Pipeline, PipelineOutcome};
use crate::settings::Settings;
use crate::stages::{self, standard};
use crate::types::{BoardState, SnakeMove};

pub const GAME_TYPE_STANDARD: &str = "standard";
pub const GAME_TYPE_WRAPPED: &str = "wrapped";
pub const GAME_TYPE_CONSTRICTOR: &str = "constrictor";

pub const STANDARD_RULESET_STAGES: &[&str] = &[
    stages::MOVEMENT_STANDARD,
    stages::HEALTH_REDUCE_STANDARD,
    stages::HAZARD_DAMAGE_STANDARD,
    stages::EAT_FOOD_STANDARD,
    stages::SPAWN_FOOD_STANDARD,
    stages::ELIMINATE_STANDARD,
    stages::GAME_OVER_STANDARD,
];

// No game-over stage here; callers detect the end through `is_game_over`.
pub const WRAPPED_RULESET_STAGES: &[&str] = &[
    stages::MOVEMENT_WRAPPED,
    stages::HEALTH_REDUCE_STANDARD,
    stages::HAZARD_DAMAGE_STANDARD,
    stages::EAT_FOOD_STANDARD,
    stages::SPAWN_FOOD_STANDARD,
    stages::ELIMINATE_STANDARD,
];

pub const CONSTRICTOR_RULESET_STAGES: &[&str] = &[
    stages::MOVEMENT_STANDARD,
    stages::HEALTH_REDUCE_STANDARD,
    stages::HAZARD_DAMAGE_STANDARD,
    stages::EAT_FOOD_STANDARD,
    stages::SPAWN_FOOD_STANDARD,
    stages::ELIMINATE_STANDARD,
    stages::FOOD_REMOVE_CONSTRICTOR,
    stages::GROW_CONSTRICTOR,
    stages::GAME_OVER_STANDARD,
];

/// A game variant
pub trait Ruleset: Send + Sync {
    fn name(&self) -> &'static str;

    fn settings(&self) -> Settings;

    /// Ordered stage names making up one turn
    fn stage_names(&self) -> &'static [&'static str];

    /// Resolves the stage list into a runnable pipeline
    fn pipeline(&self) -> Result<Pipeline, RulesError> {
        Pipeline::new(self.stage_names())
    }

    /// Runs the pipeline once against `state` with this ruleset's settings
    fn execute(
        &self,
        state: &BoardState,
        moves: &[SnakeMove],
    ) -> Result<PipelineOutcome, RulesError> {
        let pipeline = self.pipeline()?;
        pipeline
            .execute(state.clone(), &self.settings(), moves)
            .map_err(|failure| failure.error)
    }

    /// Turn 0 setup: the regular pipeline run with no moves
    fn modify_initial_board_state(&self, initial: &BoardState) -> Result<BoardState, RulesError> {
        debug!("Preparing initial board for {} game", self.name());
        Ok(self.execute(initial, &[])?.state)
    }

    /// Advances the board one turn. The halt signal is dropped here; use
    /// `is_game_over` or the pipeline directly to learn whether play ends.
    fn create_next_board_state(
        &self,
        prev: &BoardState,
        moves: &[SnakeMove],
    ) -> Result<BoardState, RulesError> {
        Ok(self.execute(prev, moves)?.state)
    }

    fn is_game_over(&self, state: &BoardState) -> Result<bool, RulesError> {
        let mut state = state.clone();
        standard::game_over(&mut state, &self.settings(), &[])
    }
}

#[derive(Debug, Clone, Default)]
pub struct StandardRuleset {
    settings: Settings,
}

impl StandardRuleset {
    pub fn new(settings: Settings) -> Self {
        StandardRuleset { settings }
    }
}

impl Ruleset for StandardRuleset {
    fn name(&self) -> &'static str {
        GAME_TYPE_STANDARD
    }

    fn settings(&self) -> Settings {
        self.settings.clone()
    }

    fn stage_names(&self) -> &'static [&'static str] {
        STANDARD_RULESET_STAGES
    }
}

/// Board edges wrap around to the opposite side
#[derive(Debug, Clone, Default)]
pub struct WrappedRuleset {
    settings: Settings,
}

impl WrappedRuleset {
    pub fn new(settings: Settings) -> Self {
        WrappedRuleset { settings }
    }
}

impl Ruleset for WrappedRuleset {
    fn name(&self) -> &'static str {
        GAME_TYPE_WRAPPED
    }

    fn settings(&self) -> Settings {
        self.settings.clone()
    }

    fn stage_names(&self) -> &'static [&'static str] {
        WRAPPED_RULESET_STAGES
    }
}

/// Every snake grows every turn and food never stays on the board
#[derive(Debug, Clone, Default)]
pub struct ConstrictorRuleset {
    settings: Settings,
}

impl ConstrictorRuleset {
    pub fn new(settings: Settings) -> Self {
        ConstrictorRuleset { settings }
    }
}

impl Ruleset for ConstrictorRuleset {
    fn name(&self) -> &'static str {
        GAME_TYPE_CONSTRICTOR
    }

    fn settings(&self) -> Settings {
        self.settings.clone()
    }

    fn stage_names(&self) -> &'static [&'static str] {
        CONSTRICTOR_RULESET_STAGES
    }
}

/// Builds a ruleset from its game type name
pub fn from_name(name: &str, settings: Settings) -> Result<Box<dyn Ruleset>, RulesError> {
    match name.to_lowercase().as_str() {
        GAME_TYPE_STANDARD => Ok(Box::new(StandardRuleset::new(settings))),
        GAME_TYPE_WRAPPED => Ok(Box::new(WrappedRuleset::new(settings))),
        GAME_TYPE_CONSTRICTOR => Ok(Box::new(ConstrictorRuleset::new(settings))),
        _ => Err(RulesError::UnknownRuleset(name.to_string())),
    }
}
