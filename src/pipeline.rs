// Stage pipeline engine
//
// A turn is an ordered list of named stages. Names are resolved against a
// registry when the pipeline is built, so a misconfigured ruleset fails
// before any board is touched. Execution owns the board for its whole run
// and hands it back, complete or partially mutated, to the caller.

use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

use crate::error::RulesError;
use crate::settings::Settings;
use crate::stages;
use crate::types::{BoardState, SnakeMove};

/// Signature shared by all built-in stages.
/// Returns `Ok(true)` when the pipeline should stop after this stage.
pub type StageFn = fn(&mut BoardState, &Settings, &[SnakeMove]) -> Result<bool, RulesError>;

/// One mutation step of a turn
pub trait Stage: Send + Sync {
    /// Mutates the board and reports whether the pipeline should halt
    fn run(
        &self,
        board: &mut BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<bool, RulesError>;
}

impl<F> Stage for F
where
    F: Fn(&mut BoardState, &Settings, &[SnakeMove]) -> Result<bool, RulesError> + Send + Sync,
{
    fn run(
        &self,
        board: &mut BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<bool, RulesError> {
        self(board, settings, moves)
    }
}

/// Mapping from stage name to implementation
#[derive(Default)]
pub struct StageRegistry {
    stages: HashMap<String, Arc<dyn Stage>>,
}

impl StageRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        StageRegistry {
            stages: HashMap::new(),
        }
    }

    /// Creates a registry holding every stage shipped with the crate
    pub fn with_builtin_stages() -> Self {
        let mut registry = StageRegistry::new();
        for &(name, stage) in stages::BUILTIN_STAGES {
            registry.stages.insert(name.to_string(), Arc::new(stage));
        }
        registry
    }

    /// Process-wide registry of built-in stages, read-only once initialised
    pub fn global() -> &'static StageRegistry {
        static REGISTRY: OnceLock<StageRegistry> = OnceLock::new();
        REGISTRY.get_or_init(StageRegistry::with_builtin_stages)
    }

    /// Adds a stage under a new name
    pub fn register<S>(&mut self, name: &str, stage: S) -> Result<(), RulesError>
    where
        S: Stage + 'static,
    {
        if self.stages.contains_key(name) {
            return Err(RulesError::DuplicateStage(name.to_string()));
        }
        self.stages.insert(name.to_string(), Arc::new(stage));
        Ok(())
    }

    /// Looks up a stage by name
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Stage>, RulesError> {
        self.stages
            .get(name)
            .cloned()
            .ok_or_else(|| RulesError::UnknownStage(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stages.contains_key(name)
    }
}

/// Result of a pipeline run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// True when a stage asked to stop, e.g. because the game is over
    pub halted: bool,
    pub state: BoardState,
}

/// Error returned from [`Pipeline::execute`].
///
/// Carries the board as mutated up to the failing stage. It does not describe
/// a completed turn and must not be played on.
#[derive(Debug, Clone, Error)]
#[error("stage {stage} failed: {error}")]
pub struct PipelineFailure {
    pub stage: String,
    #[source]
    pub error: RulesError,
    pub state: BoardState,
}

/// Resolved, ordered sequence of stages
#[derive(Clone)]
pub struct Pipeline {
    stages: Vec<(String, Arc<dyn Stage>)>,
}

impl Pipeline {
    /// Builds a pipeline from the global registry
    pub fn new(names: &[&str]) -> Result<Self, RulesError> {
        Self::from_registry(StageRegistry::global(), names)
    }

    /// Builds a pipeline, failing on the first name the registry lacks
    pub fn from_registry(registry: &StageRegistry, names: &[&str]) -> Result<Self, RulesError> {
        let stages = names
            .iter()
            .map(|&name| Ok((name.to_string(), registry.resolve(name)?)))
            .collect::<Result<Vec<_>, RulesError>>()?;

        Ok(Pipeline { stages })
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Runs every stage in order against `state`.
    ///
    /// Stops at the first stage that errors or asks to halt; later stages do
    /// not run in either case.
    pub fn execute(
        &self,
        mut state: BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<PipelineOutcome, PipelineFailure> {
        for (name, stage) in &self.stages {
            debug!("Running stage {}", name);

            match stage.run(&mut state, settings, moves) {
                Ok(true) => {
                    debug!("Pipeline halted by stage {}", name);
                    return Ok(PipelineOutcome {
                        halted: true,
                        state,
                    });
                }
                Ok(false) => {}
                Err(error) => {
                    debug!("Stage {} failed: {}", name, error);
                    return Err(PipelineFailure {
                        stage: name.clone(),
                        error,
                        state,
                    });
                }
            }
        }

        Ok(PipelineOutcome {
            halted: false,
            state,
        })
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
