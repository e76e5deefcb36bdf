//! The reset/step environment state machine.
//!
//! [`CaEnv`] owns the current grid, context, and random generator of one
//! episode. Each [`step()`](CaEnv::step) validates the action, runs the
//! scenario's coordinator on scratch copies of the state, and commits the
//! result only if every stage succeeded.
//!
//! # Post-termination steps
//!
//! Once an episode is done, further `step()` calls do not touch the state.
//! They return the last observation with reward `0.0` and `done = true`,
//! count themselves in [`steps_beyond_done`](CaEnv::steps_beyond_done),
//! and log a warning on the first such call. Call [`reset()`](CaEnv::reset)
//! to start over.

use std::collections::BTreeMap;
use std::fmt;

use kindle_core::{CellState, Grid, Observation, OperatorError, StepError};
use kindle_space::{GridSpace, ObservationSpace, Space};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::scenario::{Info, Scenario};

// Compile-time assertion: CaEnv is Send for every shipped scenario.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<CaEnv<crate::ForestFire>>();
        assert_send::<CaEnv<crate::MockScenario>>();
    }
};

/// Result of a [`CaEnv::step()`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult<C> {
    /// Grid and context after the step.
    pub observation: Observation<C>,
    /// Reward for the step; `0.0` after termination.
    pub reward: f64,
    /// Whether the episode has ended.
    pub done: bool,
    /// Scenario diagnostics for the new state.
    pub info: Info,
}

/// A cellular-automaton environment driven by a [`Scenario`].
pub struct CaEnv<S: Scenario> {
    scenario: S,
    rng: ChaCha8Rng,
    seed: u64,
    grid: Grid,
    context: S::Context,
    done: bool,
    steps_beyond_done: u64,
}

impl<S: Scenario> CaEnv<S> {
    /// Create an environment, seed it, and reset it.
    ///
    /// With `seed = None` a random seed is drawn; read it back with
    /// [`seed_value()`](CaEnv::seed_value).
    pub fn new(scenario: S, seed: Option<u64>) -> Self {
        let seed = resolve_seed(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (grid, context) = scenario.initial_state(&mut rng);
        debug!(scenario = scenario.name(), seed, "environment created");
        Self {
            scenario,
            rng,
            seed,
            grid,
            context,
            done: false,
            steps_beyond_done: 0,
        }
    }

    /// Start a new episode from a freshly sampled initial state.
    #[tracing::instrument(skip_all, name = "env.reset")]
    pub fn reset(&mut self) -> Observation<S::Context> {
        let (grid, context) = self.scenario.initial_state(&mut self.rng);
        self.grid = grid;
        self.context = context;
        self.done = false;
        self.steps_beyond_done = 0;
        debug!(scenario = self.scenario.name(), "reset");
        self.observation()
    }

    /// Advance one step.
    ///
    /// # Errors
    ///
    /// [`StepError::InvalidAction`] if `action` is outside the action
    /// space, or [`StepError::OperatorFailed`] if the coordinator rejects
    /// the state or fails. Either way the stored state is unchanged.
    #[tracing::instrument(skip_all, name = "env.step")]
    pub fn step(&mut self, action: S::Action) -> Result<StepResult<S::Context>, StepError> {
        if self.done {
            if self.steps_beyond_done == 0 {
                warn!(
                    scenario = self.scenario.name(),
                    "step() called after the episode ended; call reset() first"
                );
            }
            self.steps_beyond_done = self.steps_beyond_done.saturating_add(1);
            return Ok(StepResult {
                observation: self.observation(),
                reward: 0.0,
                done: true,
                info: self.info(),
            });
        }

        if !self.scenario.action_space().contains(&action) {
            return Err(StepError::InvalidAction {
                action: format!("{action:?}"),
            });
        }

        let coordinator = self.scenario.coordinator();
        let (grid, context) = coordinator
            .spaces()
            .validate(&self.grid, &action, &self.context)
            .and_then(|()| {
                coordinator.apply(
                    self.grid.clone(),
                    &action,
                    self.context.clone(),
                    &mut self.rng,
                )
            })
            .map_err(|reason| StepError::OperatorFailed {
                name: coordinator.name().to_string(),
                reason,
            })?;

        self.grid = grid;
        self.context = context;
        self.done = self.scenario.is_done(&self.grid, &self.context);
        Ok(StepResult {
            observation: self.observation(),
            reward: self.scenario.award(&self.grid, &self.context),
            done: self.done,
            info: self.info(),
        })
    }

    /// Reseed the generator and return the seed in use.
    ///
    /// With `None` a random seed is drawn. The current state is kept; the
    /// new seed takes effect from the next `reset()` or `step()`.
    pub fn seed(&mut self, seed: Option<u64>) -> u64 {
        self.seed = resolve_seed(seed);
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        debug!(scenario = self.scenario.name(), seed = self.seed, "reseeded");
        self.seed
    }

    /// Replace the current state.
    ///
    /// The pair must belong to the observation space. The episode is marked
    /// done if the new state is terminal, and the post-termination counter
    /// is cleared.
    pub fn set_state(&mut self, grid: Grid, context: S::Context) -> Result<(), OperatorError> {
        let space = self.scenario.observation_space();
        if !space.grid_space().contains(&grid) {
            return Err(OperatorError::InvalidGrid {
                reason: format!(
                    "grid of shape {:?} is not a member of {}",
                    grid.shape().as_slice(),
                    space.grid_space()
                ),
            });
        }
        if !space.context_space().contains(&context) {
            return Err(OperatorError::InvalidContext {
                reason: format!("{context:?} is outside the context space"),
            });
        }
        self.done = self.scenario.is_done(&grid, &context);
        self.steps_beyond_done = 0;
        self.grid = grid;
        self.context = context;
        Ok(())
    }

    /// Current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current context.
    pub fn context(&self) -> &S::Context {
        &self.context
    }

    /// Current `(grid, context)` pair.
    pub fn observation(&self) -> Observation<S::Context> {
        Observation::new(self.grid.clone(), self.context.clone())
    }

    /// Scenario diagnostics for the current state.
    pub fn info(&self) -> Info {
        self.scenario.report(&self.grid, &self.context)
    }

    /// Whether the episode has ended.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Steps taken since the episode ended.
    pub fn steps_beyond_done(&self) -> u64 {
        self.steps_beyond_done
    }

    /// Seed of the generator (as of construction or the last `seed()`).
    pub fn seed_value(&self) -> u64 {
        self.seed
    }

    /// The driving scenario.
    pub fn scenario(&self) -> &S {
        &self.scenario
    }

    /// Space of admissible grids.
    pub fn grid_space(&self) -> &GridSpace {
        self.scenario.grid_space()
    }

    /// Space of admissible actions.
    pub fn action_space(&self) -> &dyn Space<Value = S::Action> {
        self.scenario.action_space()
    }

    /// Space of admissible observations.
    pub fn observation_space(&self) -> &ObservationSpace<S::ContextSpace> {
        self.scenario.observation_space()
    }

    /// Per-value cell counts of the current grid.
    pub fn count_cells(&self) -> BTreeMap<CellState, usize> {
        self.grid.count_cells()
    }
}

impl<S: Scenario> fmt::Debug for CaEnv<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaEnv")
            .field("scenario", &self.scenario.name())
            .field("seed", &self.seed)
            .field("done", &self.done)
            .field("steps_beyond_done", &self.steps_beyond_done)
            .finish_non_exhaustive()
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
