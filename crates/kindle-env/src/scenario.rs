//! The [`Scenario`] trait: what a concrete environment must supply.

use std::fmt;

use indexmap::IndexMap;
use kindle_core::Grid;
use kindle_operator::Operator;
use kindle_space::{GridSpace, ObservationSpace, Space};
use rand::RngCore;

/// Auxiliary per-step diagnostics, keyed by name.
pub type Info = IndexMap<String, u64>;

/// The pieces [`CaEnv`](crate::CaEnv) drives: spaces, a coordinator, an
/// initial-state sampler, and the reward, termination, and report
/// policies.
///
/// `award`, `is_done`, and `report` are pure functions of the state
/// passed in. Counters that must survive between steps belong in the
/// context.
pub trait Scenario: Send + 'static {
    /// Action accepted by `step()`.
    type Action: Clone + fmt::Debug + Send + 'static;
    /// Context threaded alongside the grid.
    type Context: Clone + fmt::Debug + Send + 'static;
    /// Space of admissible contexts.
    type ContextSpace: Space<Value = Self::Context>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Space of admissible grids.
    fn grid_space(&self) -> &GridSpace;

    /// Space of admissible actions.
    fn action_space(&self) -> &dyn Space<Value = Self::Action>;

    /// Space of admissible `(grid, context)` observations.
    fn observation_space(&self) -> &ObservationSpace<Self::ContextSpace>;

    /// Operator run once per step.
    fn coordinator(&self) -> &dyn Operator<Action = Self::Action, Context = Self::Context>;

    /// Sample the state an episode starts from.
    fn initial_state(&self, rng: &mut dyn RngCore) -> (Grid, Self::Context);

    /// Reward for arriving in `(grid, context)`.
    fn award(&self, grid: &Grid, context: &Self::Context) -> f64;

    /// Whether `(grid, context)` ends the episode.
    fn is_done(&self, grid: &Grid, context: &Self::Context) -> bool;

    /// Diagnostics for `(grid, context)`.
    fn report(&self, grid: &Grid, context: &Self::Context) -> Info;
}
