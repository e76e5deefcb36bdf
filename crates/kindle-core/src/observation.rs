//! The observation pair returned to callers.

use crate::grid::Grid;

/// A point-in-time view of an environment: the grid plus its context.
///
/// Environments hand out owned copies, so holding an observation never
/// aliases the environment's internal state.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation<C> {
    /// The lattice.
    pub grid: Grid,
    /// Auxiliary episode state (parameters, position, counters).
    pub context: C,
}

impl<C> Observation<C> {
    /// Pair a grid with its context.
    pub fn new(grid: Grid, context: C) -> Self {
        Self { grid, context }
    }

    /// Split into `(grid, context)`.
    pub fn into_parts(self) -> (Grid, C) {
        (self.grid, self.context)
    }
}
