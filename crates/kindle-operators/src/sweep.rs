//! The forest-fire cellular-automaton sweep.

use std::sync::Arc;

use kindle_core::{Grid, OperatorError};
use kindle_operator::{Operator, OperatorSpaces};
use rand::{Rng, RngCore};

use crate::context::ForestFireContext;
use crate::grid_helpers::moore_neighbours;
use crate::rules::ForestFireRules;

/// One synchronous update of every cell.
///
/// Transitions are computed from the grid as it was before the sweep and
/// cells are visited in row-major order, which fixes the order of random
/// draws:
///
/// - fire becomes empty;
/// - empty grows a tree with probability `p_tree`;
/// - a tree catches fire from a burning neighbour at offset `(dr, dc)`
///   with probability `wind.toward(-dr, -dc)`, neighbours tried in
///   row-major order until one succeeds; failing that, lightning strikes
///   with probability `p_fire`;
/// - any other value is left as is.
pub struct ForestFireSweep {
    rules: Arc<ForestFireRules>,
    spaces: OperatorSpaces<u32, ForestFireContext>,
}

impl ForestFireSweep {
    /// Create a sweep stage.
    pub fn new(rules: Arc<ForestFireRules>, spaces: OperatorSpaces<u32, ForestFireContext>) -> Self {
        Self { rules, spaces }
    }
}

impl Operator for ForestFireSweep {
    type Action = u32;
    type Context = ForestFireContext;

    fn name(&self) -> &str {
        "ForestFireSweep"
    }

    fn spaces(&self) -> &OperatorSpaces<u32, ForestFireContext> {
        &self.spaces
    }

    fn apply(
        &self,
        mut grid: Grid,
        _action: &u32,
        context: ForestFireContext,
        rng: &mut dyn RngCore,
    ) -> Result<(Grid, ForestFireContext), OperatorError> {
        if grid.ndim() != 2 {
            return Err(OperatorError::InvalidGrid {
                reason: format!("sweep needs a 2-D grid, got {}-D", grid.ndim()),
            });
        }
        let symbols = self.rules.symbols;
        let wind = &self.rules.wind;
        let edge = self.rules.edge;
        let params = context.params;
        let (rows, cols) = (grid.rows(), grid.cols());

        let prev = grid.cells().to_vec();
        let next = grid.cells_mut();

        for r in 0..rows {
            for c in 0..cols {
                let i = r * cols + c;
                let cell = prev[i];
                next[i] = if cell == symbols.fire {
                    symbols.empty
                } else if cell == symbols.empty {
                    if rng.gen::<f64>() < params.p_tree {
                        symbols.tree
                    } else {
                        symbols.empty
                    }
                } else if cell == symbols.tree {
                    let spread = moore_neighbours(r, c, rows, cols, edge)
                        .into_iter()
                        .filter(|&(_, j)| prev[j] == symbols.fire)
                        .any(|((dr, dc), _)| rng.gen::<f64>() < wind.toward(-dr, -dc));
                    if spread || rng.gen::<f64>() < params.p_fire {
                        symbols.fire
                    } else {
                        symbols.tree
                    }
                } else {
                    cell
                };
            }
        }

        Ok((grid, context))
    }
}
