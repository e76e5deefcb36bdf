//! Effects applied to the cell under the agent.

use std::sync::Arc;

use kindle_core::{Grid, OperatorError};
use kindle_operator::{Operator, OperatorSpaces};
use rand::RngCore;

use crate::context::ForestFireContext;
use crate::rules::ForestFireRules;

/// Replaces the cell under the agent according to the effects table.
///
/// Each replacement increments `context.hits`. Cells without an entry in
/// the table are left alone and do not count.
pub struct Modify {
    rules: Arc<ForestFireRules>,
    spaces: OperatorSpaces<u32, ForestFireContext>,
}

impl Modify {
    /// Create a modify stage.
    pub fn new(rules: Arc<ForestFireRules>, spaces: OperatorSpaces<u32, ForestFireContext>) -> Self {
        Self { rules, spaces }
    }
}

impl Operator for Modify {
    type Action = u32;
    type Context = ForestFireContext;

    fn name(&self) -> &str {
        "Modify"
    }

    fn spaces(&self) -> &OperatorSpaces<u32, ForestFireContext> {
        &self.spaces
    }

    fn apply(
        &self,
        mut grid: Grid,
        _action: &u32,
        mut context: ForestFireContext,
        _rng: &mut dyn RngCore,
    ) -> Result<(Grid, ForestFireContext), OperatorError> {
        let pos = context.position;
        let current = grid
            .get(pos.row, pos.col)
            .ok_or_else(|| OperatorError::InvalidContext {
                reason: format!("agent at ({}, {}) is off the grid", pos.row, pos.col),
            })?;
        if let Some(replacement) = self.rules.effects.get(current) {
            grid.set(pos.row, pos.col, replacement);
            context.hits += 1;
        }
        Ok((grid, context))
    }
}
