//! Agent movement.

use std::sync::Arc;

use kindle_core::{Grid, OperatorError};
use kindle_operator::{Operator, OperatorSpaces};
use kindle_space::EdgeBehavior;
use rand::RngCore;

use crate::context::{ForestFireContext, Position};
use crate::rules::ForestFireRules;

/// Moves the agent one cell in the direction named by the action.
///
/// The grid is untouched. Moves that would leave the lattice are clamped
/// to its boundary, so the agent always stays on the grid.
pub struct Move {
    rules: Arc<ForestFireRules>,
    spaces: OperatorSpaces<u32, ForestFireContext>,
}

impl Move {
    /// Create a movement stage.
    pub fn new(rules: Arc<ForestFireRules>, spaces: OperatorSpaces<u32, ForestFireContext>) -> Self {
        Self { rules, spaces }
    }
}

impl Operator for Move {
    type Action = u32;
    type Context = ForestFireContext;

    fn name(&self) -> &str {
        "Move"
    }

    fn spaces(&self) -> &OperatorSpaces<u32, ForestFireContext> {
        &self.spaces
    }

    fn apply(
        &self,
        grid: Grid,
        action: &u32,
        mut context: ForestFireContext,
        _rng: &mut dyn RngCore,
    ) -> Result<(Grid, ForestFireContext), OperatorError> {
        let direction =
            self.rules
                .actions
                .direction(*action)
                .ok_or_else(|| OperatorError::InvalidAction {
                    reason: format!("no direction is bound to action {action}"),
                })?;
        let (dr, dc) = direction.offset();
        let Position { row, col } = context.position;

        let row = EdgeBehavior::Clamp.resolve(row as i64 + dr, grid.rows());
        let col = EdgeBehavior::Clamp.resolve(col as i64 + dc, grid.cols());
        match (row, col) {
            (Some(row), Some(col)) => {
                context.position = Position::new(row, col);
                Ok((grid, context))
            }
            _ => Err(OperatorError::InvalidGrid {
                reason: "grid has no cells to move on".into(),
            }),
        }
    }
}
