//! The typed rule set shared by the forest-fire operators.

use std::sync::Arc;

use kindle_operator::OperatorSpaces;
use kindle_space::{Discrete, EdgeBehavior, GridSpace, SpaceError};

use crate::context::{ForestFireContext, ForestFireContextSpace};
use crate::direction::ActionTable;
use crate::effects::Effects;
use crate::symbols::CellSymbols;
use crate::wind::Wind;

/// Validated forest-fire rules.
///
/// Built once from configuration and shared (behind an `Arc`) by every
/// stage of the coordinator.
#[derive(Clone, Debug, PartialEq)]
pub struct ForestFireRules {
    /// Cell values for empty, tree, and fire.
    pub symbols: CellSymbols,
    /// Action index to movement direction.
    pub actions: ActionTable,
    /// Substitutions applied under the agent.
    pub effects: Effects,
    /// Directional spread probabilities.
    pub wind: Wind,
    /// Neighbourhood boundary handling for the sweep.
    pub edge: EdgeBehavior,
    /// Steps between CA sweeps; `0` sweeps every step.
    pub freeze: u32,
}

impl ForestFireRules {
    /// Default symbols and actions, `fire → empty` effects, absorbing edges.
    pub fn with_wind(wind: Wind, freeze: u32) -> Self {
        let symbols = CellSymbols::default();
        Self {
            symbols,
            actions: ActionTable::default(),
            effects: Effects::new([(symbols.fire, symbols.empty)]),
            wind,
            edge: EdgeBehavior::Absorb,
            freeze,
        }
    }

    /// Operator spaces for a 2-D `grid` under these rules.
    pub fn spaces(
        &self,
        grid: GridSpace,
    ) -> Result<OperatorSpaces<u32, ForestFireContext>, SpaceError> {
        let &[rows, cols] = grid.shape().as_slice() else {
            return Err(SpaceError::InvalidShape {
                shape: grid.shape().clone(),
            });
        };
        let action = Discrete::new(self.actions.len() as u32)?;
        let context = ForestFireContextSpace::new(rows, cols, self.freeze)?;
        Ok(OperatorSpaces::new(grid, Arc::new(action), Arc::new(context)))
    }
}
