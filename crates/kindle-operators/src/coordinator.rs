//! The forest-fire step coordinator.

use std::sync::Arc;

use kindle_core::{Grid, OperatorError};
use kindle_operator::{Operator, OperatorSpaces};
use kindle_space::{GridSpace, SpaceError};
use rand::RngCore;

use crate::context::ForestFireContext;
use crate::modify::Modify;
use crate::movement::Move;
use crate::rules::ForestFireRules;
use crate::sweep::ForestFireSweep;

/// Runs [`Move`], then [`Modify`], then (freeze permitting) the
/// [`ForestFireSweep`].
///
/// When `context.freeze` is zero the sweep runs and the counter is reset
/// to the configured interval; otherwise the lattice stays frozen and the
/// counter is decremented.
pub struct ForestFireCoordinator {
    rules: Arc<ForestFireRules>,
    spaces: OperatorSpaces<u32, ForestFireContext>,
    movement: Move,
    modify: Modify,
    sweep: ForestFireSweep,
}

impl ForestFireCoordinator {
    /// Build the coordinator and its stages over `grid`.
    pub fn new(grid: GridSpace, rules: ForestFireRules) -> Result<Self, SpaceError> {
        let rules = Arc::new(rules);
        let spaces = rules.spaces(grid)?;
        Ok(Self {
            movement: Move::new(Arc::clone(&rules), spaces.clone()),
            modify: Modify::new(Arc::clone(&rules), spaces.clone()),
            sweep: ForestFireSweep::new(Arc::clone(&rules), spaces.clone()),
            rules,
            spaces,
        })
    }

    /// The rules every stage shares.
    pub fn rules(&self) -> &ForestFireRules {
        &self.rules
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> [&str; 3] {
        [
            self.movement.name(),
            self.modify.name(),
            self.sweep.name(),
        ]
    }
}

impl Operator for ForestFireCoordinator {
    type Action = u32;
    type Context = ForestFireContext;

    fn name(&self) -> &str {
        "ForestFireCoordinator"
    }

    fn spaces(&self) -> &OperatorSpaces<u32, ForestFireContext> {
        &self.spaces
    }

    fn apply(
        &self,
        grid: Grid,
        action: &u32,
        context: ForestFireContext,
        rng: &mut dyn RngCore,
    ) -> Result<(Grid, ForestFireContext), OperatorError> {
        let (grid, context) = self.movement.apply(grid, action, context, rng)?;
        let (grid, mut context) = self.modify.apply(grid, action, context, rng)?;

        if context.freeze == 0 {
            let (grid, mut context) = self.sweep.apply(grid, action, context, rng)?;
            context.freeze = self.rules.freeze;
            Ok((grid, context))
        } else {
            context.freeze -= 1;
            Ok((grid, context))
        }
    }
}
