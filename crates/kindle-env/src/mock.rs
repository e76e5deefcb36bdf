//! A minimal scenario for exercising the environment machinery.

use std::sync::Arc;

use kindle_core::Grid;
use kindle_operator::{Identity, Operator, OperatorSpaces};
use kindle_space::{Discrete, GridSpace, ObservationSpace, Space, SpaceError};
use rand::RngCore;

use crate::env::CaEnv;
use crate::scenario::{Info, Scenario};

const SIDE: usize = 8;
const STATES: u32 = 8;

/// An environment over [`MockScenario`].
pub type MockEnv = CaEnv<MockScenario>;

/// An 8x8 grid of 8 states driven by the [`Identity`] operator.
///
/// Actions and contexts are both `Discrete(8)`. The reward is always 0,
/// the episode never ends, and the report is empty.
pub struct MockScenario {
    grid_space: GridSpace,
    action_space: Arc<Discrete>,
    observation_space: ObservationSpace<Discrete>,
    coordinator: Identity<u32, u32>,
}

impl MockScenario {
    /// Build the mock scenario.
    pub fn new() -> Result<Self, SpaceError> {
        let grid_space = GridSpace::builder()
            .n(u64::from(STATES))
            .shape([SIDE, SIDE])
            .build()?;
        let action_space = Arc::new(Discrete::new(STATES)?);
        let context_space = Discrete::new(STATES)?;
        let spaces: OperatorSpaces<u32, u32> = OperatorSpaces::new(
            grid_space.clone(),
            action_space.clone(),
            Arc::new(context_space),
        );
        Ok(Self {
            observation_space: ObservationSpace::new(grid_space.clone(), context_space),
            grid_space,
            action_space,
            coordinator: Identity::new(spaces),
        })
    }
}

impl Scenario for MockScenario {
    type Action = u32;
    type Context = u32;
    type ContextSpace = Discrete;

    fn name(&self) -> &str {
        "MockCAEnv"
    }

    fn grid_space(&self) -> &GridSpace {
        &self.grid_space
    }

    fn action_space(&self) -> &dyn Space<Value = u32> {
        &*self.action_space
    }

    fn observation_space(&self) -> &ObservationSpace<Discrete> {
        &self.observation_space
    }

    fn coordinator(&self) -> &dyn Operator<Action = u32, Context = u32> {
        &self.coordinator
    }

    fn initial_state(&self, rng: &mut dyn RngCore) -> (Grid, u32) {
        let grid = self.grid_space.sample(rng);
        let context = self.observation_space.context_space().sample(rng);
        (grid, context)
    }

    fn award(&self, _grid: &Grid, _context: &u32) -> f64 {
        0.0
    }

    fn is_done(&self, _grid: &Grid, _context: &u32) -> bool {
        false
    }

    fn report(&self, _grid: &Grid, _context: &u32) -> Info {
        Info::new()
    }
}
