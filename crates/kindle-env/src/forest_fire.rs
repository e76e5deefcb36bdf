//! The forest-fire scenario.

use kindle_core::Grid;
use kindle_operator::Operator;
use kindle_operators::{ForestFireContext, ForestFireContextSpace, ForestFireCoordinator};
use kindle_space::{Discrete, GridSpace, ObservationSpace, Space};
use rand::RngCore;

use crate::config::{ConfigError, ForestFireConfig};
use crate::env::CaEnv;
use crate::scenario::{Info, Scenario};

/// A forest-fire environment.
pub type ForestFireEnv = CaEnv<ForestFire>;

/// An agent fighting a spreading forest fire.
///
/// - reward: sum of the per-cell weights over the grid;
/// - done: no burning cell remains;
/// - info: `{"hits": context.hits}`.
pub struct ForestFire {
    config: ForestFireConfig,
    grid_space: GridSpace,
    action_space: Discrete,
    observation_space: ObservationSpace<ForestFireContextSpace>,
    coordinator: ForestFireCoordinator,
}

impl ForestFire {
    /// Build the scenario from a configuration.
    pub fn new(config: ForestFireConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid_space = config.grid_space()?;
        let action_space = Discrete::new(config.rules.actions.len() as u32)?;
        let context_space =
            ForestFireContextSpace::new(config.rows, config.cols, config.rules.freeze)?;
        let coordinator = ForestFireCoordinator::new(grid_space.clone(), config.rules.clone())?;
        Ok(Self {
            observation_space: ObservationSpace::new(grid_space.clone(), context_space),
            grid_space,
            action_space,
            coordinator,
            config,
        })
    }

    /// Build from the configuration shipped with the crate.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::new(ForestFireConfig::bundled()?)
    }

    /// The configuration in use.
    pub fn config(&self) -> &ForestFireConfig {
        &self.config
    }
}

impl ForestFireEnv {
    /// Environment over the bundled configuration.
    pub fn bundled(seed: Option<u64>) -> Result<Self, ConfigError> {
        Ok(CaEnv::new(ForestFire::bundled()?, seed))
    }
}

impl Scenario for ForestFire {
    type Action = u32;
    type Context = ForestFireContext;
    type ContextSpace = ForestFireContextSpace;

    fn name(&self) -> &str {
        "ForestFire"
    }

    fn grid_space(&self) -> &GridSpace {
        &self.grid_space
    }

    fn action_space(&self) -> &dyn Space<Value = u32> {
        &self.action_space
    }

    fn observation_space(&self) -> &ObservationSpace<ForestFireContextSpace> {
        &self.observation_space
    }

    fn coordinator(&self) -> &dyn Operator<Action = u32, Context = ForestFireContext> {
        &self.coordinator
    }

    fn initial_state(&self, rng: &mut dyn RngCore) -> (Grid, ForestFireContext) {
        let grid = self.grid_space.sample(rng);
        let context = ForestFireContext {
            params: self.config.params,
            position: self.config.initial_position,
            freeze: self.config.rules.freeze,
            hits: 0,
        };
        (grid, context)
    }

    fn award(&self, grid: &Grid, _context: &ForestFireContext) -> f64 {
        let symbols = self.config.rules.symbols;
        let weights = self.config.rewards;
        grid.cells()
            .iter()
            .map(|&cell| {
                if cell == symbols.empty {
                    weights.per_empty
                } else if cell == symbols.tree {
                    weights.per_tree
                } else if cell == symbols.fire {
                    weights.per_fire
                } else {
                    0.0
                }
            })
            .sum()
    }

    fn is_done(&self, grid: &Grid, _context: &ForestFireContext) -> bool {
        grid.count(self.config.rules.symbols.fire) == 0
    }

    fn report(&self, _grid: &Grid, context: &ForestFireContext) -> Info {
        Info::from([("hits".to_string(), context.hits)])
    }
}
