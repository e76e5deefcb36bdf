//! Forest-fire configuration: YAML loading and validation.
//!
//! A YAML document is first deserialized into raw serde structs that mirror
//! the file layout, then resolved (cell and direction names turned into
//! values) into a typed [`ForestFireConfig`], and finally checked by
//! [`ForestFireConfig::validate`].

use std::error::Error;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use kindle_core::CellState;
use kindle_operators::{
    ActionTable, ActionTableError, CaParams, CellSymbols, Direction, Effects, ForestFireRules,
    Position, Wind,
};
use kindle_space::{EdgeBehavior, GridSpace, SpaceError};
use serde::Deserialize;
use tracing::info;

/// The default configuration shipped with the crate.
pub const BUNDLED_FOREST_FIRE: &str = include_str!("../config/forest_fire.yaml");

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The document is not valid YAML or does not match the expected layout.
    Yaml(serde_yaml::Error),
    /// A cell name is not one of `empty`, `tree`, `fire`.
    UnknownSymbol {
        /// The unrecognised name.
        name: String,
    },
    /// The cell symbols are not distinct.
    InvalidSymbols {
        /// Description of the clash.
        reason: String,
    },
    /// An action name does not denote a direction.
    UnknownAction {
        /// The unrecognised name.
        name: String,
    },
    /// An action index lies outside `0..9`.
    ActionIndexOutOfRange {
        /// The action the index was given for.
        name: String,
        /// The rejected index.
        index: u32,
    },
    /// Two actions share an index.
    DuplicateAction {
        /// The shared index.
        index: u32,
    },
    /// A direction has no action index.
    MissingAction {
        /// Name of the unassigned action.
        name: String,
    },
    /// The wind table is incomplete or out of range.
    InvalidWind {
        /// Description of the problem.
        reason: String,
    },
    /// A CA probability lies outside `[0, 1]`.
    InvalidProbability {
        /// Which parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A reward weight is NaN or infinite.
    InvalidReward {
        /// Which weight.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The lattice has a zero dimension.
    InvalidShape {
        /// Configured row count.
        rows: usize,
        /// Configured column count.
        cols: usize,
    },
    /// The initial agent position lies off the lattice.
    InvalidPosition {
        /// Configured row.
        row: usize,
        /// Configured column.
        col: usize,
    },
    /// A derived space could not be built.
    Space(SpaceError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Yaml(e) => write!(f, "yaml: {e}"),
            Self::UnknownSymbol { name } => write!(f, "unknown cell symbol '{name}'"),
            Self::InvalidSymbols { reason } => write!(f, "invalid cell symbols: {reason}"),
            Self::UnknownAction { name } => write!(f, "unknown action '{name}'"),
            Self::ActionIndexOutOfRange { name, index } => {
                write!(f, "action '{name}' has index {index}, expected 0..9")
            }
            Self::DuplicateAction { index } => {
                write!(f, "action index {index} is assigned more than once")
            }
            Self::MissingAction { name } => write!(f, "action '{name}' has no index"),
            Self::InvalidWind { reason } => write!(f, "bad wind data: {reason}"),
            Self::InvalidProbability { name, value } => {
                write!(f, "{name} must lie in [0.0, 1.0], got {value}")
            }
            Self::InvalidReward { name, value } => {
                write!(f, "reward {name} must be finite, got {value}")
            }
            Self::InvalidShape { rows, cols } => {
                write!(f, "grid shape {rows}x{cols} must have positive dimensions")
            }
            Self::InvalidPosition { row, col } => {
                write!(f, "initial position ({row}, {col}) is off the grid")
            }
            Self::Space(e) => write!(f, "space: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Yaml(e) => Some(e),
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<ActionTableError> for ConfigError {
    fn from(e: ActionTableError) -> Self {
        match e {
            ActionTableError::OutOfRange { direction, index } => Self::ActionIndexOutOfRange {
                name: direction.action_name().to_string(),
                index,
            },
            ActionTableError::DuplicateIndex { index } => Self::DuplicateAction { index },
            // Names map one-to-one onto directions, so a repeat can only
            // come from a duplicate YAML key, which the parser rejects.
            ActionTableError::DuplicateDirection { direction } => Self::UnknownAction {
                name: direction.action_name().to_string(),
            },
            ActionTableError::Missing { direction } => Self::MissingAction {
                name: direction.action_name().to_string(),
            },
        }
    }
}

// ── Raw document ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    grid_shape: RawShape,
    cell_symbols: RawSymbols,
    actions: IndexMap<String, u32>,
    effects: IndexMap<String, String>,
    wind_probs: IndexMap<String, f64>,
    ca_params: RawCaParams,
    freeze: u32,
    #[serde(default)]
    edge: RawEdge,
    rewards: RewardWeights,
    initial: RawInitial,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawShape {
    n_row: usize,
    n_col: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSymbols {
    empty: CellState,
    tree: CellState,
    fire: CellState,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCaParams {
    p_tree: f64,
    p_fire: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawEdge {
    #[default]
    Absorb,
    Clamp,
    Wrap,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInitial {
    cell_probs: CellProbs,
    position: RawPosition,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPosition {
    row: usize,
    col: usize,
}

// ── Typed config ───────────────────────────────────────────────────

/// Reward contributed by each cell of a given kind.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewardWeights {
    /// Weight of an empty cell.
    pub per_empty: f64,
    /// Weight of a tree.
    pub per_tree: f64,
    /// Weight of a burning cell.
    pub per_fire: f64,
}

/// Probability of each cell kind in a freshly reset grid.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellProbs {
    /// Probability of an empty cell.
    #[serde(default)]
    pub empty: f64,
    /// Probability of a tree.
    #[serde(default)]
    pub tree: f64,
    /// Probability of a burning cell.
    #[serde(default)]
    pub fire: f64,
}

/// Complete, resolved configuration of a forest-fire environment.
#[derive(Clone, Debug, PartialEq)]
pub struct ForestFireConfig {
    /// Lattice rows.
    pub rows: usize,
    /// Lattice columns.
    pub cols: usize,
    /// Symbols, actions, effects, wind, edges, and freeze interval.
    pub rules: ForestFireRules,
    /// CA parameters placed in the context on reset.
    pub params: CaParams,
    /// Per-cell reward weights.
    pub rewards: RewardWeights,
    /// Cell distribution of the initial grid.
    pub initial_probs: CellProbs,
    /// Agent position on reset.
    pub initial_position: Position,
}

impl ForestFireConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        let config = Self::resolve(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        info!(
            path = %path.display(),
            rows = config.rows,
            cols = config.cols,
            "loaded forest fire config"
        );
        Ok(config)
    }

    /// The configuration shipped with the crate.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUNDLED_FOREST_FIRE)
    }

    fn resolve(raw: RawConfig) -> Result<Self, ConfigError> {
        let RawSymbols { empty, tree, fire } = raw.cell_symbols;
        let symbols = CellSymbols::new(empty, tree, fire)
            .map_err(|reason| ConfigError::InvalidSymbols { reason })?;

        let mut pairs = Vec::with_capacity(raw.actions.len());
        for (name, index) in raw.actions {
            let direction = Direction::from_action_name(&name)
                .ok_or(ConfigError::UnknownAction { name })?;
            pairs.push((direction, index));
        }
        let actions = ActionTable::new(pairs)?;

        let mut effects = Vec::with_capacity(raw.effects.len());
        for (source, target) in &raw.effects {
            let lookup = |name: &String| {
                symbols
                    .by_name(name)
                    .ok_or_else(|| ConfigError::UnknownSymbol { name: name.clone() })
            };
            effects.push((lookup(source)?, lookup(target)?));
        }

        let wind = parse_wind(&raw.wind_probs)?;

        let edge = match raw.edge {
            RawEdge::Absorb => EdgeBehavior::Absorb,
            RawEdge::Clamp => EdgeBehavior::Clamp,
            RawEdge::Wrap => EdgeBehavior::Wrap,
        };

        Ok(Self {
            rows: raw.grid_shape.n_row,
            cols: raw.grid_shape.n_col,
            rules: ForestFireRules {
                symbols,
                actions,
                effects: Effects::new(effects),
                wind,
                edge,
                freeze: raw.freeze,
            },
            params: CaParams {
                p_tree: raw.ca_params.p_tree,
                p_fire: raw.ca_params.p_fire,
            },
            rewards: raw.rewards,
            initial_probs: raw.initial.cell_probs,
            initial_position: Position::new(raw.initial.position.row, raw.initial.position.col),
        })
    }

    /// Check structural invariants.
    ///
    /// Called by the loaders; call again after editing fields by hand.
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Lattice must have cells.
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidShape {
                rows: self.rows,
                cols: self.cols,
            });
        }
        // 2. Agent must start on the lattice.
        let Position { row, col } = self.initial_position;
        if row >= self.rows || col >= self.cols {
            return Err(ConfigError::InvalidPosition { row, col });
        }
        // 3. CA probabilities in [0, 1].
        for (name, value) in [("p_tree", self.params.p_tree), ("p_fire", self.params.p_fire)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        // 4. Reward weights finite.
        let RewardWeights {
            per_empty,
            per_tree,
            per_fire,
        } = self.rewards;
        for (name, value) in [
            ("per_empty", per_empty),
            ("per_tree", per_tree),
            ("per_fire", per_fire),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidReward { name, value });
            }
        }
        // 5. The derived grid space (including initial probabilities) builds.
        self.grid_space()?;
        Ok(())
    }

    /// The grid space over the three cell symbols, sampling with the
    /// initial cell probabilities.
    pub fn grid_space(&self) -> Result<GridSpace, ConfigError> {
        let CellProbs { empty, tree, fire } = self.initial_probs;
        let mut weighted: Vec<(CellState, f64)> = self
            .rules
            .symbols
            .values()
            .into_iter()
            .zip([empty, tree, fire])
            .collect();
        // Probabilities pair with values in ascending order.
        weighted.sort_by_key(|&(value, _)| value);
        let space = GridSpace::builder()
            .values(weighted.iter().map(|&(value, _)| value))
            .probs(weighted.iter().map(|&(_, p)| p).collect::<Vec<_>>())
            .shape([self.rows, self.cols])
            .build()?;
        Ok(space)
    }
}

fn parse_wind(probs: &IndexMap<String, f64>) -> Result<Wind, ConfigError> {
    if let Some(name) = probs
        .keys()
        .find(|k| !Direction::ALL.iter().any(|d| d.wind_name() == k.as_str()))
    {
        return Err(ConfigError::InvalidWind {
            reason: format!("unknown direction '{name}'"),
        });
    }
    let mut matrix = [[0.0; 3]; 3];
    for direction in Direction::ALL {
        let name = direction.wind_name();
        let p = probs.get(name).ok_or_else(|| ConfigError::InvalidWind {
            reason: format!("missing direction '{name}'"),
        })?;
        let (dr, dc) = direction.offset();
        matrix[(dr + 1) as usize][(dc + 1) as usize] = *p;
    }
    Wind::new(matrix).map_err(|reason| ConfigError::InvalidWind { reason })
}
