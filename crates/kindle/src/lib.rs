//! Kindle: cellular-automaton environments for reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Kindle sub-crates. For most users, adding `kindle` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use kindle::prelude::*;
//!
//! let mut env = ForestFireEnv::bundled(Some(42)).unwrap();
//! let right = env.scenario().config().rules.actions.index_of(Direction::Right);
//!
//! let result = env.step(right).unwrap();
//! assert!(env.observation_space().contains(&result.observation));
//! println!("reward {} hits {}", result.reward, result.info["hits"]);
//!
//! let obs = env.reset();
//! assert_eq!(obs.context.hits, 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `kindle-core` | `Grid`, `Observation`, error types |
//! | [`space`] | `kindle-space` | `Space` trait, grid, discrete, box, and observation spaces |
//! | [`operator`] | `kindle-operator` | `Operator` trait, `Identity`, `Sequence` |
//! | [`operators`] | `kindle-operators` | Forest-fire rules and stages |
//! | [`env`] | `kindle-env` | `CaEnv`, scenarios, YAML configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid, observation, and error types (`kindle-core`).
pub use kindle_core as types;

/// Typed spaces (`kindle-space`).
///
/// Provides the [`space::Space`] trait and [`space::GridSpace`],
/// [`space::Discrete`], [`space::MultiDiscrete`], [`space::BoxSpace`], and
/// [`space::ObservationSpace`].
pub use kindle_space as space;

/// The operator abstraction (`kindle-operator`).
pub use kindle_operator as operator;

/// Forest-fire operators (`kindle-operators`).
///
/// [`operators::ForestFireCoordinator`] runs [`operators::Move`],
/// [`operators::Modify`], and [`operators::ForestFireSweep`].
pub use kindle_operators as operators;

/// Environments and configuration (`kindle-env`).
pub use kindle_env as env;

/// Common imports for typical Kindle usage.
///
/// ```rust
/// use kindle::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use kindle_core::{CellState, Grid, Observation, Shape};

    // Errors
    pub use kindle_core::{GridError, OperatorError, StepError};
    pub use kindle_env::ConfigError;
    pub use kindle_space::SpaceError;

    // Spaces
    pub use kindle_space::{
        BoxSpace, Discrete, EdgeBehavior, GridSpace, MultiDiscrete, ObservationSpace, Space,
    };

    // Operators
    pub use kindle_operator::{Identity, Operator, OperatorSpaces, Sequence};
    pub use kindle_operators::{Direction, ForestFireContext, ForestFireCoordinator, Position};

    // Environments
    pub use kindle_env::{
        CaEnv, ForestFire, ForestFireConfig, ForestFireEnv, Info, MockEnv, MockScenario,
        Scenario, StepResult,
    };
}
