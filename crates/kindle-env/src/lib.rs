//! Cellular-automaton environments for Kindle.
//!
//! [`CaEnv`] is the reset/step state machine. What it simulates comes from
//! a [`Scenario`]: its spaces, its coordinator operator, and its reward,
//! termination, and report policies. Two scenarios ship here:
//!
//! - [`ForestFire`]: an agent extinguishing a spreading fire, configured
//!   from YAML ([`ForestFireConfig`]);
//! - [`MockScenario`]: an identity environment for testing.
//!
//! # Example
//!
//! ```
//! use kindle_env::ForestFireEnv;
//! use kindle_space::Space;
//!
//! let mut env = ForestFireEnv::bundled(Some(7)).unwrap();
//! let result = env.step(4).unwrap();
//! assert!(env.observation_space().contains(&result.observation));
//! assert_eq!(result.info["hits"], env.context().hits);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod env;
pub mod forest_fire;
pub mod mock;
pub mod scenario;

pub use config::{CellProbs, ConfigError, ForestFireConfig, RewardWeights, BUNDLED_FOREST_FIRE};
pub use env::{CaEnv, StepResult};
pub use forest_fire::{ForestFire, ForestFireEnv};
pub use mock::{MockEnv, MockScenario};
pub use scenario::{Info, Scenario};
