//! Forest-fire operators for Kindle environments.
//!
//! An agent moves over a lattice of empty, tree, and burning cells,
//! applying effects where it lands (by default it puts fires out). Every
//! `freeze + 1` steps the lattice itself advances one cellular-automaton
//! sweep, with fire spreading according to a 3x3 wind matrix.
//!
//! # Pipeline order (each step)
//!
//! 1. [`Move`]: action to `context.position`
//! 2. [`Modify`]: effects table at `context.position` to grid and `context.hits`
//! 3. [`ForestFireSweep`]: only when `context.freeze == 0`; otherwise the
//!    freeze counter is decremented
//!
//! [`ForestFireCoordinator`] runs the three in that fixed order.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod context;
pub mod coordinator;
pub mod direction;
pub mod effects;
pub(crate) mod grid_helpers;
pub mod modify;
pub mod movement;
pub mod rules;
pub mod sweep;
pub mod symbols;
pub mod wind;

pub use context::{CaParams, ForestFireContext, ForestFireContextSpace, Position};
pub use coordinator::ForestFireCoordinator;
pub use direction::{ActionTable, ActionTableError, Direction};
pub use effects::Effects;
pub use modify::Modify;
pub use movement::Move;
pub use rules::ForestFireRules;
pub use sweep::ForestFireSweep;
pub use symbols::CellSymbols;
pub use wind::Wind;
