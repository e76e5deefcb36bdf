//! Core types for the Kindle cellular-automaton environments.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! lattice state ([`Grid`]), the observation pair handed to callers
//! ([`Observation`]), and the error types shared by operators and
//! environments.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod observation;

pub use error::{GridError, OperatorError, StepError};
pub use grid::{CellState, Grid, Shape};
pub use observation::Observation;
