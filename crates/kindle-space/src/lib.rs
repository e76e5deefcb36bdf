//! Typed spaces for Kindle environments.
//!
//! This crate defines the [`Space`] trait, the sampling and membership
//! contract behind every grid, action, context, and observation domain,
//! along with the concrete spaces the environments are built from.
//!
//! # Spaces
//!
//! - [`GridSpace`]: shape plus a finite cell-value domain, with optional
//!   per-value sampling probabilities
//! - [`Discrete`]: integers `0..n`
//! - [`MultiDiscrete`]: one `Discrete` per axis
//! - [`BoxSpace`]: real-valued arrays within a closed interval
//! - [`ObservationSpace`]: a grid space paired with a context space
//!
//! [`EdgeBehavior`] controls how lattice coordinates are resolved at the
//! grid boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod box_space;
pub mod discrete;
pub mod edge;
pub mod error;
pub mod grid_space;
pub mod observation;
pub mod space;
pub mod value_set;

#[cfg(test)]
pub(crate) mod compliance;

pub use box_space::BoxSpace;
pub use discrete::{Discrete, MultiDiscrete, MultiIndex};
pub use edge::EdgeBehavior;
pub use error::SpaceError;
pub use grid_space::{GridSpace, GridSpaceBuilder};
pub use observation::ObservationSpace;
pub use space::Space;
pub use value_set::ValueSet;
