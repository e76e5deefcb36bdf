//! Operator trait, declared spaces, and composition for Kindle environments.
//!
//! An [`Operator`] maps `(grid, action, context)` to `(grid', context')`.
//! Operators are stateless (`&self`); the only state that survives a call
//! is what they return. [`Identity`] is the no-op operator and
//! [`Sequence`] threads grid and context through a fixed list of stages.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod identity;
pub mod operator;
pub mod sequence;

pub use identity::Identity;
pub use operator::{Operator, OperatorSpaces, SharedSpace};
pub use sequence::{PipelineError, Sequence, Stage};
