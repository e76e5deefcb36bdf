//! Test utilities and fixture operators for Kindle development.
//!
//! Fixtures share one set of spaces ([`fixture_spaces`]): a 3x3 grid over
//! four states, `Discrete(4)` actions, and a [`Trace`] context that records
//! which operators ran, in order.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::Arc;

use kindle_operator::OperatorSpaces;
use kindle_space::{Discrete, GridSpace, Space};
use rand::RngCore;

pub use fixtures::{ConstOperator, FailingOperator, TagOperator};

/// Context used by the fixtures: names of the operators applied so far.
pub type Trace = Vec<&'static str>;

/// Space of every [`Trace`]. Samples the empty trace.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceSpace;

impl TraceSpace {
    /// Number of actions accepted by the fixtures (`Discrete(ACTIONS)`).
    pub const ACTIONS: u32 = 4;
    /// Number of cell states in the fixture grid space.
    pub const STATES: u64 = 4;
}

impl Space for TraceSpace {
    type Value = Trace;

    fn sample(&self, _rng: &mut dyn RngCore) -> Trace {
        Vec::new()
    }

    fn contains(&self, _x: &Trace) -> bool {
        true
    }
}

/// Grid space shared by the fixtures: 3x3 over `{0, 1, 2, 3}`.
pub fn fixture_grid_space() -> GridSpace {
    GridSpace::builder()
        .n(TraceSpace::STATES)
        .shape([3, 3])
        .build()
        .expect("fixture grid space is valid")
}

/// Spaces declared by every fixture operator.
pub fn fixture_spaces() -> OperatorSpaces<u32, Trace> {
    OperatorSpaces::new(
        fixture_grid_space(),
        Arc::new(Discrete::new(TraceSpace::ACTIONS).expect("non-zero action count")),
        Arc::new(TraceSpace),
    )
}
