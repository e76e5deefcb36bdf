//! Reusable operator test fixtures.
//!
//! Three standard operators for composite and environment testing:
//!
//! - [`TagOperator`]: appends its tag to the trace context.
//! - [`ConstOperator`]: fills the grid with a constant value.
//! - [`FailingOperator`]: fails deterministically after N calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use kindle_core::{CellState, Grid, OperatorError};
use kindle_operator::{Operator, OperatorSpaces};
use rand::RngCore;

use crate::{fixture_spaces, Trace};

/// Appends its tag to the trace and leaves the grid untouched.
///
/// Composing two tag operators makes stage order observable in the
/// resulting context.
pub struct TagOperator {
    pub tag: &'static str,
    spaces: OperatorSpaces<u32, Trace>,
}

impl TagOperator {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            spaces: fixture_spaces(),
        }
    }
}

impl Operator for TagOperator {
    type Action = u32;
    type Context = Trace;

    fn name(&self) -> &str {
        self.tag
    }

    fn spaces(&self) -> &OperatorSpaces<u32, Trace> {
        &self.spaces
    }

    fn apply(
        &self,
        grid: Grid,
        _action: &u32,
        mut context: Trace,
        _rng: &mut dyn RngCore,
    ) -> Result<(Grid, Trace), OperatorError> {
        context.push(self.tag);
        Ok((grid, context))
    }
}

/// Writes a constant value to every cell; the trace is passed through.
pub struct ConstOperator {
    pub name: String,
    pub value: CellState,
    spaces: OperatorSpaces<u32, Trace>,
}

impl ConstOperator {
    pub fn new(name: impl Into<String>, value: CellState) -> Self {
        Self {
            name: name.into(),
            value,
            spaces: fixture_spaces(),
        }
    }
}

impl Operator for ConstOperator {
    type Action = u32;
    type Context = Trace;

    fn name(&self) -> &str {
        &self.name
    }

    fn spaces(&self) -> &OperatorSpaces<u32, Trace> {
        &self.spaces
    }

    fn apply(
        &self,
        mut grid: Grid,
        _action: &u32,
        context: Trace,
        _rng: &mut dyn RngCore,
    ) -> Result<(Grid, Trace), OperatorError> {
        grid.cells_mut().fill(self.value);
        Ok((grid, context))
    }
}

/// Fails deterministically after a configurable number of successful calls.
///
/// Useful for testing that a failed step leaves environment state intact.
/// Uses `AtomicUsize` for the call counter so it satisfies `Send` while
/// keeping `apply(&self)`.
pub struct FailingOperator {
    pub name: String,
    pub succeed_count: usize,
    call_count: AtomicUsize,
    spaces: OperatorSpaces<u32, Trace>,
}

impl FailingOperator {
    /// Create an operator that succeeds `succeed_count` times then fails.
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            call_count: AtomicUsize::new(0),
            spaces: fixture_spaces(),
        }
    }

    /// How many times `apply()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Operator for FailingOperator {
    type Action = u32;
    type Context = Trace;

    fn name(&self) -> &str {
        &self.name
    }

    fn spaces(&self) -> &OperatorSpaces<u32, Trace> {
        &self.spaces
    }

    fn apply(
        &self,
        mut grid: Grid,
        _action: &u32,
        mut context: Trace,
        _rng: &mut dyn RngCore,
    ) -> Result<(Grid, Trace), OperatorError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(OperatorError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        // On success, mark the grid so callers can tell a commit happened.
        grid.cells_mut().fill(1);
        context.push("failing-ok");
        Ok((grid, context))
    }
}
