//! Error types shared across the Kindle workspace.
//!
//! Organized by subsystem: grid construction, operator execution, and
//! environment stepping.

use std::error::Error;
use std::fmt;

use crate::grid::Shape;

/// Errors from constructing a [`Grid`](crate::Grid).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The shape has no dimensions or a zero-length dimension.
    InvalidShape {
        /// The offending shape.
        shape: Shape,
    },
    /// The cell buffer length does not match the product of the shape.
    LengthMismatch {
        /// Number of cells implied by the shape.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// Rows passed to [`Grid::from_rows`](crate::Grid::from_rows) differ in length.
    RaggedRows {
        /// Index of the first row whose length differs from row 0.
        row: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { shape } => {
                write!(f, "shape {shape:?} must be non-empty with positive dimensions")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "shape implies {expected} cells, got {actual}")
            }
            Self::RaggedRows { row } => write!(f, "row {row} has a different length than row 0"),
        }
    }
}

impl Error for GridError {}

/// Errors from a single operator invocation.
///
/// Returned by `Operator::apply()` and wrapped in
/// [`StepError::OperatorFailed`] by the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperatorError {
    /// The action lies outside the operator's declared action space.
    InvalidAction {
        /// Description of the rejected action.
        reason: String,
    },
    /// The grid does not belong to the operator's declared grid space.
    InvalidGrid {
        /// Description of the mismatch.
        reason: String,
    },
    /// The context does not belong to the operator's declared context space.
    InvalidContext {
        /// Description of the mismatch.
        reason: String,
    },
    /// The operator failed while computing the transition.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAction { reason } => write!(f, "invalid action: {reason}"),
            Self::InvalidGrid { reason } => write!(f, "invalid grid: {reason}"),
            Self::InvalidContext { reason } => write!(f, "invalid context: {reason}"),
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for OperatorError {}

/// Errors from an environment `step()`.
///
/// A failed step leaves the stored grid and context untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The action is not a member of the environment's action space.
    InvalidAction {
        /// Debug rendering of the rejected action.
        action: String,
    },
    /// The coordinator (or one of its stages) rejected the transition.
    OperatorFailed {
        /// Name of the failing operator.
        name: String,
        /// The underlying operator error.
        reason: OperatorError,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAction { action } => {
                write!(f, "action {action} is outside the action space")
            }
            Self::OperatorFailed { name, reason } => {
                write!(f, "operator '{name}' failed: {reason}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OperatorFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
