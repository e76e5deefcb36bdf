//! Error types for space construction.

use kindle_core::Shape;
use std::fmt;

/// Errors arising from space construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// No shape was supplied to a grid space builder.
    MissingShape,
    /// The shape is empty or has a zero-length dimension.
    InvalidShape {
        /// The offending shape.
        shape: Shape,
    },
    /// Neither a state count nor an explicit value set was supplied.
    MissingDomain,
    /// The state count is zero or does not fit the cell type.
    InvalidStateCount {
        /// The rejected count.
        n: u64,
    },
    /// An explicit value set was supplied but is empty.
    EmptyValues,
    /// The sampling probability vector is malformed.
    InvalidProbabilities {
        /// What went wrong.
        reason: String,
    },
    /// Box bounds are non-finite or inverted.
    InvalidBounds {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingShape => write!(f, "'shape' must be provided"),
            Self::InvalidShape { shape } => {
                write!(f, "shape {shape:?} must be non-empty with positive dimensions")
            }
            Self::MissingDomain => write!(f, "'n' or 'values' must be provided"),
            Self::InvalidStateCount { n } => {
                write!(f, "'n' must be a positive integer no larger than i32::MAX, got {n}")
            }
            Self::EmptyValues => write!(f, "'values' must contain at least one value"),
            Self::InvalidProbabilities { reason } => {
                write!(f, "invalid sampling probabilities: {reason}")
            }
            Self::InvalidBounds { low, high } => {
                write!(f, "bounds must be finite with low <= high, got [{low}, {high}]")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
