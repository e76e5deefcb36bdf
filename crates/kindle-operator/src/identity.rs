//! The no-op operator.

use kindle_core::{Grid, OperatorError};
use rand::RngCore;

use crate::operator::{Operator, OperatorSpaces};

/// Returns its grid and context unchanged.
///
/// Used as a placeholder transition and as the coordinator of the mock
/// environment.
#[derive(Debug)]
pub struct Identity<A, C> {
    spaces: OperatorSpaces<A, C>,
}

impl<A, C> Identity<A, C> {
    /// Create an identity operator over the given spaces.
    pub fn new(spaces: OperatorSpaces<A, C>) -> Self {
        Self { spaces }
    }
}

impl<A: 'static, C: 'static> Operator for Identity<A, C> {
    type Action = A;
    type Context = C;

    fn name(&self) -> &str {
        "Identity"
    }

    fn spaces(&self) -> &OperatorSpaces<A, C> {
        &self.spaces
    }

    fn apply(
        &self,
        grid: Grid,
        _action: &A,
        context: C,
        _rng: &mut dyn RngCore,
    ) -> Result<(Grid, C), OperatorError> {
        Ok((grid, context))
    }
}
