//! The [`Operator`] trait and the [`OperatorSpaces`] it declares.
//!
//! Operators are modular, stateless transition units executed by an
//! environment each step. They declare the spaces they accept so inputs
//! can be validated before anything is computed.

use std::fmt;
use std::sync::Arc;

use kindle_core::{Grid, OperatorError};
use kindle_space::{GridSpace, Space};
use rand::RngCore;

/// A space shared between operators, environments, and observation spaces.
pub type SharedSpace<V> = Arc<dyn Space<Value = V>>;

/// The grid, action, and context spaces an operator expects.
///
/// Action and context spaces are reference-counted so that the stages of a
/// composite and the environment that drives it can share one instance.
pub struct OperatorSpaces<A, C> {
    grid: GridSpace,
    action: SharedSpace<A>,
    context: SharedSpace<C>,
}

impl<A: 'static, C: 'static> OperatorSpaces<A, C> {
    /// Bundle the three declared spaces.
    pub fn new(grid: GridSpace, action: SharedSpace<A>, context: SharedSpace<C>) -> Self {
        Self {
            grid,
            action,
            context,
        }
    }

    /// Expected grid space.
    pub fn grid(&self) -> &GridSpace {
        &self.grid
    }

    /// Expected action space.
    pub fn action(&self) -> &dyn Space<Value = A> {
        &*self.action
    }

    /// Expected context space.
    pub fn context(&self) -> &dyn Space<Value = C> {
        &*self.context
    }

    /// Check all three inputs against the declared spaces.
    ///
    /// The action is checked first, then the grid, then the context; the
    /// first violation is returned.
    pub fn validate(&self, grid: &Grid, action: &A, context: &C) -> Result<(), OperatorError>
    where
        A: fmt::Debug,
    {
        if !self.action.contains(action) {
            return Err(OperatorError::InvalidAction {
                reason: format!("{action:?} is outside the declared action space"),
            });
        }
        if !self.grid.contains(grid) {
            return Err(OperatorError::InvalidGrid {
                reason: format!(
                    "grid of shape {:?} is not a member of {}",
                    grid.shape().as_slice(),
                    self.grid
                ),
            });
        }
        if !self.context.contains(context) {
            return Err(OperatorError::InvalidContext {
                reason: "context is outside the declared context space".into(),
            });
        }
        Ok(())
    }
}

impl<A, C> Clone for OperatorSpaces<A, C> {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid.clone(),
            action: Arc::clone(&self.action),
            context: Arc::clone(&self.context),
        }
    }
}

impl<A, C> fmt::Debug for OperatorSpaces<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorSpaces")
            .field("grid", &self.grid.to_string())
            .finish_non_exhaustive()
    }
}

/// A stateless transition `(grid, action, context) -> (grid', context')`.
///
/// # Contract
///
/// - `&self`: operators hold no mutable state between calls. Anything that
///   must persist goes into the returned context.
/// - `apply()` consumes its grid and context and returns the new pair. The
///   caller hands in scratch copies and commits only on `Ok`.
/// - Randomness comes exclusively from `rng`, so a seeded caller
///   reproduces identical transitions.
/// - `spaces()` describes the accepted inputs; callers may validate with
///   [`OperatorSpaces::validate`] before invoking.
///
/// # Object safety
///
/// This trait is object-safe; composites store stages as
/// `Box<dyn Operator<Action = A, Context = C>>`.
///
/// # Examples
///
/// An operator that sets every cell to a constant:
///
/// ```
/// use std::sync::Arc;
/// use kindle_core::{Grid, OperatorError};
/// use kindle_operator::{Operator, OperatorSpaces};
/// use kindle_space::{Discrete, GridSpace};
/// use rand::RngCore;
///
/// struct Fill {
///     spaces: OperatorSpaces<u32, u32>,
///     value: i32,
/// }
///
/// impl Operator for Fill {
///     type Action = u32;
///     type Context = u32;
///
///     fn name(&self) -> &str { "fill" }
///
///     fn spaces(&self) -> &OperatorSpaces<u32, u32> { &self.spaces }
///
///     fn apply(
///         &self,
///         mut grid: Grid,
///         _action: &u32,
///         context: u32,
///         _rng: &mut dyn RngCore,
///     ) -> Result<(Grid, u32), OperatorError> {
///         grid.cells_mut().fill(self.value);
///         Ok((grid, context))
///     }
/// }
///
/// let grid_space = GridSpace::builder().n(4).shape([2, 2]).build().unwrap();
/// let spaces = OperatorSpaces::new(
///     grid_space,
///     Arc::new(Discrete::new(2).unwrap()),
///     Arc::new(Discrete::new(2).unwrap()),
/// );
/// let fill = Fill { spaces, value: 3 };
/// assert_eq!(fill.name(), "fill");
/// ```
pub trait Operator: Send + 'static {
    /// Action type consumed by the transition.
    type Action;
    /// Context type threaded alongside the grid.
    type Context;

    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// The spaces this operator accepts.
    fn spaces(&self) -> &OperatorSpaces<Self::Action, Self::Context>;

    /// Compute one transition.
    fn apply(
        &self,
        grid: Grid,
        action: &Self::Action,
        context: Self::Context,
        rng: &mut dyn RngCore,
    ) -> Result<(Grid, Self::Context), OperatorError>;
}
