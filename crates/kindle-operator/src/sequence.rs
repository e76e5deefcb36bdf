//! Sequential composition of operators.
//!
//! [`Sequence::new`] runs once at construction to check the stage list
//! for structural errors. Each call to `apply` then validates a stage's
//! inputs against that stage's declared spaces before running it, so a
//! mismatch between stages is reported by name instead of surfacing as a
//! corrupted grid further down the pipeline.

use std::error::Error;
use std::fmt;

use kindle_core::{Grid, OperatorError};
use rand::RngCore;

use crate::operator::{Operator, OperatorSpaces};

/// A boxed stage of a [`Sequence`].
pub type Stage<A, C> = Box<dyn Operator<Action = A, Context = C>>;

/// Errors from composite construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No stages registered.
    EmptyPipeline,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPipeline => write!(f, "pipeline has no operators"),
        }
    }
}

impl Error for PipelineError {}

/// Threads grid and context through its stages in insertion order.
///
/// The declared spaces of a sequence are those of its first stage; later
/// stages are validated against their own spaces as the pipeline runs.
pub struct Sequence<A, C> {
    name: String,
    spaces: OperatorSpaces<A, C>,
    stages: Vec<Stage<A, C>>,
}

impl<A: 'static, C: 'static> Sequence<A, C> {
    /// Build a sequence from an ordered list of stages.
    ///
    /// Returns `Err(PipelineError::EmptyPipeline)` if `stages` is empty.
    pub fn new(name: impl Into<String>, stages: Vec<Stage<A, C>>) -> Result<Self, PipelineError> {
        let spaces = stages
            .first()
            .ok_or(PipelineError::EmptyPipeline)?
            .spaces()
            .clone();
        Ok(Self {
            name: name.into(),
            spaces,
            stages,
        })
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always `false`: construction rejects empty pipelines.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl<A: fmt::Debug + 'static, C: 'static> Operator for Sequence<A, C> {
    type Action = A;
    type Context = C;

    fn name(&self) -> &str {
        &self.name
    }

    fn spaces(&self) -> &OperatorSpaces<A, C> {
        &self.spaces
    }

    fn apply(
        &self,
        mut grid: Grid,
        action: &A,
        mut context: C,
        rng: &mut dyn RngCore,
    ) -> Result<(Grid, C), OperatorError> {
        for stage in &self.stages {
            stage.spaces().validate(&grid, action, &context)?;
            (grid, context) = stage.apply(grid, action, context, rng)?;
        }
        Ok((grid, context))
    }
}

impl<A: 'static, C: 'static> fmt::Debug for Sequence<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("name", &self.name)
            .field("stages", &self.stage_names())
            .finish()
    }
}
