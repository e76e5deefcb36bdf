//! [`GridSpace`]: the space of lattices with a fixed shape and cell domain.

use std::fmt;

use kindle_core::{CellState, Grid, Shape};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, RngCore};

use crate::error::SpaceError;
use crate::space::Space;
use crate::value_set::ValueSet;

/// Tolerance on the sum of a sampling probability vector.
const PROB_SUM_TOLERANCE: f64 = 1e-6;

/// A space of grids with a declared shape and a finite set of cell values.
///
/// The value domain is either `{0, …, n-1}` or an explicit set of
/// admissible values. Sampling draws every cell independently according to
/// an optional per-value probability vector (uniform by default).
///
/// # Examples
///
/// ```
/// use kindle_space::{GridSpace, Space};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let space = GridSpace::builder().n(3).shape([2, 2]).build().unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let grid = space.sample(&mut rng);
/// assert!(space.contains(&grid));
/// assert_eq!(space.to_string(), "GridSpace(n=3, shape=[2, 2])");
///
/// let signed = GridSpace::builder().values([-1, 0, 1]).shape([2, 2]).build().unwrap();
/// assert_eq!(signed.to_string(), "GridSpace(values=[-1, 0, 1], shape=[2, 2])");
/// ```
#[derive(Clone, Debug)]
pub struct GridSpace {
    values: ValueSet,
    shape: Shape,
    probs: Option<Vec<f64>>,
    weights: Option<WeightedIndex<f64>>,
    from_values: bool,
    lowest: CellState,
    /// Pre-validated grid of the declared shape; `sample` overwrites its cells.
    template: Grid,
}

/// Builder for [`GridSpace`].
///
/// Required: `shape`, and one of `n` or `values`. When both domains are
/// given, the explicit `values` win.
#[derive(Clone, Debug, Default)]
pub struct GridSpaceBuilder {
    n: Option<u64>,
    values: Option<Vec<CellState>>,
    shape: Option<Shape>,
    probs: Option<Vec<f64>>,
}

impl GridSpace {
    /// Create a new builder.
    pub fn builder() -> GridSpaceBuilder {
        GridSpaceBuilder::default()
    }

    /// The declared shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of cells in a member grid.
    pub fn size(&self) -> usize {
        self.template.len()
    }

    /// Number of distinct cell values.
    pub fn n(&self) -> usize {
        self.values.len()
    }

    /// The admissible cell values, ascending.
    pub fn values(&self) -> &ValueSet {
        &self.values
    }

    /// Sampling probabilities paired with [`values`](Self::values), or
    /// `None` for uniform sampling.
    pub fn probs(&self) -> Option<&[f64]> {
        self.probs.as_deref()
    }

    /// Membership test on a raw row-major buffer.
    ///
    /// True iff `shape` equals the declared shape, the buffer length matches
    /// it, and every value is admissible.
    pub fn contains_cells(&self, shape: &[usize], cells: &[CellState]) -> bool {
        shape == self.shape.as_slice()
            && cells.len() == self.size()
            && cells.iter().all(|&v| self.values.contains(v))
    }

    fn draw(&self, rng: &mut dyn RngCore) -> CellState {
        let index = match &self.weights {
            Some(weights) => weights.sample(rng),
            None => rng.gen_range(0..self.values.len()),
        };
        // Both draws are below `values.len()`.
        self.values.get(index).unwrap_or(self.lowest)
    }
}

impl Space for GridSpace {
    type Value = Grid;

    fn sample(&self, rng: &mut dyn RngCore) -> Grid {
        let mut grid = self.template.clone();
        for cell in grid.cells_mut() {
            *cell = self.draw(rng);
        }
        grid
    }

    fn contains(&self, x: &Grid) -> bool {
        self.contains_cells(x.shape(), x.cells())
    }
}

impl PartialEq for GridSpace {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.values == other.values
    }
}

impl fmt::Display for GridSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from_values {
            write!(
                f,
                "GridSpace(values={:?}, shape={:?})",
                self.values.to_vec(),
                self.shape.as_slice()
            )
        } else {
            write!(
                f,
                "GridSpace(n={}, shape={:?})",
                self.values.len(),
                self.shape.as_slice()
            )
        }
    }
}

impl GridSpaceBuilder {
    /// Use the domain `{0, …, n-1}`.
    pub fn n(mut self, n: u64) -> Self {
        self.n = Some(n);
        self
    }

    /// Use an explicit set of admissible values (deduplicated and sorted).
    pub fn values(mut self, values: impl IntoIterator<Item = CellState>) -> Self {
        self.values = Some(values.into_iter().collect());
        self
    }

    /// Set the grid shape (required).
    pub fn shape(mut self, shape: impl AsRef<[usize]>) -> Self {
        self.shape = Some(Shape::from_slice(shape.as_ref()));
        self
    }

    /// Per-value sampling probabilities, paired with the sorted values.
    pub fn probs(mut self, probs: impl Into<Vec<f64>>) -> Self {
        self.probs = Some(probs.into());
        self
    }

    /// Build the space, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `shape` is missing, empty, or has a zero dimension
    /// - neither `n` nor `values` is set
    /// - `n` is zero or exceeds `i32::MAX`
    /// - `values` is empty
    /// - `probs` has the wrong length, a negative or non-finite entry, or
    ///   does not sum to 1
    pub fn build(self) -> Result<GridSpace, SpaceError> {
        let shape = self.shape.ok_or(SpaceError::MissingShape)?;

        let (values, from_values) = match (self.values, self.n) {
            (Some(values), _) => {
                let set = ValueSet::new(values);
                if set.is_empty() {
                    return Err(SpaceError::EmptyValues);
                }
                (set, true)
            }
            (None, Some(n)) => {
                if n == 0 || n > i32::MAX as u64 {
                    return Err(SpaceError::InvalidStateCount { n });
                }
                (ValueSet::range(n as u32), false)
            }
            (None, None) => return Err(SpaceError::MissingDomain),
        };

        let lowest = values.first().ok_or(SpaceError::EmptyValues)?;
        let template = Grid::filled(shape.clone(), lowest).map_err(|_| SpaceError::InvalidShape {
            shape: shape.clone(),
        })?;

        let weights = match &self.probs {
            Some(probs) => Some(validate_probs(probs, values.len())?),
            None => None,
        };

        Ok(GridSpace {
            values,
            shape,
            probs: self.probs,
            weights,
            from_values,
            lowest,
            template,
        })
    }
}

fn validate_probs(probs: &[f64], n: usize) -> Result<WeightedIndex<f64>, SpaceError> {
    if probs.len() != n {
        return Err(SpaceError::InvalidProbabilities {
            reason: format!("expected {n} probabilities, got {}", probs.len()),
        });
    }
    if let Some(p) = probs.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(SpaceError::InvalidProbabilities {
            reason: format!("probabilities must be finite and >= 0, got {p}"),
        });
    }
    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > PROB_SUM_TOLERANCE {
        return Err(SpaceError::InvalidProbabilities {
            reason: format!("probabilities must sum to 1, got {sum}"),
        });
    }
    WeightedIndex::new(probs).map_err(|e| SpaceError::InvalidProbabilities {
        reason: e.to_string(),
    })
}
