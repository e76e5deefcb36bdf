//! The [`Grid`] lattice and its [`Shape`].

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::error::GridError;

/// A single cell value.
pub type CellState = i32;

/// Lattice dimensions, outermost first.
///
/// The `SmallVec<[usize; 2]>` keeps the common 2-D case inline.
pub type Shape = SmallVec<[usize; 2]>;

/// A fixed-shape, row-major array of cell states.
///
/// The shape is set at construction and never changes; only cell values
/// can be mutated. Membership of the values in a particular domain is
/// checked by the grid space, not by the grid itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    shape: Shape,
    cells: Vec<CellState>,
}

impl Grid {
    /// Build a grid from a shape and a row-major cell buffer.
    pub fn new(shape: impl Into<Shape>, cells: Vec<CellState>) -> Result<Self, GridError> {
        let shape = shape.into();
        let expected = checked_len(&shape)?;
        if cells.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { shape, cells })
    }

    /// Build a grid with every cell set to `value`.
    pub fn filled(shape: impl Into<Shape>, value: CellState) -> Result<Self, GridError> {
        let shape = shape.into();
        let len = checked_len(&shape)?;
        Ok(Self {
            shape,
            cells: vec![value; len],
        })
    }

    /// Build a 2-D grid from nested rows.
    ///
    /// ```
    /// use kindle_core::Grid;
    ///
    /// let grid = Grid::from_rows(vec![vec![2, 2], vec![1, 0]]).unwrap();
    /// assert_eq!(grid.shape().as_slice(), &[2, 2]);
    /// assert_eq!(grid.get(1, 0), Some(1));
    /// ```
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, GridError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().position(|r| r.len() != n_cols) {
            return Err(GridError::RaggedRows { row });
        }
        let cells = rows.into_iter().flatten().collect();
        Self::new(SmallVec::from_slice(&[n_rows, n_cols]), cells)
    }

    /// The grid's dimensions.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects zero-sized shapes.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of rows (first dimension).
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Number of columns (second dimension, 1 for a 1-D grid).
    pub fn cols(&self) -> usize {
        self.shape.get(1).copied().unwrap_or(1)
    }

    /// Row-major cell buffer.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Mutable row-major cell buffer. The length cannot change.
    pub fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    /// Flat index of `(row, col)`, or `None` if out of bounds.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows() && col < self.cols() {
            Some(row * self.cols() + col)
        } else {
            None
        }
    }

    /// Value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Overwrite the value at `(row, col)`.
    ///
    /// Returns the previous value, or `None` if the position is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: CellState) -> Option<CellState> {
        let i = self.index(row, col)?;
        Some(std::mem::replace(&mut self.cells[i], value))
    }

    /// Number of cells holding `value`.
    pub fn count(&self, value: CellState) -> usize {
        self.cells.iter().filter(|&&v| v == value).count()
    }

    /// Per-value cell counts, ordered by value.
    pub fn count_cells(&self) -> BTreeMap<CellState, usize> {
        let mut counts = BTreeMap::new();
        for &v in &self.cells {
            *counts.entry(v).or_insert(0) += 1;
        }
        counts
    }
}

/// Product of the dimensions, rejecting empty shapes and zero dimensions.
pub(crate) fn checked_len(shape: &Shape) -> Result<usize, GridError> {
    if shape.is_empty() || shape.contains(&0) {
        return Err(GridError::InvalidShape {
            shape: shape.clone(),
        });
    }
    shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| GridError::InvalidShape {
            shape: shape.clone(),
        })
}
