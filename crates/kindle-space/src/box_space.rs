//! [`BoxSpace`]: real-valued arrays bounded by a closed interval.

use kindle_core::Shape;
use rand::{Rng, RngCore};

use crate::error::SpaceError;
use crate::space::Space;

/// Arrays of `f64` of a fixed shape with every entry in `[low, high]`.
///
/// Values are carried flat (row-major); the shape fixes their length.
/// NaN is never contained.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSpace {
    low: f64,
    high: f64,
    shape: Shape,
    len: usize,
}

impl BoxSpace {
    /// Create a box space.
    ///
    /// # Errors
    ///
    /// Fails if either bound is non-finite, `low > high`, or the shape is
    /// empty or has a zero dimension.
    pub fn new(low: f64, high: f64, shape: impl AsRef<[usize]>) -> Result<Self, SpaceError> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(SpaceError::InvalidBounds { low, high });
        }
        let shape = Shape::from_slice(shape.as_ref());
        if shape.is_empty() || shape.contains(&0) {
            return Err(SpaceError::InvalidShape { shape });
        }
        let len = shape.iter().product();
        Ok(Self {
            low,
            high,
            shape,
            len,
        })
    }

    /// The unit interval `[0, 1]` over the given shape.
    pub fn unit(shape: impl AsRef<[usize]>) -> Result<Self, SpaceError> {
        Self::new(0.0, 1.0, shape)
    }

    /// Lower bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Declared shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Membership test on a borrowed slice.
    pub fn contains_slice(&self, x: &[f64]) -> bool {
        x.len() == self.len && x.iter().all(|v| (self.low..=self.high).contains(v))
    }
}

impl Space for BoxSpace {
    type Value = Vec<f64>;

    fn sample(&self, rng: &mut dyn RngCore) -> Vec<f64> {
        (0..self.len)
            .map(|_| rng.gen_range(self.low..=self.high))
            .collect()
    }

    fn contains(&self, x: &Vec<f64>) -> bool {
        self.contains_slice(x)
    }
}
