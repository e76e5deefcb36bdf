//! Integer spaces: [`Discrete`] and [`MultiDiscrete`].

use rand::{Rng, RngCore};
use smallvec::SmallVec;

use crate::error::SpaceError;
use crate::space::Space;

/// A point in a [`MultiDiscrete`] space, one entry per axis.
pub type MultiIndex = SmallVec<[u32; 2]>;

/// The integers `{0, …, n-1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Discrete {
    n: u32,
}

impl Discrete {
    /// Create a space of `n` values.
    ///
    /// Returns `Err(SpaceError::InvalidStateCount)` if `n == 0`.
    pub fn new(n: u32) -> Result<Self, SpaceError> {
        if n == 0 {
            return Err(SpaceError::InvalidStateCount { n: 0 });
        }
        Ok(Self { n })
    }

    /// Number of values.
    pub fn n(&self) -> u32 {
        self.n
    }
}

impl Space for Discrete {
    type Value = u32;

    fn sample(&self, rng: &mut dyn RngCore) -> u32 {
        rng.gen_range(0..self.n)
    }

    fn contains(&self, x: &u32) -> bool {
        *x < self.n
    }
}

/// A product of discrete axes: entry `i` ranges over `0..nvec[i]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MultiDiscrete {
    nvec: MultiIndex,
}

impl MultiDiscrete {
    /// Create a space with one axis per entry of `nvec`.
    ///
    /// Every axis must have at least one value.
    pub fn new(nvec: impl AsRef<[u32]>) -> Result<Self, SpaceError> {
        let nvec = MultiIndex::from_slice(nvec.as_ref());
        if nvec.is_empty() {
            return Err(SpaceError::InvalidShape {
                shape: Default::default(),
            });
        }
        if nvec.contains(&0) {
            return Err(SpaceError::InvalidStateCount { n: 0 });
        }
        Ok(Self { nvec })
    }

    /// Per-axis value counts.
    pub fn nvec(&self) -> &[u32] {
        &self.nvec
    }
}

impl Space for MultiDiscrete {
    type Value = MultiIndex;

    fn sample(&self, rng: &mut dyn RngCore) -> MultiIndex {
        self.nvec.iter().map(|&n| rng.gen_range(0..n)).collect()
    }

    fn contains(&self, x: &MultiIndex) -> bool {
        x.len() == self.nvec.len() && x.iter().zip(&self.nvec).all(|(v, n)| v < n)
    }
}
