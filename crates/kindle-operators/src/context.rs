//! The forest-fire context threaded alongside the grid.

use kindle_core::Shape;
use kindle_space::{BoxSpace, Discrete, MultiDiscrete, Space, SpaceError};
use rand::RngCore;

/// Cellular-automaton parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaParams {
    /// Probability that an empty cell grows a tree in one sweep.
    pub p_tree: f64,
    /// Probability that a tree with no spreading neighbour is struck by
    /// lightning in one sweep.
    pub p_fire: f64,
}

/// Agent position on the lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Position {
    /// Create a position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Everything besides the grid that a forest-fire step reads or writes.
#[derive(Clone, Debug, PartialEq)]
pub struct ForestFireContext {
    /// CA parameters.
    pub params: CaParams,
    /// Where the agent stands.
    pub position: Position,
    /// Steps left before the next CA sweep.
    pub freeze: u32,
    /// Cells modified by the agent since the last reset.
    pub hits: u64,
}

/// Space of valid [`ForestFireContext`] values.
///
/// Parameters lie in `[0, 1]`, the position is on a `rows x cols`
/// lattice, and `freeze` is at most the configured interval. `hits` is
/// unconstrained.
#[derive(Clone, Debug)]
pub struct ForestFireContextSpace {
    params: BoxSpace,
    position: MultiDiscrete,
    freeze: Discrete,
}

impl ForestFireContextSpace {
    /// Build the space for a `rows x cols` lattice and a freeze interval.
    pub fn new(rows: usize, cols: usize, max_freeze: u32) -> Result<Self, SpaceError> {
        let invalid = || SpaceError::InvalidShape {
            shape: Shape::from_slice(&[rows, cols]),
        };
        let rows32 = u32::try_from(rows).map_err(|_| invalid())?;
        let cols32 = u32::try_from(cols).map_err(|_| invalid())?;
        let freeze_n = max_freeze
            .checked_add(1)
            .ok_or(SpaceError::InvalidStateCount {
                n: u64::from(max_freeze) + 1,
            })?;
        Ok(Self {
            params: BoxSpace::unit([2])?,
            position: MultiDiscrete::new([rows32, cols32]).map_err(|_| invalid())?,
            freeze: Discrete::new(freeze_n)?,
        })
    }

    /// Largest admissible `freeze` value.
    pub fn max_freeze(&self) -> u32 {
        self.freeze.n() - 1
    }

    /// Lattice `(rows, cols)` the position ranges over.
    pub fn lattice(&self) -> (usize, usize) {
        let nvec = self.position.nvec();
        (nvec[0] as usize, nvec[1] as usize)
    }
}

impl Space for ForestFireContextSpace {
    type Value = ForestFireContext;

    fn sample(&self, rng: &mut dyn RngCore) -> ForestFireContext {
        let params = self.params.sample(rng);
        let position = self.position.sample(rng);
        ForestFireContext {
            params: CaParams {
                p_tree: params[0],
                p_fire: params[1],
            },
            position: Position::new(position[0] as usize, position[1] as usize),
            freeze: self.freeze.sample(rng),
            hits: 0,
        }
    }

    fn contains(&self, x: &ForestFireContext) -> bool {
        let (rows, cols) = self.lattice();
        self.params.contains_slice(&[x.params.p_tree, x.params.p_fire])
            && x.position.row < rows
            && x.position.col < cols
            && self.freeze.contains(&x.freeze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn context(row: usize, col: usize, freeze: u32) -> ForestFireContext {
        ForestFireContext {
            params: CaParams {
                p_tree: 0.1,
                p_fire: 0.0,
            },
            position: Position::new(row, col),
            freeze,
            hits: 7,
        }
    }

    #[test]
    fn contains_checks_each_part() {
        let space = ForestFireContextSpace::new(3, 4, 10).unwrap();
        assert!(space.contains(&context(2, 3, 10)));
        assert!(!space.contains(&context(3, 0, 0)));
        assert!(!space.contains(&context(0, 4, 0)));
        assert!(!space.contains(&context(0, 0, 11)));

        let mut bad = context(0, 0, 0);
        bad.params.p_fire = 1.5;
        assert!(!space.contains(&bad));
        bad.params.p_fire = f64::NAN;
        assert!(!space.contains(&bad));
    }

    #[test]
    fn samples_are_members() {
        let space = ForestFireContextSpace::new(5, 2, 3).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let ctx = space.sample(&mut rng);
            assert!(space.contains(&ctx));
            assert_eq!(ctx.hits, 0);
        }
    }

    #[test]
    fn zero_freeze_admits_only_zero() {
        let space = ForestFireContextSpace::new(1, 1, 0).unwrap();
        assert_eq!(space.max_freeze(), 0);
        assert!(space.contains(&context(0, 0, 0)));
        assert!(!space.contains(&context(0, 0, 1)));
    }

    #[test]
    fn empty_lattice_rejected() {
        assert!(ForestFireContextSpace::new(0, 3, 1).is_err());
    }
}
