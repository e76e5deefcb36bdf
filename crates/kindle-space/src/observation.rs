//! [`ObservationSpace`]: a grid space paired with a context space.

use kindle_core::Observation;
use rand::RngCore;

use crate::grid_space::GridSpace;
use crate::space::Space;

/// The space of `(grid, context)` observations.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationSpace<CS> {
    grid: GridSpace,
    context: CS,
}

impl<CS: Space> ObservationSpace<CS> {
    /// Pair a grid space with a context space.
    pub fn new(grid: GridSpace, context: CS) -> Self {
        Self { grid, context }
    }

    /// The grid component.
    pub fn grid_space(&self) -> &GridSpace {
        &self.grid
    }

    /// The context component.
    pub fn context_space(&self) -> &CS {
        &self.context
    }
}

impl<CS: Space> Space for ObservationSpace<CS> {
    type Value = Observation<CS::Value>;

    fn sample(&self, rng: &mut dyn RngCore) -> Self::Value {
        let grid = self.grid.sample(rng);
        let context = self.context.sample(rng);
        Observation::new(grid, context)
    }

    fn contains(&self, x: &Self::Value) -> bool {
        self.grid.contains(&x.grid) && self.context.contains(&x.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::discrete::Discrete;
    use kindle_core::{Grid, Shape};

    fn space() -> ObservationSpace<Discrete> {
        let grid = GridSpace::builder().n(4).shape([3, 3]).build().unwrap();
        ObservationSpace::new(grid, Discrete::new(5).unwrap())
    }

    #[test]
    fn both_components_must_match() {
        let space = space();
        let grid = Grid::filled(Shape::from_slice(&[3, 3]), 3).unwrap();
        assert!(space.contains(&Observation::new(grid.clone(), 4)));
        assert!(!space.contains(&Observation::new(grid, 5)));

        let bad_grid = Grid::filled(Shape::from_slice(&[3, 3]), 4).unwrap();
        assert!(!space.contains(&Observation::new(bad_grid, 0)));
    }

    #[test]
    fn observation_compliance() {
        let space = space();
        compliance::assert_samples_contained(&space, 16);
        compliance::assert_sampling_deterministic(&space);
    }
}
