//! Property tests for grid-space sampling and membership.

use kindle_core::Grid;
use kindle_space::{GridSpace, Space};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    #[test]
    fn sample_has_shape_and_domain(
        n in 1u64..12,
        rows in 1usize..10,
        cols in 1usize..10,
        seed in any::<u64>(),
    ) {
        let space = GridSpace::builder().n(n).shape([rows, cols]).build().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = space.sample(&mut rng);

        prop_assert_eq!(grid.shape().as_slice(), &[rows, cols]);
        prop_assert!(grid.cells().iter().all(|&v| v >= 0 && (v as u64) < n));
        prop_assert!(space.contains(&grid));
    }

    #[test]
    fn foreign_value_breaks_membership(
        values in prop::collection::btree_set(-20i32..20, 1..6),
        rows in 1usize..6,
        cols in 1usize..6,
        pick in any::<prop::sample::Index>(),
        seed in any::<u64>(),
    ) {
        let space = GridSpace::builder()
            .values(values.iter().copied())
            .shape([rows, cols])
            .build()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = space.sample(&mut rng);
        prop_assert!(space.contains(&grid));

        let foreign = (-100..100).find(|v| !values.contains(v)).unwrap();
        let i = pick.index(grid.len());
        grid.cells_mut()[i] = foreign;
        prop_assert!(!space.contains(&grid));
    }

    #[test]
    fn contains_does_not_mutate(n in 1u64..5, seed in any::<u64>()) {
        let space = GridSpace::builder().n(n).shape([4, 4]).build().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = space.sample(&mut rng);
        let before = grid.clone();
        let _ = space.contains(&grid);
        prop_assert_eq!(grid, before);
    }

    #[test]
    fn equal_seeds_sample_equal_grids(seed in any::<u64>()) {
        let space = GridSpace::builder()
            .n(3)
            .shape([5, 5])
            .probs(vec![0.2, 0.5, 0.3])
            .build()
            .unwrap();
        let a: Grid = space.sample(&mut ChaCha8Rng::seed_from_u64(seed));
        let b: Grid = space.sample(&mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }
}
