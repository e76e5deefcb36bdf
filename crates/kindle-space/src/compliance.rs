//! Space trait compliance test helpers.
//!
//! These functions verify that a Space implementation satisfies the
//! sampling invariants required by the trait contract. Reused across all
//! space test modules (GridSpace, Discrete, MultiDiscrete, BoxSpace,
//! ObservationSpace).

use crate::space::Space;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt::Debug;

/// Assert that every sample is a member of the space.
pub fn assert_samples_contained<S: Space>(space: &S, draws: usize)
where
    S::Value: Debug,
{
    let mut rng = ChaCha8Rng::seed_from_u64(0xC0FFEE);
    for i in 0..draws {
        let x = space.sample(&mut rng);
        assert!(space.contains(&x), "sample {i} not contained: {x:?}");
    }
}

/// Assert that identically seeded generators produce identical samples.
pub fn assert_sampling_deterministic<S: Space>(space: &S)
where
    S::Value: Debug + PartialEq,
{
    let mut a = ChaCha8Rng::seed_from_u64(42);
    let mut b = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..8 {
        assert_eq!(space.sample(&mut a), space.sample(&mut b));
    }
}
