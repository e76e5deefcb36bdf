//! The core `Space` trait.

use rand::RngCore;

/// A typed value domain with sampling and membership testing.
///
/// Grid, action, context, and observation spaces all implement this trait.
/// Operators declare the spaces they accept so inputs can be validated
/// before a transition runs.
///
/// # Object Safety
///
/// The generator is passed as `&mut dyn RngCore`, so the trait can be used
/// as `dyn Space<Value = V>`. Operators share spaces as
/// `Arc<dyn Space<Value = V>>`.
///
/// # Purity
///
/// `contains` must not mutate its argument. `sample` has no side effects
/// beyond consuming randomness from `rng`, so two spaces sampled from
/// identically seeded generators yield identical values.
pub trait Space: Send + Sync + 'static {
    /// The type of the members of this space.
    type Value;

    /// Draw a random member.
    fn sample(&self, rng: &mut dyn RngCore) -> Self::Value;

    /// Whether `x` is a member of this space.
    fn contains(&self, x: &Self::Value) -> bool;
}
