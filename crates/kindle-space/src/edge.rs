//! Lattice edge (boundary) behavior.

/// How coordinates that step off the lattice are resolved.
///
/// Used by neighbourhood lookups (which cells count as neighbours of a
/// boundary cell) and by movement (where an agent ends up when it walks
/// into a wall).
///
/// # Examples
///
/// ```
/// use kindle_space::EdgeBehavior;
///
/// assert_eq!(EdgeBehavior::Absorb.resolve(-1, 5), None);
/// assert_eq!(EdgeBehavior::Clamp.resolve(7, 5), Some(4));
/// assert_eq!(EdgeBehavior::Wrap.resolve(-1, 5), Some(4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds coordinate maps to the boundary cell.
    Clamp,
    /// Out-of-bounds coordinate wraps to the opposite side (periodic).
    Wrap,
    /// Out-of-bounds coordinate is dropped (fewer neighbours at edges).
    #[default]
    Absorb,
}

impl EdgeBehavior {
    /// Resolve `val` on an axis of length `len`.
    ///
    /// Returns `Some(index)` or `None` for an absorbed out-of-bounds value.
    /// An axis of length zero resolves nothing.
    pub fn resolve(self, val: i64, len: usize) -> Option<usize> {
        let n = len as i64;
        if n == 0 {
            return None;
        }
        if (0..n).contains(&val) {
            return Some(val as usize);
        }
        match self {
            Self::Absorb => None,
            Self::Clamp => Some(val.clamp(0, n - 1) as usize),
            Self::Wrap => Some(val.rem_euclid(n) as usize),
        }
    }
}
