//! Moore-neighbourhood lookup for 2-D lattices.

use kindle_space::EdgeBehavior;
use smallvec::SmallVec;

/// The eight `(dr, dc)` offsets around a cell, row-major.
pub(crate) const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Flat indices of the Moore neighbours of `(r, c)` paired with their
/// offset, respecting `edge`.
pub(crate) fn moore_neighbours(
    r: usize,
    c: usize,
    rows: usize,
    cols: usize,
    edge: EdgeBehavior,
) -> SmallVec<[((i64, i64), usize); 8]> {
    let mut result = SmallVec::new();
    for (dr, dc) in MOORE_OFFSETS {
        let nr = edge.resolve(r as i64 + dr, rows);
        let nc = edge.resolve(c as i64 + dc, cols);
        if let (Some(nr), Some(nc)) = (nr, nc) {
            result.push(((dr, dc), nr * cols + nc));
        }
    }
    result
}
