//! The [`ValueSet`] cell-value domain.

use kindle_core::CellState;

/// A sorted, deduplicated set of admissible cell values.
///
/// A contiguous domain `{lo, …, hi-1}` is stored as its bounds. Any other
/// set keeps its sorted values; membership is O(1) through a bitset when
/// they span a small range (the common case: a handful of cell symbols)
/// and falls back to binary search otherwise.
#[derive(Clone, Debug)]
pub struct ValueSet {
    repr: Repr,
}

#[derive(Clone, Debug)]
enum Repr {
    /// `lo..hi`, never empty.
    Range { lo: CellState, hi: CellState },
    Sorted {
        values: Vec<CellState>,
        bits: Option<Vec<u64>>,
    },
}

impl ValueSet {
    const BITS_PER_WORD: usize = 64;
    /// Largest `max - min + 1` backed by a bitset (8 KiB of words).
    const MAX_BITSET_SPAN: u64 = 1 << 16;

    /// Build a set from arbitrary values, sorting and deduplicating.
    pub fn new(values: impl IntoIterator<Item = CellState>) -> Self {
        let mut values: Vec<CellState> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();

        let bits = match (values.first(), values.last()) {
            (Some(&lo), Some(&hi)) => {
                let span = (hi as i64 - lo as i64) as u64 + 1;
                (span <= Self::MAX_BITSET_SPAN).then(|| {
                    let mut bits = vec![0u64; (span as usize).div_ceil(Self::BITS_PER_WORD)];
                    for &v in &values {
                        let off = (v as i64 - lo as i64) as usize;
                        bits[off / Self::BITS_PER_WORD] |= 1u64 << (off % Self::BITS_PER_WORD);
                    }
                    bits
                })
            }
            _ => None,
        };

        Self {
            repr: Repr::Sorted { values, bits },
        }
    }

    /// The set `{0, …, n-1}`, stored as its bounds.
    ///
    /// `n` is capped at `i32::MAX`; `n = 0` gives the empty set.
    pub fn range(n: u32) -> Self {
        let hi = n.min(i32::MAX as u32) as CellState;
        if hi == 0 {
            return Self::new([]);
        }
        Self {
            repr: Repr::Range { lo: 0, hi },
        }
    }

    /// Whether `value` is a member.
    pub fn contains(&self, value: CellState) -> bool {
        match &self.repr {
            Repr::Range { lo, hi } => (*lo..*hi).contains(&value),
            Repr::Sorted {
                values,
                bits: Some(bits),
            } => match (values.first(), values.last()) {
                (Some(&lo), Some(&hi)) if (lo..=hi).contains(&value) => {
                    let off = (value as i64 - lo as i64) as usize;
                    bits[off / Self::BITS_PER_WORD] & (1u64 << (off % Self::BITS_PER_WORD)) != 0
                }
                _ => false,
            },
            Repr::Sorted { values, bits: None } => values.binary_search(&value).is_ok(),
        }
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Range { lo, hi } => (*hi as i64 - *lo as i64) as usize,
            Repr::Sorted { values, .. } => values.len(),
        }
    }

    /// Whether the set has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th smallest value, or `None` if `i >= len()`.
    pub fn get(&self, i: usize) -> Option<CellState> {
        match &self.repr {
            Repr::Range { lo, .. } => {
                (i < self.len()).then(|| (*lo as i64 + i as i64) as CellState)
            }
            Repr::Sorted { values, .. } => values.get(i).copied(),
        }
    }

    /// Smallest value.
    pub fn first(&self) -> Option<CellState> {
        self.get(0)
    }

    /// Iterate over values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CellState> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Values in ascending order, collected.
    pub fn to_vec(&self) -> Vec<CellState> {
        self.iter().collect()
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Range { lo: a, hi: b }, Repr::Range { lo: c, hi: d }) => a == c && b == d,
            // The bitset is derived from `values`, so comparing values is sufficient.
            _ => self.len() == other.len() && self.iter().eq(other.iter()),
        }
    }
}

impl Eq for ValueSet {}

impl FromIterator<CellState> for ValueSet {
    fn from_iter<I: IntoIterator<Item = CellState>>(iter: I) -> Self {
        Self::new(iter)
    }
}
