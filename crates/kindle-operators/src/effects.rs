//! The effects table applied under the agent.

use indexmap::IndexMap;
use kindle_core::CellState;

/// Maps a source cell value to its replacement.
///
/// With the default forest-fire configuration the table is `fire → empty`:
/// the agent puts out the fire it lands on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    table: IndexMap<CellState, CellState>,
}

impl Effects {
    /// Build from `(source, replacement)` pairs. Later pairs win.
    pub fn new(pairs: impl IntoIterator<Item = (CellState, CellState)>) -> Self {
        Self {
            table: pairs.into_iter().collect(),
        }
    }

    /// Replacement for `source`, if any.
    pub fn get(&self, source: CellState) -> Option<CellState> {
        self.table.get(&source).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (CellState, CellState)> + '_ {
        self.table.iter().map(|(&k, &v)| (k, v))
    }
}
