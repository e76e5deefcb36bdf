//! Cell symbols for the forest-fire lattice.

use kindle_core::CellState;

/// The three cell values the forest-fire rules act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellSymbols {
    /// Bare ground; may regrow into a tree.
    pub empty: CellState,
    /// A tree; may catch fire.
    pub tree: CellState,
    /// A burning cell; becomes empty after one sweep.
    pub fire: CellState,
}

impl CellSymbols {
    /// Create a symbol table.
    ///
    /// Returns `Err` if two symbols share a value.
    pub fn new(empty: CellState, tree: CellState, fire: CellState) -> Result<Self, String> {
        if empty == tree || empty == fire || tree == fire {
            return Err(format!(
                "cell symbols must be distinct, got empty={empty} tree={tree} fire={fire}"
            ));
        }
        Ok(Self { empty, tree, fire })
    }

    /// `[empty, tree, fire]`.
    pub fn values(&self) -> [CellState; 3] {
        [self.empty, self.tree, self.fire]
    }

    /// Look up a symbol by its configuration name.
    pub fn by_name(&self, name: &str) -> Option<CellState> {
        match name {
            "empty" => Some(self.empty),
            "tree" => Some(self.tree),
            "fire" => Some(self.fire),
            _ => None,
        }
    }
}

impl Default for CellSymbols {
    fn default() -> Self {
        Self {
            empty: 0,
            tree: 1,
            fire: 2,
        }
    }
}
