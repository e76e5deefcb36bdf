//! Agent movement directions and the action table that indexes them.

use std::fmt;

/// One of the nine cells of a 3x3 neighbourhood, centre included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `(-1, -1)`
    UpLeft,
    /// `(-1, 0)`
    Up,
    /// `(-1, 1)`
    UpRight,
    /// `(0, -1)`
    Left,
    /// `(0, 0)`: the agent stays put.
    Stay,
    /// `(0, 1)`
    Right,
    /// `(1, -1)`
    DownLeft,
    /// `(1, 0)`
    Down,
    /// `(1, 1)`
    DownRight,
}

impl Direction {
    /// All directions in row-major order of the 3x3 layout.
    pub const ALL: [Direction; 9] = [
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
        Direction::Left,
        Direction::Stay,
        Direction::Right,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// `(row, col)` displacement.
    pub fn offset(self) -> (i64, i64) {
        let i = self as i64;
        (i / 3 - 1, i % 3 - 1)
    }

    /// Configuration name of the action that moves this way.
    pub fn action_name(self) -> &'static str {
        match self {
            Direction::UpLeft => "up_left",
            Direction::Up => "up_center",
            Direction::UpRight => "up_right",
            Direction::Left => "middle_left",
            Direction::Stay => "middle_center",
            Direction::Right => "middle_right",
            Direction::DownLeft => "down_left",
            Direction::Down => "down_center",
            Direction::DownRight => "down_right",
        }
    }

    /// Configuration name of the wind entry blowing this way.
    pub fn wind_name(self) -> &'static str {
        match self {
            Direction::UpLeft => "up_left",
            Direction::Up => "up",
            Direction::UpRight => "up_right",
            Direction::Left => "left",
            Direction::Stay => "self",
            Direction::Right => "right",
            Direction::DownLeft => "down_left",
            Direction::Down => "down",
            Direction::DownRight => "down_right",
        }
    }

    /// Inverse of [`Direction::action_name`].
    pub fn from_action_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.action_name() == name)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_name())
    }
}

/// Why an [`ActionTable`] could not be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionTableError {
    /// An index lies outside `0..9`.
    OutOfRange {
        /// The direction the index was given for.
        direction: Direction,
        /// The rejected index.
        index: u32,
    },
    /// Two assignments share an index.
    DuplicateIndex {
        /// The shared index.
        index: u32,
    },
    /// A direction was assigned more than once.
    DuplicateDirection {
        /// The repeated direction.
        direction: Direction,
    },
    /// A direction has no index.
    Missing {
        /// The unassigned direction.
        direction: Direction,
    },
}

impl fmt::Display for ActionTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { direction, index } => {
                write!(f, "action index {index} for '{direction}' is not in 0..9")
            }
            Self::DuplicateIndex { index } => write!(f, "action index {index} is used twice"),
            Self::DuplicateDirection { direction } => {
                write!(f, "action '{direction}' is assigned twice")
            }
            Self::Missing { direction } => write!(f, "action '{direction}' has no index"),
        }
    }
}

impl std::error::Error for ActionTableError {}

/// Maps action indices `0..9` to directions.
///
/// Every direction appears exactly once. The default table uses the
/// row-major order of [`Direction::ALL`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTable {
    by_index: [Direction; 9],
}

impl ActionTable {
    /// Build from `(direction, index)` assignments.
    pub fn new(
        pairs: impl IntoIterator<Item = (Direction, u32)>,
    ) -> Result<Self, ActionTableError> {
        let mut slots: [Option<Direction>; 9] = [None; 9];
        let mut seen = [false; 9];
        for (direction, index) in pairs {
            let slot = slots
                .get_mut(index as usize)
                .ok_or(ActionTableError::OutOfRange { direction, index })?;
            if slot.is_some() {
                return Err(ActionTableError::DuplicateIndex { index });
            }
            if seen[direction as usize] {
                return Err(ActionTableError::DuplicateDirection { direction });
            }
            seen[direction as usize] = true;
            *slot = Some(direction);
        }

        if let Some(direction) = Direction::ALL.into_iter().find(|d| !seen[*d as usize]) {
            return Err(ActionTableError::Missing { direction });
        }
        let mut by_index = Direction::ALL;
        for (i, slot) in slots.into_iter().enumerate() {
            if let Some(d) = slot {
                by_index[i] = d;
            }
        }
        Ok(Self { by_index })
    }

    /// Number of actions (always 9).
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Direction for an action index.
    pub fn direction(&self, action: u32) -> Option<Direction> {
        self.by_index.get(action as usize).copied()
    }

    /// Action index that moves in `direction`.
    pub fn index_of(&self, direction: Direction) -> u32 {
        self.by_index
            .iter()
            .position(|&d| d == direction)
            .unwrap_or_default() as u32
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self {
            by_index: Direction::ALL,
        }
    }
}
