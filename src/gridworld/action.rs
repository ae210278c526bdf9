//! Movement actions

use serde::{Deserialize, Serialize};

/// The four unit movement directions.
///
/// Declaration order defines the action index (0..4) used by the Q-table
/// and the tie-break order for greedy selection: the first maximum wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in index order
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Number of actions
    pub const COUNT: usize = Self::ALL.len();

    /// Column index of this action in the Q-table
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Unit displacement as (row delta, column delta)
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// Uppercase name used in playback traces
    pub fn name(&self) -> &'static str {
        match self {
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
