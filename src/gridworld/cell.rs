//! Cell tags for grid world maps

use serde::{Deserialize, Serialize};

/// One cell of a grid world map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Episode and playback origin
    Start,
    /// Walkable ground with a small per-step penalty
    Normal,
    /// Hazard; entering it ends the episode with a large negative reward
    Monster,
    /// Target; entering it ends the episode with a large positive reward
    Goal,
}

impl Cell {
    /// Map character used when parsing and printing grids
    pub fn tag(&self) -> char {
        match self {
            Cell::Start => 'S',
            Cell::Normal => '.',
            Cell::Monster => 'M',
            Cell::Goal => 'G',
        }
    }

    /// Parse a map character. Accepts `.` or `N` for normal ground.
    pub fn from_tag(c: char) -> Option<Cell> {
        match c {
            'S' | 's' => Some(Cell::Start),
            '.' | 'N' | 'n' => Some(Cell::Normal),
            'M' | 'm' => Some(Cell::Monster),
            'G' | 'g' => Some(Cell::Goal),
            _ => None,
        }
    }

    /// Terminal cells end an episode; no action is taken from them and
    /// they carry no continuation value.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Cell::Goal | Cell::Monster)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for cell in [Cell::Start, Cell::Normal, Cell::Monster, Cell::Goal] {
            assert_eq!(Cell::from_tag(cell.tag()), Some(cell));
        }
    }

    #[test]
    fn legacy_normal_tag_parses() {
        assert_eq!(Cell::from_tag('N'), Some(Cell::Normal));
    }

    #[test]
    fn unknown_tag_rejected() {
        assert_eq!(Cell::from_tag('?'), None);
    }

    #[test]
    fn only_goal_and_monster_are_terminal() {
        assert!(Cell::Goal.is_terminal());
        assert!(Cell::Monster.is_terminal());
        assert!(!Cell::Start.is_terminal());
        assert!(!Cell::Normal.is_terminal());
    }
}
