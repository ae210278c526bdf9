//! Fixed grid world maps and state indexing

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    gridworld::Cell,
};

/// The built-in 5x5 map: start in the top-left corner, goal in the
/// bottom-right, two monsters in between.
const DEFAULT_MAP: [&str; 5] = ["S..M.", ".....", ".....", ".M...", "....G"];

/// Immutable grid world map.
///
/// States are flat indices in `[0, rows * cols)` with
/// `index = row * cols + col`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: usize,
}

impl Grid {
    /// Parse a grid from text rows, one character per cell.
    ///
    /// Whitespace inside a row is ignored, so `"S . M"` and `"S.M"` are
    /// equivalent. All rows must have the same width. At most one `S` cell
    /// is allowed; when the map has none, the origin defaults to index 0
    /// (top-left corner).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut start = None;

        for (row_idx, row) in rows.iter().enumerate() {
            let row_start = cells.len();
            for (col_idx, c) in row
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .enumerate()
            {
                let cell = Cell::from_tag(c).ok_or(Error::InvalidCellCharacter {
                    character: c,
                    row: row_idx,
                    col: col_idx,
                })?;
                if cell == Cell::Start {
                    let index = cells.len();
                    if let Some(first) = start {
                        return Err(Error::MultipleStartCells {
                            first,
                            second: index,
                        });
                    }
                    start = Some(index);
                }
                cells.push(cell);
            }

            let width = cells.len() - row_start;
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(Error::RaggedGrid {
                        row: row_idx,
                        expected,
                        got: width,
                    });
                }
                Some(_) => {}
            }
        }

        let cols = cols.filter(|&c| c > 0).ok_or(Error::EmptyGrid)?;
        Ok(Self {
            rows: cells.len() / cols,
            cols,
            cells,
            start: start.unwrap_or(0),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of states
    pub fn num_states(&self) -> usize {
        self.cells.len()
    }

    /// Flat state index of the episode origin
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// Convert (row, col) to a flat state index.
    ///
    /// Returns `None` when either coordinate is out of range.
    pub fn state_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Convert a flat state index back to (row, col).
    ///
    /// Inverse of [`state_index`](Self::state_index) for valid indices.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.num_states());
        (index / self.cols, index % self.cols)
    }

    /// Cell tag at a state index
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Whether the cell at `index` ends an episode
    pub fn is_terminal(&self, index: usize) -> bool {
        self.cell(index).is_terminal()
    }

    /// Displace (row, col) by a unit delta, or `None` if the move leaves
    /// the grid.
    pub(crate) fn shifted(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
    ) -> Option<(usize, usize)> {
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    pub(crate) fn index_of(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }
}

impl Default for Grid {
    /// The built-in 5x5 map
    fn default() -> Self {
        Self::from_rows(&DEFAULT_MAP).expect("built-in map is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_layout() {
        let grid = Grid::default();
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.num_states(), 25);
        assert_eq!(grid.start_index(), 0);
        assert_eq!(grid.cell(0), Cell::Start);
        assert_eq!(grid.cell(3), Cell::Monster);
        assert_eq!(grid.cell(16), Cell::Monster);
        assert_eq!(grid.cell(24), Cell::Goal);
    }

    #[test]
    fn index_coordinate_round_trip() {
        let grid = Grid::default();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let index = grid.state_index(row, col).unwrap();
                assert_eq!(grid.coords(index), (row, col));
            }
        }
    }

    #[test]
    fn out_of_range_coordinates_rejected() {
        let grid = Grid::default();
        assert_eq!(grid.state_index(5, 0), None);
        assert_eq!(grid.state_index(0, 5), None);
    }

    #[test]
    fn whitespace_in_rows_ignored() {
        let grid = Grid::from_rows(&["S . G"]).unwrap();
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.cell(2), Cell::Goal);
    }

    #[test]
    fn missing_start_defaults_to_origin() {
        let grid = Grid::from_rows(&["G"]).unwrap();
        assert_eq!(grid.start_index(), 0);
        assert_eq!(grid.cell(0), Cell::Goal);
    }

    #[test]
    fn duplicate_start_rejected() {
        let err = Grid::from_rows(&["SS"]).unwrap_err();
        assert!(matches!(
            err,
            Error::MultipleStartCells {
                first: 0,
                second: 1
            }
        ));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Grid::from_rows(&["S..", ".."]).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedGrid {
                row: 1,
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn unknown_character_rejected() {
        let err = Grid::from_rows(&["S?G"]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCellCharacter {
                character: '?',
                row: 0,
                col: 1
            }
        ));
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(
            Grid::from_rows::<&str>(&[]).unwrap_err(),
            Error::EmptyGrid
        ));
    }
}
