//! Board coordinates and neighborhood iteration

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(row, col)` coordinate on a Minesweeper board, 0-indexed.
///
/// Cells order row-major, so sets of cells iterate top-left to bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Check if the cell lies on a `height` x `width` board
    pub fn in_bounds(self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// Iterate the up-to-8 cells at Chebyshev distance 1, clipped to the board.
    ///
    /// The cell itself is never yielded.
    pub fn neighbors(self, height: usize, width: usize) -> impl Iterator<Item = Cell> {
        let rows = self.row.saturating_sub(1)..(self.row + 2).min(height);
        rows.flat_map(move |row| {
            let cols = self.col.saturating_sub(1)..(self.col + 2).min(width);
            cols.map(move |col| Cell { row, col })
        })
        .filter(move |&cell| cell != self)
    }

    /// Iterate every cell of a `height` x `width` board in row-major order
    pub fn all(height: usize, width: usize) -> impl Iterator<Item = Cell> {
        (0..height).flat_map(move |row| (0..width).map(move |col| Cell { row, col }))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<Cell> = Cell::new(0, 0).neighbors(8, 8).collect();
        assert_eq!(
            neighbors,
            vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let neighbors: Vec<Cell> = Cell::new(3, 4).neighbors(8, 8).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&Cell::new(3, 4)));
    }

    #[test]
    fn edge_neighbors_are_clipped() {
        let neighbors: Vec<Cell> = Cell::new(7, 3).neighbors(8, 8).collect();
        assert_eq!(neighbors.len(), 5);
        assert!(neighbors.iter().all(|c| c.in_bounds(8, 8)));
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(Cell::new(0, 0).neighbors(1, 1).count(), 0);
    }

    #[test]
    fn all_is_row_major() {
        let cells: Vec<Cell> = Cell::all(2, 2).collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 1)
            ]
        );
    }

    #[test]
    fn display_format() {
        assert_eq!(Cell::new(2, 5).to_string(), "(2, 5)");
    }
}
