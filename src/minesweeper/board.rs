//! Ground-truth Minesweeper board

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Cell;

/// A Minesweeper board with hidden mines.
///
/// Mine placement is fixed at construction. The only mutable part is
/// `mines_found`, the set of cells the player has flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minesweeper {
    height: usize,
    width: usize,
    mines: BTreeSet<Cell>,
    /// Cells flagged as mines by the player
    pub mines_found: BTreeSet<Cell>,
}

impl Minesweeper {
    /// Place `mines` mines uniformly at random on a `height` x `width` board.
    ///
    /// Uses rejection sampling: random cells are drawn until enough distinct
    /// ones have been picked.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if a dimension is zero or
    /// there are more mines than cells.
    pub fn new<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        mines: usize,
        rng: &mut R,
    ) -> crate::Result<Self> {
        Self::check_dimensions(height, width, mines)?;

        let mut placed = BTreeSet::new();
        while placed.len() != mines {
            let cell = Cell::new(rng.random_range(0..height), rng.random_range(0..width));
            placed.insert(cell);
        }

        Ok(Minesweeper {
            height,
            width,
            mines: placed,
            mines_found: BTreeSet::new(),
        })
    }

    /// Build a board with a fixed mine layout.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or any mine is off the board.
    pub fn from_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Cell>,
    ) -> crate::Result<Self> {
        let mines: BTreeSet<Cell> = mines.into_iter().collect();
        Self::check_dimensions(height, width, mines.len())?;
        if let Some(&cell) = mines.iter().find(|c| !c.in_bounds(height, width)) {
            return Err(crate::Error::CellOutOfBounds {
                row: cell.row,
                col: cell.col,
                height,
                width,
            });
        }

        Ok(Minesweeper {
            height,
            width,
            mines,
            mines_found: BTreeSet::new(),
        })
    }

    fn check_dimensions(height: usize, width: usize, mines: usize) -> crate::Result<()> {
        if height == 0 || width == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("board must have at least one cell, got {height}x{width}"),
            });
        }
        let cells = height.checked_mul(width).ok_or_else(|| {
            crate::Error::InvalidConfiguration {
                message: format!("board {height}x{width} is too large"),
            }
        })?;
        if mines > cells {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "cannot place {mines} mines on a {height}x{width} board"
                ),
            });
        }
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// The true mine locations
    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    /// Check if a cell holds a mine. Off-board cells never do.
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Number of mines among the up-to-8 cells around `cell`, excluding itself
    pub fn nearby_mines(&self, cell: Cell) -> usize {
        cell.neighbors(self.height, self.width)
            .filter(|neighbor| self.mines.contains(neighbor))
            .count()
    }

    /// Flag a cell as a mine
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CellOutOfBounds`] if the cell is off the board.
    pub fn flag(&mut self, cell: Cell) -> crate::Result<bool> {
        if !cell.in_bounds(self.height, self.width) {
            return Err(crate::Error::CellOutOfBounds {
                row: cell.row,
                col: cell.col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self.mines_found.insert(cell))
    }

    /// Check if the flagged cells are exactly the mines.
    ///
    /// Flagging a non-mine cell never wins, even if every mine is flagged too.
    pub fn won(&self) -> bool {
        self.mines_found == self.mines
    }
}
