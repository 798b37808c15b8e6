//! Configuration for Minesweeper games.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Board and randomness settings for a Minesweeper game.
///
/// # Examples
///
/// ```
/// use deduce::SweeperConfig;
///
/// let config = SweeperConfig::new(16, 16, 40).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
    /// Number of hidden mines
    pub mines: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl SweeperConfig {
    pub fn new(height: usize, width: usize, mines: usize) -> Self {
        Self {
            height,
            width,
            mines,
            seed: None,
        }
    }

    /// Set the board dimensions.
    pub fn with_dimensions(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Set the number of mines.
    pub fn with_mines(mut self, mines: usize) -> Self {
        self.mines = mines;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the board has cells and room for every mine.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] describing the problem.
    pub fn validate(&self) -> crate::Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "board must have at least one cell, got {}x{}",
                    self.height, self.width
                ),
            });
        }
        let cells = self.height.checked_mul(self.width).ok_or_else(|| {
            crate::Error::InvalidConfiguration {
                message: format!("board {}x{} is too large", self.height, self.width),
            }
        })?;
        if self.mines > cells {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "cannot place {} mines on a {}x{} board",
                    self.mines, self.height, self.width
                ),
            });
        }
        Ok(())
    }

    /// Build the RNG for a game: seeded if a seed is set, fresh otherwise
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        }
    }
}

impl Default for SweeperConfig {
    /// An 8x8 board with 8 mines
    fn default() -> Self {
        Self::new(8, 8, 8)
    }
}
