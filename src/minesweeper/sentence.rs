//! Logical sentences about mine placement

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use super::Cell;

/// A constraint asserting that exactly `count` of `cells` are mines.
///
/// Equality is structural over both fields, and the derived ordering gives
/// every set of sentences a canonical order. `count <= cells.len()` holds for
/// every value this type hands out, including deserialized ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSentence")]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

/// Unchecked wire form of a [`Sentence`]
#[derive(Deserialize)]
struct RawSentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl TryFrom<RawSentence> for Sentence {
    type Error = crate::Error;

    fn try_from(raw: RawSentence) -> crate::Result<Self> {
        Sentence::new(raw.cells, raw.count)
    }
}

impl Sentence {
    /// Build a sentence, rejecting a count larger than the cell set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedSentence`] if `count > cells.len()`.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> crate::Result<Self> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        if count > cells.len() {
            return Err(crate::Error::MalformedSentence {
                count,
                cells: cells.len(),
            });
        }
        Ok(Sentence { cells, count })
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All remaining cells, if every one of them must be a mine
    pub fn known_mines(&self) -> Option<&BTreeSet<Cell>> {
        (self.count == self.cells.len()).then_some(&self.cells)
    }

    /// All remaining cells, if none of them can be a mine
    pub fn known_safes(&self) -> Option<&BTreeSet<Cell>> {
        (self.count == 0).then_some(&self.cells)
    }

    /// Remove a cell known to be a mine, decrementing the count.
    ///
    /// Returns whether the sentence changed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ContradictoryKnowledge`] if the sentence says
    /// none of its cells are mines. The sentence is left untouched.
    pub fn mark_mine(&mut self, cell: Cell) -> crate::Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == 0 {
            return Err(crate::Error::ContradictoryKnowledge { cell });
        }
        self.cells.remove(&cell);
        self.count -= 1;
        Ok(true)
    }

    /// Remove a cell known to be safe, keeping the count.
    ///
    /// Returns whether the sentence changed. Afterwards the sentence may have
    /// become all-mines, so callers re-check [`Sentence::known_mines`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ContradictoryKnowledge`] if every cell of the
    /// sentence must be a mine. The sentence is left untouched.
    pub fn mark_safe(&mut self, cell: Cell) -> crate::Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == self.cells.len() {
            return Err(crate::Error::ContradictoryKnowledge { cell });
        }
        self.cells.remove(&cell);
        Ok(true)
    }

    /// Check whether `self.cells` is a strict subset of `other.cells`
    pub fn is_strict_subset_of(&self, other: &Sentence) -> bool {
        self.cells.len() < other.cells.len() && self.cells.is_subset(&other.cells)
    }

    /// Derive `(other.cells - self.cells, other.count - self.count)`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::ContradictoryKnowledge`] if `self` holds more mines
    ///   than `other`
    /// - [`crate::Error::MalformedSentence`] if the remaining count exceeds
    ///   the remaining cells
    pub fn difference_from(&self, other: &Sentence) -> crate::Result<Sentence> {
        let cells: BTreeSet<Cell> = other.cells.difference(&self.cells).copied().collect();
        let Some(count) = other.count.checked_sub(self.count) else {
            // self.count > other.count >= 0, so self has at least one cell
            return Err(match self.cells.first() {
                Some(&cell) => crate::Error::ContradictoryKnowledge { cell },
                None => crate::Error::MalformedSentence {
                    count: self.count,
                    cells: self.cells.len(),
                },
            });
        };
        Sentence::new(cells, count)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "}} = {}", self.count)
    }
}
