//! Knowledge base that deduces safe cells and mines from revealed counts.
//!
//! The knowledge base holds a set of [`Sentence`]s plus the facts derived from
//! them. Every call that adds information runs inference to a fixpoint:
//!
//! 1. Sentences whose cells are all mines or all safe are resolved into facts
//!    and dropped.
//! 2. Whenever a sentence `A` covers a strict subset of sentence `B`'s cells,
//!    `B` is replaced by `(B.cells - A.cells, B.count - A.count)`.
//! 3. Empty and duplicate sentences are removed.
//!
//! Each pass reads from a snapshot of the sentence list and applies its
//! changes afterwards. The list is kept sorted and deduplicated between
//! passes, so the final state depends only on the set of sentences, never on
//! the order they arrived in.

use std::collections::BTreeSet;

use rand::{Rng, seq::IndexedRandom};
use tracing::{debug, trace};

use super::{Cell, Sentence};

/// Minesweeper player that reasons purely by logical deduction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    height: usize,
    width: usize,
    moves_made: BTreeSet<Cell>,
    mines: BTreeSet<Cell>,
    safes: BTreeSet<Cell>,
    knowledge: Vec<Sentence>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base for a `height` x `width` board
    pub fn new(height: usize, width: usize) -> Self {
        KnowledgeBase {
            height,
            width,
            moves_made: BTreeSet::new(),
            mines: BTreeSet::new(),
            safes: BTreeSet::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells that have been revealed
    pub fn moves_made(&self) -> &BTreeSet<Cell> {
        &self.moves_made
    }

    /// Cells proven to be mines
    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    /// Cells proven to be safe
    pub fn safes(&self) -> &BTreeSet<Cell> {
        &self.safes
    }

    /// Live sentences, in canonical order once inference has run
    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Mark a cell as a mine and remove it from every sentence.
    ///
    /// Returns whether the fact was new. No inference is run.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is off the board or already known to be
    /// safe. The knowledge base is unchanged on error.
    pub fn mark_mine(&mut self, cell: Cell) -> crate::Result<bool> {
        self.check_bounds(cell)?;
        self.atomically(|kb| kb.record_mine(cell))
    }

    /// Mark a cell as safe and remove it from every sentence.
    ///
    /// Returns whether the fact was new. No inference is run.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is off the board or already known to be
    /// a mine. The knowledge base is unchanged on error.
    pub fn mark_safe(&mut self, cell: Cell) -> crate::Result<bool> {
        self.check_bounds(cell)?;
        self.atomically(|kb| kb.record_safe(cell))
    }

    /// Record that `cell` was revealed and has `count` neighboring mines.
    ///
    /// The cell becomes a move and a safe, a sentence over its unrevealed
    /// neighbors is added, and inference runs to a fixpoint.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::CellOutOfBounds`] if the cell is off the board
    /// - [`crate::Error::MalformedSentence`] if `count` exceeds the number of
    ///   unrevealed neighbors
    /// - [`crate::Error::ContradictoryKnowledge`] if the count disagrees with
    ///   what is already known
    ///
    /// The knowledge base is unchanged on error.
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) -> crate::Result<()> {
        self.check_bounds(cell)?;
        self.atomically(|kb| {
            kb.moves_made.insert(cell);
            kb.record_safe(cell)?;

            let neighbors: Vec<Cell> = cell
                .neighbors(kb.height, kb.width)
                .filter(|neighbor| !kb.moves_made.contains(neighbor))
                .collect();
            let sentence = Sentence::new(neighbors, count)?;
            debug!(%cell, count, %sentence, "adding knowledge");

            kb.insert_sentence(sentence)?;
            kb.run_to_fixpoint()?;
            Ok(())
        })
    }

    /// Add an externally built sentence and run inference to a fixpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if any cell is off the board or the sentence
    /// contradicts existing knowledge. The knowledge base is unchanged on
    /// error.
    pub fn add_sentence(&mut self, sentence: Sentence) -> crate::Result<()> {
        self.add_sentences(std::iter::once(sentence))
    }

    /// Add several sentences at once, then run inference a single time.
    ///
    /// The outcome does not depend on the order of `sentences`.
    ///
    /// # Errors
    ///
    /// Same as [`KnowledgeBase::add_sentence`].
    pub fn add_sentences(
        &mut self,
        sentences: impl IntoIterator<Item = Sentence>,
    ) -> crate::Result<()> {
        let sentences: Vec<Sentence> = sentences.into_iter().collect();
        for sentence in &sentences {
            for &cell in sentence.cells() {
                self.check_bounds(cell)?;
            }
        }
        self.atomically(|kb| {
            for sentence in sentences {
                kb.insert_sentence(sentence)?;
            }
            kb.run_to_fixpoint()?;
            Ok(())
        })
    }

    /// Run inference passes until one changes nothing.
    ///
    /// Returns whether any pass changed the knowledge base. Running it again
    /// right away always returns `false`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ContradictoryKnowledge`] if the sentences
    /// contradict each other. The knowledge base is unchanged on error.
    pub fn infer(&mut self) -> crate::Result<bool> {
        self.atomically(|kb| kb.run_to_fixpoint())
    }

    /// A known-safe cell that has not been played yet, if any.
    ///
    /// Picks the first such cell in row-major order. Does not modify state.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes.difference(&self.moves_made).next().copied()
    }

    /// A uniformly random cell that is neither played nor a known mine.
    ///
    /// Does not modify state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoMoveAvailable`] if every cell is played or
    /// known to be a mine.
    pub fn make_random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> crate::Result<Cell> {
        let candidates: Vec<Cell> = Cell::all(self.height, self.width)
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .collect();
        candidates
            .choose(rng)
            .copied()
            .ok_or(crate::Error::NoMoveAvailable)
    }

    fn check_bounds(&self, cell: Cell) -> crate::Result<()> {
        if cell.in_bounds(self.height, self.width) {
            Ok(())
        } else {
            Err(crate::Error::CellOutOfBounds {
                row: cell.row,
                col: cell.col,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Run `op`, restoring the previous state if it fails
    fn atomically<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> crate::Result<T>,
    ) -> crate::Result<T> {
        let snapshot = self.clone();
        let result = op(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }

    fn record_mine(&mut self, cell: Cell) -> crate::Result<bool> {
        if self.safes.contains(&cell) {
            return Err(crate::Error::ContradictoryKnowledge { cell });
        }
        let learned = self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell)?;
        }
        if learned {
            debug!(%cell, "learned mine");
        }
        Ok(learned)
    }

    fn record_safe(&mut self, cell: Cell) -> crate::Result<bool> {
        if self.mines.contains(&cell) {
            return Err(crate::Error::ContradictoryKnowledge { cell });
        }
        let learned = self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell)?;
        }
        if learned {
            debug!(%cell, "learned safe");
        }
        Ok(learned)
    }

    /// Apply known facts to a new sentence and add it to the knowledge
    fn insert_sentence(&mut self, mut sentence: Sentence) -> crate::Result<()> {
        for &mine in &self.mines {
            sentence.mark_mine(mine)?;
        }
        for &safe in &self.safes {
            sentence.mark_safe(safe)?;
        }
        self.knowledge.push(sentence);
        Ok(())
    }

    fn run_to_fixpoint(&mut self) -> crate::Result<bool> {
        self.normalize()?;
        let mut changed = false;
        let mut passes = 0usize;
        while self.inference_pass()? {
            changed = true;
            passes += 1;
        }
        trace!(
            passes,
            sentences = self.knowledge.len(),
            mines = self.mines.len(),
            safes = self.safes.len(),
            "inference reached fixpoint"
        );
        Ok(changed)
    }

    /// Sort, deduplicate, and drop vacuous sentences.
    ///
    /// Two sentences over the same cells with different counts are a
    /// contradiction.
    fn normalize(&mut self) -> crate::Result<()> {
        self.knowledge.retain(|sentence| !sentence.is_empty());
        self.knowledge.sort();
        self.knowledge.dedup();

        for pair in self.knowledge.windows(2) {
            if pair[0].cells() != pair[1].cells() {
                continue;
            }
            if let Some(&cell) = pair[0].cells().first() {
                debug!(first = %pair[0], second = %pair[1], "conflicting counts");
                return Err(crate::Error::ContradictoryKnowledge { cell });
            }
        }
        Ok(())
    }

    /// One resolve / subset / deduplicate pass. Returns whether anything changed.
    fn inference_pass(&mut self) -> crate::Result<bool> {
        let before = self.knowledge.clone();
        let facts_before = (self.mines.len(), self.safes.len());

        self.resolve_known_cells()?;
        self.apply_subset_inference()?;
        self.normalize()?;

        Ok(self.knowledge != before || (self.mines.len(), self.safes.len()) != facts_before)
    }

    /// Turn all-mine and all-safe sentences into facts, dropping the sentences
    fn resolve_known_cells(&mut self) -> crate::Result<()> {
        let mut learned_mines = BTreeSet::new();
        let mut learned_safes = BTreeSet::new();
        let mut pending = Vec::with_capacity(self.knowledge.len());

        for sentence in std::mem::take(&mut self.knowledge) {
            if sentence.is_empty() {
                continue;
            }
            if let Some(cells) = sentence.known_mines() {
                learned_mines.extend(cells.iter().copied());
            } else if let Some(cells) = sentence.known_safes() {
                learned_safes.extend(cells.iter().copied());
            } else {
                pending.push(sentence);
            }
        }

        if let Some(&cell) = learned_mines.intersection(&learned_safes).next() {
            return Err(crate::Error::ContradictoryKnowledge { cell });
        }

        self.knowledge = pending;
        for cell in learned_mines {
            self.record_mine(cell)?;
        }
        for cell in learned_safes {
            self.record_safe(cell)?;
        }
        Ok(())
    }

    /// Replace every sentence that has a strict-subset sentence by the difference.
    ///
    /// All derivations are computed against the list as it was at the start
    /// of the step. When several subsets exist, the first in canonical order
    /// is used, so each replacement strictly shrinks the sentence.
    fn apply_subset_inference(&mut self) -> crate::Result<()> {
        self.normalize()?;
        let snapshot = &self.knowledge;
        let mut next = Vec::with_capacity(snapshot.len());

        for superset in snapshot {
            match snapshot.iter().find(|s| s.is_strict_subset_of(superset)) {
                Some(subset) => {
                    let derived = subset.difference_from(superset)?;
                    debug!(%subset, %superset, %derived, "inferred sentence from subset");
                    next.push(derived);
                }
                None => next.push(superset.clone()),
            }
        }

        self.knowledge = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn cell(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    fn sentence(coords: &[(usize, usize)], count: usize) -> Sentence {
        Sentence::new(coords.iter().copied().map(Cell::from), count).unwrap()
    }

    #[test]
    fn new_knowledge_base_is_empty() {
        let kb = KnowledgeBase::new(8, 8);
        assert!(kb.moves_made().is_empty());
        assert!(kb.mines().is_empty());
        assert!(kb.safes().is_empty());
        assert!(kb.knowledge().is_empty());
        assert_eq!(kb.make_safe_move(), None);
    }

    #[test]
    fn zero_count_marks_all_neighbors_safe() {
        let mut kb = KnowledgeBase::new(3, 3);
        kb.add_knowledge(cell(1, 1), 0).unwrap();

        assert_eq!(kb.safes().len(), 9);
        assert!(kb.mines().is_empty());
        assert!(kb.knowledge().is_empty());
        assert!(kb.moves_made().contains(&cell(1, 1)));
    }

    #[test]
    fn full_count_marks_all_neighbors_mines() {
        let mut kb = KnowledgeBase::new(8, 8);
        kb.add_knowledge(cell(0, 0), 3).unwrap();

        let expected: BTreeSet<Cell> = [cell(0, 1), cell(1, 0), cell(1, 1)].into();
        assert_eq!(kb.mines(), &expected);
        assert!(kb.knowledge().is_empty());
    }

    #[test]
    fn undetermined_count_becomes_a_sentence() {
        let mut kb = KnowledgeBase::new(8, 8);
        kb.add_knowledge(cell(0, 0), 1).unwrap();

        assert_eq!(
            kb.knowledge(),
            &[sentence(&[(0, 1), (1, 0), (1, 1)], 1)]
        );
        assert!(kb.mines().is_empty());
        assert_eq!(kb.safes().len(), 1);
    }

    #[test]
    fn subset_inference_finds_mine() {
        // {1,2} = 1 and {1,2,3} = 2 imply {3} = 1
        let mut kb = KnowledgeBase::new(1, 5);
        kb.add_sentence(sentence(&[(0, 1), (0, 2)], 1)).unwrap();
        kb.add_sentence(sentence(&[(0, 1), (0, 2), (0, 3)], 2))
            .unwrap();

        assert!(kb.mines().contains(&cell(0, 3)));
        assert_eq!(kb.knowledge(), &[sentence(&[(0, 1), (0, 2)], 1)]);
    }

    #[test]
    fn subset_inference_finds_safe() {
        let mut kb = KnowledgeBase::new(1, 5);
        kb.add_sentence(sentence(&[(0, 1), (0, 2), (0, 3)], 1))
            .unwrap();
        kb.add_sentence(sentence(&[(0, 1), (0, 2)], 1)).unwrap();

        assert!(kb.safes().contains(&cell(0, 3)));
        assert!(kb.mines().is_empty());
    }

    #[test]
    fn chained_deduction_after_reveals() {
        // Row board: . . . .  with a mine at (0, 3)
        let mut kb = KnowledgeBase::new(1, 4);
        kb.add_knowledge(cell(0, 0), 0).unwrap();
        assert_eq!(kb.make_safe_move(), Some(cell(0, 1)));

        kb.add_knowledge(cell(0, 1), 0).unwrap();
        kb.add_knowledge(cell(0, 2), 1).unwrap();

        assert!(kb.mines().contains(&cell(0, 3)));
        assert_eq!(kb.make_safe_move(), None);
    }

    #[test]
    fn known_facts_are_applied_to_new_sentences() {
        let mut kb = KnowledgeBase::new(1, 4);
        kb.mark_mine(cell(0, 3)).unwrap();
        kb.add_knowledge(cell(0, 2), 1).unwrap();

        // (0, 3) accounts for the count, so (0, 1) is safe
        assert!(kb.safes().contains(&cell(0, 1)));
        assert!(kb.knowledge().is_empty());
    }

    #[test]
    fn mark_mine_propagates_to_sentences() {
        let mut kb = KnowledgeBase::new(8, 8);
        kb.add_knowledge(cell(0, 0), 2).unwrap();
        assert!(kb.mark_mine(cell(1, 1)).unwrap());

        assert_eq!(kb.knowledge(), &[sentence(&[(0, 1), (1, 0)], 1)]);
        assert!(!kb.mark_mine(cell(1, 1)).unwrap());
    }

    #[test]
    fn mark_safe_propagates_to_sentences() {
        let mut kb = KnowledgeBase::new(8, 8);
        kb.add_knowledge(cell(0, 0), 1).unwrap();
        assert!(kb.mark_safe(cell(1, 1)).unwrap());

        assert_eq!(kb.knowledge(), &[sentence(&[(0, 1), (1, 0)], 1)]);
    }

    #[test]
    fn safe_and_mine_never_overlap() {
        let mut kb = KnowledgeBase::new(8, 8);
        kb.mark_mine(cell(2, 2)).unwrap();
        let err = kb.mark_safe(cell(2, 2)).unwrap_err();
        assert!(matches!(err, crate::Error::ContradictoryKnowledge { .. }));
        assert!(!kb.safes().contains(&cell(2, 2)));

        let err = kb.add_knowledge(cell(2, 2), 0).unwrap_err();
        assert!(matches!(err, crate::Error::ContradictoryKnowledge { .. }));
        assert!(!kb.moves_made().contains(&cell(2, 2)));
    }

    #[test]
    fn contradictory_count_leaves_state_unchanged() {
        let mut kb = KnowledgeBase::new(1, 4);
        kb.add_knowledge(cell(0, 0), 0).unwrap();
        let before = kb.clone();

        // (0, 1) is known safe, so (0, 2) cannot see two mines
        let err = kb.add_knowledge(cell(0, 2), 2).unwrap_err();
        assert!(matches!(err, crate::Error::ContradictoryKnowledge { .. }));
        assert_eq!(kb, before);
    }

    #[test]
    fn count_larger_than_neighbors_is_malformed() {
        let mut kb = KnowledgeBase::new(8, 8);
        let err = kb.add_knowledge(cell(0, 0), 4).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedSentence { .. }));
        assert!(kb.moves_made().is_empty());
    }

    #[test]
    fn out_of_bounds_cells_are_rejected() {
        let mut kb = KnowledgeBase::new(8, 8);
        assert!(matches!(
            kb.add_knowledge(cell(8, 0), 0),
            Err(crate::Error::CellOutOfBounds { row: 8, col: 0, .. })
        ));
        assert!(kb.mark_mine(cell(0, 9)).is_err());
        assert!(kb.add_sentence(sentence(&[(0, 0), (9, 9)], 1)).is_err());
    }

    #[test]
    fn failed_infer_rolls_back() {
        let mut kb = KnowledgeBase::new(3, 3);
        kb.add_sentences([
            sentence(&[(0, 0), (0, 1), (0, 2)], 2),
            sentence(&[(0, 1), (0, 2), (1, 0)], 1),
        ])
        .unwrap();
        // Without inference this leaves {(0, 1), (0, 2)} = 2 under a superset
        // that only holds one mine.
        kb.mark_safe(cell(0, 0)).unwrap();
        let before = kb.clone();

        let err = kb.infer().unwrap_err();
        assert!(matches!(err, crate::Error::ContradictoryKnowledge { .. }));
        assert_eq!(kb, before);
        assert!(kb.mines().is_empty());
    }

    #[test]
    fn infer_is_idempotent() {
        let mut kb = KnowledgeBase::new(8, 8);
        kb.add_knowledge(cell(0, 0), 1).unwrap();
        kb.add_knowledge(cell(2, 2), 2).unwrap();
        kb.add_knowledge(cell(4, 4), 1).unwrap();

        let stable = kb.clone();
        assert!(!kb.infer().unwrap());
        assert_eq!(kb, stable);
    }

    #[test]
    fn sentences_are_disjoint_from_facts() {
        let mut kb = KnowledgeBase::new(4, 4);
        kb.add_knowledge(cell(0, 0), 1).unwrap();
        kb.add_knowledge(cell(0, 1), 1).unwrap();
        kb.add_knowledge(cell(3, 3), 1).unwrap();
        kb.add_knowledge(cell(2, 3), 2).unwrap();

        for sentence in kb.knowledge() {
            for c in sentence.cells() {
                assert!(!kb.safes().contains(c), "{c} is safe but still in {sentence}");
                assert!(!kb.mines().contains(c), "{c} is a mine but still in {sentence}");
            }
        }
    }

    #[test]
    fn duplicate_sentences_collapse() {
        let mut kb = KnowledgeBase::new(3, 3);
        kb.add_sentence(sentence(&[(0, 0), (0, 1)], 1)).unwrap();
        kb.add_sentence(sentence(&[(0, 1), (0, 0)], 1)).unwrap();
        assert_eq!(kb.knowledge().len(), 1);
    }

    #[test]
    fn safe_move_skips_played_cells() {
        let mut kb = KnowledgeBase::new(3, 3);
        kb.add_knowledge(cell(0, 0), 0).unwrap();
        let safe = kb.make_safe_move().unwrap();
        assert_ne!(safe, cell(0, 0));
        assert!(kb.safes().contains(&safe));
        assert!(!kb.moves_made().contains(&safe));
    }

    #[test]
    fn random_move_avoids_moves_and_mines() {
        let mut kb = KnowledgeBase::new(2, 2);
        kb.add_knowledge(cell(0, 0), 1).unwrap();
        kb.mark_mine(cell(1, 1)).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mv = kb.make_random_move(&mut rng).unwrap();
            assert!(mv == cell(0, 1) || mv == cell(1, 0), "unexpected move {mv}");
        }
    }

    #[test]
    fn random_move_fails_when_board_exhausted() {
        let mut kb = KnowledgeBase::new(1, 2);
        kb.add_knowledge(cell(0, 0), 1).unwrap();
        assert!(kb.mines().contains(&cell(0, 1)));

        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            kb.make_random_move(&mut rng),
            Err(crate::Error::NoMoveAvailable)
        ));
    }
}
