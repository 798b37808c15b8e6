//! Shared helpers for the integration tests.

#![allow(dead_code)]

use deduce::{Cell, Minesweeper, Sentence};
use rand::{SeedableRng, rngs::StdRng, seq::IteratorRandom};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
    coords.iter().map(|&coord| Cell::from(coord)).collect()
}

pub fn sentence(coords: &[(usize, usize)], count: usize) -> Sentence {
    Sentence::new(cells(coords), count).expect("count fits the cells")
}

/// Pick `n` distinct non-mine cells of `board` at random.
pub fn sample_safe_cells(board: &Minesweeper, n: usize, rng: &mut StdRng) -> Vec<Cell> {
    Cell::all(board.height(), board.width())
        .filter(|&cell| !board.is_mine(cell))
        .choose_multiple(rng, n)
}

/// The sentence a player learns by revealing each of `revealed`.
///
/// Each sentence covers the neighbors that are not themselves revealed, and
/// counts the true mines among them.
pub fn sentences_for(board: &Minesweeper, revealed: &[Cell]) -> Vec<Sentence> {
    revealed
        .iter()
        .map(|&cell| {
            let hidden: Vec<Cell> = cell
                .neighbors(board.height(), board.width())
                .filter(|neighbor| !revealed.contains(neighbor))
                .collect();
            let count = hidden.iter().filter(|&&n| board.is_mine(n)).count();
            Sentence::new(hidden, count).expect("true count fits the cells")
        })
        .collect()
}
