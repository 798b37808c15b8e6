//! Error types for the deduce crate

use thiserror::Error;

use crate::minesweeper::Cell;

/// Main error type for the deduce crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action ({row}, {col}): {reason}")]
    InvalidAction {
        row: usize,
        col: usize,
        reason: &'static str,
    },

    #[error("no move available")]
    NoMoveAvailable,

    #[error("malformed sentence: count {count} is outside 0..={cells}")]
    MalformedSentence { count: usize, cells: usize },

    #[error("cell ({row}, {col}) is out of bounds for a {height}x{width} board")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("contradictory knowledge: {cell} is both safe and a mine")]
    ContradictoryKnowledge { cell: Cell },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("game already over")]
    GameOver,

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
