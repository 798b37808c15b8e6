//! Minesweeper board and logical inference agent

pub mod board;
pub mod cell;
pub mod game;
pub mod knowledge;
pub mod sentence;

pub use board::Minesweeper;
pub use cell::Cell;
pub use game::{Game, GameOutcome, GameReport, Move, MoveKind};
pub use knowledge::KnowledgeBase;
pub use sentence::Sentence;
