//! Tic-Tac-Toe board and perfect-play search

pub mod board;
pub mod lines;
pub mod minimax;

pub use board::{Action, Board, Cell, Player, initial_state};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use minimax::{action_values, max_value, min_value, minimax};
