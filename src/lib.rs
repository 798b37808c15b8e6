//! Logical game-playing agents
//!
//! This crate provides:
//! - A Minesweeper knowledge base that deduces safe cells and mines from
//!   revealed counts, plus the ground-truth board it plays against
//! - Perfect-play minimax search for Tic-Tac-Toe
//! - A command-line front end for both

pub mod cli;
pub mod config;
pub mod error;
pub mod minesweeper;
pub mod tictactoe;

pub use config::SweeperConfig;
pub use error::{Error, Result};
pub use minesweeper::{Cell, KnowledgeBase, Minesweeper, Sentence};
