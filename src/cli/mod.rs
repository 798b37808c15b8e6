//! CLI infrastructure for the deduce agents
//!
//! This module provides the command-line interface for letting the
//! Minesweeper inference agent play and for querying the Tic-Tac-Toe search.

pub mod commands;
pub mod output;
