//! Subcommands of the `deduce` binary

pub mod sweep;
pub mod tictactoe;
