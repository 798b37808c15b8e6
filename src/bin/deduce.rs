//! deduce CLI - Logical Minesweeper agent and perfect-play Tic-Tac-Toe
//!
//! This CLI provides:
//! - Self-play of the Minesweeper inference agent on random boards
//! - Optimal move analysis and self-play for Tic-Tac-Toe

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deduce")]
#[command(version, about = "Logical game agents", long_about = None)]
struct Cli {
    /// Log inference and search decisions (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let the inference agent play Minesweeper
    Sweep(deduce::cli::commands::sweep::SweepArgs),

    /// Compute optimal Tic-Tac-Toe moves
    Tictactoe(deduce::cli::commands::tictactoe::TicTacToeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "deduce=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sweep(args) => deduce::cli::commands::sweep::execute(args),
        Commands::Tictactoe(args) => deduce::cli::commands::tictactoe::execute(args),
    }
}
