//! Tictactoe command - Query the perfect-play search

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section},
    tictactoe::{Board, Player, action_values, initial_state, minimax},
};

#[derive(Parser, Debug)]
#[command(about = "Compute the optimal Tic-Tac-Toe move")]
pub struct TicTacToeArgs {
    /// Board as 9 cells in row-major order, e.g. "X.O/.X./..." (default: empty)
    #[arg(long, short = 'b')]
    pub board: Option<String>,

    /// Play the game out with both sides using minimax
    #[arg(long)]
    pub self_play: bool,
}

pub fn execute(args: TicTacToeArgs) -> Result<()> {
    let board = match &args.board {
        Some(s) => Board::from_string(s)?,
        None => initial_state(),
    };

    if args.self_play {
        self_play(board)
    } else {
        analyze(&board);
        Ok(())
    }
}

fn analyze(board: &Board) {
    print_section("Tic-Tac-Toe position");
    println!("{board}\n");

    if board.is_terminal() {
        print_kv("Result", &describe_result(board));
        return;
    }

    print_kv("To move", &board.player().to_string());
    println!("\nAction values (+1 X wins, -1 O wins):");
    for (action, value) in action_values(board) {
        println!("  {action} -> {value:+}");
    }
    if let Some(action) = minimax(board) {
        println!();
        print_kv("Optimal move", &action.to_string());
    }
}

fn self_play(mut board: Board) -> Result<()> {
    print_section("Tic-Tac-Toe self-play");
    println!("{board}");

    while !board.is_terminal() {
        let player = board.player();
        let action = minimax(&board).ok_or_else(|| anyhow!("no move on a live board"))?;
        board = board.result(action)?;
        println!("\n{player} plays {action}");
        println!("{board}");
    }

    println!();
    print_kv("Result", &describe_result(&board));
    Ok(())
}

fn describe_result(board: &Board) -> String {
    match board.winner() {
        Some(Player::X) => "X wins".to_string(),
        Some(Player::O) => "O wins".to_string(),
        None => "draw".to_string(),
    }
}
