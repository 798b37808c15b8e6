//! Perfect-play adversarial search.
//!
//! X maximizes [`Board::utility`], O minimizes it. The search runs to terminal
//! boards without pruning or memoization; a 3x3 board keeps it bounded.
//! Among equally valued actions the first in row-major order wins, so the
//! empty board yields `(0, 0)`.

use tracing::debug;

use super::{Action, Board, Player};

/// Best action for the player to move, or `None` on a terminal board
pub fn minimax(board: &Board) -> Option<Action> {
    let maximizing = board.player() == Player::X;
    let mut best: Option<(Action, i32)> = None;

    for (action, value) in action_values(board) {
        let better = match best {
            None => true,
            Some((_, best_value)) if maximizing => value > best_value,
            Some((_, best_value)) => value < best_value,
        };
        if better {
            best = Some((action, value));
        }
    }

    if let Some((action, value)) = best {
        debug!(player = %board.player(), %action, value, "minimax decision");
    }
    best.map(|(action, _)| action)
}

/// Every legal action with its minimax value, in row-major order.
///
/// Empty on a terminal board.
pub fn action_values(board: &Board) -> Vec<(Action, i32)> {
    if board.is_terminal() {
        return Vec::new();
    }
    let maximizing = board.player() == Player::X;
    board
        .actions()
        .into_iter()
        .map(|action| {
            let next = board.place(action);
            let value = if maximizing {
                min_value(&next)
            } else {
                max_value(&next)
            };
            (action, value)
        })
        .collect()
}

/// Value of a board where X (the maximizer) is to move
pub fn max_value(board: &Board) -> i32 {
    if board.is_terminal() {
        return board.utility();
    }
    board
        .actions()
        .into_iter()
        .map(|action| min_value(&board.place(action)))
        .fold(i32::MIN, i32::max)
}

/// Value of a board where O (the minimizer) is to move
pub fn min_value(board: &Board) -> i32 {
    if board.is_terminal() {
        return board.utility();
    }
    board
        .actions()
        .into_iter()
        .map(|action| max_value(&board.place(action)))
        .fold(i32::MAX, i32::min)
}
