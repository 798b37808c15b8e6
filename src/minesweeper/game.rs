//! A Minesweeper session driven by the knowledge base

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Cell, KnowledgeBase, Minesweeper};
use crate::SweeperConfig;

/// How a move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// The cell was proven safe
    Safe,
    /// No safe cell was known, so the cell was picked at random
    Random,
}

/// A cell revealed during the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub cell: Cell,
    pub kind: MoveKind,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every safe cell was revealed
    Won,
    /// A mine was revealed
    Lost { cell: Cell },
}

/// Summary of a finished or in-progress game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    pub moves: Vec<Move>,
    pub safe_moves: usize,
    pub random_moves: usize,
    pub mines_flagged: usize,
    pub outcome: Option<GameOutcome>,
}

impl GameReport {
    /// Encode the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if encoding fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One board paired with one knowledge base.
///
/// Each turn the knowledge base picks a cell (a proven-safe one if it has one,
/// otherwise a random unexplored one), the board reveals it, and the revealed
/// count is fed back as knowledge. Cells the knowledge base proves to be mines
/// are flagged on the board.
#[derive(Debug, Clone)]
pub struct Game {
    board: Minesweeper,
    knowledge: KnowledgeBase,
    rng: StdRng,
    revealed: BTreeSet<Cell>,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Start a game on a fresh random board.
    ///
    /// The same RNG places the mines and later picks random moves, so a
    /// seeded configuration replays identically.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the configuration is
    /// invalid.
    pub fn new(config: &SweeperConfig) -> crate::Result<Self> {
        config.validate()?;
        let mut rng = config.rng();
        let board = Minesweeper::new(config.height, config.width, config.mines, &mut rng)?;
        Ok(Self::with_board(board, rng))
    }

    /// Start a game on an existing board
    pub fn with_board(board: Minesweeper, rng: StdRng) -> Self {
        let knowledge = KnowledgeBase::new(board.height(), board.width());
        let mut game = Game {
            board,
            knowledge,
            rng,
            revealed: BTreeSet::new(),
            moves: Vec::new(),
            outcome: None,
        };
        game.check_won();
        game
    }

    pub fn board(&self) -> &Minesweeper {
        &self.board
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn revealed(&self) -> &BTreeSet<Cell> {
        &self.revealed
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Pick and reveal one cell.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::GameOver`] if the game has already ended
    /// - [`crate::Error::NoMoveAvailable`] if no unexplored cell is left
    pub fn play_turn(&mut self) -> crate::Result<Move> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let mv = match self.knowledge.make_safe_move() {
            Some(cell) => Move {
                cell,
                kind: MoveKind::Safe,
            },
            None => Move {
                cell: self.knowledge.make_random_move(&mut self.rng)?,
                kind: MoveKind::Random,
            },
        };
        if self.board.is_mine(mv.cell) {
            debug!(cell = %mv.cell, kind = ?mv.kind, "revealed a mine");
            self.moves.push(mv);
            self.outcome = Some(GameOutcome::Lost { cell: mv.cell });
            return Ok(mv);
        }

        let count = self.board.nearby_mines(mv.cell);
        debug!(cell = %mv.cell, kind = ?mv.kind, count, "revealed");
        self.knowledge.add_knowledge(mv.cell, count)?;
        self.moves.push(mv);
        self.revealed.insert(mv.cell);

        for &mine in self.knowledge.mines() {
            self.board.flag(mine)?;
        }
        self.check_won();

        Ok(mv)
    }

    /// Play turns until the game ends
    ///
    /// # Errors
    ///
    /// Returns any error raised by [`Game::play_turn`].
    pub fn play_to_end(&mut self) -> crate::Result<GameOutcome> {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            self.play_turn()?;
        }
    }

    /// Summarize the game so far
    pub fn report(&self) -> GameReport {
        let safe_moves = self
            .moves
            .iter()
            .filter(|mv| mv.kind == MoveKind::Safe)
            .count();
        GameReport {
            height: self.board.height(),
            width: self.board.width(),
            mines: self.board.mines().len(),
            moves: self.moves.clone(),
            safe_moves,
            random_moves: self.moves.len() - safe_moves,
            mines_flagged: self.board.mines_found.len(),
            outcome: self.outcome,
        }
    }

    /// Once every safe cell is revealed, flag the hidden cells and declare the win
    fn check_won(&mut self) {
        if self.revealed.len() + self.board.mines().len() != self.board.cell_count() {
            return;
        }
        let hidden: Vec<Cell> = Cell::all(self.board.height(), self.board.width())
            .filter(|cell| !self.revealed.contains(cell))
            .collect();
        self.board.mines_found.extend(hidden);
        self.outcome = Some(GameOutcome::Won);
    }
}
