//! Game outcomes and move records

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// The outcome as seen by `player`
    pub fn for_player(self, player: Player) -> Outcome {
        match self {
            GameOutcome::Win(winner) if winner == player => Outcome::Win,
            GameOutcome::Win(_) => Outcome::Loss,
            GameOutcome::Draw => Outcome::Tie,
        }
    }

    /// Outcome of a terminal board, `None` while the game is still running.
    pub fn of_board(board: &Board) -> Option<GameOutcome> {
        if let Some(winner) = board.winner() {
            Some(GameOutcome::Win(winner))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}

/// Episode result from one participant's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

/// A column choice together with the board it was made on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub board: Board,
    pub column: usize,
}

impl PlayedMove {
    pub fn new(board: Board, column: usize) -> Self {
        Self { board, column }
    }

    /// The player who made this move
    pub fn player(&self) -> Player {
        self.board.to_move
    }

    /// Board after the move was played.
    ///
    /// # Errors
    ///
    /// Fails if the recorded column was not legal on the recorded board.
    pub fn board_after(&self) -> Result<Board, crate::Error> {
        self.board.make_move(self.column)
    }
}
