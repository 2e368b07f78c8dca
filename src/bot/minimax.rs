//! Depth-limited minimax baseline
//!
//! Leaves are scored with [`evaluate`] from the searching player's point of
//! view. Root columns are searched in parallel, each with its own full
//! window, so every reported column score is exact.

use rayon::prelude::*;

use crate::{
    Error, Result,
    app::SearchConfig,
    connect4::{Board, Player, evaluate},
};

/// Fixed-depth minimax player. Deterministic and never learns.
#[derive(Debug, Clone)]
pub struct MinimaxBot {
    depth: u32,
    name: String,
}

impl MinimaxBot {
    pub const DEFAULT_DEPTH: u32 = SearchConfig::DEFAULT_DEPTH;

    /// # Errors
    ///
    /// A depth of zero would never look past the current board and is
    /// rejected as [`Error::InvalidConfiguration`].
    pub fn new(depth: u32) -> Result<Self> {
        if depth == 0 {
            return Err(Error::InvalidConfiguration {
                message: "minimax depth must be at least 1".to_string(),
            });
        }
        Ok(Self {
            depth,
            name: format!("minimax-{depth}"),
        })
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::new(config.depth)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimax value of every legal column for the player to move, in
    /// ascending column order.
    pub fn score_columns(&self, board: &Board) -> Vec<(usize, i32)> {
        let player = board.to_move;
        board
            .legal_columns()
            .into_par_iter()
            .filter_map(|column| {
                let child = board.make_move(column).ok()?;
                let score = search(&child, self.depth - 1, i32::MIN, i32::MAX, player);
                Some((column, score))
            })
            .collect()
    }

    /// Best column for the player to move; ties go to the lowest column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMove`] on a full board.
    pub fn best_move(&self, board: &Board) -> Result<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (column, score) in self.score_columns(board) {
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((column, score));
            }
        }
        let (column, score) = best.ok_or(Error::NoLegalMove)?;
        log::trace!("minimax depth {} picked column {column} ({score})", self.depth);
        Ok(column)
    }
}

fn search(board: &Board, depth: u32, mut alpha: i32, mut beta: i32, perspective: Player) -> i32 {
    if depth == 0 || board.winner().is_some() {
        return evaluate(board, perspective);
    }
    let legal = board.legal_columns();
    if legal.is_empty() {
        return 0;
    }

    if board.to_move == perspective {
        let mut best = i32::MIN;
        for column in legal {
            let Ok(child) = board.make_move(column) else {
                continue;
            };
            best = best.max(search(&child, depth - 1, alpha, beta, perspective));
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for column in legal {
            let Ok(child) = board.make_move(column) else {
                continue;
            };
            best = best.min(search(&child, depth - 1, alpha, beta, perspective));
            beta = beta.min(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}
