//! Opportunity-based board valuation
//!
//! The same function scores boards for reinforcement updates and for the
//! minimax baseline, so both consumers agree on what a position is worth.

use super::{Board, Player, lines::LineAnalyzer};

/// Score of a board won by the perspective player (negated for a loss).
pub const WIN_SCORE: i32 = 10_000;

/// Evaluate `board` from `player`'s point of view.
///
/// A completed line for `player` scores [`WIN_SCORE`], one for the opponent
/// scores `-WIN_SCORE`. Otherwise the score is the opportunity total of
/// `player`'s chips minus that of the opponent's chips.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    if board.has_won(player) {
        return WIN_SCORE;
    }
    if board.has_won(player.opponent()) {
        return -WIN_SCORE;
    }
    opportunity_difference(board, player)
}

/// Opportunity total of `player` minus that of the opponent, ignoring wins.
pub fn opportunity_difference(board: &Board, player: Player) -> i32 {
    let own = LineAnalyzer::total_opportunities(board, player) as i32;
    let theirs = LineAnalyzer::total_opportunities(board, player.opponent()) as i32;
    own - theirs
}
