//! Learner port - abstraction over everything that can take a turn
//!
//! Episodes, training runs, comparisons and tournaments only talk to
//! players through this trait, so learning bots, the minimax baseline and
//! the random opponent are interchangeable.

use crate::{
    Result,
    bot::ColumnWeights,
    connect4::{Board, Outcome, PlayedMove},
};

/// Unified interface for all players
///
/// # Examples
///
/// ```no_run
/// use dropfour::{connect4::Board, ports::Learner};
///
/// fn opening<L: Learner>(learner: &mut L) -> dropfour::Result<usize> {
///     learner.select_move(&Board::new())
/// }
/// ```
pub trait Learner: Send {
    /// Select a column for the player to move on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalMove`] when the board is full.
    fn select_move(&mut self, board: &Board) -> Result<usize>;

    /// Update the learner after an episode completes.
    ///
    /// # Parameters
    ///
    /// * `played_moves` - This learner's own moves, in the order they were made
    /// * `outcome` - Episode result from this learner's point of view
    /// * `started` - Whether this learner made the first move of the episode
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for non-adaptive players.
    fn learn(
        &mut self,
        _played_moves: &[PlayedMove],
        _outcome: Outcome,
        _started: bool,
    ) -> Result<()> {
        Ok(())
    }

    /// Name used in comparisons and logging.
    fn name(&self) -> &str;

    /// Reset learner state to initial conditions.
    ///
    /// Adaptive learners forget everything they learned.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// Seed the learner's internal random number generator.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Learned column weights for `board`, if the learner has any.
    fn move_weights(&self, _board: &Board) -> Option<ColumnWeights> {
        None
    }
}
