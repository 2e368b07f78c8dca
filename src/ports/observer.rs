//! Observer port - abstraction for training observation and data collection

use crate::{
    Result,
    connect4::{Board, Outcome},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - for each move in the game
///    - `on_game_end(game_num, outcome, moves)`
/// 3. `on_training_end()` - once at the end
///
/// # Examples
///
/// ```no_run
/// use dropfour::{connect4::Outcome, ports::Observer};
///
/// struct CountingObserver {
///     games: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         _outcome: Outcome,
///         _moves: usize,
///     ) -> dropfour::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts. `game_num` is 0-based.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move is chosen and before it is applied.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `step_num` - Ply within the game (0-based)
    /// * `board` - Board before the move
    /// * `column` - Column that was chosen
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &Board,
        _column: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal board, after both sides learned.
    ///
    /// `outcome` is seen from the trained agent's side and `moves` is the
    /// number of plies the game lasted.
    fn on_game_end(&mut self, _game_num: usize, _outcome: Outcome, _moves: usize) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
