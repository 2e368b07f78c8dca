//! End-of-episode reinforcement
//!
//! Every recorded move of a player is credited once, in episode order, with
//! the outcome reward plus (under the board-position rule) the value of the
//! board it produced. There is no discounting between moves.

use serde::{Deserialize, Serialize};

use super::weights::WeightStore;
use crate::{
    Result,
    connect4::{Outcome, PlayedMove, evaluate},
};

/// Reward per outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforcementValues {
    pub win: i32,
    pub loss: i32,
    /// Tie reward for the player who opened the game
    pub tie_starting: i32,
    /// Tie reward for the player who moved second
    pub tie_second: i32,
}

impl Default for ReinforcementValues {
    fn default() -> Self {
        ReinforcementValues {
            win: 10,
            loss: -10,
            tie_starting: -1,
            tie_second: 1,
        }
    }
}

impl ReinforcementValues {
    pub fn reward(&self, outcome: Outcome, started: bool) -> i32 {
        match outcome {
            Outcome::Win => self.win,
            Outcome::Loss => self.loss,
            Outcome::Tie if started => self.tie_starting,
            Outcome::Tie => self.tie_second,
        }
    }
}

/// What each recorded move is credited with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LearningRule {
    /// Outcome reward plus the value of the board after the move
    #[default]
    BoardPosition,
    /// Outcome reward only
    GameResult,
}

/// Folds an episode result into a weight store
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementUpdater {
    pub values: ReinforcementValues,
    pub rule: LearningRule,
}

impl ReinforcementUpdater {
    pub fn new(values: ReinforcementValues, rule: LearningRule) -> Self {
        Self { values, rule }
    }

    /// Amount added to the weight of a single recorded move.
    pub fn delta(&self, played: &PlayedMove, outcome: Outcome, started: bool) -> Result<i32> {
        let reward = self.values.reward(outcome, started);
        match self.rule {
            LearningRule::GameResult => Ok(reward),
            LearningRule::BoardPosition => {
                let after = played.board_after()?;
                Ok(reward + evaluate(&after, played.player()))
            }
        }
    }

    /// Credit every move of one player's episode log.
    ///
    /// `started` tells whether this player opened the game; it only matters
    /// for ties.
    pub fn apply<S: WeightStore + ?Sized>(
        &self,
        store: &mut S,
        played_moves: &[PlayedMove],
        outcome: Outcome,
        started: bool,
    ) -> Result<()> {
        for played in played_moves {
            let delta = self.delta(played, outcome, started)?;
            store.adjust(&played.board, played.column, f64::from(delta))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bot::WeightTable,
        connect4::{Board, WIN_SCORE},
    };

    #[test]
    fn test_reward_table() {
        let values = ReinforcementValues::default();
        assert_eq!(values.reward(Outcome::Win, true), 10);
        assert_eq!(values.reward(Outcome::Win, false), 10);
        assert_eq!(values.reward(Outcome::Loss, true), -10);
        assert_eq!(values.reward(Outcome::Tie, true), -1);
        assert_eq!(values.reward(Outcome::Tie, false), 1);
    }

    #[test]
    fn test_board_position_adds_valuation() {
        let updater = ReinforcementUpdater::default();
        // Opening in the center column is worth 7 to X.
        let played = PlayedMove::new(Board::new(), 3);
        assert_eq!(updater.delta(&played, Outcome::Win, true).unwrap(), 17);
        assert_eq!(updater.delta(&played, Outcome::Tie, true).unwrap(), 6);
    }

    #[test]
    fn test_game_result_ignores_valuation() {
        let updater =
            ReinforcementUpdater::new(ReinforcementValues::default(), LearningRule::GameResult);
        let played = PlayedMove::new(Board::new(), 3);
        assert_eq!(updater.delta(&played, Outcome::Loss, false).unwrap(), -10);
    }

    #[test]
    fn test_winning_move_gets_win_score() {
        let before = Board::from_moves(&[0, 1, 0, 1, 0, 1]).unwrap();
        let played = PlayedMove::new(before, 0);
        let updater = ReinforcementUpdater::default();
        assert_eq!(
            updater.delta(&played, Outcome::Win, true).unwrap(),
            10 + WIN_SCORE
        );
    }

    #[test]
    fn test_apply_updates_each_move_once() {
        let mut table = WeightTable::new();
        let first = Board::new();
        let second = Board::from_moves(&[3, 3]).unwrap();
        let moves = [PlayedMove::new(first, 3), PlayedMove::new(second, 2)];
        let updater = ReinforcementUpdater::default();

        updater
            .apply(&mut table, &moves, Outcome::Loss, true)
            .unwrap();

        let expected_first = -10 + evaluate(&first.make_move(3).unwrap(), first.to_move);
        let expected_second = -10 + evaluate(&second.make_move(2).unwrap(), second.to_move);
        assert_eq!(table.weights(&first).unwrap()[3], f64::from(expected_first));
        assert_eq!(table.weights(&second).unwrap()[2], f64::from(expected_second));
        assert_eq!(table.len(), 2);
    }
}
