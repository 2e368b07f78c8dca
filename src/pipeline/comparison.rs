//! Learner adapters and head-to-head evaluation
//!
//! Wraps the bots as [`Learner`]s, adds the random and frozen players, and
//! measures two learners against each other without letting either learn.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::episode::Episode;
use crate::{
    Error, Result,
    bot::{ColumnWeights, LearningBot, MinimaxBot, WeightStore},
    connect4::{Board, DEFAULT_ROWS, GameOutcome, Outcome, PlayedMove, Player},
    ports::Learner,
};

impl<S: WeightStore + Send> Learner for LearningBot<S> {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        self.choose(board)
    }

    fn learn(
        &mut self,
        played_moves: &[PlayedMove],
        outcome: Outcome,
        started: bool,
    ) -> Result<()> {
        LearningBot::learn(self, played_moves, outcome, started)
    }

    fn name(&self) -> &str {
        LearningBot::name(self)
    }

    fn reset(&mut self) -> Result<()> {
        self.forget()
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.reseed(Some(seed));
        Ok(())
    }

    fn move_weights(&self, board: &Board) -> Option<ColumnWeights> {
        self.weights_for(board)
    }
}

impl Learner for MinimaxBot {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        MinimaxBot::name(self)
    }
}

/// Uniformly random player (baseline)
pub struct RandomLearner {
    name: String,
    rng: StdRng,
}

impl RandomLearner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a random learner with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Learner for RandomLearner {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        let columns = board.legal_columns();
        if columns.is_empty() {
            return Err(Error::NoLegalMove);
        }
        Ok(columns[self.rng.random_range(0..columns.len())])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Frozen learner wrapper - prevents learning during evaluation
///
/// Move selection, seeding and weight inspection go to the inner learner;
/// learning updates are dropped.
pub struct FrozenLearner<'a> {
    inner: &'a mut dyn Learner,
}

impl<'a> FrozenLearner<'a> {
    pub fn new(inner: &'a mut dyn Learner) -> Self {
        Self { inner }
    }
}

impl Learner for FrozenLearner<'_> {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        self.inner.select_move(board)
    }

    fn learn(
        &mut self,
        _played_moves: &[PlayedMove],
        _outcome: Outcome,
        _started: bool,
    ) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.inner.set_rng_seed(seed)
    }

    fn move_weights(&self, board: &Board) -> Option<ColumnWeights> {
        self.inner.move_weights(board)
    }
}

/// Result of a head-to-head match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub first_name: String,
    pub second_name: String,
    pub first_wins: usize,
    pub second_wins: usize,
    pub ties: usize,
}

impl ComparisonResult {
    pub fn new(first_name: impl Into<String>, second_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            second_name: second_name.into(),
            first_wins: 0,
            second_wins: 0,
            ties: 0,
        }
    }

    pub fn total_games(&self) -> usize {
        self.first_wins + self.second_wins + self.ties
    }

    /// Record a game from the first learner's point of view
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.first_wins += 1,
            Outcome::Loss => self.second_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
    }

    pub fn first_win_rate(&self) -> f64 {
        match self.total_games() {
            0 => 0.0,
            total => self.first_wins as f64 / total as f64,
        }
    }
}

/// Plays learners against each other without learning
#[derive(Debug, Clone, Copy)]
pub struct ComparisonFramework {
    rows: usize,
}

impl Default for ComparisonFramework {
    fn default() -> Self {
        Self { rows: DEFAULT_ROWS }
    }
}

impl ComparisonFramework {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board height for every game
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Play `games` games, `first` opening the even-numbered ones and
    /// `second` the odd-numbered ones. The opener always plays X.
    pub fn head_to_head(
        &self,
        first: &mut dyn Learner,
        second: &mut dyn Learner,
        games: usize,
    ) -> Result<ComparisonResult> {
        let mut result = ComparisonResult::new(first.name(), second.name());
        for game in 0..games {
            let first_opens = game % 2 == 0;
            let mut episode = Episode::with_rows(self.rows, Player::X)?;
            let outcome = if first_opens {
                episode.play_out(&mut *first, &mut *second)?
            } else {
                episode.play_out(&mut *second, &mut *first)?
            };
            let first_side = if first_opens { Player::X } else { Player::O };
            result.record(outcome.for_player(first_side));
            if let GameOutcome::Win(winner) = outcome {
                log::trace!("game {game}: {winner} won in {} moves", episode.moves());
            }
        }
        log::debug!(
            "{} vs {}: {}-{}-{}",
            result.first_name,
            result.second_name,
            result.first_wins,
            result.ties,
            result.second_wins
        );
        Ok(result)
    }
}
