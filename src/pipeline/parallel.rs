//! Parallel self-play against one shared weight table

use rayon::prelude::*;

use super::{episode::Episode, training::TrainingResult};
use crate::{
    Error, Result,
    app::BotConfig,
    bot::{LearningBot, SharedWeightTable},
    connect4::{DEFAULT_ROWS, Outcome, Player},
};

/// Runs independent self-play episodes concurrently.
///
/// Every episode gets its own pair of bots, so their RNGs and move logs are
/// private; only the weight table is shared. Games are dispatched in batches
/// so progress can be logged between them.
#[derive(Debug, Clone)]
pub struct ParallelSelfPlay {
    bot: BotConfig,
    games: usize,
    batch_size: usize,
    rows: usize,
}

impl ParallelSelfPlay {
    pub const DEFAULT_BATCH_SIZE: usize = 256;

    pub fn new(bot: BotConfig, games: usize) -> Self {
        Self {
            bot,
            games,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            rows: DEFAULT_ROWS,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Play every game into `table`.
    ///
    /// Openers alternate between X and O. The result is counted from the
    /// opener's side.
    pub fn run(&self, table: &SharedWeightTable) -> Result<TrainingResult> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "batch size must be at least 1".to_string(),
            });
        }

        let (mut wins, mut draws, mut losses) = (0, 0, 0);
        let mut start = 0;
        while start < self.games {
            let end = (start + self.batch_size).min(self.games);
            let outcomes = (start..end)
                .into_par_iter()
                .map(|game_num| self.play_game(game_num, table))
                .collect::<Result<Vec<_>>>()?;

            for outcome in outcomes {
                match outcome {
                    Outcome::Win => wins += 1,
                    Outcome::Tie => draws += 1,
                    Outcome::Loss => losses += 1,
                }
            }
            log::debug!(
                "self-play {end}/{} games, table holds {} boards",
                self.games,
                table.len()?
            );
            start = end;
        }

        Ok(TrainingResult::new(self.games, wins, draws, losses))
    }

    fn play_game(&self, game_num: usize, table: &SharedWeightTable) -> Result<Outcome> {
        let first = if game_num % 2 == 0 { Player::X } else { Player::O };
        let mut x = LearningBot::with_store(table.clone(), &self.seeded(game_num, 0))?;
        let mut o = LearningBot::with_store(table.clone(), &self.seeded(game_num, 1))?;

        let mut episode = Episode::with_rows(self.rows, first)?;
        episode.play_out(&mut x, &mut o)?;
        let outcome = episode.finish(&mut x, &mut o)?;
        Ok(outcome.for_player(first))
    }

    fn seeded(&self, game_num: usize, side: u64) -> BotConfig {
        match self.bot.seed {
            Some(seed) => self
                .bot
                .clone()
                .with_seed(seed.wrapping_add(game_num as u64 * 2 + side)),
            None => self.bot.clone(),
        }
    }
}
