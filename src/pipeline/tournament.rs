//! Knockout tournament between freshly seeded learning bots
//!
//! Bots are paired into bouts; in each bout the pair trains against each
//! other and the one with more wins moves on. Rounds repeat until a single
//! bot is left.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::training::{TrainingConfig, TrainingPipeline};
use crate::{
    Error, Result,
    app::BotConfig,
    bot::LearningBot,
    connect4::{DEFAULT_ROWS, Player},
};

/// Tournament settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Number of bots entering the first round
    pub arena_size: usize,
    /// Training games per bout, sides alternating
    pub games_per_bout: usize,
    /// Settings shared by every entrant; a configured seed is offset per bot
    pub bot: BotConfig,
    pub rows: usize,
}

/// Outcome of a finished tournament
pub struct TournamentResult {
    pub champion: LearningBot,
    pub rounds: usize,
    pub bouts: usize,
}

impl Tournament {
    pub fn new(arena_size: usize, games_per_bout: usize) -> Self {
        Self {
            arena_size,
            games_per_bout,
            bot: BotConfig::default(),
            rows: DEFAULT_ROWS,
        }
    }

    pub fn with_bot_config(mut self, bot: BotConfig) -> Self {
        self.bot = bot;
        self
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.bot.exploration = exploration;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.bot.seed = Some(seed);
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Run every round and return the last bot standing.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] for an empty arena or invalid bot settings.
    pub fn run(&self) -> Result<TournamentResult> {
        if self.arena_size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "tournament needs at least one bot".to_string(),
            });
        }

        let mut bots = (0..self.arena_size)
            .map(|index| self.entrant(index))
            .collect::<Result<Vec<_>>>()?;
        let mut rounds = 0;
        let mut bouts = 0;

        while bots.len() > 1 {
            rounds += 1;
            let (pairs, bye) = draw_round(bots);
            bouts += pairs.len();
            log::info!("round {rounds}: {} bouts", pairs.len());

            bots = pairs
                .into_par_iter()
                .map(|(first, second)| self.bout(first, second))
                .collect::<Result<Vec<_>>>()?;
            // bye rejoins at the back
            bots.extend(bye);
        }

        let champion = bots.pop().ok_or_else(|| Error::InvalidConfiguration {
            message: "tournament ended without a champion".to_string(),
        })?;
        log::info!("{} won after {rounds} rounds", champion.name());
        Ok(TournamentResult {
            champion,
            rounds,
            bouts,
        })
    }

    fn entrant(&self, index: usize) -> Result<LearningBot> {
        let mut config = self.bot.clone();
        if let Some(seed) = config.seed {
            config.seed = Some(seed.wrapping_add(index as u64));
        }
        Ok(LearningBot::new(&config)?.with_name(format!("bot-{index}")))
    }

    fn bout_config(&self) -> TrainingConfig {
        TrainingConfig {
            num_games: self.games_per_bout,
            seed: None,
            agent_player: Player::X,
            first_player: Player::X,
            swap_sides: true,
            rows: self.rows,
        }
    }

    /// Train the pair against each other; ties keep `first`.
    fn bout(&self, mut first: LearningBot, mut second: LearningBot) -> Result<LearningBot> {
        let result = TrainingPipeline::new(self.bout_config()).run(&mut first, &mut second)?;
        log::debug!(
            "{} vs {}: {}-{}-{}",
            first.name(),
            second.name(),
            result.wins,
            result.draws,
            result.losses
        );
        if result.losses > result.wins {
            Ok(second)
        } else {
            Ok(first)
        }
    }
}

/// Pair entrants in order; with an odd count the first one sits out.
fn draw_round<T>(entrants: Vec<T>) -> (Vec<(T, T)>, Option<T>) {
    let mut entrants = entrants.into_iter();
    let bye = if entrants.len() % 2 == 1 {
        entrants.next()
    } else {
        None
    };

    let mut pairs = Vec::with_capacity(entrants.len() / 2);
    while let (Some(first), Some(second)) = (entrants.next(), entrants.next()) {
        pairs.push((first, second));
    }
    (pairs, bye)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_arena_is_rejected() {
        let err = Tournament::new(0, 4).run().err().unwrap();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_single_bot_wins_without_playing() {
        let result = Tournament::new(1, 4).with_seed(1).run().unwrap();
        assert_eq!(result.rounds, 0);
        assert_eq!(result.champion.name(), "bot-0");
        assert!(result.champion.table().is_empty());
    }

    #[test]
    fn test_odd_arena_carries_bye() {
        let result = Tournament::new(5, 2).with_seed(11).run().unwrap();
        // 5 -> 3 (2 bouts + bye) -> 2 (1 bout + bye) -> 1
        assert_eq!(result.rounds, 3);
        assert_eq!(result.bouts, 4);
        assert!(!result.champion.table().is_empty());
    }

    #[test]
    fn test_bye_goes_to_the_front_entrant() {
        let (pairs, bye) = draw_round(vec![0, 1, 2, 3, 4]);
        assert_eq!(bye, Some(0));
        assert_eq!(pairs, vec![(1, 2), (3, 4)]);

        let (pairs, bye) = draw_round(vec![0, 1, 2, 3]);
        assert_eq!(bye, None);
        assert_eq!(pairs, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_bye_rotates_between_rounds() {
        // Winners keep their slot and the bye rejoins at the back.
        let (pairs, bye) = draw_round(vec!['a', 'b', 'c', 'd', 'e']);
        let mut next: Vec<char> = pairs.into_iter().map(|(first, _)| first).collect();
        next.extend(bye);
        assert_eq!(next, vec!['b', 'd', 'a']);

        let (pairs, bye) = draw_round(next);
        assert_eq!(bye, Some('b'));
        assert_eq!(pairs, vec![('d', 'a')]);
    }

    #[test]
    fn test_bout_trains_both_bots_on_both_sides() {
        let tournament = Tournament::new(2, 6).with_seed(8);
        let mut first = tournament.entrant(0).unwrap();
        let mut second = tournament.entrant(1).unwrap();
        TrainingPipeline::new(tournament.bout_config())
            .run(&mut first, &mut second)
            .unwrap();

        for bot in [&first, &second] {
            let keys: Vec<_> = bot.table().iter().map(|(key, _)| key.as_str()).collect();
            assert!(keys.iter().any(|key| key.ends_with("_X")), "{}", bot.name());
            assert!(keys.iter().any(|key| key.ends_with("_O")), "{}", bot.name());
        }
    }

    #[test]
    fn test_zero_game_bouts_keep_first() {
        let result = Tournament::new(4, 0).with_seed(3).run().unwrap();
        assert_eq!(result.champion.name(), "bot-0");
    }
}
