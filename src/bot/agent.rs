//! Weight-table learning bot

use rand::{SeedableRng, rngs::StdRng};

use super::{
    reinforcement::ReinforcementUpdater,
    selector::MoveSelector,
    weights::{ColumnWeights, SharedWeightTable, WeightStore, WeightTable},
};
use crate::{
    Error, Result,
    app::BotConfig,
    connect4::{Board, Outcome, PlayedMove},
};

/// Bot that plays from learned column weights and reinforces them after
/// each episode.
///
/// The store is generic so the same bot can learn into a private
/// [`WeightTable`] or a [`SharedWeightTable`] used by parallel episodes.
pub struct LearningBot<S = WeightTable> {
    store: S,
    config: BotConfig,
    selector: MoveSelector,
    updater: ReinforcementUpdater,
    rng: StdRng,
    name: String,
}

/// Learning bot whose weights live in a table shared across threads
pub type SharedLearningBot = LearningBot<SharedWeightTable>;

impl<S> std::fmt::Debug for LearningBot<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearningBot")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish()
    }
}

impl LearningBot<WeightTable> {
    /// Create a bot with an empty weight table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an invalid exploration range.
    pub fn new(config: &BotConfig) -> Result<Self> {
        Self::with_store(WeightTable::new(), config)
    }

    pub fn table(&self) -> &WeightTable {
        &self.store
    }
}

impl<S: WeightStore> LearningBot<S> {
    pub fn with_store(store: S, config: &BotConfig) -> Result<Self> {
        let selector = MoveSelector::new(config.exploration)?;
        let updater = ReinforcementUpdater::new(config.reinforcement, config.rule);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            store,
            config: config.clone(),
            selector,
            updater,
            rng,
            name: "learning".to_string(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pick a column for the player to move on `board`.
    ///
    /// Unseen boards get all-zero weights, so the first visit is a uniform
    /// choice over the legal columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMove`] when every column is full.
    pub fn choose(&mut self, board: &Board) -> Result<usize> {
        let legal = board.legal_columns();
        if legal.is_empty() {
            return Err(Error::NoLegalMove);
        }
        let weights = self.store.column_weights(board)?;
        self.selector.select(&weights, &legal, &mut self.rng)
    }

    /// Reinforce this bot's moves from one finished episode.
    pub fn learn(
        &mut self,
        played_moves: &[PlayedMove],
        outcome: Outcome,
        started: bool,
    ) -> Result<()> {
        self.updater
            .apply(&mut self.store, played_moves, outcome, started)
    }

    /// Weights for `board` if it has been seen
    pub fn weights_for(&self, board: &Board) -> Option<ColumnWeights> {
        self.store.peek(board)
    }

    /// Set or reset the bot's RNG seed
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.config.seed = seed;
        self.rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_os_rng(),
        };
    }

    pub fn exploration(&self) -> f64 {
        self.selector.exploration_range()
    }

    pub fn set_exploration(&mut self, exploration: f64) -> Result<()> {
        self.selector = MoveSelector::new(exploration)?;
        self.config.exploration = exploration;
        Ok(())
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Drop every learned weight.
    pub fn forget(&mut self) -> Result<()> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect4::{GameOutcome, Player};

    #[test]
    fn test_choose_is_legal() {
        let mut bot = LearningBot::new(&BotConfig::new().with_seed(3)).unwrap();
        let mut board = Board::new();
        for _ in 0..6 {
            board.place(0).unwrap();
        }
        for _ in 0..100 {
            let column = bot.choose(&board).unwrap();
            assert_ne!(column, 0);
        }
        // Choosing creates the entry with zero weights.
        assert_eq!(bot.weights_for(&board), Some([0.0; 7]));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut bot = LearningBot::new(&BotConfig::new().with_seed(3)).unwrap();
        let mut board = Board::with_rows(4, Player::X).unwrap();
        // Fill column by column in an order that never produces four in a row.
        for column in [0, 1, 2, 3, 4, 5, 6] {
            let pattern = if column % 2 == 0 { [0, 0, 1, 1] } else { [1, 1, 0, 0] };
            for owner in pattern {
                let player = if owner == 0 { Player::X } else { Player::O };
                board.to_move = player;
                board.place(column).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(GameOutcome::of_board(&board), Some(GameOutcome::Draw));
        assert!(matches!(bot.choose(&board), Err(Error::NoLegalMove)));
    }

    #[test]
    fn test_greedy_bot_follows_reinforcement() {
        let config = BotConfig::new().with_exploration(0.0).with_seed(1);
        let mut bot = LearningBot::new(&config).unwrap();
        let board = Board::new();
        bot.learn(&[PlayedMove::new(board, 5)], Outcome::Win, true)
            .unwrap();
        for _ in 0..20 {
            assert_eq!(bot.choose(&board).unwrap(), 5);
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let config = BotConfig::new().with_seed(99);
        let mut a = LearningBot::new(&config).unwrap();
        let mut b = LearningBot::new(&config).unwrap();
        let board = Board::new();
        let left: Vec<_> = (0..30).map(|_| a.choose(&board).unwrap()).collect();
        let right: Vec<_> = (0..30).map(|_| b.choose(&board).unwrap()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_invalid_exploration_rejected() {
        assert!(LearningBot::new(&BotConfig::new().with_exploration(-2.0)).is_err());
        let mut bot = LearningBot::new(&BotConfig::new()).unwrap();
        assert!(bot.set_exploration(f64::INFINITY).is_err());
        assert_eq!(bot.exploration(), BotConfig::DEFAULT_EXPLORATION);
    }

    #[test]
    fn test_shared_bots_learn_into_one_table() {
        let shared = SharedWeightTable::default();
        let config = BotConfig::new().with_seed(5);
        let mut a = LearningBot::with_store(shared.clone(), &config).unwrap();
        let mut b = LearningBot::with_store(shared.clone(), &config).unwrap();
        let board = Board::new();
        a.learn(&[PlayedMove::new(board, 3)], Outcome::Win, true)
            .unwrap();
        b.learn(&[PlayedMove::new(board, 3)], Outcome::Win, true)
            .unwrap();
        assert_eq!(shared.peek(&board).unwrap()[3], 34.0);
    }
}
