//! Application container wiring a weight-table repository into bot creation.

use std::{path::Path, sync::Arc};

use super::config::BotConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    bot::{LearningBot, WeightTable},
    ports::WeightTableRepository,
};

/// Owns the persistence adapter and default seed used for new bots.
///
/// # Examples
///
/// ```
/// use dropfour::adapters::InMemoryRepository;
/// use dropfour::app::{App, BotConfig};
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// let bot = app.create_bot(&BotConfig::new())?;
/// assert!(bot.table().is_empty());
/// # Ok::<(), dropfour::Error>(())
/// ```
pub struct App {
    repository: Arc<dyn WeightTableRepository + Send + Sync>,
    default_seed: Option<u64>,
}

impl App {
    /// Production defaults: MessagePack files, OS-seeded bots.
    pub fn new() -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn repository(&self) -> Arc<dyn WeightTableRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    /// Create a bot with an empty table. A seed in `config` wins over the
    /// app default.
    pub fn create_bot(&self, config: &BotConfig) -> Result<LearningBot> {
        LearningBot::new(&self.seeded(config))
    }

    /// Create a bot over a table previously stored at `path`.
    pub fn load_bot(&self, path: &Path, config: &BotConfig) -> Result<LearningBot> {
        let table = self.repository.load(path)?;
        log::debug!("loaded {} boards from {}", table.len(), path.display());
        LearningBot::with_store(table, &self.seeded(config))
    }

    /// Store the bot's table at `path`.
    pub fn save_bot(&self, bot: &LearningBot, path: &Path) -> Result<()> {
        self.save_table(bot.table(), path)
    }

    pub fn save_table(&self, table: &WeightTable, path: &Path) -> Result<()> {
        self.repository.save(table, path)
    }

    fn seeded(&self, config: &BotConfig) -> BotConfig {
        let mut config = config.clone();
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        config
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for an [`App`] with injected dependencies
#[derive(Default)]
pub struct AppBuilder {
    repository: Option<Arc<dyn WeightTableRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository<R: WeightTableRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    /// Seed used by every bot whose config carries none
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Falls back to [`MsgPackRepository`] when no repository was given.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{
        adapters::InMemoryRepository,
        connect4::{Board, Outcome, PlayedMove},
    };

    #[test]
    fn test_app_creates_bot() {
        let app = App::new();
        let bot = app.create_bot(&BotConfig::new()).unwrap();
        assert_eq!(bot.exploration(), BotConfig::DEFAULT_EXPLORATION);
    }

    #[test]
    fn test_default_seed_makes_bots_repeatable() {
        let app = App::for_testing().with_default_seed(42).build();
        let board = Board::new();
        let mut first = app.create_bot(&BotConfig::new()).unwrap();
        let mut second = app.create_bot(&BotConfig::new()).unwrap();
        let a: Vec<_> = (0..10).map(|_| first.choose(&board).unwrap()).collect();
        let b: Vec<_> = (0..10).map(|_| second.choose(&board).unwrap()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_save_and_load_through_repository() {
        let repo = InMemoryRepository::new();
        let app = App::for_testing().with_repository(repo.clone()).build();
        let path = PathBuf::from("bots/trained.msgpack");

        let mut bot = app.create_bot(&BotConfig::new().with_seed(1)).unwrap();
        bot.learn(&[PlayedMove::new(Board::new(), 3)], Outcome::Win, true)
            .unwrap();
        app.save_bot(&bot, &path).unwrap();
        assert!(repo.contains(&path).unwrap());

        let loaded = app.load_bot(&path, &BotConfig::new()).unwrap();
        assert_eq!(
            loaded.weights_for(&Board::new()),
            bot.weights_for(&Board::new())
        );
        assert_eq!(loaded.table().len(), 1);
    }
}
