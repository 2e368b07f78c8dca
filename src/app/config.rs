//! Configuration types for bots, search and training runs.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    bot::{LearningRule, ReinforcementValues},
    connect4::DEFAULT_ROWS,
    pipeline::TrainingConfig,
};

/// Configuration for creating a learning bot.
///
/// # Examples
///
/// ```
/// use dropfour::app::BotConfig;
/// use dropfour::bot::LearningRule;
///
/// let config = BotConfig::new()
///     .with_exploration(5.0)
///     .with_seed(42)
///     .with_rule(LearningRule::GameResult);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Width of the window below the best weight that still gets picked
    pub exploration: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    pub reinforcement: ReinforcementValues,
    pub rule: LearningRule,
}

impl BotConfig {
    /// Exploration range used when none is configured
    pub const DEFAULT_EXPLORATION: f64 = 50.0;

    pub fn new() -> Self {
        Self {
            exploration: Self::DEFAULT_EXPLORATION,
            seed: None,
            reinforcement: ReinforcementValues::default(),
            rule: LearningRule::default(),
        }
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_reinforcement(mut self, values: ReinforcementValues) -> Self {
        self.reinforcement = values;
        self
    }

    pub fn with_rule(mut self, rule: LearningRule) -> Self {
        self.rule = rule;
        self
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimax baseline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below the current position
    pub depth: u32,
}

impl SearchConfig {
    pub const DEFAULT_DEPTH: u32 = 5;

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: Self::DEFAULT_DEPTH,
        }
    }
}

/// Everything a run can be configured with, loadable from a JSON file.
///
/// Missing fields fall back to their defaults, so a file containing only
/// `{"search": {"depth": 3}}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub search: SearchConfig,
    pub training: TrainingConfig,
    /// Board height used by every episode
    pub rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            search: SearchConfig::default(),
            training: TrainingConfig::default(),
            rows: DEFAULT_ROWS,
        }
    }
}

impl AppConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create config {}", path.display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush config {}", path.display()),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"search": {"depth": 3}}"#).unwrap();
        assert_eq!(config.search.depth, 3);
        assert_eq!(config.bot, BotConfig::default());
        assert_eq!(config.rows, DEFAULT_ROWS);
    }

    #[test]
    fn test_rule_names() {
        let config: BotConfig = serde_json::from_str(r#"{"rule": "game_result"}"#).unwrap();
        assert_eq!(config.rule, LearningRule::GameResult);
        assert_eq!(config.exploration, BotConfig::DEFAULT_EXPLORATION);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            bot: BotConfig::new()
                .with_exploration(3.5)
                .with_seed(9)
                .with_reinforcement(ReinforcementValues {
                    win: 4,
                    ..ReinforcementValues::default()
                }),
            rows: 8,
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
