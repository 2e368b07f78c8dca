//! Bot serialization support
//!
//! Provides save/load functionality for trained learning bots.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use super::{agent::LearningBot, weights::WeightTable};
use crate::app::BotConfig;

/// Serializable representation of a trained learning bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedBot {
    /// Version of the save format
    pub version: u32,
    /// Learned column weights
    pub table: WeightTable,
    /// Exploration, reinforcement values and learning rule used in training
    pub config: BotConfig,
    pub metadata: TrainingMetadata,
}

/// Metadata about the training process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of games trained
    pub games_trained: Option<usize>,
    /// Opponent(s) trained against
    pub opponents: Vec<String>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Board height the bot was trained on
    pub rows: Option<usize>,
}

impl SavedBot {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(table: WeightTable, config: BotConfig, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            table,
            config,
            metadata,
        }
    }

    /// Snapshot a bot that owns its table
    pub fn from_bot(bot: &LearningBot, metadata: TrainingMetadata) -> Self {
        Self::new(bot.table().clone(), bot.config().clone(), metadata)
    }

    /// Reconstruct a bot from saved data.
    ///
    /// The RNG is seeded from the saved config, or from the OS if none was saved.
    pub fn to_bot(&self) -> Result<LearningBot> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }
        LearningBot::with_store(self.table.clone(), &self.config)
            .context("Saved bot has an invalid configuration")
    }

    /// Save bot to a file (MessagePack)
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, self).context("Failed to serialize bot")?;
        writer
            .flush()
            .with_context(|| format!("Failed to write file: {}", path.as_ref().display()))?;
        log::info!("saved bot with {} boards to {}", self.table.len(), path.as_ref().display());

        Ok(())
    }

    /// Load bot from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        let saved: Self =
            rmp_serde::decode::from_read(reader).context("Failed to deserialize bot")?;
        log::debug!("loaded bot with {} boards", saved.table.len());
        Ok(saved)
    }
}
