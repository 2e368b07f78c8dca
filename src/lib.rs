//! Connect Four bots that learn per-board column weights
//!
//! This crate provides:
//! - A Connect Four board with configurable height and opportunity-based evaluation
//! - A weight-table learning bot with an exploration-range move selector
//! - Reinforcement updates from finished episodes
//! - A minimax baseline using the same evaluation
//! - Training pipelines, parallel self-play and knockout tournaments

pub mod adapters;
pub mod app;
pub mod bot;
pub mod cli;
pub mod connect4;
pub mod error;
pub mod pipeline;
pub mod ports;

pub use bot::{
    LearningBot, LearningRule, MinimaxBot, MoveSelector, ReinforcementUpdater,
    ReinforcementValues, SharedWeightTable, WeightStore, WeightTable,
};
pub use connect4::{Board, BoardKey, GameOutcome, Outcome, PlayedMove, Player, evaluate};
pub use error::{Error, Result};
