//! Subcommands of the `dropfour` binary

pub mod evaluate;
pub mod score;
pub mod tournament;
pub mod train;

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;

use crate::{
    app::{AppConfig, SearchConfig},
    bot::{MinimaxBot, ReinforcementValues},
    connect4::Player,
    pipeline::{Learner, RandomLearner},
};

/// Opponents a bot can be trained or evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    /// A second learning bot sharing the same weight table
    #[value(name = "self")]
    SelfPlay,
    Minimax,
    Random,
}

/// Load the config file if one was given, defaults otherwise.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Build a non-learning opponent.
pub(crate) fn fixed_opponent(
    kind: OpponentKind,
    search: &SearchConfig,
    seed: Option<u64>,
) -> Result<Box<dyn Learner>> {
    match kind {
        OpponentKind::Minimax => Ok(Box::new(MinimaxBot::from_config(search)?)),
        OpponentKind::Random => Ok(Box::new(match seed {
            Some(seed) => RandomLearner::with_seed("random", seed),
            None => RandomLearner::new("random"),
        })),
        OpponentKind::SelfPlay => Err(anyhow!("self-play needs a learning opponent")),
    }
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" => Ok(Player::X),
        "o" | "second" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

/// Parse rewards such as `win=10,loss=-10,tie_starting=-1,tie_second=1`.
///
/// Keys that are left out keep their default value.
pub(crate) fn parse_reward_schedule(s: &str) -> Result<ReinforcementValues> {
    let mut values = ReinforcementValues::default();

    for part in s.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (key, value_str) = trimmed
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid reward entry '{trimmed}'. Expected key=value"))?;
        let value: i32 = value_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid numeric reward '{value_str}' in '{trimmed}'"))?;
        match key.trim().to_ascii_lowercase().as_str() {
            "win" => values.win = value,
            "loss" => values.loss = value,
            "tie_starting" => values.tie_starting = value,
            "tie_second" => values.tie_second = value,
            other => {
                return Err(anyhow!(
                    "Unknown reward key '{other}'. Expected win, loss, tie_starting or tie_second"
                ));
            }
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reward_schedule() {
        let values = parse_reward_schedule("win=5, tie_second=2").unwrap();
        assert_eq!(values.win, 5);
        assert_eq!(values.loss, -10);
        assert_eq!(values.tie_starting, -1);
        assert_eq!(values.tie_second, 2);
        assert!(parse_reward_schedule("draw=1").is_err());
        assert!(parse_reward_schedule("win").is_err());
    }

    #[test]
    fn test_parse_player_token() {
        assert_eq!(parse_player_token("X", "--player").unwrap(), Player::X);
        assert_eq!(parse_player_token(" o ", "--player").unwrap(), Player::O);
        assert!(parse_player_token("z", "--player").is_err());
    }

    #[test]
    fn test_self_play_is_not_a_fixed_opponent() {
        let search = SearchConfig::default().with_depth(3);
        assert!(fixed_opponent(OpponentKind::SelfPlay, &search, None).is_err());
        let opponent = fixed_opponent(OpponentKind::Minimax, &search, None).unwrap();
        assert_eq!(opponent.name(), "minimax-3");
    }
}
