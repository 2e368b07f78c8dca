//! Training pipeline for learning bots

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::episode::Episode;
use crate::{
    Error, Result,
    connect4::{DEFAULT_ROWS, Outcome, Player},
    ports::{Learner, Observer},
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training games
    pub num_games: usize,

    /// Random seed
    pub seed: Option<u64>,

    /// Side the trained agent plays in the first game
    pub agent_player: Player,

    /// Which player opens every game
    pub first_player: Player,

    /// Switch the agent's side every game, so it learns positions as both
    /// the opener and the second player
    pub swap_sides: bool,

    /// Board height
    pub rows: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 1000,
            seed: None,
            agent_player: Player::X,
            first_player: Player::X,
            swap_sides: true,
            rows: DEFAULT_ROWS,
        }
    }
}

impl TrainingConfig {
    /// Side the agent plays in game number `game_num`
    pub fn agent_player_for(&self, game_num: usize) -> Player {
        if self.swap_sides && game_num % 2 == 1 {
            self.agent_player.opponent()
        } else {
            self.agent_player
        }
    }
}

/// Result of a training run, counted from the agent's side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl TrainingResult {
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {}", path.display()),
            source,
        })?;
        Ok(())
    }

    /// Totals of two runs, rates recomputed
    pub fn merge(&self, other: &TrainingResult) -> TrainingResult {
        TrainingResult::new(
            self.total_games + other.total_games,
            self.wins + other.wins,
            self.draws + other.draws,
            self.losses + other.losses,
        )
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open {}", path.display()),
            source,
        })?;
        let result = serde_json::from_reader(BufReader::new(file))?;
        Ok(result)
    }
}

/// Training pipeline for a single learner against an opponent
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Play `num_games` episodes; both participants learn after each one.
    pub fn run(
        &mut self,
        agent: &mut dyn Learner,
        opponent: &mut dyn Learner,
    ) -> Result<TrainingResult> {
        self.seed_pair(agent, opponent)?;
        log::info!(
            "training {} against {} for {} games",
            agent.name(),
            opponent.name(),
            self.config.num_games
        );

        let (mut wins, mut draws, mut losses) = (0, 0, 0);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let (outcome, moves) = self.play_game(game_num, agent, opponent)?;

            match outcome {
                Outcome::Win => wins += 1,
                Outcome::Tie => draws += 1,
                Outcome::Loss => losses += 1,
            }

            for observer in &mut self.observers {
                observer.on_game_end(game_num, outcome, moves)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::new(self.config.num_games, wins, draws, losses);
        log::info!(
            "training done: {} wins, {} draws, {} losses",
            result.wins,
            result.draws,
            result.losses
        );
        Ok(result)
    }

    fn seed_pair(&self, agent: &mut dyn Learner, opponent: &mut dyn Learner) -> Result<()> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }

    fn play_game(
        &mut self,
        game_num: usize,
        agent: &mut dyn Learner,
        opponent: &mut dyn Learner,
    ) -> Result<(Outcome, usize)> {
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let agent_player = self.config.agent_player_for(game_num);
        let mut episode = Episode::with_rows(self.config.rows, self.config.first_player)?;
        let mut step_num = 0;

        while !episode.is_over() {
            let learner: &mut dyn Learner = if episode.to_move() == agent_player {
                &mut *agent
            } else {
                &mut *opponent
            };
            let column = episode.choose_move(learner)?;

            for observer in &mut self.observers {
                observer.on_move(game_num, step_num, episode.board(), column)?;
            }

            episode.apply_move(column)?;
            step_num += 1;
        }

        let outcome = match agent_player {
            Player::X => episode.finish(agent, opponent)?,
            Player::O => episode.finish(opponent, agent)?,
        };
        Ok((outcome.for_player(agent_player), episode.moves()))
    }
}
