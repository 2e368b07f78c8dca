//! Train command - train a learning bot by self-play or against a fixed opponent

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use super::{OpponentKind, fixed_opponent, load_config, parse_reward_schedule};
use crate::{
    app::{AppConfig, BotConfig},
    bot::{
        LearningBot, LearningRule, SavedBot, SharedLearningBot, SharedWeightTable,
        TrainingMetadata, WeightTable,
    },
    cli::output::{print_comparison, print_kv, print_section, print_training_result},
    pipeline::{
        ComparisonFramework, ComparisonResult, FrozenLearner, Learner, LogObserver,
        MetricsObserver, ParallelSelfPlay, ProgressObserver, SharedObserver, TrainingConfig,
        TrainingPipeline, TrainingResult,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Train a learning bot", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Opponent to train against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::SelfPlay)]
    pub opponent: OpponentKind,

    /// Number of training games
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Exploration range around the best column weight
    #[arg(long, short = 'e')]
    pub exploration: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// What each recorded move is credited with
    #[arg(long, value_enum)]
    pub rule: Option<LearningRule>,

    /// Rewards, e.g. "win=10,loss=-10,tie_starting=-1,tie_second=1"
    #[arg(long)]
    pub rewards: Option<String>,

    /// Search depth of the minimax opponent
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// Board height
    #[arg(long)]
    pub rows: Option<usize>,

    /// Run self-play games in parallel batches
    #[arg(long)]
    pub parallel: bool,

    /// Split training into this many chunks and pit each result against
    /// the table from the chunk before
    #[arg(long)]
    pub checkpoints: Option<usize>,

    /// Games per checkpoint comparison
    #[arg(long, default_value_t = 100)]
    pub checkpoint_games: usize,

    /// JSON config file; flags override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Output file for the trained bot (MessagePack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Write the training result as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let chunks = match args.checkpoints {
        Some(0) => return Err(anyhow!("--checkpoints must be at least 1")),
        Some(count) => chunk_sizes(config.training.num_games, count),
        None => vec![config.training.num_games],
    };

    print_section("Training");
    print_kv("Opponent", &format!("{:?}", args.opponent));
    print_kv("Games", &config.training.num_games.to_string());
    print_kv("Exploration", &config.bot.exploration.to_string());
    print_kv("Rule", &format!("{:?}", config.bot.rule));
    print_kv("Rows", &config.rows.to_string());

    let metrics = SharedObserver::new(MetricsObserver::new());
    let mut session = Session::start(&args, &config)?;
    let mut previous = session.snapshot()?;
    let mut result = TrainingResult::new(0, 0, 0, 0);

    for (index, games) in chunks.into_iter().enumerate() {
        let training = TrainingConfig {
            num_games: games,
            seed: config.training.seed.map(|seed| seed.wrapping_add(index as u64)),
            ..config.training.clone()
        };
        let chunk = session.train(&training, &config, index, args.quiet, &metrics)?;
        result = result.merge(&chunk);

        if args.checkpoints.is_some() {
            let current = session.snapshot()?;
            let comparison =
                compare_checkpoint(&current, &previous, &config, args.checkpoint_games, index)?;
            print_section(&format!("Checkpoint {}", index + 1));
            print_comparison(&comparison);
            previous = current;
        }
    }

    let table = session.snapshot()?;

    print_section("Results");
    print_training_result(&result);
    print_kv("Boards learned", &table.len().to_string());
    let summary = metrics.with(|observer| observer.summary())?;
    if summary.total_games > 0 {
        print_kv(
            "Average game length",
            &format!("{:.1} moves", summary.avg_game_length),
        );
    }

    finish(&args, &config.bot, table, &result, session.opponent_name(), config.rows)
}

/// Config file values with command-line flags laid on top
fn resolve_config(args: &TrainArgs) -> Result<AppConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(games) = args.games {
        config.training.num_games = games;
    }
    if let Some(exploration) = args.exploration {
        config.bot.exploration = exploration;
    }
    if let Some(seed) = args.seed {
        config.bot.seed = Some(seed);
        config.training.seed = Some(seed);
    }
    if let Some(rule) = args.rule {
        config.bot.rule = rule;
    }
    if let Some(rewards) = &args.rewards {
        let values = parse_reward_schedule(rewards)?;
        config.bot = std::mem::take(&mut config.bot).with_reinforcement(values);
    }
    if let Some(depth) = args.depth {
        config.search = config.search.with_depth(depth);
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    config.training.rows = config.rows;
    Ok(config)
}

/// Split `games` into `chunks` near-equal parts, larger parts first.
fn chunk_sizes(games: usize, chunks: usize) -> Vec<usize> {
    let base = games / chunks;
    let extra = games % chunks;
    (0..chunks)
        .map(|index| base + usize::from(index < extra))
        .collect()
}

/// Bots being trained, kept alive across chunks
enum Session {
    Parallel { shared: SharedWeightTable },
    SelfPlay {
        shared: SharedWeightTable,
        agent: SharedLearningBot,
        opponent: SharedLearningBot,
    },
    Fixed {
        agent: LearningBot,
        opponent: Box<dyn Learner>,
    },
}

impl Session {
    fn start(args: &TrainArgs, config: &AppConfig) -> Result<Self> {
        match args.opponent {
            OpponentKind::SelfPlay if args.parallel => Ok(Self::Parallel {
                shared: SharedWeightTable::default(),
            }),
            OpponentKind::SelfPlay => {
                let shared = SharedWeightTable::default();
                let agent = LearningBot::with_store(shared.clone(), &config.bot)?;
                let opponent =
                    LearningBot::with_store(shared.clone(), &config.bot)?.with_name("learning-o");
                Ok(Self::SelfPlay {
                    shared,
                    agent,
                    opponent,
                })
            }
            kind => {
                let opponent_seed = config.bot.seed.map(|seed| seed.wrapping_add(1));
                Ok(Self::Fixed {
                    agent: LearningBot::new(&config.bot)?,
                    opponent: fixed_opponent(kind, &config.search, opponent_seed)?,
                })
            }
        }
    }

    fn train(
        &mut self,
        training: &TrainingConfig,
        config: &AppConfig,
        chunk: usize,
        quiet: bool,
        metrics: &SharedObserver<MetricsObserver>,
    ) -> Result<TrainingResult> {
        let result = match self {
            Self::Parallel { shared } => {
                let mut bot = config.bot.clone();
                bot.seed = bot.seed.map(|seed| seed.wrapping_add(chunk as u64));
                ParallelSelfPlay::new(bot, training.num_games)
                    .with_rows(config.rows)
                    .run(shared)?
            }
            Self::SelfPlay { agent, opponent, .. } => {
                pipeline(training, quiet, metrics).run(agent, opponent)?
            }
            Self::Fixed { agent, opponent } => {
                pipeline(training, quiet, metrics).run(agent, opponent.as_mut())?
            }
        };
        Ok(result)
    }

    fn snapshot(&self) -> Result<WeightTable> {
        match self {
            Self::Parallel { shared } | Self::SelfPlay { shared, .. } => Ok(shared.snapshot()?),
            Self::Fixed { agent, .. } => Ok(agent.table().clone()),
        }
    }

    fn opponent_name(&self) -> String {
        match self {
            Self::Parallel { .. } | Self::SelfPlay { .. } => "self".to_string(),
            Self::Fixed { opponent, .. } => opponent.name().to_string(),
        }
    }
}

fn pipeline(
    config: &TrainingConfig,
    quiet: bool,
    metrics: &SharedObserver<MetricsObserver>,
) -> TrainingPipeline {
    let mut pipeline = TrainingPipeline::new(config.clone())
        .with_observer(Box::new(metrics.clone()))
        .with_observer(Box::new(LogObserver::new(
            (config.num_games / 10).max(1),
        )));
    if !quiet {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    pipeline
}

/// Play the freshly trained table against the one from the previous chunk.
fn compare_checkpoint(
    current: &WeightTable,
    previous: &WeightTable,
    config: &AppConfig,
    games: usize,
    chunk: usize,
) -> Result<ComparisonResult> {
    let seed = config.bot.seed.map(|seed| seed.wrapping_add(chunk as u64));
    let mut bot = config.bot.clone();
    bot.seed = seed;
    let mut current = LearningBot::with_store(current.clone(), &bot)?.with_name("current");
    bot.seed = seed.map(|seed| seed.wrapping_add(1));
    let mut previous = LearningBot::with_store(previous.clone(), &bot)?.with_name("previous");

    let result = ComparisonFramework::new().with_rows(config.rows).head_to_head(
        &mut FrozenLearner::new(&mut current),
        &mut FrozenLearner::new(&mut previous),
        games,
    )?;
    Ok(result)
}

fn finish(
    args: &TrainArgs,
    bot: &BotConfig,
    table: WeightTable,
    result: &TrainingResult,
    opponent: String,
    rows: usize,
) -> Result<()> {
    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("\nSummary written to: {}", path.display());
    }

    if let Some(path) = &args.output {
        let metadata = TrainingMetadata {
            games_trained: Some(result.total_games),
            opponents: vec![opponent],
            seed: bot.seed,
            rows: Some(rows),
        };
        SavedBot::new(table, bot.clone(), metadata).save_to_file(path)?;
        println!("\nBot saved to: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_against_random_saves_bot() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("bot.msgpack");
        let summary = dir.path().join("summary.json");
        let args = TrainArgs::parse_from([
            "train",
            "--opponent",
            "random",
            "--games",
            "6",
            "--seed",
            "1",
            "--quiet",
            "--output",
            output.to_str().unwrap(),
            "--summary",
            summary.to_str().unwrap(),
        ]);
        execute(args).unwrap();

        let saved = SavedBot::load_from_file(&output).unwrap();
        assert_eq!(saved.metadata.games_trained, Some(6));
        assert_eq!(saved.metadata.opponents, vec!["random".to_string()]);
        assert!(!saved.table.is_empty());
        assert_eq!(TrainingResult::load(&summary).unwrap().total_games, 6);
    }

    #[test]
    fn test_parallel_self_play() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("self.msgpack");
        let args = TrainArgs::parse_from([
            "train",
            "--games",
            "8",
            "--parallel",
            "--seed",
            "2",
            "--rows",
            "5",
            "--output",
            output.to_str().unwrap(),
        ]);
        execute(args).unwrap();
        let saved = SavedBot::load_from_file(&output).unwrap();
        assert_eq!(saved.metadata.rows, Some(5));
    }

    #[test]
    fn test_chunks_cover_every_game() {
        assert_eq!(chunk_sizes(10, 3), vec![4, 3, 3]);
        assert_eq!(chunk_sizes(6, 2), vec![3, 3]);
        assert_eq!(chunk_sizes(2, 4), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_checkpointed_self_play_keeps_totals() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("chunked.msgpack");
        let summary = dir.path().join("chunked.json");
        let args = TrainArgs::parse_from([
            "train",
            "--games",
            "9",
            "--checkpoints",
            "3",
            "--checkpoint-games",
            "4",
            "--seed",
            "5",
            "--quiet",
            "--output",
            output.to_str().unwrap(),
            "--summary",
            summary.to_str().unwrap(),
        ]);
        execute(args).unwrap();

        let result = TrainingResult::load(&summary).unwrap();
        assert_eq!(result.total_games, 9);
        assert_eq!(result.wins + result.draws + result.losses, 9);
        let saved = SavedBot::load_from_file(&output).unwrap();
        assert_eq!(saved.metadata.games_trained, Some(9));
        assert_eq!(saved.metadata.opponents, vec!["self".to_string()]);
    }

    #[test]
    fn test_zero_checkpoints_rejected() {
        let args = TrainArgs::parse_from(["train", "--games", "4", "--checkpoints", "0"]);
        assert!(execute(args).is_err());
    }

    #[test]
    fn test_checkpoint_compares_current_with_previous() {
        let config = AppConfig {
            bot: BotConfig::new().with_seed(6),
            ..AppConfig::default()
        };
        let mut trained = LearningBot::new(&config.bot).unwrap();
        let mut random = crate::pipeline::RandomLearner::with_seed("random", 1);
        let training = TrainingConfig {
            num_games: 10,
            seed: Some(6),
            ..TrainingConfig::default()
        };
        TrainingPipeline::new(training)
            .run(&mut trained, &mut random)
            .unwrap();

        let result =
            compare_checkpoint(trained.table(), &WeightTable::new(), &config, 6, 0).unwrap();
        assert_eq!(result.first_name, "current");
        assert_eq!(result.second_name, "previous");
        assert_eq!(result.total_games(), 6);
    }

    #[test]
    fn test_rewards_and_depth_flags_override_config() {
        let args = TrainArgs::parse_from([
            "train",
            "--rewards",
            "win=3",
            "--depth",
            "2",
            "--rows",
            "5",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.bot.reinforcement.win, 3);
        assert_eq!(config.search.depth, 2);
        assert_eq!(config.training.rows, 5);
    }
}
