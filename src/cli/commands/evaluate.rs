//! Evaluate command - play a saved bot against a fixed opponent or another saved
//! bot, with learning switched off

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use super::{OpponentKind, fixed_opponent};
use crate::{
    app::SearchConfig,
    bot::{LearningBot, MinimaxBot, SavedBot},
    cli::output::{format_number, print_comparison, print_kv, print_section},
    pipeline::{ComparisonFramework, FrozenLearner, Learner},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained bot")]
pub struct EvaluateArgs {
    /// Path to a saved bot
    pub bot: PathBuf,

    /// Opponent to evaluate against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Minimax)]
    pub opponent: OpponentKind,

    /// Saved bot to play against instead of a fixed opponent
    #[arg(long, short = 'a', conflicts_with = "opponent")]
    pub against: Option<PathBuf>,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Exploration range while evaluating
    #[arg(long, short = 'e', default_value_t = 5.0)]
    pub exploration: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search depth of the minimax opponent
    #[arg(long, short = 'd', default_value_t = MinimaxBot::DEFAULT_DEPTH)]
    pub depth: u32,

    /// Board height (defaults to the height the bot was trained on)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Write the comparison result as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    if args.against.is_none() && args.opponent == OpponentKind::SelfPlay {
        return Err(anyhow!("evaluate against 'minimax', 'random' or a saved bot"));
    }

    let saved = SavedBot::load_from_file(&args.bot)?;
    let mut bot = saved.to_bot()?;
    bot.set_exploration(args.exploration)?;
    bot.reseed(args.seed);

    let rows = args
        .rows
        .or(saved.metadata.rows)
        .unwrap_or(crate::connect4::DEFAULT_ROWS);

    print_section("Loaded bot");
    print_kv("File", &args.bot.display().to_string());
    print_kv("Boards", &format_number(saved.table.len()));
    if let Some(games) = saved.metadata.games_trained {
        print_kv("Games trained", &format_number(games));
    }
    if !saved.metadata.opponents.is_empty() {
        print_kv("Trained against", &saved.metadata.opponents.join(", "));
    }

    let opponent_seed = args.seed.map(|seed| seed.wrapping_add(1));
    let mut opponent: Box<dyn Learner> = match &args.against {
        Some(path) => Box::new(load_rival(path, args.exploration, opponent_seed)?),
        None => {
            let search = SearchConfig::default().with_depth(args.depth);
            fixed_opponent(args.opponent, &search, opponent_seed)?
        }
    };

    let mut frozen = FrozenLearner::new(&mut bot);
    let mut frozen_opponent = FrozenLearner::new(opponent.as_mut());
    let result = ComparisonFramework::new().with_rows(rows).head_to_head(
        &mut frozen,
        &mut frozen_opponent,
        args.games,
    )?;

    print_section(&format!("{} vs {}", frozen.name(), frozen_opponent.name()));
    print_comparison(&result);

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &result)
            .context("Failed to write evaluation result")?;
        writer.flush().context("Failed to write evaluation result")?;
        println!("\nResult written to: {}", path.display());
    }

    Ok(())
}

/// Load a second saved bot, named after its file stem.
fn load_rival(path: &Path, exploration: f64, seed: Option<u64>) -> Result<LearningBot> {
    let saved = SavedBot::load_from_file(path)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rival".to_string());
    let mut rival = saved.to_bot()?.with_name(name);
    rival.set_exploration(exploration)?;
    rival.reseed(seed);
    Ok(rival)
}
