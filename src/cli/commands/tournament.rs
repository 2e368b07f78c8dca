//! Tournament command - knockout between freshly seeded bots

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    app::BotConfig,
    bot::{SavedBot, TrainingMetadata},
    cli::output::{format_number, print_kv, print_section},
    connect4::DEFAULT_ROWS,
    pipeline::Tournament,
};

#[derive(Parser, Debug)]
#[command(about = "Run a knockout tournament and keep the champion")]
pub struct TournamentArgs {
    /// Number of bots in the first round
    #[arg(long, short = 'n', default_value_t = 8)]
    pub bots: usize,

    /// Training games per bout
    #[arg(long, short = 'g', default_value_t = 500)]
    pub games: usize,

    /// Exploration range of every entrant
    #[arg(long, short = 'e', default_value_t = BotConfig::DEFAULT_EXPLORATION)]
    pub exploration: f64,

    /// Random seed; entrant `i` uses `seed + i`
    #[arg(long)]
    pub seed: Option<u64>,

    /// Board height
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Output file for the champion (MessagePack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: TournamentArgs) -> Result<()> {
    let mut tournament = Tournament::new(args.bots, args.games)
        .with_exploration(args.exploration)
        .with_rows(args.rows);
    if let Some(seed) = args.seed {
        tournament = tournament.with_seed(seed);
    }

    print_section("Tournament");
    print_kv("Bots", &args.bots.to_string());
    print_kv("Games per bout", &format_number(args.games));

    let result = tournament.run()?;

    print_section("Champion");
    print_kv("Name", result.champion.name());
    print_kv("Rounds", &result.rounds.to_string());
    print_kv("Bouts", &result.bouts.to_string());
    print_kv("Boards learned", &format_number(result.champion.table().len()));

    if let Some(path) = &args.output {
        let metadata = TrainingMetadata {
            games_trained: Some(result.rounds * args.games),
            opponents: vec!["tournament".to_string()],
            seed: args.seed,
            rows: Some(args.rows),
        };
        SavedBot::from_bot(&result.champion, metadata).save_to_file(path)?;
        println!("\nChampion saved to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_saves_champion() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("champion.msgpack");
        let args = TournamentArgs::parse_from([
            "tournament",
            "--bots",
            "2",
            "--games",
            "3",
            "--seed",
            "5",
            "--output",
            output.to_str().unwrap(),
        ]);
        execute(args).unwrap();

        let saved = SavedBot::load_from_file(&output).unwrap();
        assert_eq!(saved.metadata.games_trained, Some(3));
        assert!(saved.to_bot().is_ok());
    }
}
