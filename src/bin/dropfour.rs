//! dropfour CLI - train, evaluate and inspect Connect Four bots

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dropfour")]
#[command(
    version,
    about = "Weight-table learners and a minimax baseline for Connect Four",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a learning bot by self-play or against a fixed opponent
    Train(Box<dropfour::cli::commands::train::TrainArgs>),

    /// Evaluate a saved bot against minimax or random play
    Evaluate(dropfour::cli::commands::evaluate::EvaluateArgs),

    /// Run a knockout tournament between fresh bots
    Tournament(dropfour::cli::commands::tournament::TournamentArgs),

    /// Score a position and show the minimax choice
    Score(dropfour::cli::commands::score::ScoreArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => dropfour::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => dropfour::cli::commands::evaluate::execute(args),
        Commands::Tournament(args) => dropfour::cli::commands::tournament::execute(args),
        Commands::Score(args) => dropfour::cli::commands::score::execute(args),
    }
}
