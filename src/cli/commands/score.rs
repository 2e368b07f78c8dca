//! Score command - evaluate a position and show the minimax choice

use anyhow::Result;
use clap::Parser;

use super::parse_player_token;
use crate::{
    bot::MinimaxBot,
    cli::output::{print_kv, print_section},
    connect4::{Board, DEFAULT_ROWS, Player, evaluate},
};

#[derive(Parser, Debug)]
#[command(about = "Score a position reached by a list of columns")]
pub struct ScoreArgs {
    /// Columns played so far, e.g. "3,3,4"
    #[arg(value_delimiter = ',')]
    pub moves: Vec<usize>,

    /// Player who opened the game (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub first: String,

    /// Perspective of the score (defaults to the player to move)
    #[arg(long, short = 'p')]
    pub player: Option<String>,

    /// Minimax search depth
    #[arg(long, short = 'd', default_value_t = MinimaxBot::DEFAULT_DEPTH)]
    pub depth: u32,

    /// Board height
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,
}

pub fn execute(args: ScoreArgs) -> Result<()> {
    let first = parse_player_token(&args.first, "--first")?;
    let board = replay(&args.moves, args.rows, first)?;
    let player = match &args.player {
        Some(token) => parse_player_token(token, "--player")?,
        None => board.to_move,
    };

    print_section("Position");
    println!("{board}");
    print_kv("To move", &board.to_move.to_string());
    print_kv(&format!("Score for {player}"), &evaluate(&board, player).to_string());

    if board.is_terminal() {
        print_kv("State", "game over");
        return Ok(());
    }

    let minimax = MinimaxBot::new(args.depth)?;
    print_section(&format!("Minimax (depth {})", minimax.depth()));
    for (column, score) in minimax.score_columns(&board) {
        print_kv(&format!("Column {column}"), &score.to_string());
    }
    print_kv("Best column", &minimax.best_move(&board)?.to_string());

    Ok(())
}

fn replay(moves: &[usize], rows: usize, first: Player) -> Result<Board> {
    let mut board = Board::with_rows(rows, first)?;
    for &column in moves {
        board.place(column)?;
    }
    Ok(board)
}
