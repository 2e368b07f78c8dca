//! Connect Four game implementation

pub mod board;
pub mod evaluation;
pub mod game;
pub mod lines;

pub use board::{Board, BoardKey, COLUMNS, Cell, DEFAULT_ROWS, MAX_ROWS, MIN_ROWS, Player};
pub use evaluation::{WIN_SCORE, evaluate, opportunity_difference};
pub use game::{GameOutcome, Outcome, PlayedMove};
pub use lines::{DIRECTIONS, LineAnalyzer, STRIPES, Stripe, count_opportunities};
