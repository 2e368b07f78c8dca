//! Shared helpers for the integration tests.

#![allow(dead_code)]

use dropfour::connect4::Board;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Play up to `plies` uniformly random legal moves, stopping early on a
/// terminal board.
pub fn random_board(rng: &mut StdRng, plies: usize) -> Board {
    let mut board = Board::new();
    for _ in 0..plies {
        if board.is_terminal() {
            break;
        }
        let legal = board.legal_columns();
        let column = legal[rng.random_range(0..legal.len())];
        board.place(column).expect("legal column accepted");
    }
    board
}

/// A batch of reproducible random positions of varying length.
pub fn sample_boards(seed: u64, count: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let plies = rng.random_range(0..=42);
            random_board(&mut rng, plies)
        })
        .collect()
}
