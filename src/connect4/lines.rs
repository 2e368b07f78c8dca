//! Four-in-a-row line geometry: opportunity counting and win detection

use super::{Board, Cell, Player};

/// Length of a winning line
pub const LINE_LENGTH: usize = 4;

/// Line directions as `(row delta, column delta)`: diag-down-right, vertical,
/// horizontal, diag-down-left.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, 0), (0, 1), (-1, 1)];

/// A length-4 window through an origin cell.
///
/// `offset` is the position of the window start relative to the origin,
/// measured in steps along `direction` (always in `-3..=0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stripe {
    pub direction: (isize, isize),
    pub offset: isize,
}

/// Every stripe containing a given cell: 4 directions x 4 offsets.
pub const STRIPES: [Stripe; 16] = build_stripes();

const fn build_stripes() -> [Stripe; 16] {
    let mut stripes = [Stripe {
        direction: (0, 0),
        offset: 0,
    }; 16];
    let mut d = 0;
    while d < DIRECTIONS.len() {
        let mut k = 0;
        while k < LINE_LENGTH {
            stripes[d * LINE_LENGTH + k] = Stripe {
                direction: DIRECTIONS[d],
                offset: k as isize - (LINE_LENGTH as isize - 1),
            };
            k += 1;
        }
        d += 1;
    }
    stripes
}

impl Stripe {
    /// Coordinates of the four cells of this stripe for the given origin.
    pub fn cells(&self, row: usize, column: usize) -> [(isize, isize); LINE_LENGTH] {
        let (dr, dc) = self.direction;
        std::array::from_fn(|i| {
            let step = self.offset + i as isize;
            (row as isize + dr * step, column as isize + dc * step)
        })
    }

    /// True when every cell is on the board and either empty or holding `chip`.
    pub fn is_open_for(&self, board: &Board, row: usize, column: usize, chip: Cell) -> bool {
        self.cells(row, column).iter().all(|&(r, c)| {
            matches!(board.cell_at(r, c), Some(cell) if cell == Cell::Empty || cell == chip)
        })
    }
}

/// Count the unblocked four-in-a-row windows through an occupied cell.
///
/// Each of the 16 direction/offset stripes is counted independently, so the
/// result is at most 16. Empty cells have no opportunities and return 0.
/// Completed lines are not special-cased here; wins are detected separately.
pub fn count_opportunities(board: &Board, row: usize, column: usize) -> usize {
    let chip = board.cell(row, column);
    if chip == Cell::Empty {
        return 0;
    }
    STRIPES
        .iter()
        .filter(|stripe| stripe.is_open_for(board, row, column, chip))
        .count()
}

/// Utility for analyzing lines on the board
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has four connected chips in any direction
    pub fn has_four(board: &Board, player: Player) -> bool {
        let target = player.to_cell();
        board
            .occupied_cells()
            .filter(|&(_, _, owner)| owner == player)
            .any(|(row, column, _)| {
                DIRECTIONS.iter().any(|&direction| {
                    Stripe {
                        direction,
                        offset: 0,
                    }
                    .cells(row, column)
                    .iter()
                    .all(|&(r, c)| board.cell_at(r, c) == Some(target))
                })
            })
    }

    /// Sum of opportunities over every chip owned by `player`
    pub fn total_opportunities(board: &Board, player: Player) -> usize {
        board
            .occupied_cells()
            .filter(|&(_, _, owner)| owner == player)
            .map(|(row, column, _)| count_opportunities(board, row, column))
            .sum()
    }
}
