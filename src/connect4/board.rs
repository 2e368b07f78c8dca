//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Number of columns on the board. Weight vectors always have this length.
pub const COLUMNS: usize = 7;
/// Rows on a standard board.
pub const DEFAULT_ROWS: usize = 6;
/// Smallest supported height (a vertical line must fit).
pub const MIN_ROWS: usize = 4;
/// Largest supported height.
pub const MAX_ROWS: usize = 12;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// The player owning this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Exact, collision-free text encoding of a board and the player to move.
///
/// Rows are written top to bottom, separated by `/`, followed by `_X` or `_O`.
/// Two boards share a key iff their grids and turns are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardKey(String);

impl BoardKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grid contents plus the player to move.
///
/// Cells are stored column-major with row 0 at the bottom. Only the drop
/// operations mutate the grid, so every column stays contiguous from the
/// bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; MAX_ROWS]; COLUMNS],
    heights: [u8; COLUMNS],
    rows: u8,
    pub to_move: Player,
}

impl Board {
    /// Create a new empty 7x6 board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty 7x6 board with the given player to move first.
    pub fn new_with_player(first_player: Player) -> Self {
        Board {
            cells: [[Cell::Empty; MAX_ROWS]; COLUMNS],
            heights: [0; COLUMNS],
            rows: DEFAULT_ROWS as u8,
            to_move: first_player,
        }
    }

    /// Create an empty board with a custom height.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardHeight`] if `rows` is outside
    /// `MIN_ROWS..=MAX_ROWS`.
    pub fn with_rows(rows: usize, first_player: Player) -> Result<Self, crate::Error> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&rows) {
            return Err(crate::Error::InvalidBoardHeight {
                rows,
                min: MIN_ROWS,
                max: MAX_ROWS,
            });
        }
        let mut board = Self::new_with_player(first_player);
        board.rows = rows as u8;
        Ok(board)
    }

    /// Replay a column sequence on a standard board, X moving first.
    pub fn from_moves(moves: &[usize]) -> Result<Self, crate::Error> {
        let mut board = Self::new();
        for &column in moves {
            board.place(column)?;
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub const fn columns(&self) -> usize {
        COLUMNS
    }

    /// Cell at `(row, column)`, row 0 being the bottom.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are off the board.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        assert!(
            row < self.rows() && column < COLUMNS,
            "cell ({row}, {column}) is off a {}x{COLUMNS} board",
            self.rows()
        );
        self.cells[column][row]
    }

    /// Cell at signed coordinates, `None` when off the board.
    pub fn cell_at(&self, row: isize, column: isize) -> Option<Cell> {
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        if row >= self.rows() || column >= COLUMNS {
            return None;
        }
        Some(self.cells[column][row])
    }

    /// Number of chips stacked in a column
    pub fn column_height(&self, column: usize) -> usize {
        self.heights[column] as usize
    }

    /// Out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        column >= COLUMNS || self.column_height(column) >= self.rows()
    }

    /// Columns that can still take a chip, in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLUMNS).filter(|&c| !self.is_column_full(c)).collect()
    }

    /// Drop the current player's chip into `column` and pass the turn.
    ///
    /// Returns the row the chip landed in.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidColumn`] for an out-of-range column and
    /// [`crate::Error::ColumnFull`] when the column has no room left.
    pub fn place(&mut self, column: usize) -> Result<usize, crate::Error> {
        if column >= COLUMNS {
            return Err(crate::Error::InvalidColumn { column });
        }
        if self.is_column_full(column) {
            return Err(crate::Error::ColumnFull { column });
        }

        let row = self.column_height(column);
        self.cells[column][row] = self.to_move.to_cell();
        self.heights[column] += 1;
        self.to_move = self.to_move.opponent();

        debug_assert!(self.is_stacked(), "floating chip after drop in {column}");
        Ok(row)
    }

    /// Return the board that results from dropping a chip into `column`.
    pub fn make_move(&self, column: usize) -> Result<Board, crate::Error> {
        let mut next = *self;
        next.place(column)?;
        Ok(next)
    }

    /// Check if a player has four connected chips
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_four(self, player)
    }

    /// The player with four in a row, if any
    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| self.has_won(player))
    }

    pub fn is_full(&self) -> bool {
        (0..COLUMNS).all(|c| self.is_column_full(c))
    }

    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    pub fn occupied_count(&self) -> usize {
        self.heights.iter().map(|&h| h as usize).sum()
    }

    /// Iterate over `(row, column, owner)` for every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, Player)> + '_ {
        (0..COLUMNS).flat_map(move |column| {
            (0..self.column_height(column)).filter_map(move |row| {
                self.cells[column][row]
                    .owner()
                    .map(|owner| (row, column, owner))
            })
        })
    }

    /// Canonical key used to index weight tables
    pub fn key(&self) -> BoardKey {
        let mut encoded = String::with_capacity(self.rows() * (COLUMNS + 1) + 2);
        for row in (0..self.rows()).rev() {
            for column in 0..COLUMNS {
                encoded.push(self.cells[column][row].to_char());
            }
            if row > 0 {
                encoded.push('/');
            }
        }
        encoded.push('_');
        encoded.push(self.to_move.to_char());
        BoardKey(encoded)
    }

    /// Left-right reflection of the board
    pub fn mirrored(&self) -> Board {
        let mut mirrored = *self;
        mirrored.cells.reverse();
        mirrored.heights.reverse();
        mirrored
    }

    fn is_stacked(&self) -> bool {
        (0..COLUMNS).all(|column| {
            let height = self.column_height(column);
            self.cells[column]
                .iter()
                .enumerate()
                .all(|(row, cell)| (row < height) == (*cell != Cell::Empty))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (0..COLUMNS).map(|c| c.to_string()).collect();
        writeln!(f, " {} ", header.join(" "))?;
        for row in (0..self.rows()).rev() {
            let cells: Vec<String> = (0..COLUMNS)
                .map(|column| match self.cells[column][row] {
                    Cell::Empty => " ".to_string(),
                    cell => cell.to_char().to_string(),
                })
                .collect();
            write!(f, "|{}|", cells.join("|"))?;
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
