//! One game from an empty board to a terminal outcome

use crate::{
    Error, Result,
    connect4::{Board, GameOutcome, PlayedMove, Player},
    ports::Learner,
};

/// A single episode: the board, each player's move log and the outcome
/// once the board is terminal.
#[derive(Debug, Clone)]
pub struct Episode {
    board: Board,
    first_player: Player,
    x_moves: Vec<PlayedMove>,
    o_moves: Vec<PlayedMove>,
    outcome: Option<GameOutcome>,
}

impl Episode {
    /// Fresh standard board with `first_player` to move
    pub fn new(first_player: Player) -> Self {
        Self::with_board(Board::new_with_player(first_player))
    }

    /// Empty board of a custom height
    pub fn with_rows(rows: usize, first_player: Player) -> Result<Self> {
        Ok(Self::with_board(Board::with_rows(rows, first_player)?))
    }

    /// Continue from an existing position. The player to move on `board`
    /// counts as the starting player of this episode.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            first_player: board.to_move,
            x_moves: Vec::new(),
            o_moves: Vec::new(),
            outcome: GameOutcome::of_board(&board),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    pub fn to_move(&self) -> Player {
        self.board.to_move
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Moves recorded for `player`, in the order they were made
    pub fn played_moves(&self, player: Player) -> &[PlayedMove] {
        match player {
            Player::X => &self.x_moves,
            Player::O => &self.o_moves,
        }
    }

    /// Plies played so far
    pub fn moves(&self) -> usize {
        self.x_moves.len() + self.o_moves.len()
    }

    /// Ask `learner` for a column on the current board.
    pub fn choose_move(&self, learner: &mut dyn Learner) -> Result<usize> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        learner.select_move(&self.board)
    }

    /// Drop a chip for the player to move and record the move.
    ///
    /// # Errors
    ///
    /// [`Error::GameOver`] once the episode has an outcome, or the board's
    /// error for a full or out-of-range column. A rejected move leaves the
    /// episode untouched.
    pub fn apply_move(&mut self, column: usize) -> Result<&Board> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        let before = self.board;
        self.board.place(column)?;
        let played = PlayedMove::new(before, column);
        match before.to_move {
            Player::X => self.x_moves.push(played),
            Player::O => self.o_moves.push(played),
        }
        self.outcome = GameOutcome::of_board(&self.board);
        Ok(&self.board)
    }

    /// Alternate `x` and `o` until the board is terminal.
    pub fn play_out(&mut self, x: &mut dyn Learner, o: &mut dyn Learner) -> Result<GameOutcome> {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            let learner: &mut dyn Learner = match self.board.to_move {
                Player::X => &mut *x,
                Player::O => &mut *o,
            };
            let column = self.choose_move(learner)?;
            self.apply_move(column)?;
        }
    }

    /// Hand each learner its own log, its view of the outcome and whether it
    /// started.
    ///
    /// # Errors
    ///
    /// [`Error::EpisodeInProgress`] if the board is not terminal yet.
    pub fn finish(&self, x: &mut dyn Learner, o: &mut dyn Learner) -> Result<GameOutcome> {
        let outcome = self.outcome.ok_or(Error::EpisodeInProgress)?;
        self.finish_with_outcome(outcome, x, o)?;
        Ok(outcome)
    }

    /// Like [`Episode::finish`] but with an outcome decided by the caller,
    /// e.g. a draw declared when no legal move remains.
    pub fn finish_with_outcome(
        &self,
        outcome: GameOutcome,
        x: &mut dyn Learner,
        o: &mut dyn Learner,
    ) -> Result<()> {
        x.learn(
            &self.x_moves,
            outcome.for_player(Player::X),
            self.first_player == Player::X,
        )?;
        o.learn(
            &self.o_moves,
            outcome.for_player(Player::O),
            self.first_player == Player::O,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connect4::Outcome, pipeline::comparison::RandomLearner};

    /// Records what it was taught
    struct Recorder {
        name: String,
        seen: Option<(usize, Outcome, bool)>,
    }

    impl Recorder {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                seen: None,
            }
        }
    }

    impl Learner for Recorder {
        fn select_move(&mut self, board: &Board) -> Result<usize> {
            board.legal_columns().first().copied().ok_or(Error::NoLegalMove)
        }

        fn learn(
            &mut self,
            played_moves: &[PlayedMove],
            outcome: Outcome,
            started: bool,
        ) -> Result<()> {
            self.seen = Some((played_moves.len(), outcome, started));
            Ok(())
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_moves_are_logged_per_player() {
        let mut episode = Episode::new(Player::O);
        episode.apply_move(3).unwrap();
        episode.apply_move(4).unwrap();
        episode.apply_move(3).unwrap();

        assert_eq!(episode.played_moves(Player::O).len(), 2);
        assert_eq!(episode.played_moves(Player::X).len(), 1);
        let first = episode.played_moves(Player::O)[0];
        assert_eq!(first.board, Board::new_with_player(Player::O));
        assert_eq!(first.column, 3);
        assert_eq!(episode.moves(), 3);
    }

    #[test]
    fn test_move_after_win_is_rejected() {
        let mut episode = Episode::new(Player::X);
        for column in [0, 1, 0, 1, 0, 1, 0] {
            episode.apply_move(column).unwrap();
        }
        assert_eq!(episode.outcome(), Some(GameOutcome::Win(Player::X)));
        assert!(matches!(episode.apply_move(2), Err(Error::GameOver)));
    }

    #[test]
    fn test_full_column_leaves_episode_unchanged() {
        let mut episode = Episode::with_rows(4, Player::X).unwrap();
        for _ in 0..4 {
            episode.apply_move(5).unwrap();
        }
        let before = *episode.board();
        assert!(matches!(episode.apply_move(5), Err(Error::ColumnFull { column: 5 })));
        assert_eq!(*episode.board(), before);
        assert_eq!(episode.moves(), 4);
    }

    #[test]
    fn test_finish_hands_out_perspectives() {
        let mut episode = Episode::new(Player::X);
        for column in [0, 1, 0, 1, 0, 1, 0] {
            episode.apply_move(column).unwrap();
        }
        let mut x = Recorder::new("x");
        let mut o = Recorder::new("o");
        episode.finish(&mut x, &mut o).unwrap();
        assert_eq!(x.seen, Some((4, Outcome::Win, true)));
        assert_eq!(o.seen, Some((3, Outcome::Loss, false)));
    }

    #[test]
    fn test_finish_requires_outcome() {
        let episode = Episode::new(Player::X);
        let mut x = Recorder::new("x");
        let mut o = Recorder::new("o");
        assert!(matches!(
            episode.finish(&mut x, &mut o),
            Err(Error::EpisodeInProgress)
        ));
    }

    #[test]
    fn test_play_out_reaches_terminal_board() {
        let mut x = RandomLearner::with_seed("x", 1);
        let mut o = RandomLearner::with_seed("o", 2);
        let mut episode = Episode::new(Player::X);
        let outcome = episode.play_out(&mut x, &mut o).unwrap();
        assert!(episode.board().is_terminal());
        assert_eq!(episode.outcome(), Some(outcome));
        assert!(matches!(episode.choose_move(&mut x), Err(Error::GameOver)));
    }
}
