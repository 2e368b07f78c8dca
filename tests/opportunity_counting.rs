//! Properties of opportunity counting and board evaluation

mod common;

use dropfour::connect4::{
    Board, COLUMNS, Cell, LineAnalyzer, Player, WIN_SCORE, count_opportunities, evaluate,
    opportunity_difference,
};

#[test]
fn test_opportunities_never_exceed_sixteen() {
    for board in common::sample_boards(7, 200) {
        for (row, column, _) in board.occupied_cells() {
            assert!(count_opportunities(&board, row, column) <= 16);
        }
    }
}

#[test]
fn test_board_height_does_not_change_bottom_row_counts() {
    // X at the bottom of the center column: 4 horizontal, 1 vertical and
    // one window per diagonal.
    let mut tall = Board::with_rows(12, Player::X).unwrap();
    tall.place(3).unwrap();
    assert_eq!(count_opportunities(&tall, 0, 3), 7);
}

#[test]
fn test_raised_center_chip() {
    // X stacked three high in column 3, O at (0,0), (1,0) and (0,1).
    // The chip at (2,3) keeps 4 horizontal, 3 vertical, 2 rising diagonal
    // (O at (0,1) blocks one) and 3 falling diagonal windows.
    let board = Board::from_moves(&[3, 0, 3, 0, 3, 1]).unwrap();
    assert_eq!(board.cell(2, 3), Cell::X);
    assert_eq!(count_opportunities(&board, 2, 3), 12);
}

#[test]
fn test_empty_cells_score_zero() {
    let board = Board::from_moves(&[3, 3, 2]).unwrap();
    for column in 0..COLUMNS {
        let height = board.column_height(column);
        for row in height..board.rows() {
            assert_eq!(board.cell(row, column), Cell::Empty);
            assert_eq!(count_opportunities(&board, row, column), 0);
        }
    }
}

#[test]
fn test_edge_chips_lose_out_of_bounds_windows() {
    let corner = Board::from_moves(&[0]).unwrap();
    let center = Board::from_moves(&[3]).unwrap();
    assert!(count_opportunities(&corner, 0, 0) < count_opportunities(&center, 0, 3));
}

#[test]
fn test_evaluation_is_zero_sum_without_a_winner() {
    for board in common::sample_boards(11, 200) {
        if board.winner().is_some() {
            continue;
        }
        assert_eq!(evaluate(&board, Player::X), -evaluate(&board, Player::O));
        assert_eq!(
            evaluate(&board, Player::X),
            opportunity_difference(&board, Player::X)
        );
    }
}

#[test]
fn test_win_scores_are_exclusive() {
    for board in common::sample_boards(13, 300) {
        let x = evaluate(&board, Player::X);
        let o = evaluate(&board, Player::O);
        match board.winner() {
            Some(Player::X) => {
                assert_eq!(x, WIN_SCORE);
                assert_eq!(o, -WIN_SCORE);
            }
            Some(Player::O) => {
                assert_eq!(x, -WIN_SCORE);
                assert_eq!(o, WIN_SCORE);
            }
            None => {
                assert!(x.abs() < WIN_SCORE);
                assert!(!LineAnalyzer::has_four(&board, Player::X));
                assert!(!LineAnalyzer::has_four(&board, Player::O));
            }
        }
    }
}

#[test]
fn test_vertical_win_evaluates_to_win_score() {
    let board = Board::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
    assert_eq!(evaluate(&board, Player::X), WIN_SCORE);
    assert_eq!(evaluate(&board, Player::O), -WIN_SCORE);
}
