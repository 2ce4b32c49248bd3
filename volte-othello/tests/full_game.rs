//! Whole games played through the public API.

use volte_othello::search::{AlphaBetaSearch, MatrixEvaluator, MobilityEvaluator};
use volte_othello::{Board, Move, Turn};

/// The quickest possible game: Black wipes White out on the ninth move
/// (e6 f4 e3 f6 g5 d6 e7 f5 c5).
#[test]
fn shortest_game_is_a_wipe_out() {
    let mut board = Board::new();
    for (ply, &square) in [44, 29, 20, 45, 38, 43, 52, 37, 34].iter().enumerate() {
        assert!(board.is_legal_move(square), "ply {} at {}", ply, square);
        let flips = board.apply_move(square).unwrap();
        assert_ne!(flips, 0, "a legal move always flips something");
        // Each placement adds one disc; flips only change colors.
        let (player, opponent) = board.piece_counts();
        assert_eq!((player + opponent) as usize, 5 + ply);
    }
    assert!(board.is_terminal());
    assert_eq!(board.turn(), Turn::White);
    assert_eq!(board.piece_counts(), (0, 13));
}

#[test]
fn engines_finish_a_game_cleanly() {
    let black = AlphaBetaSearch::new(Box::new(MatrixEvaluator::default()));
    let white = AlphaBetaSearch::new(Box::new(MobilityEvaluator));

    let mut board = Board::new();
    let mut plies = 0;
    while !board.is_terminal() {
        if board.legal_moves() == 0 {
            board.do_pass().unwrap();
            continue;
        }
        let mover = match board.turn() {
            Turn::Black => &black,
            Turn::White => &white,
        };
        match mover.get_move(&board, 3).unwrap() {
            Move::Place(square) => {
                assert!(board.is_legal_move(square));
                board.apply_move(square).unwrap();
            }
            Move::Pass => panic!("passed while holding a legal move"),
        }
        plies += 1;
        assert!(plies <= 120, "game did not terminate");
    }

    let (player, opponent) = board.piece_counts();
    assert!(player + opponent >= 4);
    assert!(player + opponent <= 64);

    // The final position survives the wire format unchanged.
    let mut reloaded = Board::new();
    reloaded
        .set_board_str(&board.to_board_str(), board.turn())
        .unwrap();
    assert_eq!(reloaded, board);
}
