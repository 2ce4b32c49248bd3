//! Perft: count the game trees reachable from the starting position.
//!
//! The published per-depth node counts pin down every corner of move
//! generation at once, so they double as a correctness suite for the flip
//! tables. Reference table: http://www.aartbik.com/MISC/reversi.html

use crate::board::{Board, Squares};

/// Number of game-tree leaves exactly `depth` plies below the starting
/// position. A forced pass counts as a ply; a finished game is a leaf.
pub fn run_perft(depth: u64) -> u64 {
    count_leaves(Board::new(), depth, false)
}

fn count_leaves(board: Board, depth: u64, passed: bool) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if moves == 0 {
        // Two passes in a row end the game.
        if passed {
            return 1;
        }
        return count_leaves(board.passed(), depth - 1, true);
    }

    Squares::new(moves)
        .map(|square| {
            let mut child = board;
            child.place_unchecked(square);
            count_leaves(child, depth - 1, false)
        })
        .sum()
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(3), 56);
}

#[test]
fn perft_04() {
    assert_eq!(run_perft(4), 244);
}

#[test]
fn perft_05() {
    assert_eq!(run_perft(5), 1396);
}

#[test]
fn perft_06() {
    assert_eq!(run_perft(6), 8200);
}

#[test]
fn perft_07() {
    assert_eq!(run_perft(7), 55092);
}

#[test]
fn perft_08() {
    assert_eq!(run_perft(8), 390216);
}

// The first forced passes show up at depth 9.
#[test]
fn perft_09() {
    assert_eq!(run_perft(9), 3005288);
}

#[test]
#[ignore]
fn perft_10() {
    assert_eq!(run_perft(10), 24571284);
}
