//! Negamax alpha-beta move selection.

use crate::board::{Board, Move, Squares};
use crate::search::evaluator::Evaluator;
use crate::search::time_keeper::TimeKeeper;
use crate::NUM_SPACES;
use arrayvec::ArrayVec;
use derive_more::{Display, Error};
use std::time::Duration;

/// Depth at or above which children are searched fewest-replies-first.
const SORT_DEPTH: usize = 3;

/// Upper bound on legal moves in one position; 33 is the proven maximum.
const MAX_MOVES: usize = 40;

const SCORE_MIN: i32 = i32::MIN + 1;
const SCORE_MAX: i32 = i32::MAX - 1;

/// Errors signalled by the search entry points.
#[derive(Debug, PartialEq, Error, Display)]
pub enum SearchError {
    InvalidArgument,
}

/// Negamax alpha-beta over a pluggable evaluator.
///
/// Keeps no state between calls: every answer follows from the board, the
/// depth, and the evaluator alone.
pub struct AlphaBetaSearch {
    evaluator: Box<dyn Evaluator>,
}

impl AlphaBetaSearch {
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        AlphaBetaSearch { evaluator }
    }

    /// The best move for the player to move, looking `depth` plies ahead.
    ///
    /// Returns [`Move::Pass`] when the mover has no legal move. Ties between
    /// equally good moves go to the lowest square index.
    pub fn get_move(&self, board: &Board, depth: usize) -> Result<Move, SearchError> {
        if depth == 0 {
            return Err(SearchError::InvalidArgument);
        }
        let mut best = Move::Pass;
        let mut alpha = SCORE_MIN;
        for square in Squares::new(board.legal_moves()) {
            let mut child = *board;
            child.place_unchecked(square);
            let score = -self.score(&child, depth - 1, -SCORE_MAX, -alpha, None);
            if score > alpha {
                alpha = score;
                best = Move::Place(square);
            }
        }
        Ok(best)
    }

    /// The best move under a wall-clock budget, by iterative deepening.
    ///
    /// Searches depth 1 to completion, then keeps deepening until the budget
    /// runs out, answering from the deepest fully-searched depth.
    pub fn get_move_with_timeout(
        &self,
        board: &Board,
        budget: Duration,
    ) -> Result<Move, SearchError> {
        let keeper = TimeKeeper::new(budget);
        let mut best = self.get_move(board, 1)?;
        let mut depth = 2;
        while depth <= NUM_SPACES && !keeper.is_timeout() {
            match self.timed_root(board, depth, &keeper) {
                Some(deeper) => best = deeper,
                None => break,
            }
            depth += 1;
        }
        Ok(best)
    }

    fn timed_root(&self, board: &Board, depth: usize, keeper: &TimeKeeper) -> Option<Move> {
        let mut best = Move::Pass;
        let mut alpha = SCORE_MIN;
        for square in Squares::new(board.legal_moves()) {
            let mut child = *board;
            child.place_unchecked(square);
            let score = -self.score(&child, depth - 1, -SCORE_MAX, -alpha, Some(keeper));
            if keeper.is_timeout() {
                // The subtree was cut short; its score proves nothing.
                return None;
            }
            if score > alpha {
                alpha = score;
                best = Move::Place(square);
            }
        }
        Some(best)
    }

    fn score(
        &self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        beta: i32,
        keeper: Option<&TimeKeeper>,
    ) -> i32 {
        if depth == 0 {
            return self.evaluator.evaluate(board);
        }

        let moves = board.legal_moves();
        if moves == 0 {
            let passed = board.passed();
            if passed.legal_moves() == 0 {
                // Game over; score the final position.
                return self.evaluator.evaluate(board);
            }
            // A forced pass still costs a ply.
            return -self.score(&passed, depth - 1, -beta, -alpha, keeper);
        }

        if depth >= SORT_DEPTH {
            let mut children: ArrayVec<[Board; MAX_MOVES]> = Squares::new(moves)
                .map(|square| {
                    let mut child = *board;
                    child.place_unchecked(square);
                    child
                })
                .collect();
            // Fewest replies first: cheap subtrees tighten the window before
            // the expensive ones.
            children.sort_unstable_by_key(|child| child.legal_moves().count_ones());
            for child in &children {
                if let Some(keeper) = keeper {
                    if keeper.is_timeout() {
                        break;
                    }
                }
                let score = -self.score(child, depth - 1, -beta, -alpha, keeper);
                if score >= beta {
                    return beta;
                }
                if score > alpha {
                    alpha = score;
                }
            }
        } else {
            for square in Squares::new(moves) {
                if let Some(keeper) = keeper {
                    if keeper.is_timeout() {
                        break;
                    }
                }
                let mut child = *board;
                child.place_unchecked(square);
                let score = -self.score(&child, depth - 1, -beta, -alpha, keeper);
                if score >= beta {
                    return beta;
                }
                if score > alpha {
                    alpha = score;
                }
            }
        }
        alpha
    }
}
