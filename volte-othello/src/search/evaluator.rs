//! Position evaluation heuristics.

use crate::bitboard::Bitboard;
use crate::board::{Board, Squares};
use crate::EDGE_LENGTH;

/// Scores positions from the perspective of the player to move; larger is
/// better for the mover. Implementations must not mutate the board.
pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> i32;
}

/// Scores a position by piece differential alone.
pub struct PieceEvaluator;

impl Evaluator for PieceEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let (player, opponent) = board.piece_counts();
        player as i32 - opponent as i32
    }
}

/// Scores a position by mobility: how many more moves the player to move has
/// than the opponent would have in their place.
pub struct MobilityEvaluator;

impl Evaluator for MobilityEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let own = board.legal_moves().count_ones() as i32;
        let reply = board.passed().legal_moves().count_ones() as i32;
        own - reply
    }
}

/// Classic corner-heavy weights. Corners are stable, the squares next to
/// them hand the corner over.
const DEFAULT_WEIGHTS: [[i32; EDGE_LENGTH]; EDGE_LENGTH] = [
    [120, -20, 20, 5, 5, 20, -20, 120],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [120, -20, 20, 5, 5, 20, -20, 120],
];

/// Scores a position with a table of per-square weights.
pub struct MatrixEvaluator {
    weights: [[i32; EDGE_LENGTH]; EDGE_LENGTH],
}

impl MatrixEvaluator {
    pub fn new(weights: [[i32; EDGE_LENGTH]; EDGE_LENGTH]) -> Self {
        MatrixEvaluator { weights }
    }

    fn weigh(&self, mask: Bitboard) -> i32 {
        Squares::new(mask)
            .map(|square| self.weights[square / EDGE_LENGTH][square % EDGE_LENGTH])
            .sum()
    }
}

impl Default for MatrixEvaluator {
    fn default() -> Self {
        MatrixEvaluator::new(DEFAULT_WEIGHTS)
    }
}

impl Evaluator for MatrixEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let (player, opponent) = board.get_board();
        self.weigh(player) - self.weigh(opponent)
    }
}
