//! A fast library for Othello game logic, built on table-driven bitboards.
//!
//! The code is split into two levels of abstraction plus a search layer:
//!  - [`bitboard`] provides raw, unchecked mask operations for maximum speed.
//!  - [`Board`] packages a full game state with rule checking, parsing, and
//!    display on top of the bitboard core.
//!  - [`search`] picks moves with negamax alpha-beta over pluggable
//!    evaluation heuristics.

pub mod bitboard;
pub mod search;
pub mod test_utils;

mod board;

pub use board::*;

/// The edge length of the game board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on the game board.
pub const NUM_SPACES: usize = 64;
