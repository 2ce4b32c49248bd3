//! Checked game state and the rules of play.

use crate::bitboard::{self, Bitboard};
use crate::{EDGE_LENGTH, NUM_SPACES};
use derive_more::{Display, Error};
use itertools::Itertools;
use std::fmt;
use std::ops::Not;
use std::str::FromStr;

/// The two players, named by piece color. Black moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Black,
    White,
}

impl Default for Turn {
    fn default() -> Self {
        Turn::Black
    }
}

impl Not for Turn {
    type Output = Turn;

    fn not(self) -> Self::Output {
        match self {
            Turn::Black => Turn::White,
            Turn::White => Turn::Black,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Turn::Black => write!(f, "Black"),
            Turn::White => write!(f, "White"),
        }
    }
}

/// Error for parsing a [`Turn`] from a string.
#[derive(Debug, PartialEq)]
pub struct ParseTurnError;

impl FromStr for Turn {
    type Err = ParseTurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("black") {
            Ok(Turn::Black)
        } else if s.eq_ignore_ascii_case("white") {
            Ok(Turn::White)
        } else {
            Err(ParseTurnError)
        }
    }
}

/// The contents of a single square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disc {
    Empty,
    Black,
    White,
}

impl From<Turn> for Disc {
    fn from(turn: Turn) -> Self {
        match turn {
            Turn::Black => Disc::Black,
            Turn::White => Disc::White,
        }
    }
}

/// A move: placing a piece on a numbered square, or passing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Place(usize),
    Pass,
}

/// Error for parsing a [`Move`] from a string.
#[derive(Debug, PartialEq)]
pub struct ParseMoveError;

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Move::Place(square) => write!(f, "{}", square),
            Move::Pass => write!(f, "pass"),
        }
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }
        match s.parse::<usize>() {
            Ok(square) if square < NUM_SPACES => Ok(Move::Place(square)),
            _ => Err(ParseMoveError),
        }
    }
}

/// Errors signalled by checked [`Board`] operations.
#[derive(Debug, PartialEq, Error, Display)]
pub enum BoardError {
    ParseError,
    InvalidState,
    IllegalMove,
}

#[inline]
fn square_mask(square: usize) -> Bitboard {
    1 << (NUM_SPACES - 1 - square)
}

/// A full game state: both players' pieces and whose turn it is.
///
/// Squares are indexed 0 through 63 from the upper-left corner in row-major
/// order. Operations that take a square index validate it; the raw mask
/// operations live in [`crate::bitboard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    player: Bitboard,
    opponent: Bitboard,
    turn: Turn,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board in the starting position, Black to move.
    pub fn new() -> Self {
        Board {
            player: bitboard::BLACK_START,
            opponent: bitboard::WHITE_START,
            turn: Turn::Black,
        }
    }

    /// The raw masks as (player to move, opponent).
    pub fn get_board(&self) -> (Bitboard, Bitboard) {
        (self.player, self.opponent)
    }

    /// The color whose turn it is.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Replace the position with raw masks. The masks must be disjoint.
    pub fn set_board(
        &mut self,
        player: Bitboard,
        opponent: Bitboard,
        turn: Turn,
    ) -> Result<(), BoardError> {
        if player & opponent != 0 {
            return Err(BoardError::InvalidState);
        }
        self.player = player;
        self.opponent = opponent;
        self.turn = turn;
        Ok(())
    }

    /// Load a position from 64 cells of `X` (player to move), `O` (opponent),
    /// and `-` (empty), upper-left square first, plus the color to move.
    /// The board is untouched on error.
    pub fn set_board_str(&mut self, board_str: &str, turn: Turn) -> Result<(), BoardError> {
        if board_str.len() != NUM_SPACES {
            return Err(BoardError::ParseError);
        }
        let mut player = 0;
        let mut opponent = 0;
        for (square, cell) in board_str.chars().enumerate() {
            match cell {
                'X' => player |= square_mask(square),
                'O' => opponent |= square_mask(square),
                '-' => {}
                _ => return Err(BoardError::ParseError),
            }
        }
        self.player = player;
        self.opponent = opponent;
        self.turn = turn;
        Ok(())
    }

    /// Render the position as 64 cells of `X`/`O`/`-` from the mover's
    /// perspective; the exact inverse of [`Board::set_board_str`].
    pub fn to_board_str(&self) -> String {
        (0..NUM_SPACES)
            .map(|square| {
                let mask = square_mask(square);
                if self.player & mask != 0 {
                    'X'
                } else if self.opponent & mask != 0 {
                    'O'
                } else {
                    '-'
                }
            })
            .collect()
    }

    /// The contents of every square in absolute colors, upper-left first.
    pub fn to_color_vec(&self) -> Vec<Disc> {
        (0..NUM_SPACES)
            .map(|square| {
                let mask = square_mask(square);
                if self.player & mask != 0 {
                    Disc::from(self.turn)
                } else if self.opponent & mask != 0 {
                    Disc::from(!self.turn)
                } else {
                    Disc::Empty
                }
            })
            .collect()
    }

    /// Three 8x8 0/1 planes (mover's pieces, opponent's pieces, empties),
    /// indexed `[row][col]` from the upper-left.
    pub fn to_matrices(&self) -> [[[u8; EDGE_LENGTH]; EDGE_LENGTH]; 3] {
        let mut planes = [[[0; EDGE_LENGTH]; EDGE_LENGTH]; 3];
        for square in 0..NUM_SPACES {
            let mask = square_mask(square);
            let plane = if self.player & mask != 0 {
                0
            } else if self.opponent & mask != 0 {
                1
            } else {
                2
            };
            planes[plane][square / EDGE_LENGTH][square % EDGE_LENGTH] = 1;
        }
        planes
    }

    /// Mask of the legal moves for the player to move.
    pub fn legal_moves(&self) -> Bitboard {
        bitboard::move_mask(self.player, self.opponent)
    }

    /// The legal moves as square indices in ascending order.
    pub fn legal_moves_vec(&self) -> Vec<usize> {
        Squares::new(self.legal_moves()).collect()
    }

    /// Whether the player to move may place a piece on `square`.
    pub fn is_legal_move(&self, square: usize) -> bool {
        square < NUM_SPACES && self.legal_moves() & square_mask(square) != 0
    }

    /// Place a piece for the player to move, flip the bracketed runs, and
    /// give the turn to the opponent. Returns the mask of flipped pieces.
    /// The board is untouched on error.
    pub fn apply_move(&mut self, square: usize) -> Result<Bitboard, BoardError> {
        if !self.is_legal_move(square) {
            return Err(BoardError::IllegalMove);
        }
        Ok(self.place_unchecked(square))
    }

    /// Place a known-legal move without validating it.
    pub(crate) fn place_unchecked(&mut self, square: usize) -> Bitboard {
        let flips = bitboard::flip_mask(self.player, self.opponent, NUM_SPACES - 1 - square);
        let mover = self.player | flips | square_mask(square);
        self.player = self.opponent & !flips;
        self.opponent = mover;
        self.turn = !self.turn;
        flips
    }

    /// Give the turn to the opponent. Legal only when the mover has no move.
    pub fn do_pass(&mut self) -> Result<(), BoardError> {
        if self.legal_moves() != 0 {
            return Err(BoardError::IllegalMove);
        }
        *self = self.passed();
        Ok(())
    }

    /// The same position with the roles swapped, as after a pass. Does not
    /// check that passing is legal; see [`Board::do_pass`] for the checked
    /// version.
    pub fn passed(&self) -> Board {
        Board {
            player: self.opponent,
            opponent: self.player,
            turn: !self.turn,
        }
    }

    /// Whether the game is over: neither player has a legal move.
    pub fn is_terminal(&self) -> bool {
        self.legal_moves() == 0 && self.passed().legal_moves() == 0
    }

    /// Piece counts as (player to move, opponent).
    pub fn piece_counts(&self) -> (u32, u32) {
        (self.player.count_ones(), self.opponent.count_ones())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "  A B C D E F G H")?;
        for (row, cells) in self
            .to_board_str()
            .chars()
            .chunks(EDGE_LENGTH)
            .into_iter()
            .enumerate()
        {
            writeln!(f, "{} {}", row + 1, cells.format(" "))?;
        }
        Ok(())
    }
}

/// Iterates the squares of a mask in ascending index order (upper-left
/// square first).
#[derive(Clone, Copy, Debug)]
pub struct Squares(Bitboard);

impl Squares {
    pub fn new(mask: Bitboard) -> Self {
        Squares(mask)
    }
}

impl Iterator for Squares {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let square = self.0.leading_zeros() as usize;
        self.0 ^= square_mask(square);
        Some(square)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Squares {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position() {
        let board = Board::new();
        assert_eq!(board.get_board(), (0x0000000810000000, 0x0000001008000000));
        assert_eq!(board.turn(), Turn::Black);
        assert_eq!(board.piece_counts(), (2, 2));
        assert!(!board.is_terminal());
    }

    #[test]
    fn starting_legal_moves() {
        let board = Board::new();
        assert_eq!(board.legal_moves(), 0x0000102004080000);
        assert_eq!(board.legal_moves_vec(), vec![19, 26, 37, 44]);
        assert!(board.is_legal_move(19));
        assert!(!board.is_legal_move(0));
        assert!(!board.is_legal_move(64));
    }

    #[test]
    fn board_str_round_trip() {
        let mut board = Board::new();
        let edges: String = ["XXXXXXXX", &"-".repeat(48), "OOOOOOOO"].concat();
        board.set_board_str(&edges, Turn::White).unwrap();
        assert_eq!(board.get_board(), (0xFF00000000000000, 0x00000000000000FF));
        assert_eq!(board.turn(), Turn::White);
        assert_eq!(board.to_board_str(), edges);

        let start = format!("{}OX{}XO{}", "-".repeat(27), "-".repeat(6), "-".repeat(27));
        assert_eq!(Board::new().to_board_str(), start);

        board.set_board_str(&"-".repeat(64), Turn::Black).unwrap();
        assert_eq!(board.get_board(), (0, 0));
    }

    #[test]
    fn board_str_rejects_malformed() {
        let mut board = Board::new();
        assert_eq!(
            board.set_board_str("XO-", Turn::Black),
            Err(BoardError::ParseError)
        );
        assert_eq!(
            board.set_board_str(&"-".repeat(65), Turn::Black),
            Err(BoardError::ParseError)
        );
        assert_eq!(
            board.set_board_str(&format!("{}?", "-".repeat(63)), Turn::Black),
            Err(BoardError::ParseError)
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn set_board_rejects_overlap() {
        let mut board = Board::new();
        assert_eq!(
            board.set_board(0x3, 0x1, Turn::Black),
            Err(BoardError::InvalidState)
        );
        assert_eq!(board, Board::new());
        board.set_board(0x2, 0x1, Turn::White).unwrap();
        assert_eq!(board.get_board(), (0x2, 0x1));
        assert_eq!(board.turn(), Turn::White);
    }

    #[test]
    fn apply_move_flips_and_passes_turn() {
        let mut board = Board::new();
        // Black plays D3; D4 flips.
        let flips = board.apply_move(19).unwrap();
        assert_eq!(flips, 1 << 36);
        assert_eq!(board.turn(), Turn::White);
        let (player, opponent) = board.get_board();
        assert_eq!(player, 1 << 27);
        assert_eq!(opponent, (1 << 44) | (1 << 36) | (1 << 35) | (1 << 28));
        assert_eq!(board.piece_counts(), (1, 4));
    }

    #[test]
    fn apply_move_rejects_illegal() {
        let mut board = Board::new();
        assert_eq!(board.apply_move(0), Err(BoardError::IllegalMove));
        assert_eq!(board.apply_move(27), Err(BoardError::IllegalMove));
        assert_eq!(board.apply_move(64), Err(BoardError::IllegalMove));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn pass_only_without_moves() {
        let mut board = Board::new();
        assert_eq!(board.do_pass(), Err(BoardError::IllegalMove));
        assert_eq!(board, Board::new());

        // Lone pieces in opposite corners: nobody can move.
        board
            .set_board_str(&format!("X{}O", "-".repeat(62)), Turn::Black)
            .unwrap();
        board.do_pass().unwrap();
        assert_eq!(board.turn(), Turn::White);
        assert_eq!(board.piece_counts(), (1, 1));
        assert!(board.is_terminal());
    }

    #[test]
    fn wipe_out_and_full_board_are_terminal() {
        let mut board = Board::new();
        board.set_board(0, 0x3C3C3C0000, Turn::Black).unwrap();
        assert!(board.is_terminal());

        board
            .set_board(0xFFFFFFFF00000000, 0x00000000FFFFFFFF, Turn::White)
            .unwrap();
        assert!(board.is_terminal());
    }

    #[test]
    fn color_vec_and_matrices() {
        let board = Board::new();
        let colors = board.to_color_vec();
        assert_eq!(colors.len(), NUM_SPACES);
        assert_eq!(colors[28], Disc::Black);
        assert_eq!(colors[27], Disc::White);
        assert_eq!(colors[0], Disc::Empty);
        let count = |disc| colors.iter().filter(|&&c| c == disc).count();
        assert_eq!(count(Disc::Black), 2);
        assert_eq!(count(Disc::White), 2);

        let planes = board.to_matrices();
        assert_eq!(planes[0][3][4], 1);
        assert_eq!(planes[1][3][3], 1);
        assert_eq!(planes[2][0][0], 1);
        assert_eq!(planes[2][3][3], 0);
        let fill = |plane: &[[u8; EDGE_LENGTH]; EDGE_LENGTH]| -> u32 {
            plane.iter().flatten().map(|&cell| cell as u32).sum()
        };
        assert_eq!(fill(&planes[0]), 2);
        assert_eq!(fill(&planes[1]), 2);
        assert_eq!(fill(&planes[2]), 60);
    }

    #[test]
    fn move_round_trip() {
        assert_eq!("63".parse::<Move>(), Ok(Move::Place(63)));
        assert_eq!("0".parse::<Move>(), Ok(Move::Place(0)));
        assert_eq!("pass".parse::<Move>(), Ok(Move::Pass));
        assert_eq!("PASS".parse::<Move>(), Ok(Move::Pass));
        assert!("64".parse::<Move>().is_err());
        assert!("-1".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
        assert_eq!(Move::Place(19).to_string(), "19");
        assert_eq!(Move::Pass.to_string(), "pass");
    }

    #[test]
    fn turn_parsing() {
        assert_eq!("BLACK".parse::<Turn>(), Ok(Turn::Black));
        assert_eq!("white".parse::<Turn>(), Ok(Turn::White));
        assert!("GREEN".parse::<Turn>().is_err());
        assert_eq!(!Turn::Black, Turn::White);
        assert_eq!(Turn::default(), Turn::Black);
    }

    #[test]
    fn display_shows_grid() {
        let rendered = Board::new().to_string();
        assert!(rendered.starts_with("  A B C D E F G H"));
        assert_eq!(rendered.lines().count(), EDGE_LENGTH + 1);
    }

    #[test]
    fn squares_iterate_ascending() {
        let squares: Vec<usize> = Squares::new((1 << 63) | (1 << 32) | 1).collect();
        assert_eq!(squares, vec![0, 31, 63]);
        assert_eq!(Squares::new(0).count(), 0);
        assert_eq!(Squares::new(0xFF).len(), 8);
    }
}
