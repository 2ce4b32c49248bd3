//! Low-level bitboard operations.
//!
//! For efficiency, these operations are unchecked and may return nonsense if
//! invalid data is passed; [`crate::Board`] layers validation on top.
//!
//! Under the hood, all operations work on u64 bitboards. By convention, the
//! MSB is the upper-left of the board, and uses row-major order. Every line
//! through a square (its row, column, and both diagonals) is gathered into an
//! 8-bit slice and resolved against a precomputed flip table, one lookup per
//! line, covering both traversal directions at once.

use crate::NUM_SPACES;

/// Holds a single player's pieces on the board in a packed format.
pub type Bitboard = u64;

/// Starting bitboard for Black.
pub const BLACK_START: Bitboard = 0x0000000810000000;

/// Starting bitboard for White.
pub const WHITE_START: Bitboard = 0x0000001008000000;

const FILE_FILL: Bitboard = 0x0101010101010101;
const MAIN_DIAG: Bitboard = 0x8040201008040201;

/// Flip geometry for one (opponent line pattern, move position) pair.
///
/// `need_*` is the line square the mover must own to bound a run in that
/// direction; `flips_*` is the run captured when the bound holds. "Left" is
/// toward the line's MSB end, "right" toward its LSB end.
#[derive(Clone, Copy)]
struct LineFlips {
    need_left: u8,
    need_right: u8,
    flips_left: u8,
    flips_right: u8,
}

const NO_FLIPS: LineFlips = LineFlips {
    need_left: 0,
    need_right: 0,
    flips_left: 0,
    flips_right: 0,
};

/// Flip table indexed by the six inner bits of the opponent's line pattern,
/// then by the move's position from the left end of the line.
///
/// The two outer bits of a pattern never matter: a run reaching the end of a
/// line has no bounding square, which reads the same as the run being absent,
/// because the bound check lands on a square the mover cannot own.
static LINE_FLIPS: [[LineFlips; 8]; 64] = build_line_flips();

/// Masks of the diagonals parallel to A1-H8, indexed by rank minus file plus 7.
static MAIN_DIAGS: [Bitboard; 15] = build_main_diags();

/// Masks of the diagonals parallel to H1-A8, indexed by rank plus file.
static ANTI_DIAGS: [Bitboard; 15] = build_anti_diags();

const fn bound_left(line: u8, put: u8) -> u8 {
    if line & (put << 1) == 0 {
        return 0;
    }
    let mut probe = put << 1;
    while line & probe != 0 {
        probe <<= 1;
    }
    probe
}

const fn bound_right(line: u8, put: u8) -> u8 {
    if line & (put >> 1) == 0 {
        return 0;
    }
    let mut probe = put >> 1;
    while line & probe != 0 {
        probe >>= 1;
    }
    probe
}

const fn run_left(line: u8, put: u8) -> u8 {
    if bound_left(line, put) == 0 {
        return 0;
    }
    let mut flips = 0;
    let mut probe = put << 1;
    while line & probe != 0 {
        flips |= probe;
        probe <<= 1;
    }
    flips
}

const fn run_right(line: u8, put: u8) -> u8 {
    if bound_right(line, put) == 0 {
        return 0;
    }
    let mut flips = 0;
    let mut probe = put >> 1;
    while line & probe != 0 {
        flips |= probe;
        probe >>= 1;
    }
    flips
}

const fn build_line_flips() -> [[LineFlips; 8]; 64] {
    let mut table = [[NO_FLIPS; 8]; 64];
    let mut pattern = 0;
    while pattern < 64 {
        // Only the six inner squares of a line can hold a flippable run.
        let line = (pattern as u8) << 1;
        let mut pos = 0;
        while pos < 8 {
            let put = 0x80u8 >> pos;
            if line & put == 0 {
                table[pattern][pos] = LineFlips {
                    need_left: bound_left(line, put),
                    need_right: bound_right(line, put),
                    flips_left: run_left(line, put),
                    flips_right: run_right(line, put),
                };
            }
            pos += 1;
        }
        pattern += 1;
    }
    table
}

const fn build_main_diags() -> [Bitboard; 15] {
    let mut masks = [0; 15];
    let mut bit = 0;
    while bit < NUM_SPACES {
        masks[(bit >> 3) + 7 - (bit & 7)] |= 1u64 << bit;
        bit += 1;
    }
    masks
}

const fn build_anti_diags() -> [Bitboard; 15] {
    let mut masks = [0; 15];
    let mut bit = 0;
    while bit < NUM_SPACES {
        masks[(bit >> 3) + (bit & 7)] |= 1u64 << bit;
        bit += 1;
    }
    masks
}

/// Flips along one line for a move at `pos`, in line space.
#[inline]
fn line_flips(player_line: u8, opponent_line: u8, pos: usize) -> u8 {
    let entry = &LINE_FLIPS[((opponent_line >> 1) & 0x3F) as usize][pos];
    let mut flips = 0;
    if player_line & entry.need_left != 0 {
        flips |= entry.flips_left;
    }
    if player_line & entry.need_right != 0 {
        flips |= entry.flips_right;
    }
    flips
}

/// Gather the row through `bit` into line space: (player, opponent, position).
#[inline]
fn row_lines(player: Bitboard, opponent: Bitboard, bit: usize) -> (u8, u8, usize) {
    let shift = bit & !7;
    (
        ((player >> shift) & 0xFF) as u8,
        ((opponent >> shift) & 0xFF) as u8,
        7 - (bit & 7),
    )
}

/// Gather the column through `bit`. The line reads bottom row first.
#[inline]
fn column_lines(player: Bitboard, opponent: Bitboard, bit: usize) -> (u8, u8, usize) {
    let file = bit & 7;
    let gather = |mask: Bitboard| (((mask >> file) & FILE_FILL).wrapping_mul(MAIN_DIAG) >> 56) as u8;
    (gather(player), gather(opponent), bit >> 3)
}

/// Gather the A1-H8-parallel diagonal through `bit`.
#[inline]
fn main_diag_lines(player: Bitboard, opponent: Bitboard, bit: usize) -> (u8, u8, usize) {
    let diag = MAIN_DIAGS[(bit >> 3) + 7 - (bit & 7)];
    let gather = |mask: Bitboard| ((mask & diag).wrapping_mul(FILE_FILL) >> 56) as u8;
    (gather(player), gather(opponent), 7 - (bit & 7))
}

/// Gather the H1-A8-parallel diagonal through `bit`.
#[inline]
fn anti_diag_lines(player: Bitboard, opponent: Bitboard, bit: usize) -> (u8, u8, usize) {
    let diag = ANTI_DIAGS[(bit >> 3) + (bit & 7)];
    let gather = |mask: Bitboard| ((mask & diag).wrapping_mul(FILE_FILL) >> 56) as u8;
    (gather(player), gather(opponent), 7 - (bit & 7))
}

#[inline]
fn scatter_row(line: u8, bit: usize) -> Bitboard {
    (line as Bitboard) << (bit & !7)
}

// The scatter loops below run once per flipped piece (at most six). Flips
// always land on real line squares, so the rank arithmetic stays in range.

#[inline]
fn scatter_column(line: u8, bit: usize) -> Bitboard {
    let file = bit & 7;
    let mut out = 0;
    let mut rest = line;
    while rest != 0 {
        let lane = rest.trailing_zeros() as usize;
        rest &= rest - 1;
        out |= 1 << (8 * (7 - lane) + file);
    }
    out
}

#[inline]
fn scatter_main_diag(line: u8, bit: usize) -> Bitboard {
    let offset = (bit >> 3) + 7 - (bit & 7);
    let mut out = 0;
    let mut rest = line;
    while rest != 0 {
        let file = rest.trailing_zeros() as usize;
        rest &= rest - 1;
        out |= 1 << (8 * (file + offset - 7) + file);
    }
    out
}

#[inline]
fn scatter_anti_diag(line: u8, bit: usize) -> Bitboard {
    let offset = (bit >> 3) + (bit & 7);
    let mut out = 0;
    let mut rest = line;
    while rest != 0 {
        let file = rest.trailing_zeros() as usize;
        rest &= rest - 1;
        out |= 1 << (8 * (offset - file) + file);
    }
    out
}

/// Whether a move at `bit` flips at least one piece along some line.
#[inline]
fn has_flip(player: Bitboard, opponent: Bitboard, bit: usize) -> bool {
    let (pl, op, pos) = row_lines(player, opponent, bit);
    if line_flips(pl, op, pos) != 0 {
        return true;
    }
    let (pl, op, pos) = column_lines(player, opponent, bit);
    if line_flips(pl, op, pos) != 0 {
        return true;
    }
    let (pl, op, pos) = main_diag_lines(player, opponent, bit);
    if line_flips(pl, op, pos) != 0 {
        return true;
    }
    let (pl, op, pos) = anti_diag_lines(player, opponent, bit);
    line_flips(pl, op, pos) != 0
}

/// Compute a mask of the legal moves for the active player from masks of the
/// active player's pieces and the opponent's pieces.
/// Undefined behavior if the masks overlap.
#[inline]
pub fn move_mask(player: Bitboard, opponent: Bitboard) -> Bitboard {
    let mut moves = 0;
    let mut empties = !(player | opponent);
    while empties != 0 {
        let bit = empties.trailing_zeros() as usize;
        empties &= empties - 1;
        if has_flip(player, opponent, bit) {
            moves |= 1 << bit;
        }
    }
    moves
}

/// Compute the mask of opponent pieces flipped by the active player moving at
/// bit position `bit` (63 is the upper-left corner). Returns an empty mask
/// for a non-flipping move. Undefined behavior if the square is occupied.
#[inline]
pub fn flip_mask(player: Bitboard, opponent: Bitboard, bit: usize) -> Bitboard {
    let mut flips = 0;

    let (pl, op, pos) = row_lines(player, opponent, bit);
    flips |= scatter_row(line_flips(pl, op, pos), bit);

    let (pl, op, pos) = column_lines(player, opponent, bit);
    flips |= scatter_column(line_flips(pl, op, pos), bit);

    let (pl, op, pos) = main_diag_lines(player, opponent, bit);
    flips |= scatter_main_diag(line_flips(pl, op, pos), bit);

    let (pl, op, pos) = anti_diag_lines(player, opponent, bit);
    flips |= scatter_anti_diag(line_flips(pl, op, pos), bit);

    flips
}
