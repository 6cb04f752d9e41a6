//! Piece-square tables over the padded layout.
//!
//! Each entry is the piece's material value plus a positional bonus for the
//! square, seen from the side to move. The opponent's pieces are scored with
//! the mirrored square, so one table per piece serves both sides.

use crate::position::board::{is_opponent_piece, is_own_piece, mirror, Square, BOARD_SIZE, ROW_WIDTH};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 60000;

/// Scores at or beyond this magnitude mean a king has been lost.
pub const MATE_VALUE: i32 = 30000;

// Bonus tables, rank 8 first, files a..h.
#[rustfmt::skip]
const PAWN_BONUS: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
     5,   5,  10,  25,  25,  10,   5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     5,  10,  10, -20, -20,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_BONUS: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_BONUS: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_BONUS: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10,  10,  10,  10,  10,   5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_BONUS: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -10,   0,   5,   5,   5,   5,   0, -10,
    -5,   0,   5,   5,   5,   5,   0,  -5,
    -5,   0,   5,   5,   5,   5,   0,  -5,
   -10,   0,   5,   5,   5,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_BONUS: [i32; 64] = [
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -10, -20, -20, -20, -20, -20, -20, -10,
    20,  20,   0,   0,   0,   0,  20,  20,
    20,  30,  10,   0,   0,  10,  30,  20,
];

const fn pad_table(value: i32, bonus: &[i32; 64]) -> [i32; BOARD_SIZE] {
    let mut table = [0i32; BOARD_SIZE];
    let mut i = 0;
    while i < 64 {
        let row = i / 8 + 2;
        let col = i % 8 + 1;
        table[row * ROW_WIDTH + col] = value + bonus[i];
        i += 1;
    }
    table
}

static PAWN_TABLE: [i32; BOARD_SIZE] = pad_table(PAWN_VALUE, &PAWN_BONUS);
static KNIGHT_TABLE: [i32; BOARD_SIZE] = pad_table(KNIGHT_VALUE, &KNIGHT_BONUS);
static BISHOP_TABLE: [i32; BOARD_SIZE] = pad_table(BISHOP_VALUE, &BISHOP_BONUS);
static ROOK_TABLE: [i32; BOARD_SIZE] = pad_table(ROOK_VALUE, &ROOK_BONUS);
static QUEEN_TABLE: [i32; BOARD_SIZE] = pad_table(QUEEN_VALUE, &QUEEN_BONUS);
static KING_TABLE: [i32; BOARD_SIZE] = pad_table(KING_VALUE, &KING_BONUS);

/// Value of `piece` (either case) standing on `square` in the mover's frame.
#[inline]
pub fn piece_square_value(piece: u8, square: Square) -> i32 {
    let table = match piece.to_ascii_uppercase() {
        b'P' => &PAWN_TABLE,
        b'N' => &KNIGHT_TABLE,
        b'B' => &BISHOP_TABLE,
        b'R' => &ROOK_TABLE,
        b'Q' => &QUEEN_TABLE,
        b'K' => &KING_TABLE,
        _ => return 0,
    };
    table[square]
}

/// Score a board from scratch: own pieces added, opponent pieces subtracted
/// using their mirrored squares.
pub fn evaluate_cells(cells: &[u8; BOARD_SIZE]) -> i32 {
    cells
        .iter()
        .enumerate()
        .map(|(sq, &cell)| {
            if is_own_piece(cell) {
                piece_square_value(cell, sq)
            } else if is_opponent_piece(cell) {
                -piece_square_value(cell, mirror(sq))
            } else {
                0
            }
        })
        .sum()
}
