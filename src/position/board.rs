//! Padded 10x12 board layout shared by the position model.
//!
//! The 8x8 interior is surrounded by sentinel cells (spaces and row-ending
//! newlines) so a piece walking any fixed offset from a real square lands on
//! either a real square or a whitespace sentinel. Move generation therefore
//! never needs explicit bounds checks.
//!
//! Indices are laid out row-major, ten cells per row: rows 0, 1, 10 and 11 are
//! pure border, rows 2..=9 hold ranks 8 down to 1 in columns 1..=8. Reversing
//! the whole array is a 180 degree turn of the board, which is what rotation
//! relies on.

/// Board square index into the padded layout (`0..BOARD_SIZE`).
pub type Square = usize;

pub const BOARD_SIZE: usize = 120;
pub const ROW_WIDTH: usize = 10;

pub const A1: Square = 91;
pub const H1: Square = 98;
pub const A8: Square = 21;
pub const H8: Square = 28;

pub const NORTH: isize = -10;
pub const EAST: isize = 1;
pub const SOUTH: isize = 10;
pub const WEST: isize = -1;

pub const EMPTY: u8 = b'.';

/// Starting ranks from rank 8 down to rank 1, uppercase for the first player.
pub const INITIAL_RANKS: [[u8; 8]; 8] = [
    *b"rnbqkbnr",
    *b"pppppppp",
    *b"........",
    *b"........",
    *b"........",
    *b"........",
    *b"PPPPPPPP",
    *b"RNBQKBNR",
];

pub const INITIAL_CELLS: [u8; BOARD_SIZE] = padded_board(&INITIAL_RANKS);

/// Surround eight ranks (rank 8 first) with the sentinel border.
pub const fn padded_board(ranks: &[[u8; 8]; 8]) -> [u8; BOARD_SIZE] {
    let mut cells = [b' '; BOARD_SIZE];
    let mut row = 0;
    while row < 11 {
        cells[row * ROW_WIDTH + 9] = b'\n';
        row += 1;
    }

    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            cells[(rank + 2) * ROW_WIDTH + file + 1] = ranks[rank][file];
            file += 1;
        }
        rank += 1;
    }
    cells
}

/// Index of a real square from zero-based file (`a` = 0) and rank (`1` = 0).
#[inline]
pub const fn square_at(file: usize, rank: usize) -> Square {
    A1 + file - ROW_WIDTH * rank
}

/// The same physical square seen from the other side of the board.
#[inline]
pub const fn mirror(square: Square) -> Square {
    BOARD_SIZE - 1 - square
}

/// True for cells inside the 8x8 interior.
#[inline]
pub fn is_on_board(square: Square) -> bool {
    let row = square / ROW_WIDTH;
    let col = square % ROW_WIDTH;
    (2..=9).contains(&row) && (1..=8).contains(&col)
}

/// Zero-based (file, rank) of a real square, in the frame it is indexed in.
#[inline]
pub fn file_and_rank(square: Square) -> (usize, usize) {
    let col = square % ROW_WIDTH;
    let row = square / ROW_WIDTH;
    (col - 1, 9 - row)
}

#[inline]
pub fn is_sentinel(cell: u8) -> bool {
    cell.is_ascii_whitespace()
}

#[inline]
pub fn is_own_piece(cell: u8) -> bool {
    cell.is_ascii_uppercase()
}

#[inline]
pub fn is_opponent_piece(cell: u8) -> bool {
    cell.is_ascii_lowercase()
}

/// Step directions for each piece letter of the side to move.
pub fn directions(piece: u8) -> &'static [isize] {
    const N: isize = NORTH;
    const E: isize = EAST;
    const S: isize = SOUTH;
    const W: isize = WEST;
    match piece {
        b'P' => &[N, N + N, N + W, N + E],
        b'N' => &[
            N + N + E,
            E + N + E,
            E + S + E,
            S + S + E,
            S + S + W,
            W + S + W,
            W + N + W,
            N + N + W,
        ],
        b'B' => &[N + E, S + E, S + W, N + W],
        b'R' => &[N, E, S, W],
        b'Q' | b'K' => &[N, E, S, W, N + E, S + E, S + W, N + W],
        _ => &[],
    }
}

/// Pieces that take one step per direction instead of sliding.
#[inline]
pub fn is_crawler(piece: u8) -> bool {
    matches!(piece, b'P' | b'N' | b'K')
}
