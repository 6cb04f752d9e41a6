//! Immutable side-to-move position value.
//!
//! A `Position` is always expressed from the perspective of the player to
//! move: their pieces are uppercase and their home rank is rank 1 of the
//! padded layout. Applying a move produces a new value and rotates it, so the
//! opponent becomes the mover. Rotation reverses the cells, flips the case of
//! piece letters and negates the score; doing it twice restores the original
//! bit for bit.
//!
//! Move generation is pseudo-legal. It follows piece movement rules, castling
//! rights and the en-passant square, but it does not check whether the mover's
//! own king is left attacked. Such moves are punished by the search instead,
//! since the reply can capture the king and the score swings past
//! `MATE_VALUE`. Nothing downstream filters them out.

use std::hash::{Hash, Hasher};

use crate::position::board::*;
use crate::position::piece_square::{evaluate_cells, piece_square_value, MATE_VALUE};
use crate::position::position_key::compute_key;

/// A move between two squares of the mover's frame.
///
/// Promotion is implied: a pawn reaching the far rank always becomes a queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// The same move expressed in the opponent's frame.
    #[inline]
    pub const fn rotated(self) -> Self {
        Self {
            from: mirror(self.from),
            to: mirror(self.to),
        }
    }
}

/// Castling rights of one side, named by rook corner in that side's own frame.
///
/// `west` is the rook starting on the A1 corner and `east` the one on the H1
/// corner. For the first player these are the queen and king sides; after
/// rotation the files are mirrored, so for the second player they swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub west: bool,
    pub east: bool,
}

impl CastlingRights {
    pub const ALL: Self = Self {
        west: true,
        east: true,
    };
    pub const NONE: Self = Self {
        west: false,
        east: false,
    };

    #[inline]
    fn bits(self) -> u8 {
        u8::from(self.west) | (u8::from(self.east) << 1)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub cells: [u8; BOARD_SIZE],
    /// Material plus positional score from the mover's perspective.
    pub score: i32,
    pub castling: CastlingRights,
    /// The opponent's rights, in the opponent's own frame.
    pub opponent_castling: CastlingRights,
    /// Square a pawn may capture onto en passant this move.
    pub en_passant: Option<Square>,
    /// Square the opponent's king passed over while castling last move.
    pub king_passant: Option<Square>,
    key: u64,
}

impl Position {
    pub fn new(
        cells: [u8; BOARD_SIZE],
        score: i32,
        castling: CastlingRights,
        opponent_castling: CastlingRights,
        en_passant: Option<Square>,
        king_passant: Option<Square>,
    ) -> Self {
        let mut position = Self {
            cells,
            score,
            castling,
            opponent_castling,
            en_passant,
            king_passant,
            key: 0,
        };
        position.key = position.compute_key();
        position
    }

    /// The standard starting position, first player to move.
    pub fn initial() -> Self {
        Self::new(
            INITIAL_CELLS,
            evaluate_cells(&INITIAL_CELLS),
            CastlingRights::ALL,
            CastlingRights::ALL,
            None,
            None,
        )
    }

    /// Cached content key used for hashing.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    fn compute_key(&self) -> u64 {
        let bits = self.castling.bits() | (self.opponent_castling.bits() << 2);
        compute_key(&self.cells, bits, self.en_passant, self.king_passant)
    }

    /// Flip perspective: the opponent becomes the mover.
    pub fn rotate(&self) -> Self {
        let mut cells = self.cells;
        cells.reverse();
        for cell in &mut cells {
            if cell.is_ascii_alphabetic() {
                *cell ^= 0x20;
            }
        }
        Self::new(
            cells,
            -self.score,
            self.opponent_castling,
            self.castling,
            self.en_passant.map(mirror),
            self.king_passant.map(mirror),
        )
    }

    /// True while the mover still has a king on the board.
    pub fn mover_has_king(&self) -> bool {
        self.cells.contains(&b'K')
    }

    /// True once either king is gone, judged by the score crossing the mate
    /// threshold.
    #[inline]
    pub fn is_decisive(&self) -> bool {
        self.score.abs() >= MATE_VALUE
    }

    /// Pseudo-legal moves for the mover, in board-index then direction order.
    pub fn valid_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        let board = &self.cells;

        for (from, &piece) in board.iter().enumerate() {
            if !is_own_piece(piece) {
                continue;
            }
            for &d in directions(piece) {
                let mut to = from as isize + d;
                loop {
                    let j = to as usize;
                    let target = board[j];
                    if is_sentinel(target) {
                        break;
                    }

                    // A rook sliding into its own unmoved king offers castling.
                    if piece == b'R' && target == b'K' {
                        if from == A1 && self.castling.west {
                            moves.push(Move::new(j, j - 2));
                        }
                        if from == H1 && self.castling.east {
                            moves.push(Move::new(j, j + 2));
                        }
                    }

                    if is_own_piece(target) {
                        break;
                    }

                    if piece == b'P' {
                        let diagonal = d == NORTH + WEST || d == NORTH + EAST;
                        if diagonal
                            && target == EMPTY
                            && Some(j) != self.en_passant
                            && Some(j) != self.king_passant
                        {
                            break;
                        }
                        if (d == NORTH || d == NORTH + NORTH) && target != EMPTY {
                            break;
                        }
                        if d == NORTH + NORTH
                            && (from < (A1 as isize + NORTH) as usize
                                || board[(from as isize + NORTH) as usize] != EMPTY)
                        {
                            break;
                        }
                    }

                    moves.push(Move::new(from, j));

                    if is_crawler(piece) || is_opponent_piece(target) {
                        break;
                    }
                    to += d;
                }
            }
        }

        moves
    }

    /// Score change caused by `mv`, before rotation.
    pub fn move_value(&self, mv: Move) -> i32 {
        let Move { from, to } = mv;
        let piece = self.cells[from];
        let captured = self.cells[to];

        let mut delta = piece_square_value(piece, to) - piece_square_value(piece, from);
        if is_opponent_piece(captured) {
            delta += piece_square_value(captured, mirror(to));
        }
        if self.lands_on_king_passant(to) {
            delta += piece_square_value(b'K', mirror(to));
        }
        if piece == b'K' && from.abs_diff(to) == 2 {
            delta += piece_square_value(b'R', (from + to) / 2);
            delta -= piece_square_value(b'R', if to < from { A1 } else { H1 });
        }
        if piece == b'P' {
            if (A8..=H8).contains(&to) {
                delta += piece_square_value(b'Q', to) - piece_square_value(b'P', to);
            }
            if Some(to) == self.en_passant {
                delta += piece_square_value(b'P', mirror(to + ROW_WIDTH));
            }
        }
        delta
    }

    /// True when a move onto `square` counts as catching the opponent's king
    /// mid-castle.
    #[inline]
    pub fn lands_on_king_passant(&self, square: Square) -> bool {
        self.king_passant
            .is_some_and(|kp| square.abs_diff(kp) < 2)
    }

    /// Apply `mv` and return the resulting position from the opponent's view.
    pub fn make_move(&self, mv: Move) -> Self {
        let Move { from, to } = mv;
        let piece = self.cells[from];
        let mut cells = self.cells;
        let mut castling = self.castling;
        let mut opponent_castling = self.opponent_castling;
        let mut en_passant = None;
        let mut king_passant = None;
        let score = self.score + self.move_value(mv);

        cells[to] = piece;
        cells[from] = EMPTY;

        if from == A1 {
            castling.west = false;
        }
        if from == H1 {
            castling.east = false;
        }
        // The opponent's corners are mirrored in their frame.
        if to == A8 {
            opponent_castling.east = false;
        }
        if to == H8 {
            opponent_castling.west = false;
        }

        if piece == b'K' {
            castling = CastlingRights::NONE;
            if from.abs_diff(to) == 2 {
                let passed = (from + to) / 2;
                king_passant = Some(passed);
                cells[if to < from { A1 } else { H1 }] = EMPTY;
                cells[passed] = b'R';
            }
        }

        if piece == b'P' {
            if (A8..=H8).contains(&to) {
                cells[to] = b'Q';
            }
            if to as isize - from as isize == NORTH + NORTH {
                en_passant = Some((from as isize + NORTH) as usize);
            }
            if Some(to) == self.en_passant {
                cells[to + ROW_WIDTH] = EMPTY;
            }
        }

        Self {
            cells,
            score,
            castling,
            opponent_castling,
            en_passant,
            king_passant,
            key: 0,
        }
        .rotate()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.score == other.score
            && self.castling == other.castling
            && self.opponent_castling == other.opponent_castling
            && self.en_passant == other.en_passant
            && self.king_passant == other.king_passant
            && self.cells == other.cells
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.key);
    }
}
