//! Square and move conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and indices of the
//! padded board in the first player's frame. Moves made by the second player
//! live in that player's rotated frame and are mirrored on the way in and out.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::position::board::{file_and_rank, is_on_board, square_at, Square};
use crate::position::position::Move;

/// Which player a move or board is viewed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    First,
    Second,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Convert coordinate notation (for example: "e4") to a padded square index.
#[inline]
pub fn parse_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    Ok(square_at(usize::from(file - b'a'), usize::from(rank - b'1')))
}

/// Convert a padded square index to coordinate notation (for example: "e4").
#[inline]
pub fn render_square(square: Square) -> ChessResult<String> {
    if !is_on_board(square) {
        return Err(ChessErrors::InvalidSquare(format!("index {square}")));
    }

    let (file, rank) = file_and_rank(square);
    let file_char = char::from(b'a' + file as u8);
    let rank_char = char::from(b'1' + rank as u8);
    Ok(format!("{file_char}{rank_char}"))
}

/// Render a move as source and destination tokens.
///
/// `from_second_player` maps a move made in the second player's rotated frame
/// back to absolute coordinates.
pub fn format_move(mv: Move, from_second_player: bool) -> String {
    let shown = if from_second_player { mv.rotated() } else { mv };
    match (render_square(shown.from), render_square(shown.to)) {
        (Ok(from), Ok(to)) => format!("{from}{to}"),
        _ => "0000".to_owned(),
    }
}

/// Render a move made by `side` in that side's frame.
#[inline]
pub fn format_move_for(mv: Move, side: Side) -> String {
    format_move(mv, side == Side::Second)
}

/// Read two square tokens (e.g. `g8f6`) as an absolute-coordinate move.
///
/// Anything after the fourth character is ignored, so a trailing promotion
/// letter does not make the text invalid.
pub fn parse_move_text(text: &str) -> ChessResult<Move> {
    let trimmed = text.trim();
    if trimmed.len() < 4 || !trimmed.is_char_boundary(4) {
        return Err(ChessErrors::InvalidMove(trimmed.to_owned()));
    }

    let from = parse_square(&trimmed[0..2]).map_err(|_| ChessErrors::InvalidMove(trimmed.to_owned()))?;
    let to = parse_square(&trimmed[2..4]).map_err(|_| ChessErrors::InvalidMove(trimmed.to_owned()))?;
    Ok(Move::new(from, to))
}
