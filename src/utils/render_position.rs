//! Terminal-oriented Unicode board renderer.
//!
//! Draws a position in absolute orientation (rank 8 at the top) regardless of
//! which player is to move, for the terminal front end and for diagnostics.

use crate::position::board::square_at;
use crate::position::position::Position;
use crate::utils::algebraic::Side;

/// Render the board to a Unicode string for terminal output.
///
/// `mover` is the side whose frame `position` is expressed in.
pub fn render_position(position: &Position, mover: Side) -> String {
    let absolute = match mover {
        Side::First => *position,
        Side::Second => position.rotate(),
    };

    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");

    for rank in (0..8).rev() {
        out.push(char::from(b'1' + rank as u8));
        out.push(' ');

        for file in 0..8 {
            out.push(piece_to_unicode(absolute.cells[square_at(file, rank)]));
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank as u8));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

fn piece_to_unicode(cell: u8) -> char {
    match cell {
        b'P' => '♙',
        b'N' => '♘',
        b'B' => '♗',
        b'R' => '♖',
        b'Q' => '♕',
        b'K' => '♔',
        b'p' => '♟',
        b'n' => '♞',
        b'b' => '♝',
        b'r' => '♜',
        b'q' => '♛',
        b'k' => '♚',
        _ => '·',
    }
}
