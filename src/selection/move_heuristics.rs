//! Opening-flavoured weights for near-equal candidate moves.
//!
//! All rules are evaluated in the mover's own frame and are symmetric under
//! the left-right mirror of rotation, so they read the same for either player.

use crate::position::board::{file_and_rank, is_on_board, square_at, Square, A1, H1};
use crate::position::position::{Move, Position};

pub const CASTLING_WEIGHT: u32 = 100;
pub const CENTRAL_PAWN_WEIGHT: u32 = 50;
pub const MINOR_DEVELOPMENT_WEIGHT: u32 = 30;
pub const KING_SAFETY_PUSH_WEIGHT: u32 = 20;
pub const FLANK_PAWN_WEIGHT: u32 = 10;
pub const DEFAULT_WEIGHT: u32 = 1;

// King square and the single pawn push that gives it an escape square.
const LUFT_PATTERNS: [(Square, Square, Square); 2] = [
    (square_at(6, 0), square_at(7, 1), square_at(7, 2)),
    (square_at(1, 0), square_at(0, 1), square_at(0, 2)),
];

/// Heuristic preference weight for playing `mv` in `position`.
pub fn move_weight(position: &Position, mv: Move) -> u32 {
    if !is_on_board(mv.from) || !is_on_board(mv.to) {
        return DEFAULT_WEIGHT;
    }

    match position.cells[mv.from] {
        b'K' if mv.from.abs_diff(mv.to) == 2 => CASTLING_WEIGHT,
        b'P' => {
            if is_luft_push(position, mv) {
                return KING_SAFETY_PUSH_WEIGHT;
            }
            let (file, _) = file_and_rank(mv.from);
            if (2..=5).contains(&file) {
                CENTRAL_PAWN_WEIGHT
            } else {
                FLANK_PAWN_WEIGHT
            }
        }
        b'N' | b'B' if (A1..=H1).contains(&mv.from) => MINOR_DEVELOPMENT_WEIGHT,
        _ => DEFAULT_WEIGHT,
    }
}

fn is_luft_push(position: &Position, mv: Move) -> bool {
    LUFT_PATTERNS
        .iter()
        .any(|&(king, from, to)| position.cells[king] == b'K' && mv.from == from && mv.to == to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::parse_move_text;

    fn weight(notation: &str, text: &str) -> u32 {
        let pos = Position::parse(notation).expect("notation should parse");
        let mv = parse_move_text(text).expect("move text should parse");
        assert!(pos.valid_moves().contains(&mv), "{text} should be valid");
        move_weight(&pos, mv)
    }

    #[test]
    fn start_position_weights() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(weight(start, "e2e4"), CENTRAL_PAWN_WEIGHT);
        assert_eq!(weight(start, "c2c3"), CENTRAL_PAWN_WEIGHT);
        assert_eq!(weight(start, "a2a4"), FLANK_PAWN_WEIGHT);
        assert_eq!(weight(start, "h2h3"), FLANK_PAWN_WEIGHT);
        assert_eq!(weight(start, "g1f3"), MINOR_DEVELOPMENT_WEIGHT);
    }

    #[test]
    fn castling_outweighs_everything() {
        let pos = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
        assert_eq!(weight(pos, "e1g1"), CASTLING_WEIGHT);
        assert_eq!(weight(pos, "e1c1"), CASTLING_WEIGHT);
        assert_eq!(weight(pos, "e1f1"), DEFAULT_WEIGHT);
    }

    #[test]
    fn luft_push_needs_the_castled_king() {
        let castled = "r4rk1/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 w - - 0 1";
        assert_eq!(weight(castled, "h2h3"), KING_SAFETY_PUSH_WEIGHT);
        assert_eq!(weight(castled, "h2h4"), FLANK_PAWN_WEIGHT);
        assert_eq!(weight(castled, "a2a3"), FLANK_PAWN_WEIGHT);

        let queenside = "1kr4r/pppppppp/8/8/8/8/PPPPPPPP/1KR4R w - - 0 1";
        assert_eq!(weight(queenside, "a2a3"), KING_SAFETY_PUSH_WEIGHT);
    }

    #[test]
    fn developed_pieces_get_the_default() {
        let pos = "4k3/8/8/8/8/5N2/8/4K3 w - - 0 1";
        assert_eq!(weight(pos, "f3e5"), DEFAULT_WEIGHT);
        assert_eq!(weight(pos, "e1d1"), DEFAULT_WEIGHT);
    }

    #[test]
    fn weights_read_the_same_for_the_second_player() {
        let start = Position::initial();
        let reply = start.make_move(parse_move_text("e2e4").expect("e2e4"));
        for (text, expected) in [
            ("e7e5", CENTRAL_PAWN_WEIGHT),
            ("h7h6", FLANK_PAWN_WEIGHT),
            ("b8c6", MINOR_DEVELOPMENT_WEIGHT),
        ] {
            let mv = parse_move_text(text).expect("move text should parse").rotated();
            assert_eq!(move_weight(&reply, mv), expected, "{text}");
        }
    }
}
