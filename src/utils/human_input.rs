//! Human move acceptance.
//!
//! Text from the presentation layer arrives in absolute coordinates. It is
//! mapped into the mover's frame and accepted only when it names one of the
//! position's pseudo-legal moves; anything else is reported as no match and
//! leaves the caller's state untouched.

use crate::position::position::{Move, Position};
use crate::utils::algebraic::{parse_move_text, Side};

/// Accept `text` as a move for `side`, who must be the mover of `position`.
pub fn accept_move(position: &Position, text: &str, side: Side) -> Option<Move> {
    let absolute = parse_move_text(text).ok()?;
    let internal = match side {
        Side::First => absolute,
        Side::Second => absolute.rotated(),
    };
    position.valid_moves().contains(&internal).then_some(internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::parse_square;

    #[test]
    fn accepts_legal_first_player_move() {
        let pos = Position::initial();
        let mv = accept_move(&pos, "g1f3", Side::First).expect("g1f3 should be accepted");
        assert_eq!(mv.from, parse_square("g1").expect("g1"));
    }

    #[test]
    fn second_player_moves_are_rotated_into_its_frame() {
        let pos = Position::initial().make_move(Move::new(
            parse_square("e2").expect("e2"),
            parse_square("e4").expect("e4"),
        ));
        let mv = accept_move(&pos, "e7e5", Side::Second).expect("e7e5 should be accepted");
        assert_eq!(mv, Move::new(parse_square("e7").expect("e7"), parse_square("e5").expect("e5")).rotated());

        let after = pos.make_move(mv);
        assert_eq!(after.cells[parse_square("e5").expect("e5")], b'p');
    }

    #[test]
    fn rejects_garbage_and_illegal_moves() {
        let pos = Position::initial();
        assert_eq!(accept_move(&pos, "help", Side::First), None);
        assert_eq!(accept_move(&pos, "e2e5", Side::First), None);
        assert_eq!(accept_move(&pos, "e7e5", Side::First), None);
        assert_eq!(pos, Position::initial());
    }
}
