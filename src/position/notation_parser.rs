//! Position notation (FEN) parser.
//!
//! Builds the padded board from the rank-by-rank layout plus side-to-move,
//! castling and en-passant fields. The halfmove clock and fullmove number are
//! optional; when present they must be integers, but the position model does
//! not track them.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::position::board::{padded_board, Square, EMPTY};
use crate::position::piece_square::evaluate_cells;
use crate::position::position::{CastlingRights, Position};
use crate::utils::algebraic::{parse_square, Side};

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse position notation into the mover's frame.
    pub fn parse(notation: &str) -> ChessResult<Self> {
        parse_notation(notation)
    }
}

pub fn parse_notation(notation: &str) -> ChessResult<Position> {
    parse_notation_with_side(notation).map(|(position, _)| position)
}

/// Parse notation and also report which player is to move.
pub fn parse_notation_with_side(notation: &str) -> ChessResult<(Position, Side)> {
    let fields: Vec<&str> = notation.split_whitespace().collect();
    if !(4..=6).contains(&fields.len()) {
        return Err(ChessErrors::Format(format!(
            "expected 4 to 6 fields, found {} in '{notation}'",
            fields.len()
        )));
    }

    let ranks = parse_board(fields[0])?;
    let side = parse_side_to_move(fields[1])?;
    let (first, second) = parse_castling_rights(fields[2])?;
    let en_passant = parse_en_passant_square(fields[3])?;

    for counter in &fields[4..] {
        counter
            .parse::<u16>()
            .map_err(|_| ChessErrors::Format(format!("invalid move counter '{counter}'")))?;
    }

    let cells = padded_board(&ranks);
    let position = Position::new(cells, evaluate_cells(&cells), first, second, en_passant, None);

    Ok(match side {
        Side::First => (position, side),
        Side::Second => (position.rotate(), side),
    })
}

fn parse_board(board_part: &str) -> ChessResult<[[u8; 8]; 8]> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != 8 {
        return Err(ChessErrors::Format(format!(
            "board layout must contain 8 ranks, found {}",
            rows.len()
        )));
    }

    let mut ranks = [[EMPTY; 8]; 8];
    for (rank_idx, row) in rows.iter().enumerate() {
        let mut file = 0usize;
        for ch in row.chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(ChessErrors::Format(format!("invalid empty-square count '{ch}'")));
                }
                file += run as usize;
            } else if "pnbrqkPNBRQK".contains(ch) {
                if file >= 8 {
                    return Err(ChessErrors::Format(format!("rank '{row}' has too many files")));
                }
                ranks[rank_idx][file] = ch as u8;
                file += 1;
            } else {
                return Err(ChessErrors::Format(format!(
                    "invalid piece character '{ch}' in board layout"
                )));
            }
        }

        if file != 8 {
            return Err(ChessErrors::Format(format!("rank '{row}' does not sum to 8 files")));
        }
    }

    Ok(ranks)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Side> {
    match side_part {
        "w" => Ok(Side::First),
        "b" => Ok(Side::Second),
        _ => Err(ChessErrors::Format(format!("invalid side-to-move field '{side_part}'"))),
    }
}

/// Returns (first player, second player) rights, each in its own frame.
fn parse_castling_rights(castling_part: &str) -> ChessResult<(CastlingRights, CastlingRights)> {
    let mut first = CastlingRights::NONE;
    let mut second = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok((first, second));
    }

    for ch in castling_part.chars() {
        match ch {
            'Q' => first.west = true,
            'K' => first.east = true,
            // The second player's frame is mirrored: its king side is west.
            'k' => second.west = true,
            'q' => second.east = true,
            _ => {
                return Err(ChessErrors::Format(format!(
                    "invalid castling rights character '{ch}'"
                )))
            }
        }
    }

    Ok((first, second))
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    parse_square(en_passant_part)
        .map(Some)
        .map_err(|e| ChessErrors::Format(format!("invalid en-passant field: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::board::mirror;

    #[test]
    fn parse_starting_notation_matches_initial() {
        let pos = parse_notation(STARTING_POSITION_FEN).expect("starting notation should parse");
        assert_eq!(pos, Position::initial());
        assert_eq!(pos.score, 0);
    }

    #[test]
    fn four_field_notation_is_accepted() {
        let pos = parse_notation("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
            .expect("four fields should parse");
        assert_eq!(pos, Position::initial());
    }

    #[test]
    fn second_player_to_move_is_rotated() {
        let parsed =
            parse_notation("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .expect("notation should parse");
        let e2 = parse_square("e2").expect("e2");
        let e4 = parse_square("e4").expect("e4");
        let played = Position::initial().make_move(crate::position::position::Move::new(e2, e4));

        assert_eq!(parsed, played);
        assert_eq!(parsed.en_passant, Some(mirror(parse_square("e3").expect("e3"))));
        assert!(parsed.score < 0, "mover is behind after the opponent's centre push");

        let (_, side) = parse_notation_with_side("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("notation should parse");
        assert_eq!(side, Side::Second);
    }

    #[test]
    fn wrong_field_count_is_a_format_error() {
        let err = parse_notation("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").expect_err("too few fields");
        assert!(matches!(err, ChessErrors::Format(_)));

        let err = parse_notation(&format!("{STARTING_POSITION_FEN} extra"))
            .expect_err("too many fields");
        assert!(matches!(err, ChessErrors::Format(_)));
    }

    #[test]
    fn malformed_board_shape_is_a_format_error() {
        for bad in [
            "rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkz - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq j9 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - zero 1",
        ] {
            let err = parse_notation(bad).expect_err("malformed notation should fail");
            assert!(matches!(err, ChessErrors::Format(_)), "unexpected error {err:?} for {bad}");
        }
    }

    #[test]
    fn castling_letters_map_to_frame_corners() {
        let pos = parse_notation("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("notation should parse");
        assert_eq!(pos.castling, CastlingRights { west: false, east: true });
        assert_eq!(pos.opponent_castling, CastlingRights { west: false, east: true });
    }
}
