//! Pseudo-legal node counting.
//!
//! Counts leaf positions of the pseudo-legal move tree. Because own-king
//! safety is not checked the counts match standard perft only while no side
//! can walk into check, which holds for the first plies from the start.

use crate::position::position::Position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub castles: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.castles += rhs.castles;
    }
}

pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in position.valid_moves() {
        if depth == 1 {
            total.nodes += 1;
            if position.cells[mv.to].is_ascii_lowercase() {
                total.captures += 1;
            }
            if position.cells[mv.from] == b'K' && mv.from.abs_diff(mv.to) == 2 {
                total.castles += 1;
            }
        } else {
            total.merge(perft(&position.make_move(mv), depth - 1));
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_counts() {
        let start = Position::initial();
        assert_eq!(perft(&start, 1).nodes, 20);
        assert_eq!(perft(&start, 2).nodes, 400);
        assert_eq!(perft(&start, 3).nodes, 8902);
        assert_eq!(perft(&start, 3).captures, 34);
    }

    #[test]
    fn castling_is_counted() {
        let pos = Position::parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("notation should parse");
        assert_eq!(perft(&pos, 1).castles, 2);
    }
}
