//! Opening book keyed by position value, with TSV import.
//!
//! Each TSV row lists a move sequence in absolute coordinates, replayed from
//! the initial position. Every position visited along the way accumulates the
//! row's weight for the move played from it. Moves are stored in the mover's
//! own frame, ready to hand to `Position::make_move`.

use std::collections::HashMap;
use std::fs;

use rand::Rng;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::position::position::{Move, Position};
use crate::selection::weighted_choice::weighted_choice;
use crate::utils::algebraic::{parse_move_text, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMove {
    pub mv: Move,
    pub weight: u32,
}

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    by_position: HashMap<Position, Vec<BookMove>>,
}

impl OpeningBook {
    /// The built-in book: five first moves from the initial position.
    pub fn standard() -> Self {
        Self::from_tsv_str(include_str!("data/standard_book.tsv")).unwrap_or_default()
    }

    pub fn from_tsv_path(path: &str) -> ChessResult<Self> {
        let data = fs::read_to_string(path)
            .map_err(|e| ChessErrors::Format(format!("failed reading {path}: {e}")))?;
        Self::from_tsv_str(&data)
    }

    pub fn from_tsv_str(tsv: &str) -> ChessResult<Self> {
        let mut lines = tsv.lines().filter(|line| !line.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| ChessErrors::Format("opening TSV is empty".to_owned()))?;
        let columns: Vec<&str> = header.split('\t').collect();

        let mut uci_idx = None;
        let mut moves_idx = None;
        let mut weight_idx = None;
        for (i, name) in columns.iter().enumerate() {
            match name.trim().to_ascii_lowercase().as_str() {
                "uci" => uci_idx = Some(i),
                "moves" => moves_idx = Some(i),
                "weight" | "count" | "plays" => weight_idx = Some(i),
                _ => {}
            }
        }

        let sequence_idx = uci_idx.or(moves_idx).ok_or_else(|| {
            ChessErrors::Format("opening TSV must contain a 'uci' or 'moves' column".to_owned())
        })?;

        let mut book = Self::default();
        for line in lines {
            let fields: Vec<&str> = line.split('\t').collect();
            let sequence = fields
                .get(sequence_idx)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ChessErrors::Format(format!("missing move sequence in row '{line}'")))?;

            let row_weight = weight_idx
                .and_then(|idx| fields.get(idx).copied())
                .and_then(|w| w.trim().parse::<u32>().ok())
                .unwrap_or(1)
                .max(1);

            book.add_sequence(sequence, row_weight)
                .map_err(|e| ChessErrors::Format(format!("{e} in row '{line}'")))?;
        }

        Ok(book)
    }

    fn add_sequence(&mut self, sequence: &str, weight: u32) -> ChessResult<()> {
        let mut position = Position::initial();
        let mut side = Side::First;

        for token in sequence.split_whitespace() {
            let absolute = parse_move_text(token)?;
            let mv = match side {
                Side::First => absolute,
                Side::Second => absolute.rotated(),
            };
            if !position.valid_moves().contains(&mv) {
                return Err(ChessErrors::InvalidMove(token.to_owned()));
            }

            let row = self.by_position.entry(position).or_default();
            match row.iter_mut().find(|entry| entry.mv == mv) {
                Some(entry) => entry.weight = entry.weight.saturating_add(weight),
                None => row.push(BookMove { mv, weight }),
            }

            position = position.make_move(mv);
            side = side.opposite();
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }

    pub fn moves_for(&self, position: &Position) -> Option<&[BookMove]> {
        self.by_position.get(position).map(|v| v.as_slice())
    }

    pub fn choose_weighted_move<R: Rng + ?Sized>(&self, position: &Position, rng: &mut R) -> Option<Move> {
        let moves = self.moves_for(position)?;
        let weights: Vec<u32> = moves.iter().map(|m| m.weight).collect();
        weighted_choice(&weights, rng).map(|index| moves[index].mv)
    }
}
