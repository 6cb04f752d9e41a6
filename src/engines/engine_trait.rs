//! Engine abstraction used by the front ends.
//!
//! An engine receives positions in the mover's frame and answers with a move
//! in that same frame, plus human-readable diagnostic lines.

use crate::chess_errors::ChessResult;
use crate::position::position::{Move, Position};
use crate::selection::move_selection::DecisionKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub kind: Option<DecisionKind>,
    /// Opponent-perspective score of the chosen move, when it was searched.
    pub reply_score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn new_game(&mut self) {}
    fn set_option(&mut self, _name: &str, _value: &str) -> ChessResult<()> {
        Ok(())
    }

    fn choose_move(&mut self, position: &Position) -> ChessResult<EngineOutput>;
}
