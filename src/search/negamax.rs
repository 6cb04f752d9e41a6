//! Bounded-depth negamax search with alpha-beta pruning.
//!
//! The static evaluation is the position's incrementally maintained score.
//! Because every child position is already rotated to the opponent's view, a
//! node negates its children's scores to get its own. Best-move updates are
//! strictly-greater, so the first reply reaching the best score wins ties and
//! the result matches plain negamax for a fixed position and depth.
//!
//! A king capture swings the score past `MATE_VALUE`; such a node is terminal
//! and its score propagates unchanged, which makes forced king loss dominate
//! any material swing.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::position::piece_square::MATE_VALUE;
use crate::position::position::{Move, Position};

const INFINITE_SCORE: i32 = 1_000_000;

static NEVER_STOP: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Best reply for the mover; `None` when the node had no usable move.
    pub best_move: Option<Move>,
    /// Score from the searched position's mover perspective.
    pub best_score: i32,
    /// Plies realised along the principal line.
    pub reached_depth: u8,
    pub nodes: u64,
}

impl SearchResult {
    #[inline]
    pub fn is_decisive(&self) -> bool {
        self.best_score.abs() >= MATE_VALUE
    }
}

/// Search `position` to `depth` plies.
pub fn search(position: &Position, depth: u8) -> SearchResult {
    search_with_stop(position, depth, &NEVER_STOP).unwrap_or(SearchResult {
        best_move: None,
        best_score: position.score,
        reached_depth: 0,
        nodes: 0,
    })
}

/// Search `position`, giving up with `None` as soon as `stop` is raised.
pub fn search_with_stop(position: &Position, depth: u8, stop: &AtomicBool) -> Option<SearchResult> {
    let mut nodes = 0u64;
    let line = negamax(position, depth, -INFINITE_SCORE, INFINITE_SCORE, stop, &mut nodes)?;
    Some(SearchResult {
        best_move: line.best_move,
        best_score: line.score,
        reached_depth: line.reached_depth,
        nodes,
    })
}

#[derive(Debug, Clone, Copy)]
struct Line {
    best_move: Option<Move>,
    score: i32,
    reached_depth: u8,
}

impl Line {
    #[inline]
    fn terminal(score: i32) -> Self {
        Self {
            best_move: None,
            score,
            reached_depth: 0,
        }
    }
}

fn negamax(
    position: &Position,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    stop: &AtomicBool,
    nodes: &mut u64,
) -> Option<Line> {
    if stop.load(Ordering::Relaxed) {
        return None;
    }
    *nodes += 1;

    if depth == 0 || position.is_decisive() {
        return Some(Line::terminal(position.score));
    }

    let mut best: Option<Line> = None;
    for mv in position.valid_moves() {
        let child = position.make_move(mv);
        let reply = negamax(&child, depth - 1, -beta, -alpha, stop, nodes)?;
        let score = -reply.score;

        if best.map_or(true, |b| score > b.score) {
            best = Some(Line {
                best_move: Some(mv),
                score,
                reached_depth: reply.reached_depth + 1,
            });
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }

    Some(best.unwrap_or_else(|| Line::terminal(position.score)))
}
