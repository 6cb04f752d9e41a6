//! Root move choice: book pick first, otherwise a weighted pick among the
//! near-optimal searched candidates.
//!
//! Fan-in scores are from the opponent's perspective, so lower is better for
//! the mover. A best score at or beyond `MATE_VALUE` means every searched move
//! loses; one at or below `-MATE_VALUE` means a forced win is available. Both
//! cases are resolved deterministically by reached depth instead of weighting.

use rand::Rng;
use tracing::{debug, info};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::position::piece_square::MATE_VALUE;
use crate::position::position::{Move, Position};
use crate::search::dispatcher::{FanIn, RootOutcome};
use crate::selection::move_heuristics::move_weight;
use crate::selection::opening_book::OpeningBook;
use crate::selection::weighted_choice::weighted_choice;
use crate::utils::algebraic::format_move;

/// Scores closer than this to the best one are treated as equally good.
pub const CANDIDATE_WINDOW: i32 = 51;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    Book,
    /// Fewest plies to a decisive win.
    ForcedWin,
    /// Every move loses; the longest resistance was chosen.
    ForcedLoss,
    /// Weighted pick among the near-optimal candidates.
    Candidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedCandidate {
    pub mv: Move,
    pub reply_score: i32,
    pub reached_depth: u8,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub chosen: Move,
    pub kind: DecisionKind,
    /// Opponent-perspective score of the chosen move; `None` for book picks.
    pub reply_score: Option<i32>,
    pub candidates: Vec<WeightedCandidate>,
}

pub fn select_from_book<R: Rng + ?Sized>(book: &OpeningBook, position: &Position, rng: &mut R) -> Option<Decision> {
    let chosen = book.choose_weighted_move(position, rng)?;
    debug!(chosen = %format_move(chosen, false), "book move");
    Some(Decision {
        chosen,
        kind: DecisionKind::Book,
        reply_score: None,
        candidates: Vec::new(),
    })
}

/// Pick a root move from the gathered search results.
///
/// Returns `NoLegalReply` when the fan-in has no usable outcome.
pub fn select_from_fan_in<R: Rng + ?Sized>(
    position: &Position,
    fan_in: &FanIn,
    window: i32,
    rng: &mut R,
) -> ChessResult<Decision> {
    let usable = &fan_in.usable;
    let best = usable
        .iter()
        .map(|o| o.result.best_score)
        .min()
        .ok_or(ChessErrors::NoLegalReply)?;

    if best >= MATE_VALUE {
        info!("every move loses by force; choosing the longest defence");
        return decisive(usable, DecisionKind::ForcedLoss, |a, b| a > b);
    }
    if best <= -MATE_VALUE {
        info!("forced win found; choosing the fastest");
        return decisive(usable, DecisionKind::ForcedWin, |a, b| a < b);
    }

    let mut candidates: Vec<WeightedCandidate> = usable
        .iter()
        .filter(|o| (o.result.best_score - best).abs() < window)
        .map(|o| WeightedCandidate {
            mv: o.root_move,
            reply_score: o.result.best_score,
            reached_depth: o.result.reached_depth,
            weight: move_weight(position, o.root_move),
        })
        .collect();
    candidates.sort_by_key(|c| c.reply_score);

    for c in &candidates {
        debug!(
            mv = %format_move(c.mv, false),
            reply_score = c.reply_score,
            reached_depth = c.reached_depth,
            weight = c.weight,
            "candidate"
        );
    }

    let weights: Vec<u32> = candidates.iter().map(|c| c.weight).collect();
    let index = weighted_choice(&weights, rng).ok_or(ChessErrors::NoLegalReply)?;
    Ok(Decision {
        chosen: candidates[index].mv,
        kind: DecisionKind::Candidate,
        reply_score: Some(candidates[index].reply_score),
        candidates,
    })
}

// First outcome whose depth is preferred over every earlier one.
fn decisive(
    usable: &[RootOutcome],
    kind: DecisionKind,
    prefer: impl Fn(u8, u8) -> bool,
) -> ChessResult<Decision> {
    let in_band = |o: &&RootOutcome| match kind {
        DecisionKind::ForcedLoss => o.result.best_score >= MATE_VALUE,
        _ => o.result.best_score <= -MATE_VALUE,
    };

    let mut chosen: Option<&RootOutcome> = None;
    for outcome in usable.iter().filter(in_band) {
        if chosen.map_or(true, |c| prefer(outcome.result.reached_depth, c.result.reached_depth)) {
            chosen = Some(outcome);
        }
    }

    let outcome = chosen.ok_or(ChessErrors::NoLegalReply)?;
    Ok(Decision {
        chosen: outcome.root_move,
        kind,
        reply_score: Some(outcome.result.best_score),
        candidates: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::search::negamax::SearchResult;
    use crate::selection::move_heuristics::{CENTRAL_PAWN_WEIGHT, FLANK_PAWN_WEIGHT};
    use crate::utils::algebraic::parse_move_text;

    fn outcome(text: &str, score: i32, depth: u8) -> RootOutcome {
        let mv = parse_move_text(text).expect("move text should parse");
        RootOutcome {
            root_move: mv,
            result: SearchResult {
                best_move: Some(mv.rotated()),
                best_score: score,
                reached_depth: depth,
                nodes: 1,
            },
        }
    }

    fn fan_in(usable: Vec<RootOutcome>) -> FanIn {
        FanIn {
            received: usable.len(),
            usable,
            dead_ends: Vec::new(),
        }
    }

    #[test]
    fn empty_fan_in_is_game_over() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = select_from_fan_in(&Position::initial(), &FanIn::default(), CANDIDATE_WINDOW, &mut rng);
        assert_eq!(result, Err(ChessErrors::NoLegalReply));
    }

    #[test]
    fn only_moves_inside_the_window_are_candidates() {
        let gathered = fan_in(vec![
            outcome("a2a3", 40, 3),
            outcome("e2e4", -20, 3),
            outcome("d2d4", 30, 3),
            outcome("h2h4", 31, 3),
        ]);
        let mut rng = StdRng::seed_from_u64(11);
        let decision =
            select_from_fan_in(&Position::initial(), &gathered, CANDIDATE_WINDOW, &mut rng).expect("decision");

        assert_eq!(decision.kind, DecisionKind::Candidate);
        let names: Vec<String> = decision.candidates.iter().map(|c| format_move(c.mv, false)).collect();
        assert_eq!(names, ["e2e4", "d2d4"]);
        assert_eq!(decision.candidates[0].weight, CENTRAL_PAWN_WEIGHT);
        assert!(decision.candidates.iter().any(|c| c.mv == decision.chosen));
    }

    #[test]
    fn candidate_frequencies_follow_heuristic_weights() {
        let gathered = fan_in(vec![outcome("e2e4", 0, 2), outcome("a2a3", 0, 2)]);
        let mut rng = StdRng::seed_from_u64(5);
        let trials = 20_000;
        let mut central = 0;
        for _ in 0..trials {
            let decision =
                select_from_fan_in(&Position::initial(), &gathered, CANDIDATE_WINDOW, &mut rng).expect("decision");
            if format_move(decision.chosen, false) == "e2e4" {
                central += 1;
            }
        }
        let expected = f64::from(CENTRAL_PAWN_WEIGHT) / f64::from(CENTRAL_PAWN_WEIGHT + FLANK_PAWN_WEIGHT);
        let observed = f64::from(central) / f64::from(trials);
        assert!((observed - expected).abs() < 0.02, "observed {observed:.3}");
    }

    #[test]
    fn forced_loss_delays_the_longest() {
        let gathered = fan_in(vec![
            outcome("a2a3", MATE_VALUE + 10, 1),
            outcome("b2b3", MATE_VALUE + 900, 3),
            outcome("c2c3", MATE_VALUE + 5, 3),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let decision =
            select_from_fan_in(&Position::initial(), &gathered, CANDIDATE_WINDOW, &mut rng).expect("decision");
        assert_eq!(decision.kind, DecisionKind::ForcedLoss);
        assert_eq!(format_move(decision.chosen, false), "b2b3");
    }

    #[test]
    fn forced_win_takes_the_fastest_mate() {
        let gathered = fan_in(vec![
            outcome("a2a3", 15, 3),
            outcome("b2b3", -MATE_VALUE - 40, 3),
            outcome("c2c3", -MATE_VALUE - 10, 1),
            outcome("d2d3", -MATE_VALUE - 90, 1),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let decision =
            select_from_fan_in(&Position::initial(), &gathered, CANDIDATE_WINDOW, &mut rng).expect("decision");
        assert_eq!(decision.kind, DecisionKind::ForcedWin);
        assert_eq!(format_move(decision.chosen, false), "c2c3");
    }

    #[test]
    fn book_pick_is_recorded_as_book() {
        let mut rng = StdRng::seed_from_u64(9);
        let book = OpeningBook::standard();
        let decision = select_from_book(&book, &Position::initial(), &mut rng).expect("start is in the book");
        assert_eq!(decision.kind, DecisionKind::Book);
        assert!(select_from_book(&book, &Position::initial().rotate(), &mut rng).is_none());
    }
}
