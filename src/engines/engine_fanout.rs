//! Fan-out engine: opening book, then a parallel root search with a
//! weighted pick among the near-optimal replies.

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::config::{parse_switch, EngineConfig};
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::position::position::Position;
use crate::search::dispatcher::{SearchPool, ShutdownHandle};
use crate::selection::move_selection::{select_from_book, select_from_fan_in, Decision, DecisionKind};
use crate::selection::opening_book::OpeningBook;
use crate::utils::algebraic::format_move;

pub struct FanoutEngine {
    config: EngineConfig,
    book: OpeningBook,
    pool: SearchPool,
    rng: StdRng,
}

impl FanoutEngine {
    /// Start the worker pool described by `config` with the built-in book.
    pub fn new(config: EngineConfig) -> ChessResult<Self> {
        let pool = SearchPool::start(config.normalized_workers(), config.normalized_depth())?;
        info!(
            workers = pool.workers(),
            depth = pool.depth(),
            own_book = config.own_book,
            "fan-out engine ready"
        );
        Ok(Self {
            rng: seeded_rng(config.seed),
            book: OpeningBook::standard(),
            config,
            pool,
        })
    }

    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = book;
        self
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.pool.depth()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.pool.shutdown_handle()
    }

    /// Stop the worker pool. Later searches fail with `WorkerPoolClosed`.
    pub fn shutdown(&self) {
        self.pool.shutdown();
    }

    fn restart_pool(&mut self) -> ChessResult<()> {
        let pool = SearchPool::start(self.config.normalized_workers(), self.config.normalized_depth())?;
        // Dropping the previous pool tears it down.
        self.pool = pool;
        debug!(workers = self.pool.workers(), depth = self.pool.depth(), "search pool restarted");
        Ok(())
    }

    fn describe(&self, decision: &Decision) -> EngineOutput {
        let mut out = EngineOutput {
            best_move: Some(decision.chosen),
            kind: Some(decision.kind),
            reply_score: decision.reply_score,
            info_lines: Vec::new(),
        };

        match decision.kind {
            DecisionKind::Book => out.info_lines.push("info string opening book move".to_owned()),
            DecisionKind::ForcedWin => out.info_lines.push("info string forced win".to_owned()),
            DecisionKind::ForcedLoss => out.info_lines.push("info string forced loss".to_owned()),
            DecisionKind::Candidate => {
                for c in &decision.candidates {
                    out.info_lines.push(format!(
                        "info string candidate {} score {} depth {} weight {}",
                        format_move(c.mv, false),
                        c.reply_score,
                        c.reached_depth,
                        c.weight
                    ));
                }
            }
        }
        out.info_lines.push(format!(
            "info string fanout workers {} depth {}",
            self.pool.workers(),
            self.pool.depth()
        ));
        out
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn option_value<T: std::str::FromStr>(name: &str, value: &str) -> ChessResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ChessErrors::InvalidOption(format!("{name} = '{value}'")))
}

impl Engine for FanoutEngine {
    fn new_game(&mut self) {
        if let Some(seed) = self.config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("OwnBook") {
            self.config.own_book = parse_switch(value)
                .ok_or_else(|| ChessErrors::InvalidOption(format!("{name} = '{value}'")))?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("CandidateWindow") {
            self.config.candidate_window = option_value::<i32>(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Workers") {
            self.config.workers = option_value::<usize>(name, value)?;
            return self.restart_pool();
        }
        if name.eq_ignore_ascii_case("Depth") {
            self.config.depth = option_value::<u8>(name, value)?;
            return self.restart_pool();
        }
        Ok(())
    }

    fn choose_move(&mut self, position: &Position) -> ChessResult<EngineOutput> {
        if self.config.own_book {
            if let Some(decision) = select_from_book(&self.book, position, &mut self.rng) {
                return Ok(self.describe(&decision));
            }
        }

        let fan_in = self.pool.evaluate(position)?;
        if !fan_in.dead_ends.is_empty() {
            debug!(dead_ends = fan_in.dead_ends.len(), "root moves without a reply were excluded");
        }
        let decision = select_from_fan_in(position, &fan_in, self.config.normalized_window(), &mut self.rng)?;
        info!(
            chosen = %format_move(decision.chosen, false),
            kind = ?decision.kind,
            candidates = decision.candidates.len(),
            "move selected"
        );
        Ok(self.describe(&decision))
    }
}
