//! Engine configuration with environment overrides.

use tracing::warn;

use crate::position::notation_parser::STARTING_POSITION_FEN;
use crate::selection::move_selection::CANDIDATE_WINDOW;

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_DEPTH: u8 = 4;

pub const WORKERS_VAR: &str = "FANOUT_WORKERS";
pub const DEPTH_VAR: &str = "FANOUT_DEPTH";
pub const WINDOW_VAR: &str = "FANOUT_WINDOW";
pub const OWN_BOOK_VAR: &str = "FANOUT_OWN_BOOK";
pub const SEED_VAR: &str = "FANOUT_SEED";
pub const START_FEN_VAR: &str = "FANOUT_START_FEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search worker threads in the pool.
    pub workers: usize,
    /// Plies searched below each root move.
    pub depth: u8,
    /// Closeness window for near-optimal candidates.
    pub candidate_window: i32,
    pub own_book: bool,
    /// Fixed RNG seed for reproducible games; entropy-seeded when `None`.
    pub seed: Option<u64>,
    pub start_notation: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            depth: DEFAULT_DEPTH,
            candidate_window: CANDIDATE_WINDOW,
            own_book: true,
            seed: None,
            start_notation: STARTING_POSITION_FEN.to_owned(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by any `FANOUT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden through `lookup`. Unreadable values are logged
    /// and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = read(&lookup, WORKERS_VAR, |s| s.parse::<usize>().ok()) {
            cfg.workers = v;
        }
        if let Some(v) = read(&lookup, DEPTH_VAR, |s| s.parse::<u8>().ok()) {
            cfg.depth = v;
        }
        if let Some(v) = read(&lookup, WINDOW_VAR, |s| s.parse::<i32>().ok()) {
            cfg.candidate_window = v;
        }
        if let Some(v) = read(&lookup, OWN_BOOK_VAR, parse_switch) {
            cfg.own_book = v;
        }
        if let Some(v) = read(&lookup, SEED_VAR, |s| s.parse::<u64>().ok()) {
            cfg.seed = Some(v);
        }
        if let Some(v) = lookup(START_FEN_VAR).filter(|s| !s.trim().is_empty()) {
            cfg.start_notation = v.trim().to_owned();
        }

        cfg
    }

    #[inline]
    pub fn normalized_workers(&self) -> usize {
        self.workers.max(1)
    }

    #[inline]
    pub fn normalized_depth(&self) -> u8 {
        self.depth.max(1)
    }

    #[inline]
    pub fn normalized_window(&self) -> i32 {
        self.candidate_window.max(1)
    }
}

/// Read an on/off option value.
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn read<F, T>(lookup: &F, name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!(variable = name, value = %raw, "ignoring unreadable configuration value");
    }
    parsed
}
