//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type across the crate. Parsing and input
//! variants are recoverable and suitable for presenting to users; the game-over
//! and pool variants describe terminal or lifecycle conditions the caller must
//! act on rather than retry.

use thiserror::Error;

/// Unified error type for the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// Position notation had the wrong field count or an unreadable board.
    ///
    /// Payload: a description of what was wrong, including the offending text.
    #[error("malformed position notation: {0}")]
    Format(String),

    /// A square token was not a file `a`-`h` followed by a rank `1`-`8`.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move text could not be read as two square tokens.
    #[error("invalid move text: {0}")]
    InvalidMove(String),

    /// No usable reply exists for the position; the game is over.
    #[error("no legal reply available")]
    NoLegalReply,

    /// The worker pool was shut down, or every worker disconnected while the
    /// coordinator was waiting for results.
    #[error("search worker pool is closed")]
    WorkerPoolClosed,

    /// The operating system refused to start a worker thread.
    #[error("failed to spawn search worker: {0}")]
    WorkerSpawn(String),

    /// A known engine option received a value it cannot use.
    #[error("invalid option value: {0}")]
    InvalidOption(String),
}

pub type ChessResult<T> = Result<T, ChessErrors>;
