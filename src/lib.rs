//! Crate root module declarations for the fan-out chess engine.
//!
//! This file exposes the position model, the search and its parallel
//! dispatcher, move selection, the engine facade, and utility helpers so
//! binaries, tests, and benches can import stable module paths.

pub mod chess_errors;
pub mod config;
pub mod logging;

pub mod position {
    pub mod board;
    pub mod notation_parser;
    pub mod perft;
    pub mod piece_square;
    pub mod position;
    pub mod position_key;
}

pub mod search {
    pub mod dispatcher;
    pub mod negamax;
}

pub mod selection {
    pub mod move_heuristics;
    pub mod move_selection;
    pub mod opening_book;
    pub mod weighted_choice;
}

pub mod engines {
    pub mod engine_fanout;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod human_input;
    pub mod render_position;
}
