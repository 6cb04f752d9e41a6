//! Zobrist-style content keys for positions.
//!
//! The keys are generated from a fixed seed so they are deterministic across
//! runs, which keeps opening-book lookups and test failures reproducible.

use std::sync::OnceLock;

use crate::position::board::{Square, BOARD_SIZE};

const PIECE_LETTERS: &[u8; 12] = b"PNBRQKpnbrqk";

#[derive(Debug)]
struct KeyTables {
    piece_square: [[u64; BOARD_SIZE]; 12],
    castling: [u64; 16],
    en_passant: [u64; BOARD_SIZE],
    king_passant: [u64; BOARD_SIZE],
}

static TABLES: OnceLock<KeyTables> = OnceLock::new();

#[inline]
fn tables() -> &'static KeyTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> KeyTables {
    let mut seed: u64 = 0x51F1_5EED_D15C_A7C4;

    let mut piece_square = [[0u64; BOARD_SIZE]; 12];
    for piece in &mut piece_square {
        for sq in piece.iter_mut() {
            *sq = next_random_u64(&mut seed);
        }
    }

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    let mut en_passant = [0u64; BOARD_SIZE];
    for key in &mut en_passant {
        *key = next_random_u64(&mut seed);
    }

    let mut king_passant = [0u64; BOARD_SIZE];
    for key in &mut king_passant {
        *key = next_random_u64(&mut seed);
    }

    KeyTables {
        piece_square,
        castling,
        en_passant,
        king_passant,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn piece_slot(cell: u8) -> Option<usize> {
    PIECE_LETTERS.iter().position(|&p| p == cell)
}

/// Compute the key for a full position value.
///
/// `castling_bits` packs own west/east then opponent west/east into the low
/// four bits.
pub fn compute_key(
    cells: &[u8; BOARD_SIZE],
    castling_bits: u8,
    en_passant: Option<Square>,
    king_passant: Option<Square>,
) -> u64 {
    let t = tables();
    let mut key = 0u64;

    for (sq, &cell) in cells.iter().enumerate() {
        if let Some(slot) = piece_slot(cell) {
            key ^= t.piece_square[slot][sq];
        }
    }

    key ^= t.castling[usize::from(castling_bits & 0x0F)];
    if let Some(sq) = en_passant {
        key ^= t.en_passant[sq % BOARD_SIZE];
    }
    if let Some(sq) = king_passant {
        key ^= t.king_passant[sq % BOARD_SIZE];
    }
    key
}
