//! Zobrist key tables and the from-scratch hash used to cross-check the
//! incrementally maintained board hash.

use std::sync::LazyLock;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{board::Board, player::Player, square::Square};

// Any seed works as long as every hash in a run comes from the same table.
const KEY_SEED: u64 = 0x9e3779b97f4a7c15;

pub struct ZobristKeys {
    /// One key per (square, current height 1..=4).
    pub blocks: [[u64; 4]; Square::COUNT],
    /// One key per (square, worker color).
    pub workers: [[u64; 2]; Square::COUNT],
    /// Applied while Gray is to move.
    pub turn: u64,
    /// Applied while the no-climb flag is up.
    pub athena: u64,
}

impl ZobristKeys {
    fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut blocks = [[0u64; 4]; Square::COUNT];
        for square in blocks.iter_mut() {
            for key in square.iter_mut() {
                *key = rng.random();
            }
        }

        let mut workers = [[0u64; 2]; Square::COUNT];
        for square in workers.iter_mut() {
            for key in square.iter_mut() {
                *key = rng.random();
            }
        }

        ZobristKeys {
            blocks,
            workers,
            turn: rng.random(),
            athena: rng.random(),
        }
    }
}

pub static KEYS: LazyLock<ZobristKeys> = LazyLock::new(|| ZobristKeys::new(KEY_SEED));

/// Recomputes the hash of a board from nothing. The incremental updates in
/// `Board` must agree with this after every mutation.
pub fn compute_hash(board: &Board) -> u64 {
    let keys = &*KEYS;
    let mut hash = 0u64;

    for index in 0..Square::COUNT {
        let height = board.blocks[index] as usize;
        if height >= 1 {
            hash ^= keys.blocks[index][height - 1];
        }
    }

    for (slot, &square) in board.workers.iter().enumerate() {
        let color = Player::owner_of_slot(slot) as usize;
        hash ^= keys.workers[square as usize][color];
    }

    if board.current_player == Player::Gray {
        hash ^= keys.turn;
    }

    if board.athena_flag {
        hash ^= keys.athena;
    }

    hash
}
