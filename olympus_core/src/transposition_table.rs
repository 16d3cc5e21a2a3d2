//! Direct-mapped, always-replace transposition table keyed by the board's
//! Zobrist hash. The index is a mask of the low bits; a probe only counts
//! when the full 64-bit key matches.

use crate::moves::Move;

pub type HashKey = u64;

/// log2 of the default slot count.
pub const DEFAULT_EXPONENT: u32 = 22;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    /// Search failed low: the real score is at most this.
    Upper,
    /// Search failed high: the real score is at least this.
    Lower,
    Exact,
}

#[derive(Clone)]
pub struct TTEntry {
    pub key: HashKey,
    pub mv: Move,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
}

pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: HashKey,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_exponent(DEFAULT_EXPONENT)
    }

    /// Power-of-two sizing keeps indexing a mask. Small exponents are for
    /// tests.
    pub fn with_exponent(exponent: u32) -> Self {
        let len = 1usize << exponent;
        TranspositionTable {
            entries: vec![None; len],
            mask: (len - 1) as HashKey,
        }
    }

    fn index(&self, key: HashKey) -> usize {
        (key & self.mask) as usize
    }

    pub fn store(&mut self, key: HashKey, mv: Move, score: i32, depth: u8, bound: Bound) {
        let index = self.index(key);
        self.entries[index] = Some(TTEntry {
            key,
            mv,
            depth,
            score,
            bound,
        });
    }

    /// Returns a usable score for this node, honoring the stored bound, or
    /// None when the entry is missing, foreign, or too shallow.
    pub fn probe(&self, key: HashKey, alpha: i32, beta: i32, depth: u8) -> Option<i32> {
        let entry = self.entries[self.index(key)].as_ref()?;
        if entry.key != key || entry.depth < depth {
            return None;
        }
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::Upper if entry.score <= alpha => Some(alpha),
            Bound::Lower if entry.score >= beta => Some(beta),
            _ => None,
        }
    }

    /// The stored move for this exact position, depth notwithstanding.
    pub fn probe_pv(&self, key: HashKey) -> Option<(&Move, i32)> {
        let entry = self.entries[self.index(key)].as_ref()?;
        if entry.key != key {
            return None;
        }
        Some((&entry.mv, entry.score))
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gods::GodName;

    fn any_move() -> Move {
        Move::from_text(GodName::Pan, "a1b1b2").unwrap()
    }

    #[test]
    fn test_store_and_probe_exact() {
        let mut tt = TranspositionTable::with_exponent(8);
        tt.store(0xDEAD, any_move(), 42, 3, Bound::Exact);

        assert_eq!(tt.probe(0xDEAD, -100, 100, 3), Some(42));
        assert_eq!(tt.probe(0xDEAD, -100, 100, 2), Some(42));
        // Too shallow for a depth-4 node.
        assert_eq!(tt.probe(0xDEAD, -100, 100, 4), None);
    }

    #[test]
    fn test_bounds_clip_to_the_window() {
        let mut tt = TranspositionTable::with_exponent(8);

        tt.store(1, any_move(), -500, 5, Bound::Upper);
        assert_eq!(tt.probe(1, -100, 100, 5), Some(-100));

        tt.store(2, any_move(), 500, 5, Bound::Lower);
        assert_eq!(tt.probe(2, -100, 100, 5), Some(100));

        // Bounds inside the window prove nothing.
        tt.store(3, any_move(), 50, 5, Bound::Upper);
        assert_eq!(tt.probe(3, -100, 100, 5), None);
    }

    #[test]
    fn test_full_key_comparison_rejects_index_collisions() {
        let mut tt = TranspositionTable::with_exponent(8);
        tt.store(0x100, any_move(), 7, 1, Bound::Exact);

        // Same slot (low bits equal), different key.
        assert_eq!(tt.probe(0x200, -100, 100, 1), None);
        assert!(tt.probe_pv(0x200).is_none());
        assert!(tt.probe_pv(0x100).is_some());
    }

    #[test]
    fn test_always_replace() {
        let mut tt = TranspositionTable::with_exponent(8);
        tt.store(0x100, any_move(), 7, 9, Bound::Exact);
        tt.store(0x200, any_move(), 8, 1, Bound::Exact);

        assert_eq!(tt.probe(0x100, -100, 100, 1), None);
        assert_eq!(tt.probe(0x200, -100, 100, 1), Some(8));
    }
}
