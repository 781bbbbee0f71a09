//! Cutoff-frequency move ordering
//!
//! Counts, per ply, how often each move caused an alpha or beta cutoff.
//! Sibling branches at the same ply try frequent cutoff moves first. The
//! table lives for one move request and is cleared before the next.

use rustc_hash::FxHashMap;

use crate::game::Move;

#[derive(Debug, Clone, Default)]
pub struct KillerTable {
    plies: Vec<FxHashMap<Move, u32>>,
}

impl KillerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that `mv` caused a cutoff at `ply`
    pub fn record(&mut self, ply: usize, mv: Move) {
        if self.plies.len() <= ply {
            self.plies.resize_with(ply + 1, FxHashMap::default);
        }
        *self.plies[ply].entry(mv).or_insert(0) += 1;
    }

    /// Number of cutoffs `mv` caused at `ply`
    #[inline]
    pub fn count(&self, ply: usize, mv: &Move) -> u32 {
        self.plies
            .get(ply)
            .and_then(|moves| moves.get(mv))
            .copied()
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.plies.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.plies.iter().all(FxHashMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coordinates, PlayerId};
    use crate::game::MoveKind;

    fn mv(x: i32) -> Move {
        Move::new(PlayerId::new(1).unwrap(), Coordinates::new(x, 0), MoveKind::Normal)
    }

    #[test]
    fn test_counts_are_per_ply() {
        let mut killers = KillerTable::new();
        assert!(killers.is_empty());
        killers.record(3, mv(1));
        killers.record(3, mv(1));
        killers.record(1, mv(2));

        assert_eq!(killers.count(3, &mv(1)), 2);
        assert_eq!(killers.count(1, &mv(1)), 0);
        assert_eq!(killers.count(1, &mv(2)), 1);
        assert_eq!(killers.count(9, &mv(2)), 0);
    }

    #[test]
    fn test_clear() {
        let mut killers = KillerTable::new();
        killers.record(0, mv(0));
        killers.clear();
        assert!(killers.is_empty());
        assert_eq!(killers.count(0, &mv(0)), 0);
    }
}
