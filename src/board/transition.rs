//! Transition table: portals linking two board edges

use rustc_hash::FxHashMap;

use super::{Coordinates, Direction};

/// One side of a transition: leaving `coordinates` in `direction`
pub type HalfEdge = (Coordinates, Direction);

/// Maps an outgoing half-edge to the tile it leads to and the direction of
/// travel after arriving there.
///
/// Both halves of a transition are always registered together, so
/// `counterpart(counterpart(h)) == h` holds for every registered `h`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    edges: FxHashMap<HalfEdge, HalfEdge>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the transition `a <-> b` in both directions.
    ///
    /// Leaving `a.0` towards `a.1` arrives at `b.0` travelling `b.1.opposite()`
    /// and vice versa. Returns `false` (and changes nothing) if either
    /// half-edge is already taken by another transition.
    pub fn register(&mut self, a: HalfEdge, b: HalfEdge) -> bool {
        if self.edges.contains_key(&a) || self.edges.contains_key(&b) {
            return false;
        }
        self.edges.insert(a, (b.0, b.1.opposite()));
        self.edges.insert(b, (a.0, a.1.opposite()));
        true
    }

    /// Destination and incoming direction for an outgoing half-edge
    #[inline]
    pub fn get(&self, from: Coordinates, direction: Direction) -> Option<HalfEdge> {
        self.edges.get(&(from, direction)).copied()
    }

    /// The outgoing half-edge on the far side of `edge`
    pub fn counterpart(&self, edge: HalfEdge) -> Option<HalfEdge> {
        self.edges
            .get(&edge)
            .map(|&(to, incoming)| (to, incoming.opposite()))
    }

    /// Iterate over all registered half-edges as (outgoing, arrival)
    pub fn iter(&self) -> impl Iterator<Item = (HalfEdge, HalfEdge)> + '_ {
        self.edges.iter().map(|(&from, &to)| (from, to))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
