//! Restriction of a search to one community

use crate::board::Board;
use crate::game::{GameState, Move};
use crate::rules::{Communities, CommunityId};

/// One community to search in, with the partition it belongs to.
///
/// Cloned and updated alongside the game state on every simulated move so
/// merges caused by the search are seen deeper in the tree.
#[derive(Debug, Clone)]
pub struct Region {
    communities: Communities,
    focus: CommunityId,
}

impl Region {
    pub fn new(communities: Communities, focus: CommunityId) -> Self {
        Self { communities, focus }
    }

    /// Current root of the focused community
    #[inline]
    pub fn focus(&self) -> CommunityId {
        self.communities.find(self.focus)
    }

    pub fn communities(&self) -> &Communities {
        &self.communities
    }

    /// Whether `mv` is played inside or at the border of the focused community
    #[inline]
    pub fn contains(&self, board: &Board, mv: &Move) -> bool {
        self.communities.touches(board, self.focus, mv.coordinates)
    }

    /// The region as seen after `mv` was played, leading to `state`
    #[must_use]
    pub fn after(&self, state: &GameState, mv: &Move) -> Self {
        let mut next = self.clone();
        next.communities.update(state.board(), mv);
        next
    }
}
