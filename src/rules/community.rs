//! Partitioning of the occupied board into independent communities
//!
//! A community is a maximal group of occupied or expansion tiles connected
//! through single reader steps (transitions included). Stones in different
//! communities cannot influence each other until a placement joins them, so
//! the search may look at one community at a time.
//!
//! Communities only ever merge. Merging is tracked with a small union-find
//! over community slots; `CommunityId`s returned by queries are always roots.

use log::trace;

use crate::board::{neighbours, Board, Coordinates, PlayerId, Tile, MAX_PLAYERS};
use crate::game::{Move, MoveKind};

/// Identifier of a community (a union-find root)
pub type CommunityId = usize;

#[inline]
fn is_member_tile(tile: Tile) -> bool {
    tile.is_player() || tile == Tile::Expansion
}

/// Partition of all occupied and expansion tiles.
///
/// Cloned alongside the game state during search; a clone evolves
/// independently of the original.
#[derive(Debug, Clone)]
pub struct Communities {
    width: i32,
    /// Slot of the community each cell was first assigned to
    membership: Vec<Option<usize>>,
    /// Union-find parent per slot
    parent: Vec<usize>,
    /// Member coordinates, only maintained on root slots
    members: Vec<Vec<Coordinates>>,
    /// Live tile count per player, only maintained on root slots
    counts: Vec<[u32; MAX_PLAYERS as usize]>,
}

impl Communities {
    /// Flood-fill the board into communities.
    pub fn build(board: &Board) -> Self {
        let cells = (board.width() * board.height()) as usize;
        let mut communities = Self {
            width: board.width(),
            membership: vec![None; cells],
            parent: Vec::new(),
            members: Vec::new(),
            counts: Vec::new(),
        };

        for start in board.coordinates() {
            if communities.slot(start).is_some() || !board.tile(start).is_some_and(is_member_tile) {
                continue;
            }
            let id = communities.new_slot();
            let mut stack = vec![start];
            communities.assign(start, id);
            while let Some(pos) = stack.pop() {
                for next in neighbours(board, pos) {
                    if communities.slot(next).is_none()
                        && board.tile(next).is_some_and(is_member_tile)
                    {
                        communities.assign(next, id);
                        stack.push(next);
                    }
                }
            }
            communities.refresh_counts(board, id);
        }
        communities
    }

    #[inline]
    fn offset(&self, pos: Coordinates) -> Option<usize> {
        let offset = (pos.y * self.width + pos.x) as usize;
        (pos.x >= 0 && pos.x < self.width && pos.y >= 0 && offset < self.membership.len())
            .then_some(offset)
    }

    #[inline]
    fn slot(&self, pos: Coordinates) -> Option<usize> {
        self.offset(pos).and_then(|offset| self.membership[offset])
    }

    fn new_slot(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.members.push(Vec::new());
        self.counts.push([0; MAX_PLAYERS as usize]);
        id
    }

    fn assign(&mut self, pos: Coordinates, root: usize) {
        if let Some(offset) = self.offset(pos) {
            self.membership[offset] = Some(root);
            self.members[root].push(pos);
        }
    }

    /// Root of the community slot `id` belongs to
    pub fn find(&self, mut id: CommunityId) -> CommunityId {
        while self.parent[id] != id {
            id = self.parent[id];
        }
        id
    }

    /// Community containing `pos`, if `pos` is occupied
    #[inline]
    pub fn community_of(&self, pos: Coordinates) -> Option<CommunityId> {
        self.slot(pos).map(|slot| self.find(slot))
    }

    /// Ids of all non-empty communities
    pub fn ids(&self) -> Vec<CommunityId> {
        (0..self.parent.len())
            .filter(|&id| self.parent[id] == id && !self.members[id].is_empty())
            .collect()
    }

    /// Number of non-empty communities
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinates belonging to community `id`
    pub fn members(&self, id: CommunityId) -> &[Coordinates] {
        &self.members[self.find(id)]
    }

    /// Tiles of `player` inside community `id`
    pub fn tile_count(&self, id: CommunityId, player: PlayerId) -> u32 {
        self.counts[self.find(id)][player.index()]
    }

    /// Whether a placement at `pos` would belong to or border community `id`
    pub fn touches(&self, board: &Board, id: CommunityId, pos: Coordinates) -> bool {
        let root = self.find(id);
        self.community_of(pos) == Some(root)
            || neighbours(board, pos).any(|n| self.community_of(n) == Some(root))
    }

    /// Bring the partition up to date after `mv` was played on `board`.
    pub fn update(&mut self, board: &Board, mv: &Move) {
        if mv.kind == MoveKind::Bomb {
            self.remove_destroyed(board);
            return;
        }

        let target = mv.coordinates;
        let mut roots: Vec<usize> = self.community_of(target).into_iter().collect();
        roots.extend(neighbours(board, target).filter_map(|n| self.community_of(n)));
        roots.sort_unstable();
        roots.dedup();

        let root = match roots.split_first() {
            None => self.new_slot(),
            Some((&first, rest)) => rest.iter().fold(first, |acc, &other| self.union(acc, other)),
        };
        if roots.len() > 1 {
            trace!("placement at {target} merged {} communities", roots.len());
        }
        if self.slot(target).is_none() {
            self.assign(target, root);
        }

        match mv.kind {
            // These rewrite ownership far outside the community
            MoveKind::Choice(_) | MoveKind::Inversion => {
                for id in self.ids() {
                    self.refresh_counts(board, id);
                }
            }
            _ => self.refresh_counts(board, root),
        }
    }

    fn union(&mut self, a: usize, b: usize) -> usize {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return a;
        }
        let (keep, absorb) = if self.members[a].len() >= self.members[b].len() {
            (a, b)
        } else {
            (b, a)
        };
        self.parent[absorb] = keep;
        let moved = std::mem::take(&mut self.members[absorb]);
        self.members[keep].extend(moved);
        keep
    }

    /// Drop tiles turned into walls by a bomb. Communities never split.
    fn remove_destroyed(&mut self, board: &Board) {
        for id in self.ids() {
            self.members[id].retain(|&pos| board.tile(pos).is_some_and(is_member_tile));
        }
        for pos in board.coordinates() {
            if !board.tile(pos).is_some_and(is_member_tile) {
                if let Some(offset) = self.offset(pos) {
                    self.membership[offset] = None;
                }
            }
        }
        for id in self.ids() {
            self.refresh_counts(board, id);
        }
    }

    fn refresh_counts(&mut self, board: &Board, id: usize) {
        let mut counts = [0u32; MAX_PLAYERS as usize];
        for &pos in &self.members[id] {
            if let Some(owner) = board.tile(pos).and_then(Tile::owner) {
                counts[owner.index()] += 1;
            }
        }
        self.counts[id] = counts;
    }
}
