//! Board structure with per-tile coordinate index

use std::collections::BTreeSet;
use std::fmt;

use super::transition::TransitionTable;
use super::{Coordinates, PlayerId, Tile};

/// Game board: a width x height tile grid plus its transitions.
///
/// Cloning copies the grid, the transition table and the coordinate index;
/// nothing is shared between clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    transitions: TransitionTable,
    /// Coordinates currently holding each tile value, indexed by `Tile::kind_index`
    index: Vec<BTreeSet<Coordinates>>,
}

impl Board {
    /// Create a board filled with `Tile::Empty`.
    ///
    /// Negative sizes count as zero. A size whose area overflows `i32` gives
    /// an empty 0x0 board.
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        let (width, height, cells) = match width.checked_mul(height) {
            Some(area) => (width, height, area as usize),
            None => (0, 0, 0),
        };

        let mut index = vec![BTreeSet::new(); Tile::KINDS];
        index[Tile::Empty.kind_index()] = (0..height)
            .flat_map(|y| (0..width).map(move |x| Coordinates::new(x, y)))
            .collect();

        Self {
            width,
            height,
            tiles: vec![Tile::Empty; cells],
            transitions: TransitionTable::new(),
            index,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Coordinates) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    #[inline]
    fn offset(&self, pos: Coordinates) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Tile at `pos`, or `None` when `pos` lies off the board
    #[inline]
    pub fn tile(&self, pos: Coordinates) -> Option<Tile> {
        if self.contains(pos) {
            Some(self.tiles[self.offset(pos)])
        } else {
            None
        }
    }

    /// Replace the tile at `pos`, keeping the coordinate index in sync.
    /// Off-board positions are ignored.
    pub fn set_tile(&mut self, pos: Coordinates, tile: Tile) {
        if !self.contains(pos) {
            return;
        }
        let offset = self.offset(pos);
        let old = std::mem::replace(&mut self.tiles[offset], tile);
        if old != tile {
            self.index[old.kind_index()].remove(&pos);
            self.index[tile.kind_index()].insert(pos);
        }
    }

    /// All coordinates currently holding `tile`
    #[inline]
    pub fn positions(&self, tile: Tile) -> &BTreeSet<Coordinates> {
        &self.index[tile.kind_index()]
    }

    /// All coordinates owned by `player`
    #[inline]
    pub fn stones(&self, player: PlayerId) -> &BTreeSet<Coordinates> {
        self.positions(Tile::Player(player))
    }

    /// Number of tiles owned by `player`
    #[inline]
    pub fn stone_count(&self, player: PlayerId) -> usize {
        self.stones(player).len()
    }

    /// Iterate over every on-board coordinate, row by row
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinates> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coordinates::new(x, y)))
    }

    #[inline]
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    #[inline]
    pub fn transitions_mut(&mut self) -> &mut TransitionTable {
        &mut self.transitions
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row: Vec<String> = (0..self.width)
                .map(|x| self.tiles[self.offset(Coordinates::new(x, y))].to_char().to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
