//! Board representation for ReversiXT maps
//!
//! Maps are arbitrary rectangles whose holes are `Wall` tiles and whose edges
//! may be stitched together by transitions. All geometry questions (what is
//! my neighbour in direction `d`?) go through [`TileReader`].

pub mod board;
pub mod reader;
pub mod transition;

#[cfg(test)]
mod tests;

// Re-exports
pub use board::Board;
pub use reader::{neighbours, TileReader};
pub use transition::{HalfEdge, TransitionTable};

/// Highest player number a map may declare
pub const MAX_PLAYERS: u8 = 8;

/// Largest width or height of a board; every coordinate fits the `i16` wire fields
pub const MAX_DIMENSION: i32 = i16::MAX as i32;

/// Position on the board (x = column, y = row, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring coordinates one step in `direction` (may be off board)
    #[inline]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight compass directions, numbered clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The four axes, each as a pair of opposite directions
    pub const AXES: [(Direction, Direction); 4] = [
        (Direction::North, Direction::South),
        (Direction::NorthEast, Direction::SouthWest),
        (Direction::East, Direction::West),
        (Direction::SouthEast, Direction::NorthWest),
    ];

    #[inline]
    pub fn from_index(index: u8) -> Option<Direction> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        Self::ALL[((self as u8 + 4) % 8) as usize]
    }

    /// (dx, dy) with y growing downwards
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }
}

/// Player number, always in `1..=MAX_PLAYERS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u8);

impl PlayerId {
    #[inline]
    pub fn new(number: u8) -> Option<Self> {
        (1..=MAX_PLAYERS).contains(&number).then_some(Self(number))
    }

    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-player arrays
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < MAX_PLAYERS as usize);
        Self(index as u8 + 1)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Player(PlayerId),
    Wall,
    Choice,
    Inversion,
    Bonus,
    Expansion,
}

impl Tile {
    /// Number of distinct tile values (8 player colours + 6 others)
    pub const KINDS: usize = 14;

    /// Tiles a stone can be placed on without an overwrite stone
    #[inline]
    pub fn is_unoccupied(self) -> bool {
        matches!(self, Tile::Empty | Tile::Choice | Tile::Inversion | Tile::Bonus)
    }

    #[inline]
    pub fn is_player(self) -> bool {
        matches!(self, Tile::Player(_))
    }

    #[inline]
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Tile::Player(id) => Some(id),
            _ => None,
        }
    }

    /// Foreign stone that can be enclosed by `player`: another colour or an expansion stone
    #[inline]
    pub fn is_capturable_by(self, player: PlayerId) -> bool {
        match self {
            Tile::Player(owner) => owner != player,
            Tile::Expansion => true,
            _ => false,
        }
    }

    /// Dense index used by the per-tile coordinate index of [`Board`]
    #[inline]
    pub(crate) fn kind_index(self) -> usize {
        match self {
            Tile::Player(id) => id.index(),
            Tile::Empty => 8,
            Tile::Wall => 9,
            Tile::Choice => 10,
            Tile::Inversion => 11,
            Tile::Bonus => 12,
            Tile::Expansion => 13,
        }
    }

    /// Parse a map tile code
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '0' => Some(Tile::Empty),
            '-' => Some(Tile::Wall),
            'c' => Some(Tile::Choice),
            'i' => Some(Tile::Inversion),
            'b' => Some(Tile::Bonus),
            'x' => Some(Tile::Expansion),
            '1'..='8' => PlayerId::new(c as u8 - b'0').map(Tile::Player),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Tile::Empty => '0',
            Tile::Player(id) => (b'0' + id.number()) as char,
            Tile::Wall => '-',
            Tile::Choice => 'c',
            Tile::Inversion => 'i',
            Tile::Bonus => 'b',
            Tile::Expansion => 'x',
        }
    }
}
