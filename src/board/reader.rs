//! Ray walking across the board and through transitions

use super::{Board, Coordinates, Direction, Tile};

/// Cursor walking the board one tile at a time in a fixed direction.
///
/// A step goes to the on-board neighbour unless it is missing or a wall; in
/// that case the transition registered for the current half-edge is taken,
/// adopting its incoming direction. A walk ends (`next()` returns `None`)
/// when neither exists or the transition leads onto a wall. The wall check
/// happens on every step, so transitions whose endpoint was bombed become
/// dead ends.
#[derive(Debug, Clone)]
pub struct TileReader<'a> {
    board: &'a Board,
    position: Coordinates,
    direction: Direction,
}

impl<'a> TileReader<'a> {
    pub fn new(board: &'a Board, start: Coordinates, direction: Direction) -> Self {
        Self {
            board,
            position: start,
            direction,
        }
    }

    /// Current position of the cursor
    #[inline]
    pub fn position(&self) -> Coordinates {
        self.position
    }

    /// Current direction of travel (changes after passing a transition)
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether another step is possible. Does not move the cursor.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.peek().is_some()
    }

    /// The position and direction the next step would produce
    pub fn peek(&self) -> Option<(Coordinates, Direction)> {
        let neighbour = self.position.step(self.direction);
        if let Some(tile) = self.board.tile(neighbour) {
            if tile != Tile::Wall {
                return Some((neighbour, self.direction));
            }
        }

        let (to, incoming) = self.board.transitions().get(self.position, self.direction)?;
        match self.board.tile(to) {
            Some(tile) if tile != Tile::Wall => Some((to, incoming)),
            _ => None,
        }
    }
}

impl Iterator for TileReader<'_> {
    type Item = Coordinates;

    fn next(&mut self) -> Option<Coordinates> {
        let (position, direction) = self.peek()?;
        self.position = position;
        self.direction = direction;
        Some(position)
    }
}

/// All tiles reachable from `pos` in exactly one step, one per open direction
pub fn neighbours(board: &Board, pos: Coordinates) -> impl Iterator<Item = Coordinates> + '_ {
    Direction::ALL
        .into_iter()
        .filter_map(move |direction| TileReader::new(board, pos, direction).peek().map(|(to, _)| to))
}
