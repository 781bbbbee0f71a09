//! Heuristic evaluation of ReversiXT positions
//!
//! The score of a player is made of:
//! - Static tile weights of the tiles it owns
//! - Mobility (number of legal moves)
//! - Raw tile count
//! - Overwrite stones and bombs in hand
//!
//! The first three terms are scaled by [`phase_factors`] depending on how
//! full the board is.

use crate::board::{neighbours, Board, Coordinates, Direction, PlayerId, Tile, TileReader};
use crate::game::{GamePhase, GameState};
use crate::rules::legal_moves;

use super::weights::{mobility_score, phase_factors, BOMB_VALUE, OVERWRITE_STONE_VALUE};

/// Evaluator bound to one map.
///
/// Tile weights and the number of reachable tiles are computed once from the
/// initial board and reused for every position of the game.
#[derive(Debug, Clone)]
pub struct Evaluator {
    width: i32,
    weights: Vec<i32>,
    reachable: usize,
}

impl Evaluator {
    pub fn new(board: &Board) -> Self {
        let weights = board.coordinates().map(|pos| static_weight(board, pos)).collect();
        Self {
            width: board.width(),
            weights,
            reachable: reachable_tiles(board),
        }
    }

    /// Static weight of the tile at `pos` (0 off board)
    #[inline]
    pub fn tile_weight(&self, pos: Coordinates) -> i32 {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width {
            return 0;
        }
        self.weights
            .get((pos.y * self.width + pos.x) as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Number of tiles any player could ever occupy
    #[inline]
    pub fn reachable(&self) -> usize {
        self.reachable
    }

    /// Percentage of reachable tiles currently owned by a player
    pub fn occupancy(&self, state: &GameState) -> f64 {
        if self.reachable == 0 {
            return 100.0;
        }
        let owned: usize = state.player_ids().map(|id| state.tile_count(id)).sum();
        owned as f64 * 100.0 / self.reachable as f64
    }

    /// Score `state` from the point of view of `player`. Higher is better.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, player: PlayerId) -> i32 {
        let Some(info) = state.player(player) else {
            return i32::MIN;
        };
        if info.is_disqualified() {
            return i32::MIN;
        }

        let tiles = state.tile_count(player);
        if state.phase() == GamePhase::End {
            let leading = state
                .player_ids()
                .filter(|&other| other != player)
                .all(|other| state.tile_count(other) <= tiles);
            return if leading { i32::MAX } else { tiles as i32 };
        }

        let factors = phase_factors(self.occupancy(state));
        let position: i32 = state
            .board()
            .stones(player)
            .iter()
            .map(|&pos| self.tile_weight(pos))
            .sum();
        let mobility = if state.phase() == GamePhase::Build {
            mobility_score(legal_moves(state, player).len())
        } else {
            0.0
        };

        let score = f64::from(position) * factors.position
            + mobility * factors.mobility
            + tiles as f64 * factors.tiles
            + f64::from(info.overwrite_stones()) * OVERWRITE_STONE_VALUE
            + f64::from(info.bombs()) * BOMB_VALUE;
        score.round() as i32
    }
}

/// Evaluate with a fresh [`Evaluator`] for `state`'s board.
///
/// Convenient for one-off calls; search code keeps one evaluator per game.
#[must_use]
pub fn evaluate(state: &GameState, player: PlayerId) -> i32 {
    Evaluator::new(state.board()).evaluate(state, player)
}

/// 1 + number of axes where exactly one of the two directions is a dead end.
///
/// Such tiles can enclose stones along that axis but cannot be enclosed.
pub fn static_weight(board: &Board, pos: Coordinates) -> i32 {
    if board.tile(pos).map_or(true, |tile| tile == Tile::Wall) {
        return 0;
    }
    let dead_end = |direction: Direction| !TileReader::new(board, pos, direction).has_next();
    1 + Direction::AXES
        .iter()
        .filter(|&&(a, b)| dead_end(a) != dead_end(b))
        .count() as i32
}

/// Non-wall tiles connected to any stone or expansion tile
fn reachable_tiles(board: &Board) -> usize {
    let mut seen = vec![false; (board.width() * board.height()) as usize];
    let index = |pos: Coordinates| (pos.y * board.width() + pos.x) as usize;

    let mut stack: Vec<Coordinates> = board
        .coordinates()
        .filter(|&pos| {
            board
                .tile(pos)
                .is_some_and(|tile| tile.is_player() || tile == Tile::Expansion)
        })
        .collect();
    for &pos in &stack {
        seen[index(pos)] = true;
    }

    let mut count = stack.len();
    while let Some(pos) = stack.pop() {
        for next in neighbours(board, pos) {
            if !seen[index(next)] {
                seen[index(next)] = true;
                count += 1;
                stack.push(next);
            }
        }
    }
    count
}
