//! Main AI engine integrating all search components
//!
//! This module provides the engine that picks a move for a player under a
//! wall-clock deadline. The strategy depends on the position:
//!
//! 1. **Bomb phase**: every bomb target is evaluated once (depth 1)
//! 2. **Split board**: when the occupied tiles fall apart into several
//!    communities, each one is searched on its own with an equal share of
//!    the remaining time and the best scoring move wins
//! 3. **Whole board**: iterative-deepening alpha-beta over all moves
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use reversi::map::parse_map;
//! use reversi::search::Deadline;
//! use reversi::AIEngine;
//!
//! let state = parse_map("2\n0\n0 0\n4 4\n0 0 0 0\n0 1 2 0\n0 2 1 0\n0 0 0 0\n").unwrap();
//! let mut engine = AIEngine::new(state.board());
//! let player = state.current_player().unwrap();
//!
//! let result = engine
//!     .best_move(&state, player, Deadline::after(Duration::from_millis(300)))
//!     .unwrap();
//! println!("Best move: {:?} ({:?})", result.best_move, result.search_type);
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use log::{debug, info};

use crate::board::{Board, PlayerId};
use crate::config::SearchConfig;
use crate::error::GameError;
use crate::eval::Evaluator;
use crate::game::{GamePhase, GameState, Move};
use crate::rules::{legal_moves, Communities, CommunityId};
use crate::search::{Deadline, Region, SearchResult, Searcher, StopReason};

/// Strategy that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// The player has no legal move
    NoMove,
    /// Depth-1 evaluation of bomb targets
    Bomb,
    /// Alpha-beta over the whole board
    AlphaBeta,
    /// Alpha-beta per community
    Communities,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Move>,
    /// Evaluation score of the best move
    pub score: i32,
    /// Strategy that found this move
    pub search_type: SearchType,
    /// Deepest completed search depth
    pub depth: u32,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn no_move(score: i32, time_ms: u64) -> Self {
        Self {
            best_move: None,
            score,
            search_type: SearchType::NoMove,
            depth: 0,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_search(result: SearchResult, search_type: SearchType, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type,
            depth: result.depth,
            time_ms,
            nodes: result.nodes,
        }
    }
}

/// AI engine for one game.
///
/// Built from the initial board, whose static tile weights drive evaluation
/// and move ordering for the whole game.
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Searcher,
}

impl AIEngine {
    /// Engine with the default [`SearchConfig`]
    #[must_use]
    pub fn new(board: &Board) -> Self {
        Self::with_config(board, SearchConfig::default())
    }

    #[must_use]
    pub fn with_config(board: &Board, config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(Evaluator::new(board), config),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        self.searcher.config()
    }

    pub fn set_max_depth(&mut self, depth: u32) {
        self.searcher.config_mut().max_depth = depth.max(1);
    }

    /// Evaluation of `state` for `player` with this game's evaluator
    pub fn evaluate(&self, state: &GameState, player: PlayerId) -> i32 {
        self.searcher.evaluator().evaluate(state, player)
    }

    /// Best move only. `None` if `player` cannot move.
    pub fn get_move(
        &mut self,
        state: &GameState,
        player: PlayerId,
        deadline: Deadline,
    ) -> Result<Option<Move>, GameError> {
        Ok(self.best_move(state, player, deadline)?.best_move)
    }

    /// Search `player`'s best move in `state` before `deadline`.
    ///
    /// The configured time buffer is taken off the deadline first. Running
    /// out of time yields the best move of the last completed depth.
    pub fn best_move(
        &mut self,
        state: &GameState,
        player: PlayerId,
        deadline: Deadline,
    ) -> Result<MoveResult, GameError> {
        let start = Instant::now();
        let deadline = deadline.shortened(self.searcher.config().time_buffer);
        let elapsed_ms = || start.elapsed().as_millis() as u64;

        if state.phase() == GamePhase::End {
            return Err(GameError::GameOver);
        }

        let moves = legal_moves(state, player);
        if moves.is_empty() {
            info!("player {player} has no legal move");
            return Ok(MoveResult::no_move(self.evaluate(state, player), elapsed_ms()));
        }

        let result = if state.phase() == GamePhase::Bomb {
            let result = self.searcher.iterate(state, player, None, deadline, 1)?;
            MoveResult::from_search(result, SearchType::Bomb, elapsed_ms())
        } else {
            let communities = self.searcher.config().use_communities.then(|| {
                let communities = Communities::build(state.board());
                let active = active_communities(&communities, state, &moves);
                (communities, active)
            });
            match communities {
                Some((communities, active)) if active.len() > 1 => {
                    let result = self.search_communities(state, player, deadline, communities, &active)?;
                    MoveResult::from_search(result, SearchType::Communities, elapsed_ms())
                }
                _ => {
                    let result = self.searcher.search(state, player, None, deadline)?;
                    MoveResult::from_search(result, SearchType::AlphaBeta, elapsed_ms())
                }
            }
        };

        info!(
            "player {player}: {:?} {} scores {} at depth {} ({} nodes, {} ms)",
            result.search_type,
            result
                .best_move
                .map_or_else(|| "no move".to_string(), |mv| mv.to_string()),
            result.score,
            result.depth,
            result.nodes,
            result.time_ms
        );
        Ok(result)
    }

    /// Search every community in turn, each with an equal share of the time
    /// still left, and keep the best scoring move.
    fn search_communities(
        &mut self,
        state: &GameState,
        player: PlayerId,
        deadline: Deadline,
        communities: Communities,
        active: &[CommunityId],
    ) -> Result<SearchResult, GameError> {
        let mut best: Option<SearchResult> = None;
        let mut nodes = 0;

        for (i, &id) in active.iter().enumerate() {
            let share = deadline.share((active.len() - i) as u32);
            let region = Region::new(communities.clone(), id);
            let result = self.searcher.search(state, player, Some(&region), share)?;
            debug!(
                "community {id} ({} tiles): score {} at depth {}",
                communities.members(id).len(),
                result.score,
                result.depth
            );
            nodes += result.nodes;

            let better = result.best_move.is_some()
                && best.as_ref().map_or(true, |best| result.score > best.score);
            if better {
                best = Some(result);
            }
        }

        let mut best = best.unwrap_or(SearchResult {
            best_move: None,
            score: self.evaluate(state, player),
            depth: 0,
            nodes: 0,
            stop: StopReason::NoMove,
        });
        best.nodes = nodes;
        Ok(best)
    }
}

/// Communities in which at least one of `moves` is played
fn active_communities(
    communities: &Communities,
    state: &GameState,
    moves: &BTreeSet<Move>,
) -> Vec<CommunityId> {
    communities
        .ids()
        .into_iter()
        .filter(|&id| {
            moves
                .iter()
                .any(|mv| communities.touches(state.board(), id, mv.coordinates))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MoveKind;
    use crate::map::parse_map;
    use std::time::Duration;

    const OPENING: &str = "2\n0\n0 0\n4 4\n0 0 0 0\n0 1 2 0\n0 2 1 0\n0 0 0 0\n";

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n).unwrap()
    }

    fn budget(ms: u64) -> Deadline {
        Deadline::after(Duration::from_millis(ms))
    }

    #[test]
    fn test_engine_creation() {
        let state = parse_map(OPENING).unwrap();
        let mut engine = AIEngine::new(state.board());
        assert_eq!(engine.config(), &SearchConfig::default());
        engine.set_max_depth(0);
        assert_eq!(engine.config().max_depth, 1);
    }

    #[test]
    fn test_engine_opening_move_is_legal() {
        let state = parse_map(OPENING).unwrap();
        let mut engine = AIEngine::new(state.board());
        let result = engine.best_move(&state, p(1), budget(300)).unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        let mv = result.best_move.unwrap();
        assert!(state.legal_moves(p(1)).contains(&mv));
        assert!(result.depth >= 1);
    }

    #[test]
    fn test_engine_takes_the_win() {
        // The only move captures player 2's last stone
        let state = parse_map("2\n0\n0 0\n2 3\n1 2 0\n0 0 0\n").unwrap();
        let mut engine = AIEngine::new(state.board());
        let result = engine.best_move(&state, p(1), budget(300)).unwrap();
        assert_eq!(
            result.best_move.map(|mv| mv.coordinates),
            Some(crate::board::Coordinates::new(2, 0))
        );
        assert_eq!(result.score, i32::MAX);
    }

    #[test]
    fn test_engine_bomb_phase() {
        let state = parse_map("2\n0\n1 1\n1 5\n1 0 0 0 2\n").unwrap();
        assert_eq!(state.phase(), GamePhase::Bomb);
        let mut engine = AIEngine::new(state.board());
        let result = engine.best_move(&state, p(1), budget(300)).unwrap();
        assert_eq!(result.search_type, SearchType::Bomb);
        assert_eq!(result.depth, 1);
        let mv = result.best_move.unwrap();
        assert_eq!(mv.kind, MoveKind::Bomb);
        // Anything within reach of (0, 0) destroys player 1's only stone
        assert!(mv.coordinates.x >= 2, "bombed own stone with {mv}");
    }

    #[test]
    fn test_engine_splits_communities() {
        let map = "2\n0\n0 0\n3 9\n1 2 0 0 0 0 0 2 1\n2 1 0 0 0 0 0 1 2\n0 0 0 0 0 0 0 0 0\n";
        let state = parse_map(map).unwrap();
        let mut engine = AIEngine::new(state.board());
        let result = engine.best_move(&state, p(1), budget(400)).unwrap();
        assert_eq!(result.search_type, SearchType::Communities);
        assert!(state.legal_moves(p(1)).contains(&result.best_move.unwrap()));

        let config = SearchConfig {
            use_communities: false,
            ..SearchConfig::default()
        };
        let mut engine = AIEngine::with_config(state.board(), config);
        let result = engine.best_move(&state, p(1), budget(400)).unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
    }

    #[test]
    fn test_engine_no_move_and_game_over() {
        let state = parse_map("2\n0\n0 0\n1 3\n1 1 2\n").unwrap();
        let mut engine = AIEngine::new(state.board());
        assert_eq!(
            engine.best_move(&state, p(1), budget(100)).unwrap_err(),
            GameError::GameOver
        );

        let mut state = parse_map(OPENING).unwrap();
        state.disqualify(p(2)).unwrap();
        let mut engine = AIEngine::new(state.board());
        let result = engine.best_move(&state, p(2), budget(100)).unwrap();
        assert_eq!(result.search_type, SearchType::NoMove);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_engine_respects_deadline() {
        let state = parse_map(
            "2\n0\n0 0\n6 6\n0 0 0 0 0 0\n0 0 0 0 0 0\n0 0 1 2 0 0\n0 0 2 1 0 0\n0 0 0 0 0 0\n0 0 0 0 0 0\n",
        )
        .unwrap();
        let mut engine = AIEngine::new(state.board());
        let start = Instant::now();
        let mv = engine.get_move(&state, p(1), budget(250)).unwrap();
        assert!(mv.is_some());
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
