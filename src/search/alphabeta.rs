//! Paranoid alpha-beta search with iterative deepening
//!
//! The searching player maximizes its own evaluation; every other player is
//! treated as one coalition minimizing it. Depth is counted in plies, one
//! ply per move of any player.
//!
//! # Features
//!
//! - Depth-1 ranking of all moves, reused as root move ordering and as the
//!   fallback answer when time runs out early
//! - Killer table (cutoff counts per ply) for interior move ordering
//! - Phi move: on minimizing nodes the reply that was best in the previous
//!   sibling subtree is tried first
//! - Time estimation from the effective branching factor before each round
//! - Optional restriction to one community ([`Region`])
//!
//! # Example
//!
//! ```
//! use reversi::eval::Evaluator;
//! use reversi::map::parse_map;
//! use reversi::search::Searcher;
//! use reversi::SearchConfig;
//!
//! let state = parse_map("2\n0\n0 0\n4 4\n0 0 0 0\n0 1 2 0\n0 2 1 0\n0 0 0 0\n").unwrap();
//! let player = state.current_player().unwrap();
//! let mut searcher = Searcher::new(Evaluator::new(state.board()), SearchConfig::default());
//!
//! let result = searcher.search_to_depth(&state, player, 3, None).unwrap();
//! assert!(result.best_move.is_some());
//! ```

use std::borrow::Cow;
use std::cmp::Reverse;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::board::PlayerId;
use crate::config::SearchConfig;
use crate::error::{GameError, SearchAbort};
use crate::eval::Evaluator;
use crate::game::{GamePhase, GameState, Move};
use crate::rules::legal_moves;

use super::killer::KillerTable;
use super::region::Region;
use super::timer::{branching_factor, estimate_duration, Deadline};

/// Why iterative deepening stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The player had no move to search
    NoMove,
    /// The configured maximum depth was completed
    MaxDepth,
    /// No leaf of the last round was cut off by depth; deeper rounds change nothing
    TreeExhausted,
    /// The next round was predicted to overrun the deadline
    Estimate,
    /// The deadline passed during a round
    OutOfTime,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, if the player has any
    pub best_move: Option<Move>,
    /// Value of the best move from the searching player's point of view
    pub score: i32,
    /// Last fully completed depth
    pub depth: u32,
    /// Total nodes visited over all rounds
    pub nodes: u64,
    /// Why deepening ended
    pub stop: StopReason,
}

/// Iterative-deepening searcher bound to one game (through its evaluator).
#[derive(Debug, Clone)]
pub struct Searcher {
    evaluator: Evaluator,
    config: SearchConfig,
    killers: KillerTable,
    /// Best minimizing reply per ply
    phi: Vec<Option<Move>>,
    nodes: u64,
    deadline: Deadline,
    /// Set when some leaf of the current round was cut off by the depth limit
    horizon_reached: bool,
}

impl Searcher {
    pub fn new(evaluator: Evaluator, config: SearchConfig) -> Self {
        Self {
            evaluator,
            config,
            killers: KillerTable::new(),
            phi: Vec::new(),
            nodes: 0,
            deadline: Deadline::unlimited(),
            horizon_reached: false,
        }
    }

    #[inline]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Killer table of the last request
    pub fn killers(&self) -> &KillerTable {
        &self.killers
    }

    /// Forget killer and phi moves from previous requests.
    pub fn reset(&mut self) {
        self.killers.clear();
        self.phi.clear();
        self.nodes = 0;
        self.horizon_reached = false;
    }

    /// Search `player`'s best move until `deadline` or the configured
    /// maximum depth.
    ///
    /// Running out of time is not an error: the result of the last completed
    /// depth is returned. Only contract violations fail.
    pub fn search(
        &mut self,
        state: &GameState,
        player: PlayerId,
        region: Option<&Region>,
        deadline: Deadline,
    ) -> Result<SearchResult, GameError> {
        let max_depth = self.config.max_depth;
        self.iterate(state, player, region, deadline, max_depth)
    }

    /// Search to exactly `depth` plies without a deadline.
    ///
    /// Stops earlier only when the whole game tree ends above `depth`, in
    /// which case deeper rounds could not change the result.
    pub fn search_to_depth(
        &mut self,
        state: &GameState,
        player: PlayerId,
        depth: u32,
        region: Option<&Region>,
    ) -> Result<SearchResult, GameError> {
        self.iterate(state, player, region, Deadline::unlimited(), depth)
    }

    /// Iterative deepening from depth 1 up to `max_depth`.
    pub(crate) fn iterate(
        &mut self,
        state: &GameState,
        player: PlayerId,
        region: Option<&Region>,
        deadline: Deadline,
        max_depth: u32,
    ) -> Result<SearchResult, GameError> {
        self.reset();
        self.deadline = deadline;

        let candidates = self.candidate_moves(state, player, region);
        let Some(&fallback) = candidates.first() else {
            debug!("player {player} has no move to search");
            return Ok(SearchResult {
                best_move: None,
                score: self.evaluator.evaluate(state, player),
                depth: 0,
                nodes: 0,
                stop: StopReason::NoMove,
            });
        };

        // Depth 1: rank every move by the evaluation of its result
        let round_start = Instant::now();
        let mut ranked = Vec::with_capacity(candidates.len());
        let ranking = self.rank_moves(state, player, &candidates, &mut ranked);
        ranked.sort_by_key(|&(_, score)| Reverse(score));
        match ranking {
            Ok(()) => {}
            Err(SearchAbort::OutOfTime) => {
                info!(
                    "ran out of time while ranking moves ({} of {} evaluated)",
                    ranked.len(),
                    candidates.len()
                );
                let (best_move, score) = ranked.first().copied().unwrap_or((fallback, i32::MIN));
                return Ok(SearchResult {
                    best_move: Some(best_move),
                    score,
                    depth: 0,
                    nodes: self.nodes,
                    stop: StopReason::OutOfTime,
                });
            }
            Err(SearchAbort::Game(err)) => return Err(err),
        }

        let (first_move, first_score) = ranked[0];
        let mut best = SearchResult {
            best_move: Some(first_move),
            score: first_score,
            depth: 1,
            nodes: self.nodes,
            stop: StopReason::MaxDepth,
        };
        let mut last_round = (self.nodes, round_start.elapsed());
        debug!("depth 1: {first_move} scores {first_score} ({} moves)", ranked.len());

        for depth in 2..=max_depth {
            if !self.horizon_reached {
                debug!("game tree fully explored at depth {}", depth - 1);
                best.stop = StopReason::TreeExhausted;
                break;
            }
            if !self.next_round_fits(depth, last_round) {
                best.stop = StopReason::Estimate;
                break;
            }

            let round_start = Instant::now();
            let nodes_before = self.nodes;
            self.horizon_reached = false;
            match self.search_root(state, player, region, depth, &ranked) {
                Ok(Some((mv, score))) => {
                    best = SearchResult {
                        best_move: Some(mv),
                        score,
                        depth,
                        nodes: self.nodes,
                        stop: StopReason::MaxDepth,
                    };
                    if let Some(index) = ranked.iter().position(|&(m, _)| m == mv) {
                        let entry = ranked.remove(index);
                        ranked.insert(0, entry);
                    }
                    last_round = (self.nodes - nodes_before, round_start.elapsed());
                    debug!(
                        "depth {depth}: {mv} scores {score} ({} nodes in {:?})",
                        last_round.0, last_round.1
                    );
                }
                Ok(None) => {
                    best.stop = StopReason::NoMove;
                    break;
                }
                Err(SearchAbort::OutOfTime) => {
                    info!("depth {depth} ran out of time, keeping depth {}", best.depth);
                    best.stop = StopReason::OutOfTime;
                    break;
                }
                Err(SearchAbort::Game(err)) => return Err(err),
            }
        }

        best.nodes = self.nodes;
        Ok(best)
    }

    /// Whether a round at `depth` is predicted to finish before the deadline,
    /// given the node count and duration of the previous round.
    fn next_round_fits(&self, depth: u32, (nodes, took): (u64, Duration)) -> bool {
        if self.deadline.is_unlimited() || !self.config.use_time_estimate {
            return true;
        }
        let branching = branching_factor(nodes, depth - 1);
        let per_node = Duration::from_secs_f64(took.as_secs_f64() / nodes.max(1) as f64);
        let estimate = estimate_duration(branching, depth, per_node);
        let remaining = self.deadline.remaining();
        if estimate > remaining {
            info!(
                "stopping before depth {depth}: estimated {estimate:?}, remaining {remaining:?} (branching {branching:.2})"
            );
            return false;
        }
        true
    }

    /// Legal moves of `player`, restricted to `region` if given
    fn candidate_moves(&self, state: &GameState, player: PlayerId, region: Option<&Region>) -> Vec<Move> {
        let moves = legal_moves(state, player);
        match region {
            None => moves.into_iter().collect(),
            Some(region) => moves
                .into_iter()
                .filter(|mv| region.contains(state.board(), mv))
                .collect(),
        }
    }

    /// Play `mv` on a copy of `state` (and `region`)
    fn simulate(
        &self,
        state: &GameState,
        region: Option<&Region>,
        mv: Move,
    ) -> Result<(GameState, Option<Region>), SearchAbort> {
        let mut child = state.clone();
        child.play(mv)?;
        let child_region = region.map(|region| region.after(&child, &mv));
        Ok((child, child_region))
    }

    fn rank_moves(
        &mut self,
        state: &GameState,
        player: PlayerId,
        candidates: &[Move],
        ranked: &mut Vec<(Move, i32)>,
    ) -> Result<(), SearchAbort> {
        self.nodes += 1;
        for &mv in candidates {
            self.deadline.check()?;
            let (child, _) = self.simulate(state, None, mv)?;
            self.nodes += 1;
            if child.phase() == GamePhase::Build {
                self.horizon_reached = true;
            }
            ranked.push((mv, self.evaluator.evaluate(&child, player)));
        }
        Ok(())
    }

    /// One full-width round at the root. Moves are tried in `ranked` order.
    fn search_root(
        &mut self,
        state: &GameState,
        player: PlayerId,
        region: Option<&Region>,
        depth: u32,
        ranked: &[(Move, i32)],
    ) -> Result<Option<(Move, i32)>, SearchAbort> {
        self.nodes += 1;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;
        let mut best: Option<(Move, i32)> = None;

        for &(mv, _) in ranked {
            self.deadline.check()?;
            let (child, child_region) = self.simulate(state, region, mv)?;
            let score = self.alpha_beta(&child, child_region.as_ref(), depth - 1, 1, alpha, beta, player)?;
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        Ok(best)
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        state: &GameState,
        region: Option<&Region>,
        depth: u32,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
        player: PlayerId,
    ) -> Result<i32, SearchAbort> {
        self.deadline.check()?;
        self.nodes += 1;

        if state.phase() != GamePhase::Build {
            return Ok(self.evaluator.evaluate(state, player));
        }
        if depth == 0 {
            self.horizon_reached = true;
            return Ok(self.evaluator.evaluate(state, player));
        }

        // Players without a move here pass; a full round of passes is a leaf
        let mut current = Cow::Borrowed(state);
        let mut passes = 0;
        let (mover, mut moves) = loop {
            let Some(mover) = current.current_player() else {
                return Ok(self.evaluator.evaluate(&current, player));
            };
            let moves = self.candidate_moves(&current, mover, region);
            if !moves.is_empty() {
                break (mover, moves);
            }
            passes += 1;
            if passes >= current.player_count() {
                return Ok(self.evaluator.evaluate(&current, player));
            }
            current.to_mut().pass_turn();
        };

        let maximizing = mover == player;
        self.order_moves(&mut moves, ply, maximizing);

        let mut value = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_reply = None;
        for mv in moves {
            self.deadline.check()?;
            let (child, child_region) = self.simulate(&current, region, mv)?;
            let score = self.alpha_beta(&child, child_region.as_ref(), depth - 1, ply + 1, alpha, beta, player)?;

            if maximizing {
                if score > value {
                    value = score;
                    best_reply = Some(mv);
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    best_reply = Some(mv);
                }
                beta = beta.min(value);
            }

            if alpha >= beta {
                if self.config.use_killer_moves {
                    self.killers.record(ply, mv);
                }
                trace!("cutoff by {mv} at ply {ply}");
                break;
            }
        }

        if !maximizing && self.config.use_phi {
            if let Some(reply) = best_reply {
                if self.phi.len() <= ply {
                    self.phi.resize(ply + 1, None);
                }
                self.phi[ply] = Some(reply);
            }
        }
        Ok(value)
    }

    /// Killer count first, ties broken by the static weight of the target
    /// tile; the phi move leads on minimizing nodes.
    fn order_moves(&self, moves: &mut [Move], ply: usize, maximizing: bool) {
        if self.config.use_killer_moves {
            moves.sort_by_cached_key(|mv| {
                Reverse((
                    self.killers.count(ply, mv),
                    self.evaluator.tile_weight(mv.coordinates),
                ))
            });
        } else {
            moves.sort_by_cached_key(|mv| Reverse(self.evaluator.tile_weight(mv.coordinates)));
        }

        if !maximizing && self.config.use_phi {
            if let Some(phi) = self.phi.get(ply).copied().flatten() {
                if let Some(index) = moves.iter().position(|&mv| mv == phi) {
                    moves[..=index].rotate_right(1);
                }
            }
        }
    }
}
