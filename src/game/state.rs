//! Game state and the phase machine

use std::collections::BTreeSet;

use log::debug;

use crate::board::{Board, PlayerId};
use crate::error::{GameError, Result};
use crate::rules;

use super::{Move, Player};

/// Game phases, only ever advancing `Build -> Bomb -> End`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GamePhase {
    /// Placing stones
    Build,
    /// Only bomb moves are played
    Bomb,
    /// Terminal, no moves accepted
    End,
}

impl GamePhase {
    #[inline]
    fn next(self) -> GamePhase {
        match self {
            GamePhase::Build => GamePhase::Bomb,
            GamePhase::Bomb | GamePhase::End => GamePhase::End,
        }
    }
}

/// Complete state of a game: board, players, whose turn it is and the phase.
///
/// `GameState` is the unit the search copies: `clone()` deep-copies the board
/// (including its transition table and coordinate index) and every player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: Vec<Player>,
    /// Player to move, `None` once the game is over
    current: Option<PlayerId>,
    phase: GamePhase,
    move_count: u32,
    bomb_radius: u32,
}

impl GameState {
    /// Start a game. The first player (in turn order) with a legal move begins.
    pub fn new(board: Board, players: Vec<Player>, bomb_radius: u32) -> Self {
        let mut state = Self {
            board,
            players,
            current: None,
            phase: GamePhase::Build,
            move_count: 0,
            bomb_radius,
        };
        state.select_player(0);
        state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .get_mut(id.index())
            .ok_or(GameError::UnknownPlayer { number: id.number() })
    }

    /// Ids of all players in turn order
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(Player::id)
    }

    /// Player to move, `None` when the game has ended
    #[inline]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn bomb_radius(&self) -> u32 {
        self.bomb_radius
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::End
    }

    /// Number of tiles owned by `player`
    #[inline]
    pub fn tile_count(&self, player: PlayerId) -> usize {
        self.board.stone_count(player)
    }

    /// All legal moves of `player` in the current phase
    pub fn legal_moves(&self, player: PlayerId) -> BTreeSet<Move> {
        rules::legal_moves(self, player)
    }

    /// Validate and play `mv`, then pass the turn on.
    ///
    /// Fails with [`GameError::InvalidMove`] when it is not `mv.player`'s turn
    /// or `mv` is not in the player's legal move set.
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        if self.phase == GamePhase::End {
            return Err(GameError::GameOver);
        }
        if self.current != Some(mv.player) {
            return Err(GameError::InvalidMove {
                mv,
                reason: "not this player's turn",
            });
        }
        if !self.legal_moves(mv.player).contains(&mv) {
            return Err(GameError::InvalidMove {
                mv,
                reason: "not a legal move",
            });
        }
        self.play(mv)
    }

    /// Play a move known to be legal (as produced by `legal_moves`).
    pub(crate) fn play(&mut self, mv: Move) -> Result<()> {
        rules::execute(self, &mv)?;
        self.move_count += 1;
        self.select_player(mv.player.index() + 1);
        Ok(())
    }

    /// Remove `player` from the rotation. If it was its turn, the turn passes on.
    pub fn disqualify(&mut self, player: PlayerId) -> Result<()> {
        self.player_mut(player)?.disqualify();
        debug!("player {player} disqualified");
        if self.current == Some(player) {
            self.select_player(player.index() + 1);
        }
        Ok(())
    }

    /// Hand the turn to the next active player without playing a move.
    ///
    /// Used by region-restricted search when the mover has nothing to do
    /// inside the region. Never changes the phase.
    pub(crate) fn pass_turn(&mut self) {
        let Some(current) = self.current else {
            return;
        };
        let n = self.players.len();
        for offset in 1..=n {
            let candidate = &self.players[(current.index() + offset) % n];
            if !candidate.is_disqualified() {
                self.current = Some(candidate.id());
                return;
            }
        }
    }

    /// Find the next player, starting at index `start`, who is active and has
    /// a legal move. A full round without one advances the phase.
    fn select_player(&mut self, start: usize) {
        let n = self.players.len();
        while self.phase != GamePhase::End {
            for offset in 0..n {
                let player = &self.players[(start + offset) % n];
                if player.is_disqualified() {
                    continue;
                }
                let id = player.id();
                if rules::has_legal_move(self, id) {
                    self.current = Some(id);
                    return;
                }
            }
            self.phase = self.phase.next();
            debug!("no player can move, entering {:?} phase", self.phase);
        }
        self.current = None;
    }

    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        if phase == GamePhase::End {
            self.current = None;
        }
    }
}
