//! Moves and their wire encoding

use crate::board::{Coordinates, PlayerId, Tile};
use crate::error::{GameError, Result};

use super::{GamePhase, GameState};

/// Wire value selecting a bomb as bonus
pub const WIRE_BONUS_BOMB: u8 = 20;
/// Wire value selecting an overwrite stone as bonus
pub const WIRE_BONUS_OVERWRITE: u8 = 21;

/// Reward picked when playing on a bonus tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BonusChoice {
    Bomb,
    OverwriteStone,
}

/// Variant-specific part of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveKind {
    /// Place on an empty tile
    Normal,
    /// Place on an occupied or expansion tile, spending an overwrite stone
    Overwrite,
    /// Place on a bonus tile and collect the chosen reward
    Bonus(BonusChoice),
    /// Place on a choice tile and swap all stones with the given player
    Choice(PlayerId),
    /// Place on an inversion tile; every player's stones pass to the next player
    Inversion,
    /// Blow up the area around the target (bomb phase only)
    Bomb,
}

/// A move of one player at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub player: PlayerId,
    pub coordinates: Coordinates,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub fn new(player: PlayerId, coordinates: Coordinates, kind: MoveKind) -> Self {
        Self {
            player,
            coordinates,
            kind,
        }
    }

    #[inline]
    pub fn is_bomb(&self) -> bool {
        self.kind == MoveKind::Bomb
    }

    /// Encode as the `(x, y, type)` triple of the wire protocol
    pub fn to_wire(&self) -> WireMove {
        let special = match self.kind {
            MoveKind::Bonus(BonusChoice::Bomb) => WIRE_BONUS_BOMB,
            MoveKind::Bonus(BonusChoice::OverwriteStone) => WIRE_BONUS_OVERWRITE,
            MoveKind::Choice(with) => with.number(),
            MoveKind::Normal | MoveKind::Overwrite | MoveKind::Inversion | MoveKind::Bomb => 0,
        };
        WireMove {
            // Boards are at most `MAX_DIMENSION` wide and high
            x: self.coordinates.x as i16,
            y: self.coordinates.y as i16,
            special,
        }
    }

    /// Decode a wire triple for `player` in the context of `state`.
    ///
    /// Type 0 is ambiguous on the wire; it is resolved from the phase and the
    /// tile currently at the target.
    pub fn from_wire(state: &GameState, player: PlayerId, wire: WireMove) -> Result<Move> {
        let coordinates = Coordinates::new(wire.x.into(), wire.y.into());
        let invalid = GameError::InvalidWireMove {
            x: wire.x,
            y: wire.y,
            special: wire.special,
        };
        let tile = state.board().tile(coordinates).ok_or_else(|| invalid.clone())?;

        let kind = match wire.special {
            0 if state.phase() == GamePhase::Bomb => MoveKind::Bomb,
            0 => match tile {
                Tile::Empty => MoveKind::Normal,
                Tile::Inversion => MoveKind::Inversion,
                Tile::Player(_) | Tile::Expansion => MoveKind::Overwrite,
                Tile::Wall | Tile::Choice | Tile::Bonus => return Err(invalid),
            },
            WIRE_BONUS_BOMB => MoveKind::Bonus(BonusChoice::Bomb),
            WIRE_BONUS_OVERWRITE => MoveKind::Bonus(BonusChoice::OverwriteStone),
            n => MoveKind::Choice(PlayerId::new(n).ok_or(invalid)?),
        };
        Ok(Move::new(player, coordinates, kind))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{} {} {:?}", self.player, self.coordinates, self.kind)
    }
}

/// Move as exchanged with the server: coordinates plus a special-field byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireMove {
    pub x: i16,
    pub y: i16,
    pub special: u8,
}
