//! Per-player resources

use crate::board::PlayerId;
use crate::error::{GameError, Result};

/// A participant with its remaining special stones.
///
/// Counters never go below zero: taking a stone that is not there is a
/// contract violation and reported as an error instead of being clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    overwrite_stones: u32,
    bombs: u32,
    disqualified: bool,
}

impl Player {
    pub fn new(id: PlayerId, overwrite_stones: u32, bombs: u32) -> Self {
        Self {
            id,
            overwrite_stones,
            bombs,
            disqualified: false,
        }
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn overwrite_stones(&self) -> u32 {
        self.overwrite_stones
    }

    #[inline]
    pub fn bombs(&self) -> u32 {
        self.bombs
    }

    #[inline]
    pub fn is_disqualified(&self) -> bool {
        self.disqualified
    }

    pub(crate) fn disqualify(&mut self) {
        self.disqualified = true;
    }

    pub(crate) fn add_overwrite_stone(&mut self) {
        self.overwrite_stones += 1;
    }

    pub(crate) fn add_bomb(&mut self) {
        self.bombs += 1;
    }

    pub(crate) fn take_overwrite_stone(&mut self) -> Result<()> {
        self.overwrite_stones = self
            .overwrite_stones
            .checked_sub(1)
            .ok_or(GameError::OverwriteStoneUnderflow { player: self.id })?;
        Ok(())
    }

    pub(crate) fn take_bomb(&mut self) -> Result<()> {
        self.bombs = self
            .bombs
            .checked_sub(1)
            .ok_or(GameError::BombUnderflow { player: self.id })?;
        Ok(())
    }
}
