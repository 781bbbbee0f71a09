//! Error types for the ReversiXT engine

use thiserror::Error;

use crate::board::{Coordinates, PlayerId};
use crate::game::Move;

/// Errors raised while loading a map description.
///
/// All of them are fatal: a map that fails to load cannot be played.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("map ended early: missing {what}")]
    MissingField { what: &'static str },

    #[error("invalid {what} '{value}'")]
    InvalidNumber { what: &'static str, value: String },

    #[error("player count {count} is out of range (must be 1-8)")]
    InvalidPlayerCount { count: u32 },

    #[error("board dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("unknown tile code '{code}' at {position}")]
    UnknownTile { code: String, position: Coordinates },

    #[error("row {row} has {got} tiles, expected {expected}")]
    RowLength { row: i32, got: usize, expected: usize },

    #[error("transition on line {line} is malformed: {reason}")]
    MalformedTransition { line: usize, reason: String },
}

/// Contract violations raised by the game engine.
///
/// These are programming errors (a move outside the legal set, a resource
/// counter about to go negative). Callers treat them as fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("invalid move {mv:?}: {reason}")]
    InvalidMove { mv: Move, reason: &'static str },

    #[error("player {player} has no overwrite stone left")]
    OverwriteStoneUnderflow { player: PlayerId },

    #[error("player {player} has no bomb left")]
    BombUnderflow { player: PlayerId },

    #[error("unknown player {number}")]
    UnknownPlayer { number: u8 },

    #[error("invalid wire move ({x}, {y}, type {special})")]
    InvalidWireMove { x: i16, y: i16, special: u8 },

    #[error("the game is over")]
    GameOver,
}

/// Convenience type alias for Results using the engine's error type
pub type Result<T> = std::result::Result<T, GameError>;

/// Reasons a search stops before finishing its current depth.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchAbort {
    /// The deadline passed. Expected; the last completed depth is used.
    #[error("search ran out of time")]
    OutOfTime,

    #[error(transparent)]
    Game(#[from] GameError),
}
