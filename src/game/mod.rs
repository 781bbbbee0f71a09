//! Game state: players, phases and moves

pub mod moves;
pub mod player;
pub mod state;

pub use moves::{BonusChoice, Move, MoveKind, WireMove, WIRE_BONUS_BOMB, WIRE_BONUS_OVERWRITE};
pub use player::Player;
pub use state::{GamePhase, GameState};
