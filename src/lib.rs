//! ReversiXT game engine and AI
//!
//! ReversiXT is a Reversi variant for up to eight players on arbitrary maps:
//! - Boards of any size with walls and holes
//! - Transitions stitching board edges together
//! - Special tiles: choice, inversion, bonus and expansion
//! - Overwrite stones for placing on occupied tiles
//! - A bomb phase after the build phase
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Tiles, coordinates, transitions and the ray-walking reader
//! - [`map`]: Map description loader
//! - [`game`]: Players, phases, moves and the game state
//! - [`rules`]: Move generation, move execution and community partitioning
//! - [`eval`]: Position evaluation
//! - [`search`]: Iterative-deepening paranoid alpha-beta search
//! - [`engine`]: Main AI engine integrating all components
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use reversi::map::parse_map;
//! use reversi::search::Deadline;
//! use reversi::AIEngine;
//!
//! let mut state = parse_map("2\n0\n0 0\n4 4\n0 0 0 0\n0 1 2 0\n0 2 1 0\n0 0 0 0\n").unwrap();
//! let mut engine = AIEngine::new(state.board());
//!
//! let player = state.current_player().unwrap();
//! let deadline = Deadline::after(Duration::from_millis(200));
//! if let Some(mv) = engine.get_move(&state, player, deadline).unwrap() {
//!     state.apply_move(mv).unwrap();
//!     println!("{mv}\n{}", state.board());
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod map;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Coordinates, Direction, PlayerId, Tile};
pub use config::SearchConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{GameError, MapError, SearchAbort};
pub use eval::{evaluate, Evaluator};
pub use game::{GamePhase, GameState, Move, MoveKind, WireMove};
pub use map::{load_map, parse_map};
pub use rules::legal_moves;
