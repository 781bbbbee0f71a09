//! Search module for the ReversiXT AI
//!
//! Contains:
//! - Paranoid alpha-beta search with iterative deepening
//! - Killer table for cutoff-based move ordering
//! - Deadline handling and time estimation
//! - Community regions for split searches

pub mod alphabeta;
pub mod killer;
pub mod region;
pub mod timer;

pub use alphabeta::{SearchResult, Searcher, StopReason};
pub use killer::KillerTable;
pub use region::Region;
pub use timer::{branching_factor, estimate_duration, Deadline};
