//! Evaluation module for ReversiXT positions
//!
//! Contains:
//! - Static tile weights derived from the map's dead ends
//! - Phase-dependent weighting of position, mobility and tile count
//! - Resource bonuses for overwrite stones and bombs

pub mod heuristic;
pub mod weights;

pub use heuristic::{evaluate, static_weight, Evaluator};
pub use weights::{mobility_score, phase_factors, PhaseFactors};
