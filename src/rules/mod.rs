//! Game rules for ReversiXT
//!
//! This module implements the rule set:
//! - Legal move generation by ray casting (`calculator`)
//! - Move execution with captures, special tiles and bombs (`executor`)
//! - Partitioning of the board into independent communities (`community`)

pub mod calculator;
pub mod community;
pub mod executor;

// Re-exports for convenient access
pub use calculator::{has_legal_move, legal_moves};
pub use community::{Communities, CommunityId};
pub use executor::{blast_area, capture_set, execute, invert_stones, swap_stones};
