//! Search configuration

use std::time::Duration;

/// Tunables for [`crate::AIEngine`] and [`crate::search::Searcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest iterative-deepening round (in plies)
    pub max_depth: u32,
    /// Subtracted from every deadline to leave room for answering
    pub time_buffer: Duration,
    /// Search each community separately when the board splits up
    pub use_communities: bool,
    /// Order moves by how often they caused cutoffs at the same ply
    pub use_killer_moves: bool,
    /// Try the best known reply first on minimizing nodes
    pub use_phi: bool,
    /// Skip a deeper round when its predicted duration exceeds the time left
    pub use_time_estimate: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            time_buffer: Duration::from_millis(50),
            use_communities: true,
            use_killer_moves: true,
            use_phi: true,
            use_time_estimate: true,
        }
    }
}

impl SearchConfig {
    /// Config with all move ordering and pruning aids switched off
    pub fn plain(max_depth: u32) -> Self {
        Self {
            max_depth,
            time_buffer: Duration::ZERO,
            use_communities: false,
            use_killer_moves: false,
            use_phi: false,
            use_time_estimate: true,
        }
    }
}
