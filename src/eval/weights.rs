//! Scoring weights for ReversiXT evaluation
//!
//! The weighting of the evaluation terms shifts over the course of a game:
//! early on, strong positions and mobility matter most; as the board fills
//! up, raw tile count takes over.

/// Value of one overwrite stone in hand
pub const OVERWRITE_STONE_VALUE: f64 = 50.0;
/// Value of one bomb in hand
pub const BOMB_VALUE: f64 = 10.0;

/// Multipliers applied to the three board-dependent terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseFactors {
    /// Sum of static tile weights of owned tiles
    pub position: f64,
    /// Mobility term
    pub mobility: f64,
    /// Number of owned tiles
    pub tiles: f64,
}

/// Factors by occupancy threshold (percentage of reachable tiles occupied).
/// The last entry whose threshold is reached applies.
pub const PHASE_TABLE: [(f64, PhaseFactors); 4] = [
    (
        0.0,
        PhaseFactors {
            position: 3.0,
            mobility: 2.0,
            tiles: 0.5,
        },
    ),
    (
        70.0,
        PhaseFactors {
            position: 2.0,
            mobility: 1.5,
            tiles: 1.0,
        },
    ),
    (
        82.0,
        PhaseFactors {
            position: 1.0,
            mobility: 1.0,
            tiles: 2.0,
        },
    ),
    (
        95.0,
        PhaseFactors {
            position: 0.25,
            mobility: 0.5,
            tiles: 4.0,
        },
    ),
];

/// Factors for a board that is `occupancy` percent full
pub fn phase_factors(occupancy: f64) -> PhaseFactors {
    PHASE_TABLE
        .iter()
        .rev()
        .find(|(threshold, _)| occupancy >= *threshold)
        .map_or(PHASE_TABLE[0].1, |&(_, factors)| factors)
}

/// Mobility term: `2 * log_1.5(moves + 0.5) + 0.25 * moves - 3`
///
/// Grows quickly for the first few moves and flattens afterwards; having no
/// move at all is clearly negative.
pub fn mobility_score(moves: usize) -> f64 {
    let moves = moves as f64;
    2.0 * (moves + 0.5).ln() / 1.5f64.ln() + 0.25 * moves - 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_thresholds() {
        assert_eq!(phase_factors(0.0), PHASE_TABLE[0].1);
        assert_eq!(phase_factors(69.9), PHASE_TABLE[0].1);
        assert_eq!(phase_factors(70.0), PHASE_TABLE[1].1);
        assert_eq!(phase_factors(90.0), PHASE_TABLE[2].1);
        assert_eq!(phase_factors(100.0), PHASE_TABLE[3].1);
    }

    #[test]
    fn test_tile_count_gains_weight_late() {
        assert!(phase_factors(99.0).tiles > phase_factors(10.0).tiles);
        assert!(phase_factors(99.0).position < phase_factors(10.0).position);
    }

    #[test]
    fn test_mobility_monotonic() {
        assert!(mobility_score(0) < -6.0);
        let mut previous = mobility_score(0);
        for moves in 1..50 {
            let score = mobility_score(moves);
            assert!(score > previous);
            previous = score;
        }
    }
}
