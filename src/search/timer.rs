//! Wall-clock deadline and search time estimation
//!
//! A [`Deadline`] is created once per move request and checked at every node.
//! Between iterative-deepening rounds the next round's cost is predicted from
//! the effective branching factor of the round just finished.

use std::time::{Duration, Instant};

use crate::error::SearchAbort;

/// Point in time after which a search must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    start: Instant,
    end: Option<Instant>,
}

impl Deadline {
    /// Deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        let start = Instant::now();
        Self {
            start,
            end: start.checked_add(budget),
        }
    }

    /// Deadline that never expires
    pub fn unlimited() -> Self {
        Self {
            start: Instant::now(),
            end: None,
        }
    }

    /// Same start, but `margin` earlier
    #[must_use]
    pub fn shortened(self, margin: Duration) -> Self {
        Self {
            start: self.start,
            end: self.end.map(|end| end.checked_sub(margin).unwrap_or(self.start)),
        }
    }

    /// A deadline starting now with `1 / parts` of the remaining time
    #[must_use]
    pub fn share(&self, parts: u32) -> Self {
        let start = Instant::now();
        match self.end {
            None => Self { start, end: None },
            Some(_) => Self {
                start,
                end: start.checked_add(self.remaining() / parts.max(1)),
            },
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left before expiry (`Duration::MAX` when unlimited)
    #[inline]
    pub fn remaining(&self) -> Duration {
        match self.end {
            None => Duration::MAX,
            Some(end) => end.saturating_duration_since(Instant::now()),
        }
    }

    #[inline]
    pub fn is_unlimited(&self) -> bool {
        self.end.is_none()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.end.is_some_and(|end| Instant::now() >= end)
    }

    /// Fail with [`SearchAbort::OutOfTime`] once expired.
    #[inline]
    pub fn check(&self) -> Result<(), SearchAbort> {
        if self.is_expired() {
            Err(SearchAbort::OutOfTime)
        } else {
            Ok(())
        }
    }
}

/// Effective branching factor of a uniform tree of depth `depth` with
/// `nodes` nodes in total.
///
/// Solves `t^(depth+1) - nodes * t + (nodes - 1) = 0` for the root `t > 1`
/// with Newton steps, falling back to bisection whenever a step would leave
/// the bracketing interval. Returns 1.0 for trees too small to branch.
pub fn branching_factor(nodes: u64, depth: u32) -> f64 {
    const TOLERANCE: f64 = 1e-9;
    const MAX_ITERATIONS: usize = 200;

    if depth == 0 || nodes <= u64::from(depth) + 1 {
        return 1.0;
    }
    let n = nodes as f64;
    let d = f64::from(depth);
    let f = |t: f64| t.powf(d + 1.0) - n * t + (n - 1.0);
    let df = |t: f64| (d + 1.0) * t.powf(d) - n;

    // f is negative at its minimum and positive at t = n
    let mut low = (n / (d + 1.0)).powf(1.0 / d);
    let mut high = n;
    if f(low) >= 0.0 {
        return low;
    }

    let mut t = (low + high) / 2.0;
    for _ in 0..MAX_ITERATIONS {
        let value = f(t);
        if value.abs() < TOLERANCE || high - low < TOLERANCE {
            break;
        }
        if value < 0.0 {
            low = t;
        } else {
            high = t;
        }
        let newton = t - value / df(t);
        t = if newton.is_finite() && newton > low && newton < high {
            newton
        } else {
            (low + high) / 2.0
        };
    }
    t
}

/// Predicted duration of a search to `depth` given the measured time per
/// node and branching factor of the previous round.
pub fn estimate_duration(branching: f64, depth: u32, per_node: Duration) -> Duration {
    let nodes = branching.powf(f64::from(depth));
    let secs = per_node.as_secs_f64() * nodes;
    if secs.is_finite() && secs < Duration::MAX.as_secs_f64() {
        Duration::from_secs_f64(secs)
    } else {
        Duration::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branching_factor_exact_trees() {
        // 1 + 3 + 9 + 27
        assert!((branching_factor(40, 3) - 3.0).abs() < 1e-6);
        // 1 + 2 + 4
        assert!((branching_factor(7, 2) - 2.0).abs() < 1e-6);
        // 1 + 10
        assert!((branching_factor(11, 1) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_branching_factor_degenerate() {
        assert_eq!(branching_factor(1, 0), 1.0);
        assert_eq!(branching_factor(4, 3), 1.0);
        assert_eq!(branching_factor(0, 5), 1.0);
    }

    #[test]
    fn test_branching_factor_large_tree() {
        let b = branching_factor(2_000_000, 6);
        assert!(b > 7.0 && b < 12.0, "unexpected branching factor {b}");
    }

    #[test]
    fn test_estimate_grows_with_depth() {
        let per_node = Duration::from_micros(10);
        let shallow = estimate_duration(4.0, 3, per_node);
        let deep = estimate_duration(4.0, 4, per_node);
        assert!(shallow > Duration::from_micros(639) && shallow < Duration::from_micros(641));
        assert!(deep > shallow);
        assert_eq!(estimate_duration(f64::INFINITY, 2, per_node), Duration::MAX);
    }

    #[test]
    fn test_deadline_expiry() {
        let expired = Deadline::after(Duration::ZERO);
        assert!(expired.is_expired());
        assert_eq!(expired.check(), Err(SearchAbort::OutOfTime));

        let open = Deadline::unlimited();
        assert!(!open.is_expired());
        assert!(open.check().is_ok());
        assert_eq!(open.remaining(), Duration::MAX);
    }

    #[test]
    fn test_deadline_share_and_shorten() {
        let deadline = Deadline::after(Duration::from_secs(60));
        let part = deadline.share(4);
        assert!(part.remaining() <= Duration::from_secs(15));
        assert!(part.remaining() > Duration::from_secs(14));

        let shortened = deadline.shortened(Duration::from_secs(120));
        assert!(shortened.is_expired());
        assert!(Deadline::unlimited().share(3).is_unlimited());
    }
}
