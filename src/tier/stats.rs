//! Shared stat groups common to every tier
//!
//! The clamping rules here are the engine's runtime invariants: population
//! never goes negative, stability stays inside [0, 100], and tech levels
//! never decrease.

use serde::{Deserialize, Serialize};

use crate::tier::systems::research::research_threshold;

/// Aggregate population for a tier
///
/// `total` is a scalar summary of however many individuals the tier
/// notionally contains; nothing in the engine ever enumerates them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub total: f64,
    /// Signed delta applied on the most recent tick
    pub growth: f64,
}

impl Population {
    pub fn new(total: f64) -> Self {
        Self {
            total: total.max(0.0),
            growth: 0.0,
        }
    }

    /// Apply one tick of growth, clamping at zero.
    ///
    /// Fewer than one individual left counts as extinct, so asymptotic
    /// decay still terminates. Returns true when the clamp fired on a
    /// living population, however small, i.e. the tier just crashed.
    /// Callers record the collapse event; the clamp itself never errors.
    pub fn apply_growth(&mut self, delta: f64) -> bool {
        self.growth = delta;
        let next = self.total + delta;
        if next < 1.0 {
            let crashed = self.total > 0.0;
            self.total = 0.0;
            crashed
        } else {
            self.total = next;
            false
        }
    }

    /// Multiply the population by `factor`, for event losses.
    ///
    /// Shares the clamp and crash reporting with [`Population::apply_growth`],
    /// so a loss that leaves less than one individual is a crash, never a
    /// silent sub-unit remnant.
    pub fn scale(&mut self, factor: f64) -> bool {
        let delta = self.total * (factor - 1.0);
        self.apply_growth(delta)
    }

    pub fn is_extinct(&self) -> bool {
        self.total <= 0.0
    }
}

/// Technology state: a discrete level plus a research accumulator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tech {
    pub level: u32,
    pub research: f64,
}

impl Tech {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            research: 0.0,
        }
    }

    /// Accumulate research, consuming whole level thresholds.
    ///
    /// Remaining research carries forward across the boundary, so no
    /// progress is lost when a level completes mid-tick. Returns the
    /// number of levels gained (usually 0 or 1).
    pub fn accumulate(&mut self, amount: f64) -> u32 {
        self.research += amount.max(0.0);
        let mut gained = 0;
        loop {
            let needed = research_threshold(self.level);
            if self.research < needed {
                break;
            }
            self.research -= needed;
            self.level += 1;
            gained += 1;
        }
        gained
    }

}

/// Cohesion of the tier's notional society, 0 (anarchy) to 100 (monolith)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stability {
    pub overall: f64,
}

impl Stability {
    pub fn new(overall: f64) -> Self {
        Self {
            overall: overall.clamp(0.0, 100.0),
        }
    }

    /// Shift stability by a signed delta, clamped to [0, 100].
    pub fn shift(&mut self, delta: f64) {
        self.overall = (self.overall + delta).clamp(0.0, 100.0);
    }

    /// Stability on a 0..1 scale, for use as a multiplier.
    pub fn fraction(&self) -> f64 {
        self.overall / 100.0
    }

    /// Below this point fragmentation and war weights dominate.
    pub fn is_critical(&self) -> bool {
        self.overall < 30.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_clamps_at_zero() {
        let mut pop = Population::new(100.0);
        let crashed = pop.apply_growth(-500.0);
        assert!(crashed);
        assert_eq!(pop.total, 0.0);
        assert!(pop.is_extinct());
    }

    #[test]
    fn test_crash_reported_once() {
        let mut pop = Population::new(100.0);
        assert!(pop.apply_growth(-500.0));
        // Already dead: clamping again is not a new crash
        assert!(!pop.apply_growth(-1.0));
    }

    #[test]
    fn test_sub_unit_population_crash_still_reported() {
        // A living remnant below one individual is still a crash when it
        // clamps, not a silent disappearance
        let mut pop = Population::new(0.5);
        assert!(pop.apply_growth(0.01));
        assert_eq!(pop.total, 0.0);
    }

    #[test]
    fn test_scale_reports_crash_when_dropping_below_one() {
        let mut pop = Population::new(1.5);
        assert!(pop.scale(0.5));
        assert_eq!(pop.total, 0.0);

        let mut healthy = Population::new(1.0e9);
        assert!(!healthy.scale(0.99));
        assert!((healthy.total - 0.99e9).abs() < 1.0);
    }

    #[test]
    fn test_research_carries_remainder_across_level() {
        let mut tech = Tech::new(0);
        let threshold = research_threshold(0);
        let gained = tech.accumulate(threshold + 42.0);
        assert_eq!(gained, 1);
        assert_eq!(tech.level, 1);
        assert!((tech.research - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_deposit_can_gain_multiple_levels() {
        let mut tech = Tech::new(0);
        let deposit = research_threshold(0) + research_threshold(1) + 1.0;
        assert_eq!(tech.accumulate(deposit), 2);
        assert_eq!(tech.level, 2);
    }

    #[test]
    fn test_stability_clamped_to_bounds() {
        let mut s = Stability::new(50.0);
        s.shift(1000.0);
        assert_eq!(s.overall, 100.0);
        s.shift(-1000.0);
        assert_eq!(s.overall, 0.0);

        assert_eq!(Stability::new(-20.0).overall, 0.0);
        assert_eq!(Stability::new(150.0).overall, 100.0);
    }
}
