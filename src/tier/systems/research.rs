//! Technology research accumulation

use crate::core::config::config;

/// Research points generated in one tick.
///
/// Scales with log10 of population so the rate is scale-free across tiers,
/// with a mild bonus from existing tech (knowledge compounds).
pub fn research_rate(population: f64, tech_level: u32) -> f64 {
    if population < 1.0 {
        return 0.0;
    }
    let decades = population.log10();
    decades * (1.0 + tech_level as f64 * 0.25) * config().research_pop_rate
}

/// Research required to advance from `level` to `level + 1`.
pub fn research_threshold(level: u32) -> f64 {
    let cfg = config();
    cfg.research_threshold_base * cfg.research_threshold_growth.powi(level as i32)
}
