//! Logistic population growth bounded by tech-scaled carrying capacity

use crate::core::config::config;

/// Carrying capacity for a tier: baseline volume scaled by habitability
/// and tech level.
pub fn carrying_capacity(base: f64, tech_level: u32, habitability: f64) -> f64 {
    let cfg = config();
    base * habitability.clamp(0.0, 1.0) * (1.0 + tech_level as f64 * cfg.capacity_tech_factor)
}

/// One logistic growth step. Returns the signed population delta.
///
/// Growth tapers to zero at capacity and turns negative above it. A zero
/// capacity (dead world) decays the population by 10% per tick instead of
/// dividing by zero.
pub fn logistic_delta(population: f64, capacity: f64, base_rate: f64, modifier: f64) -> f64 {
    if population <= 0.0 {
        return 0.0;
    }
    if capacity <= 0.0 {
        return -population * 0.1;
    }

    let density = population / capacity;
    let room = 1.0 - density;
    population * base_rate * room * modifier.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::config;

    #[test]
    fn test_capacity_scales_with_tech() {
        let low = carrying_capacity(1e10, 0, 1.0);
        let high = carrying_capacity(1e10, 10, 1.0);
        assert!(high > low);
        assert_eq!(low, 1e10);
    }

    #[test]
    fn test_growth_positive_below_capacity() {
        let cfg = config();
        let delta = logistic_delta(1e9, 1e10, cfg.planet_base_growth, 1.0);
        assert!(delta > 0.0);
    }

    #[test]
    fn test_growth_never_overshoots_capacity() {
        // For base rates < 1 the logistic map is monotone on [0, K],
        // so one step from anywhere below capacity stays below it.
        let cfg = config();
        let capacity = 1e10;
        for pop in [1e3, 1e8, 0.5e10, 0.99e10] {
            let delta = logistic_delta(pop, capacity, cfg.planet_base_growth, 1.0);
            assert!(pop + delta <= capacity, "overshoot from {pop}");
        }
    }

    #[test]
    fn test_overcrowded_population_contracts() {
        let delta = logistic_delta(2e10, 1e10, 0.04, 1.0);
        assert!(delta < 0.0);
    }

    #[test]
    fn test_dead_world_decays() {
        let delta = logistic_delta(1e6, 0.0, 0.04, 1.0);
        assert!(delta < 0.0);
    }

    #[test]
    fn test_zero_population_stays_zero() {
        assert_eq!(logistic_delta(0.0, 1e10, 0.04, 1.0), 0.0);
    }
}
