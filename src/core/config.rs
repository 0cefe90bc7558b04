//! Engine configuration with documented constants
//!
//! All tuning numbers are collected here with explanations of their purpose
//! and how they interact with each other. These are closed-form equation
//! coefficients, not per-entity state; nothing in here is random.

/// Configuration for the tier update engines
///
/// These values have been tuned so that a default planet fills its carrying
/// capacity over a few hundred ticks while a default galaxy stays broadly
/// stable over tens of ticks. Changing them shifts pacing, not correctness:
/// the invariants in `tier::stats` hold for any valid configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // === POPULATION ===
    /// Maximum fractional population growth per tick at planet tier
    ///
    /// Logistic growth: effective growth tapers to zero as population
    /// approaches carrying capacity. At 0.04, an empty planet doubles
    /// roughly every 18 ticks.
    pub planet_base_growth: f64,

    /// Maximum fractional growth per tick at system tier
    pub system_base_growth: f64,

    /// Maximum fractional growth per tick at sector tier
    pub sector_base_growth: f64,

    /// Maximum fractional growth per tick at galaxy tier
    pub galaxy_base_growth: f64,

    /// Baseline carrying capacity per tier, before tech scaling
    ///
    /// A fully habitable tech-0 planet supports ~1.2e10 people; each tier
    /// above multiplies the notional volume by several orders of magnitude.
    pub planet_capacity_base: f64,
    pub system_capacity_base: f64,
    pub sector_capacity_base: f64,
    pub galaxy_capacity_base: f64,

    /// Carrying-capacity multiplier per tech level
    ///
    /// capacity = base * habitability * (1 + level * factor).
    /// At 0.35, ten tech levels roughly quadruple what a tier can hold.
    pub capacity_tech_factor: f64,

    // === TECHNOLOGY ===
    /// Research points per tick per decade-of-population
    ///
    /// Research scales with log10(population) so the rate is scale-free
    /// across tiers: a galaxy does not out-research a planet by six
    /// orders of magnitude just by being bigger.
    pub research_pop_rate: f64,

    /// Research required to go from level 0 to level 1
    pub research_threshold_base: f64,

    /// Per-level multiplier on the research threshold
    ///
    /// threshold(n) = base * growth^n. At 1.6, each level costs 60% more
    /// than the previous, so tech gains decelerate without ever stopping.
    pub research_threshold_growth: f64,

    // === STABILITY ===
    /// Stability lost per unit of relative population growth
    ///
    /// Relative growth is growth/population, at most the tier base rate.
    /// At 45.0 a planet growing flat-out loses ~1.8 stability per tick,
    /// against the passive recovery below.
    pub growth_stability_pressure: f64,

    /// Passive stability recovery per tick
    pub stability_recovery: f64,

    /// Stability lost when a tech level is gained
    ///
    /// Disruptive transitions: each breakthrough shocks institutions
    /// before the recovery term absorbs it.
    pub tech_surge_penalty: f64,

    // === EVENTS ===
    /// Scale factor from summed event weights to per-tick fire probability
    ///
    /// P(any table event this tick) = min(total_weight * base, 0.9).
    pub event_base_chance: f64,

    /// Per-tick fragmentation probability when stability is critical (< 30)
    pub fragmentation_chance: f64,

    /// Per-tick probability that an ongoing war concludes
    pub war_decay_chance: f64,

    /// Per-tick probability that a new civilization emerges when the host
    /// tier is stable and below its civilization cap
    pub emergence_chance: f64,

    // === LIFECYCLE ===
    /// Normalized stability above which an entity counts as thriving
    ///
    /// Drives Emerging -> Stable and (when sustained below) Stable ->
    /// Declining transitions.
    pub stable_threshold: f64,

    /// Normalized stability floor below which a Declining entity dies
    pub extinct_floor: f64,

    /// Consecutive ticks a condition must hold before a lifecycle
    /// transition fires
    ///
    /// Tracked per entity; a single bad tick is weather, three is climate.
    pub sustain_ticks: u32,

    // === LIST CAPS ===
    /// Maximum political entities a sector tracks explicitly
    ///
    /// Keeps per-tick cost bounded: the aggregation contract only allows
    /// iteration over lists whose length the engine itself caps.
    pub max_political_entities: usize,

    /// Maximum civilizations a galaxy tracks explicitly
    pub max_galactic_civilizations: usize,

    // === PARALLELIZATION ===
    /// Minimum batch size before simulating entities on the rayon pool
    ///
    /// Below this threshold, thread overhead exceeds benefits.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Population (growth slows as tiers widen - bigger aggregates
            // average over more dead worlds)
            planet_base_growth: 0.04,
            system_base_growth: 0.03,
            sector_base_growth: 0.025,
            galaxy_base_growth: 0.02,
            planet_capacity_base: 1.2e10,
            system_capacity_base: 8.0e11,
            sector_capacity_base: 5.0e14,
            galaxy_capacity_base: 2.0e17,
            capacity_tech_factor: 0.35,

            // Technology
            research_pop_rate: 6.0,
            research_threshold_base: 1000.0,
            research_threshold_growth: 1.6,

            // Stability
            growth_stability_pressure: 45.0,
            stability_recovery: 0.6,
            tech_surge_penalty: 4.0,

            // Events
            event_base_chance: 0.18,
            fragmentation_chance: 0.15,
            war_decay_chance: 0.25,
            emergence_chance: 0.08,

            // Lifecycle
            stable_threshold: 0.6,
            extinct_floor: 0.2,
            sustain_ticks: 3,

            // List caps
            max_political_entities: 24,
            max_galactic_civilizations: 64,

            // Parallelization
            parallel_threshold: 8,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.extinct_floor >= self.stable_threshold {
            return Err(format!(
                "extinct_floor ({}) should be < stable_threshold ({})",
                self.extinct_floor, self.stable_threshold
            ));
        }

        if self.sustain_ticks == 0 {
            return Err("sustain_ticks must be at least 1".into());
        }

        let growths = [
            self.planet_base_growth,
            self.system_base_growth,
            self.sector_base_growth,
            self.galaxy_base_growth,
        ];
        if growths.iter().any(|g| *g <= 0.0 || *g >= 1.0) {
            return Err("base growth rates must be in (0, 1)".into());
        }

        if self.research_threshold_growth < 1.0 {
            return Err(format!(
                "research_threshold_growth ({}) should be >= 1.0 or tech runs away",
                self.research_threshold_growth
            ));
        }

        if !(0.0..=1.0).contains(&self.event_base_chance) {
            return Err("event_base_chance must be in [0, 1]".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> Result<(), EngineConfig> {
    CONFIG.set(config)
}
