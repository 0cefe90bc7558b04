//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};

/// Simulation step counter. One tick spans a tier-dependent stretch of
/// in-universe time (see [`TierKind::tick_years`]).
pub type Tick = u64;

/// The four aggregation tiers, smallest scope first.
///
/// Each tier summarizes the one below it statistically; a `Galaxy` never
/// holds `Sector` values, only scalar aggregates of whatever sectors it
/// notionally contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TierKind {
    Planet,
    System,
    Sector,
    Galaxy,
}

impl TierKind {
    /// In-universe years covered by one tick at this tier.
    pub fn tick_years(self) -> u64 {
        match self {
            TierKind::Planet => 10,
            TierKind::System => 100,
            TierKind::Sector => 1_000,
            TierKind::Galaxy => 10_000,
        }
    }

    /// Minimum tech level a tier can be constructed with. A sector-scale
    /// polity below interstellar tech is not a sector, it is scenery.
    pub fn min_tech_level(self) -> u32 {
        match self {
            TierKind::Planet => 0,
            TierKind::System => 5,
            TierKind::Sector => 7,
            TierKind::Galaxy => 8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TierKind::Planet => "planet",
            TierKind::System => "system",
            TierKind::Sector => "sector",
            TierKind::Galaxy => "galaxy",
        }
    }
}
