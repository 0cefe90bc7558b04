//! System tier - a star system aggregating its notional planets

use serde::{Deserialize, Serialize};

use crate::core::config::config;
use crate::core::error::Result;
use crate::core::types::{Tick, TierKind};
use crate::tier::events::EventLog;
use crate::tier::stats::{Population, Stability, Tech};
use crate::tier::systems::carrying_capacity;
use crate::tier::validate;

/// Main-sequence spectral class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl StarClass {
    /// Rough habitability weighting: G/K dwarfs are friendly, O/B giants
    /// flood their systems with radiation and die young.
    pub fn habitability_factor(self) -> f64 {
        match self {
            StarClass::O => 0.05,
            StarClass::B => 0.1,
            StarClass::A => 0.3,
            StarClass::F => 0.7,
            StarClass::G => 1.0,
            StarClass::K => 0.9,
            StarClass::M => 0.5,
        }
    }

    /// Flare and radiation volatility, feeds the SolarFlare event weight.
    pub fn volatility(self) -> f64 {
        match self {
            StarClass::O | StarClass::B => 0.8,
            StarClass::A => 0.4,
            StarClass::F | StarClass::G => 0.15,
            StarClass::K => 0.2,
            StarClass::M => 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub class: StarClass,
    pub subtype: String,
}

/// Habitable zone bounds in AU, fixed at construction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HabitableZone {
    pub inner_au: f64,
    pub outer_au: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsteroidBelt {
    pub radius_au: f64,
    /// Relative rock density, feeds early orbital industry
    pub density: f64,
}

/// Derived system-level statistics, recomputed every tick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub spacefaring_civs: u32,
    pub ftl_capable: bool,
    pub economic_output: f64,
    pub defense_power: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitalStructureKind {
    Shipyard,
    HabitatRing,
    ResearchStation,
    DefensePlatform,
    StellarCollector,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalStructure {
    pub kind: OrbitalStructureKind,
    pub name: String,
    pub tick_built: Tick,
}

/// A star system: population and tech summarize all its notional planets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: String,
    pub name: String,

    pub population: Population,
    pub tech: Tech,
    pub stability: Stability,

    pub star: Star,
    pub habitable_zone: HabitableZone,
    pub asteroid_belts: Vec<AsteroidBelt>,

    pub stats: SystemStats,
    /// Append-only record of completed orbital infrastructure
    pub orbital_infrastructure: Vec<OrbitalStructure>,

    pub ticks_elapsed: Tick,
    pub events: EventLog,
}

/// Partial construction overrides for a star system
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SystemOverrides {
    pub population: Option<f64>,
    pub tech_level: Option<u32>,
    pub stability: Option<f64>,
    pub star_class: Option<StarClass>,
    pub star_subtype: Option<String>,
    pub habitable_zone: Option<(f64, f64)>,
    pub asteroid_belts: Option<Vec<AsteroidBelt>>,
}

impl StarSystem {
    pub fn new(id: &str, name: &str, overrides: Option<SystemOverrides>) -> Result<Self> {
        validate::identity(id, name)?;
        let ov = overrides.unwrap_or_default();

        let population = validate::non_negative("population", ov.population.unwrap_or(4.0e10))?;
        let tech_level = validate::tech_floor(TierKind::System, ov.tech_level.unwrap_or(5))?;
        let stability = validate::in_range("stability", ov.stability.unwrap_or(65.0), 0.0, 100.0)?;

        let (inner_au, outer_au) = ov.habitable_zone.unwrap_or((0.9, 1.6));
        validate::non_negative("habitable_zone", inner_au)?;
        if outer_au <= inner_au {
            return Err(crate::core::error::SimError::validation(
                "habitable_zone",
                format!("outer edge {outer_au} must exceed inner edge {inner_au}"),
            ));
        }

        let asteroid_belts = ov.asteroid_belts.unwrap_or_else(|| {
            vec![AsteroidBelt {
                radius_au: 2.8,
                density: 0.4,
            }]
        });
        for belt in &asteroid_belts {
            validate::non_negative("asteroid_belts", belt.radius_au)?;
            validate::in_range("asteroid_belts", belt.density, 0.0, 1.0)?;
        }

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            population: Population::new(population),
            tech: Tech::new(tech_level),
            stability: Stability::new(stability),
            star: Star {
                class: ov.star_class.unwrap_or(StarClass::G),
                subtype: ov.star_subtype.unwrap_or_else(|| "G2V".to_string()),
            },
            habitable_zone: HabitableZone { inner_au, outer_au },
            asteroid_belts,
            stats: SystemStats {
                spacefaring_civs: 1,
                ftl_capable: false,
                economic_output: 0.0,
                defense_power: 0.0,
            },
            orbital_infrastructure: Vec::new(),
            ticks_elapsed: 0,
            events: EventLog::new(),
        })
    }

    /// Habitable volume on a 0..1 scale: zone width tempered by the
    /// star's spectral class.
    pub fn habitability(&self) -> f64 {
        let width = (self.habitable_zone.outer_au - self.habitable_zone.inner_au).min(3.0) / 3.0;
        (0.4 + 0.6 * width) * self.star.class.habitability_factor()
    }

    pub fn carrying_capacity(&self) -> f64 {
        carrying_capacity(
            config().system_capacity_base,
            self.tech.level,
            self.habitability(),
        )
    }
}
