//! Planet tier - a single world aggregating nations and cities

use serde::{Deserialize, Serialize};

use crate::core::config::config;
use crate::core::error::Result;
use crate::core::types::{Tick, TierKind};
use crate::tier::events::EventLog;
use crate::tier::stats::{Population, Stability, Tech};
use crate::tier::systems::carrying_capacity;
use crate::tier::validate;

/// Aggregate civilization statistics for a planet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CivilizationStats {
    /// Fraction of the population living in cities, 0..1
    pub urbanization: f64,
    /// Number of notional nation-states; grows through fragmentation,
    /// never shrinks
    pub nation_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MegastructureKind {
    SpaceElevator,
    OrbitalRing,
    ArcologyNetwork,
    PlanetaryShield,
    WeatherGrid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Megastructure {
    pub kind: MegastructureKind,
    pub name: String,
    pub tick_built: Tick,
}

/// A single world: the smallest aggregation tier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: String,
    pub name: String,

    pub population: Population,
    pub tech: Tech,
    pub stability: Stability,
    pub civilization: CivilizationStats,

    /// Append-only record of completed megastructures
    pub megastructures: Vec<Megastructure>,

    /// Intrinsic habitability 0..1, fixed at construction
    pub habitability: f64,

    pub ticks_elapsed: Tick,
    pub events: EventLog,
}

/// Partial construction overrides for a planet
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlanetOverrides {
    pub population: Option<f64>,
    pub tech_level: Option<u32>,
    pub stability: Option<f64>,
    pub urbanization: Option<f64>,
    pub nation_count: Option<u32>,
    pub habitability: Option<f64>,
}

impl Planet {
    /// Construct a planet with deterministic baseline values, applying and
    /// validating any overrides.
    pub fn new(id: &str, name: &str, overrides: Option<PlanetOverrides>) -> Result<Self> {
        validate::identity(id, name)?;
        let ov = overrides.unwrap_or_default();

        let population = validate::non_negative("population", ov.population.unwrap_or(1.0e9))?;
        let tech_level = validate::tech_floor(TierKind::Planet, ov.tech_level.unwrap_or(0))?;
        let stability = validate::in_range("stability", ov.stability.unwrap_or(70.0), 0.0, 100.0)?;
        let urbanization =
            validate::in_range("urbanization", ov.urbanization.unwrap_or(0.3), 0.0, 1.0)?;
        let habitability =
            validate::in_range("habitability", ov.habitability.unwrap_or(0.75), 0.0, 1.0)?;

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            population: Population::new(population),
            tech: Tech::new(tech_level),
            stability: Stability::new(stability),
            civilization: CivilizationStats {
                urbanization,
                nation_count: ov.nation_count.unwrap_or(120),
            },
            megastructures: Vec::new(),
            habitability,
            ticks_elapsed: 0,
            events: EventLog::new(),
        })
    }

    /// Current carrying capacity given tech level and habitability.
    ///
    /// Urbanization densifies: cities pack more people into the same
    /// habitable surface.
    pub fn carrying_capacity(&self) -> f64 {
        let effective = self.habitability * (0.7 + 0.3 * self.civilization.urbanization);
        carrying_capacity(config().planet_capacity_base, self.tech.level, effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SimError;

    #[test]
    fn test_default_construction() {
        let planet = Planet::new("sol-3", "Earth", None).unwrap();
        assert_eq!(planet.id, "sol-3");
        assert_eq!(planet.population.total, 1.0e9);
        assert_eq!(planet.tech.level, 0);
        assert_eq!(planet.ticks_elapsed, 0);
        assert!(planet.events.is_empty());
        assert!(planet.megastructures.is_empty());
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = Planet::new("", "Earth", None).unwrap_err();
        assert!(matches!(err, SimError::Validation { field: "id", .. }));
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = Planet::new("sol-3", "   ", None).unwrap_err();
        assert!(matches!(err, SimError::Validation { field: "name", .. }));
    }

    #[test]
    fn test_negative_population_rejected() {
        let ov = PlanetOverrides {
            population: Some(-5.0),
            ..Default::default()
        };
        let err = Planet::new("sol-3", "Earth", Some(ov)).unwrap_err();
        assert!(matches!(err, SimError::Validation { field: "population", .. }));
    }

    #[test]
    fn test_out_of_range_urbanization_rejected() {
        let ov = PlanetOverrides {
            urbanization: Some(1.5),
            ..Default::default()
        };
        assert!(Planet::new("sol-3", "Earth", Some(ov)).is_err());
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = Planet::new("sol-3", "Earth", None).unwrap();
        let b = Planet::new("sol-3", "Earth", None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_capacity_positive_for_habitable_world() {
        let planet = Planet::new("sol-3", "Earth", None).unwrap();
        assert!(planet.carrying_capacity() > planet.population.total);
    }
}
