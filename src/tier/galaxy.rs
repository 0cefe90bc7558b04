//! Galaxy tier - the widest aggregation scope

use serde::{Deserialize, Serialize};

use crate::core::config::config;
use crate::core::error::Result;
use crate::core::types::{Tick, TierKind};
use crate::tier::events::EventLog;
use crate::tier::lifecycle::Lifecycle;
use crate::tier::stats::{Population, Stability, Tech};
use crate::tier::systems::carrying_capacity;
use crate::tier::validate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GalaxyType {
    Spiral,
    BarredSpiral,
    Elliptical,
    Irregular,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlackHole {
    pub mass_solar: f64,
}

/// Physical structure, fixed at construction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalaxyStructure {
    pub kind: GalaxyType,
    pub diameter_ly: f64,
    pub central_black_hole: BlackHole,
}

/// Derived galaxy-wide statistics, recomputed every tick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalacticStats {
    pub total_stars: f64,
    pub active_civilizations: u32,
    pub extinct_civilizations: u32,
    /// Mean Kardashev level over active civilizations
    pub avg_kardashev: f64,
    /// Watts, order-of-magnitude bookkeeping only
    pub total_energy_output: f64,
    pub economic_output: f64,
}

/// A notional civilization tracked explicitly by its galaxy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalacticCivilization {
    pub id: u32,
    pub name: String,
    pub lifecycle: Lifecycle,
    /// Energy-capture capability, the classic 0..4-ish scale
    pub kardashev: f64,
    /// Fraction of the galactic population this civilization claims
    pub population_share: f64,
    /// Internal cohesion 0..1
    pub stability: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WormholeNetwork {
    pub node_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalacticInfrastructure {
    pub wormhole_network: WormholeNetwork,
}

/// A galaxy-spanning governing body; forms at most once per run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalacticGovernance {
    pub name: String,
    pub founded_tick: Tick,
    pub member_civilizations: u32,
}

/// A galaxy: quadrillions of notional beings as a handful of scalars
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    pub id: String,
    pub name: String,

    pub population: Population,
    pub tech: Tech,
    pub stability: Stability,

    pub structure: GalaxyStructure,
    pub stats: GalacticStats,
    pub civilizations: Vec<GalacticCivilization>,
    pub infrastructure: GalacticInfrastructure,
    pub governance: Option<GalacticGovernance>,

    pub ticks_elapsed: Tick,
    pub events: EventLog,

    next_civ_id: u32,
}

/// Partial construction overrides for a galaxy
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GalaxyOverrides {
    pub population: Option<f64>,
    pub tech_level: Option<u32>,
    pub stability: Option<f64>,
    pub galaxy_type: Option<GalaxyType>,
    pub diameter_ly: Option<f64>,
    pub black_hole_mass_solar: Option<f64>,
    pub total_stars: Option<f64>,
    pub civilization_count: Option<u32>,
}

impl Galaxy {
    pub fn new(id: &str, name: &str, overrides: Option<GalaxyOverrides>) -> Result<Self> {
        validate::identity(id, name)?;
        let ov = overrides.unwrap_or_default();
        let cfg = config();

        let population = validate::non_negative("population", ov.population.unwrap_or(8.0e15))?;
        let tech_level = validate::tech_floor(TierKind::Galaxy, ov.tech_level.unwrap_or(8))?;
        let stability = validate::in_range("stability", ov.stability.unwrap_or(55.0), 0.0, 100.0)?;
        let diameter_ly =
            validate::positive("diameter_ly", ov.diameter_ly.unwrap_or(100_000.0))?;
        let black_hole_mass =
            validate::positive("black_hole_mass_solar", ov.black_hole_mass_solar.unwrap_or(4.0e6))?;
        let total_stars = validate::positive("total_stars", ov.total_stars.unwrap_or(2.0e11))?;

        let civ_count = ov
            .civilization_count
            .unwrap_or(6)
            .min(cfg.max_galactic_civilizations as u32);
        let civilizations: Vec<GalacticCivilization> = (0..civ_count)
            .map(|i| GalacticCivilization {
                id: i + 1,
                name: format!("{name} Civilization {}", i + 1),
                lifecycle: Lifecycle::stable(),
                kardashev: 1.2,
                population_share: 1.0 / (civ_count.max(1) as f64 + 1.0),
                stability: 0.65,
            })
            .collect();

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            population: Population::new(population),
            tech: Tech::new(tech_level),
            stability: Stability::new(stability),
            structure: GalaxyStructure {
                kind: ov.galaxy_type.unwrap_or(GalaxyType::BarredSpiral),
                diameter_ly,
                central_black_hole: BlackHole {
                    mass_solar: black_hole_mass,
                },
            },
            stats: GalacticStats {
                total_stars,
                active_civilizations: civ_count,
                extinct_civilizations: 0,
                avg_kardashev: if civ_count > 0 { 1.2 } else { 0.0 },
                total_energy_output: 0.0,
                economic_output: 0.0,
            },
            civilizations,
            infrastructure: GalacticInfrastructure {
                wormhole_network: WormholeNetwork { node_count: 0 },
            },
            governance: None,
            ticks_elapsed: 0,
            events: EventLog::new(),
            next_civ_id: civ_count + 1,
        })
    }

    /// Habitable fraction of the disk; ellipticals are gas-poor and old,
    /// irregulars turbulent.
    pub fn habitability(&self) -> f64 {
        match self.structure.kind {
            GalaxyType::Spiral | GalaxyType::BarredSpiral => 1.0,
            GalaxyType::Elliptical => 0.6,
            GalaxyType::Irregular => 0.4,
        }
    }

    pub fn carrying_capacity(&self) -> f64 {
        carrying_capacity(
            config().galaxy_capacity_base,
            self.tech.level,
            self.habitability(),
        )
    }

    pub(crate) fn next_civ_id(&mut self) -> u32 {
        let id = self.next_civ_id;
        self.next_civ_id += 1;
        id
    }

    pub fn active_civilizations(&self) -> impl Iterator<Item = &GalacticCivilization> {
        self.civilizations.iter().filter(|c| c.lifecycle.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SimError;

    #[test]
    fn test_default_construction() {
        let galaxy = Galaxy::new("gal-1", "Milky Way", None).unwrap();
        assert_eq!(galaxy.stats.active_civilizations, 6);
        assert_eq!(galaxy.stats.extinct_civilizations, 0);
        assert_eq!(galaxy.civilizations.len(), 6);
        assert!(galaxy.governance.is_none());
        assert_eq!(galaxy.infrastructure.wormhole_network.node_count, 0);
    }

    #[test]
    fn test_zero_diameter_rejected() {
        let ov = GalaxyOverrides {
            diameter_ly: Some(0.0),
            ..Default::default()
        };
        let err = Galaxy::new("gal-1", "Milky Way", Some(ov)).unwrap_err();
        assert!(matches!(err, SimError::Validation { field: "diameter_ly", .. }));
    }

    #[test]
    fn test_tech_below_galaxy_floor_rejected() {
        let ov = GalaxyOverrides {
            tech_level: Some(3),
            ..Default::default()
        };
        assert!(Galaxy::new("gal-1", "Milky Way", Some(ov)).is_err());
    }

    #[test]
    fn test_civilization_count_capped() {
        let ov = GalaxyOverrides {
            civilization_count: Some(10_000),
            ..Default::default()
        };
        let galaxy = Galaxy::new("gal-1", "Milky Way", Some(ov)).unwrap();
        assert!(galaxy.civilizations.len() <= config().max_galactic_civilizations);
    }

    #[test]
    fn test_elliptical_less_habitable() {
        let spiral = Galaxy::new("a", "Spiral", None).unwrap();
        let elliptical = Galaxy::new(
            "b",
            "Elliptical",
            Some(GalaxyOverrides {
                galaxy_type: Some(GalaxyType::Elliptical),
                ..Default::default()
            }),
        )
        .unwrap();
        assert!(elliptical.habitability() < spiral.habitability());
    }
}
