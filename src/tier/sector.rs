//! Sector tier - a region of the galactic disk aggregating star systems

use serde::{Deserialize, Serialize};

use crate::core::config::config;
use crate::core::error::Result;
use crate::core::types::{Tick, TierKind};
use crate::tier::events::EventLog;
use crate::tier::lifecycle::Lifecycle;
use crate::tier::stats::{Population, Stability, Tech};
use crate::tier::systems::carrying_capacity;
use crate::tier::validate;

/// Spatial placement within the galaxy, fixed at construction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorSpatial {
    pub spiral_arm: u8,
    pub distance_from_core_kpc: f64,
    /// Stars per cubic parsec, relative to the solar neighborhood
    pub stellar_density: f64,
}

/// A notional interstellar polity tracked explicitly by its sector
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoliticalEntity {
    pub id: u32,
    pub name: String,
    pub lifecycle: Lifecycle,
    /// Fraction of the sector population this polity claims
    pub population_share: f64,
    /// Internal cohesion 0..1, drifts toward the sector average
    pub stability: f64,
}

/// Derived sector statistics, recomputed every tick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorStats {
    pub political_stability: f64,
    pub economic_integration: f64,
    pub active_wars: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WormholeGate {
    pub name: String,
    pub tick_built: Tick,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorInfrastructure {
    /// Append-only list of constructed gates
    pub wormhole_gates: Vec<WormholeGate>,
}

/// A sector: hundreds of notional systems summarized statistically
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub name: String,

    pub population: Population,
    pub tech: Tech,
    pub stability: Stability,

    pub spatial: SectorSpatial,
    pub political_entities: Vec<PoliticalEntity>,
    pub stats: SectorStats,
    pub infrastructure: SectorInfrastructure,

    pub ticks_elapsed: Tick,
    pub events: EventLog,

    next_entity_id: u32,
}

/// Partial construction overrides for a sector
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SectorOverrides {
    pub population: Option<f64>,
    pub tech_level: Option<u32>,
    pub stability: Option<f64>,
    pub spiral_arm: Option<u8>,
    pub distance_from_core_kpc: Option<f64>,
    pub stellar_density: Option<f64>,
    pub political_stability: Option<f64>,
    pub economic_integration: Option<f64>,
    pub entity_count: Option<u32>,
}

impl Sector {
    pub fn new(id: &str, name: &str, overrides: Option<SectorOverrides>) -> Result<Self> {
        validate::identity(id, name)?;
        let ov = overrides.unwrap_or_default();
        let cfg = config();

        let population = validate::non_negative("population", ov.population.unwrap_or(2.0e13))?;
        let tech_level = validate::tech_floor(TierKind::Sector, ov.tech_level.unwrap_or(7))?;
        let stability = validate::in_range("stability", ov.stability.unwrap_or(60.0), 0.0, 100.0)?;
        let political_stability = validate::in_range(
            "political_stability",
            ov.political_stability.unwrap_or(0.7),
            0.0,
            1.0,
        )?;
        let economic_integration = validate::in_range(
            "economic_integration",
            ov.economic_integration.unwrap_or(0.5),
            0.0,
            1.0,
        )?;
        let stellar_density =
            validate::non_negative("stellar_density", ov.stellar_density.unwrap_or(1.0))?;
        let distance_from_core_kpc = validate::non_negative(
            "distance_from_core_kpc",
            ov.distance_from_core_kpc.unwrap_or(8.0),
        )?;

        let entity_count = ov.entity_count.unwrap_or(4).min(cfg.max_political_entities as u32);
        let political_entities: Vec<PoliticalEntity> = (0..entity_count)
            .map(|i| PoliticalEntity {
                id: i + 1,
                name: format!("{name} Polity {}", i + 1),
                lifecycle: Lifecycle::stable(),
                population_share: 1.0 / (entity_count.max(1) as f64 + 1.0),
                stability: political_stability,
            })
            .collect();

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            population: Population::new(population),
            tech: Tech::new(tech_level),
            stability: Stability::new(stability),
            spatial: SectorSpatial {
                spiral_arm: ov.spiral_arm.unwrap_or(1),
                distance_from_core_kpc,
                stellar_density,
            },
            political_entities,
            stats: SectorStats {
                political_stability,
                economic_integration,
                active_wars: 0,
            },
            infrastructure: SectorInfrastructure::default(),
            ticks_elapsed: 0,
            events: EventLog::new(),
            next_entity_id: entity_count + 1,
        })
    }

    /// Habitable fraction of the sector volume: dense inner regions trade
    /// more stars for more sterilizing radiation.
    pub fn habitability(&self) -> f64 {
        let density_bonus = self.spatial.stellar_density.min(3.0) / 3.0;
        let core_penalty = if self.spatial.distance_from_core_kpc < 3.0 {
            0.5
        } else {
            1.0
        };
        (0.3 + 0.7 * density_bonus) * core_penalty
    }

    pub fn carrying_capacity(&self) -> f64 {
        carrying_capacity(
            config().sector_capacity_base,
            self.tech.level,
            self.habitability(),
        )
    }

    /// Mint a fresh political entity ID.
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    pub fn active_entities(&self) -> impl Iterator<Item = &PoliticalEntity> {
        self.political_entities
            .iter()
            .filter(|e| e.lifecycle.is_active())
    }
}
