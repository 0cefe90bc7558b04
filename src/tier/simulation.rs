//! Public simulation entry points
//!
//! Each tier advances through closed-form update equations in constant
//! time per tick, regardless of the population magnitude it represents.
//! Randomness is threaded explicitly: callers own the seed, the engine
//! never touches global RNG state, and two runs from the same state and
//! seed are bit-for-bit identical.

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::config::config;
use crate::core::error::Result;
use crate::core::types::TierKind;
use crate::tier::galaxy::Galaxy;
use crate::tier::planet::Planet;
use crate::tier::sector::Sector;
use crate::tier::system::StarSystem;
use crate::tier::systems;

/// The shared tick capability every tier implements.
///
/// A tick count of zero is a strict no-op; negative counts are
/// unrepresentable, which is the fail-fast contract for misuse.
pub trait Simulate {
    fn kind(&self) -> TierKind;

    /// Advance one tick. Strictly sequential: each step depends on the
    /// previous one.
    fn step(&mut self, rng: &mut ChaCha8Rng);

    /// Advance `ticks` steps in order.
    fn apply_ticks(&mut self, ticks: u64, rng: &mut ChaCha8Rng) {
        for _ in 0..ticks {
            self.step(rng);
        }
    }
}

impl Simulate for Planet {
    fn kind(&self) -> TierKind {
        TierKind::Planet
    }

    fn step(&mut self, rng: &mut ChaCha8Rng) {
        systems::planet::step(self, rng);
    }
}

impl Simulate for StarSystem {
    fn kind(&self) -> TierKind {
        TierKind::System
    }

    fn step(&mut self, rng: &mut ChaCha8Rng) {
        systems::system::step(self, rng);
    }
}

impl Simulate for Sector {
    fn kind(&self) -> TierKind {
        TierKind::Sector
    }

    fn step(&mut self, rng: &mut ChaCha8Rng) {
        systems::sector::step(self, rng);
    }
}

impl Simulate for Galaxy {
    fn kind(&self) -> TierKind {
        TierKind::Galaxy
    }

    fn step(&mut self, rng: &mut ChaCha8Rng) {
        systems::galaxy::step(self, rng);
    }
}

/// Advance a planet by `ticks` discrete steps, mutating it in place.
pub fn simulate_planet_tier(planet: &mut Planet, ticks: u64, rng: &mut ChaCha8Rng) {
    planet.apply_ticks(ticks, rng);
}

/// Advance a star system by `ticks` discrete steps, mutating it in place.
pub fn simulate_system_tier(system: &mut StarSystem, ticks: u64, rng: &mut ChaCha8Rng) {
    system.apply_ticks(ticks, rng);
}

/// Advance a sector by `ticks` discrete steps, mutating it in place.
pub fn simulate_sector_tier(sector: &mut Sector, ticks: u64, rng: &mut ChaCha8Rng) {
    sector.apply_ticks(ticks, rng);
}

/// Advance a galaxy by `ticks` discrete steps, mutating it in place.
pub fn simulate_galaxy_tier(galaxy: &mut Galaxy, ticks: u64, rng: &mut ChaCha8Rng) {
    galaxy.apply_ticks(ticks, rng);
}

/// Derive an independent per-entity seed from a batch seed and a stable
/// index (splitmix-style mixing).
fn derive_seed(base_seed: u64, index: u64) -> u64 {
    let mut z = base_seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Simulate a batch of disjoint entities, each with its own derived RNG.
///
/// Entities share no mutable state, so the batch is embarrassingly
/// parallel; results are identical whatever the worker count or
/// scheduling order, and identical to a serial run. Small batches stay
/// serial to avoid thread overhead.
pub fn simulate_batch<T: Simulate + Send>(entities: &mut [T], ticks: u64, base_seed: u64) {
    let run = |(index, entity): (usize, &mut T)| {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(base_seed, index as u64));
        entity.apply_ticks(ticks, &mut rng);
    };

    if entities.len() < config().parallel_threshold {
        entities.iter_mut().enumerate().for_each(run);
    } else {
        tracing::info!(count = entities.len(), ticks, "simulating batch in parallel");
        entities.par_iter_mut().enumerate().for_each(run);
    }
}

/// Write a pretty-printed JSON snapshot of any serializable sim state.
///
/// The engine owns no persistence format beyond this; hosts wanting
/// anything richer serialize the state themselves.
pub fn write_snapshot<T: Serialize>(state: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a snapshot previously written by [`write_snapshot`].
pub fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Tagged variant over the four tiers, for hosts that keep mixed
/// collections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnyTier {
    Planet(Planet),
    System(StarSystem),
    Sector(Sector),
    Galaxy(Galaxy),
}

impl AnyTier {
    pub fn id(&self) -> &str {
        match self {
            AnyTier::Planet(p) => &p.id,
            AnyTier::System(s) => &s.id,
            AnyTier::Sector(s) => &s.id,
            AnyTier::Galaxy(g) => &g.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnyTier::Planet(p) => &p.name,
            AnyTier::System(s) => &s.name,
            AnyTier::Sector(s) => &s.name,
            AnyTier::Galaxy(g) => &g.name,
        }
    }

    pub fn population_total(&self) -> f64 {
        match self {
            AnyTier::Planet(p) => p.population.total,
            AnyTier::System(s) => s.population.total,
            AnyTier::Sector(s) => s.population.total,
            AnyTier::Galaxy(g) => g.population.total,
        }
    }

    pub fn event_count(&self) -> usize {
        match self {
            AnyTier::Planet(p) => p.events.len(),
            AnyTier::System(s) => s.events.len(),
            AnyTier::Sector(s) => s.events.len(),
            AnyTier::Galaxy(g) => g.events.len(),
        }
    }
}

impl Simulate for AnyTier {
    fn kind(&self) -> TierKind {
        match self {
            AnyTier::Planet(_) => TierKind::Planet,
            AnyTier::System(_) => TierKind::System,
            AnyTier::Sector(_) => TierKind::Sector,
            AnyTier::Galaxy(_) => TierKind::Galaxy,
        }
    }

    fn step(&mut self, rng: &mut ChaCha8Rng) {
        match self {
            AnyTier::Planet(p) => systems::planet::step(p, rng),
            AnyTier::System(s) => systems::system::step(s, rng),
            AnyTier::Sector(s) => systems::sector::step(s, rng),
            AnyTier::Galaxy(g) => systems::galaxy::step(g, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_ticks_is_a_noop_for_every_tier() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut planet = Planet::new("p", "Terra", None).unwrap();
        let planet_before = planet.clone();
        simulate_planet_tier(&mut planet, 0, &mut rng);
        assert_eq!(planet, planet_before);

        let mut system = StarSystem::new("s", "Tau Ceti", None).unwrap();
        let system_before = system.clone();
        simulate_system_tier(&mut system, 0, &mut rng);
        assert_eq!(system, system_before);

        let mut sector = Sector::new("s", "Orion Spur", None).unwrap();
        let sector_before = sector.clone();
        simulate_sector_tier(&mut sector, 0, &mut rng);
        assert_eq!(sector, sector_before);

        let mut galaxy = Galaxy::new("g", "Milky Way", None).unwrap();
        let galaxy_before = galaxy.clone();
        simulate_galaxy_tier(&mut galaxy, 0, &mut rng);
        assert_eq!(galaxy, galaxy_before);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut planet = Planet::new("p", "Terra", None).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        simulate_planet_tier(&mut planet, 20, &mut rng);

        let path = std::env::temp_dir().join("starloom_snapshot_test.json");
        write_snapshot(&planet, &path).unwrap();
        let restored: Planet = read_snapshot(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(planet, restored);
    }

    #[test]
    fn test_snapshot_missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("starloom_no_such_snapshot.json");
        let err = read_snapshot::<Planet>(&path).unwrap_err();
        assert!(matches!(err, crate::core::error::SimError::IoError(_)));
    }

    #[test]
    fn test_derived_seeds_differ_per_index() {
        let a = derive_seed(7, 0);
        let b = derive_seed(7, 1);
        let c = derive_seed(7, 2);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let mut batch: Vec<Planet> = (0..4)
            .map(|i| Planet::new(&format!("p{i}"), &format!("World {i}"), None).unwrap())
            .collect();
        let mut individual = batch.clone();

        simulate_batch(&mut batch, 25, 99);
        for (index, planet) in individual.iter_mut().enumerate() {
            let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(99, index as u64));
            simulate_planet_tier(planet, 25, &mut rng);
        }

        assert_eq!(batch, individual);
    }

    #[test]
    fn test_any_tier_dispatch() {
        let mut entity = AnyTier::Planet(Planet::new("p", "Terra", None).unwrap());
        assert_eq!(entity.kind(), TierKind::Planet);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        entity.apply_ticks(3, &mut rng);
        match entity {
            AnyTier::Planet(ref p) => assert_eq!(p.ticks_elapsed, 3),
            _ => unreachable!(),
        }
    }
}
