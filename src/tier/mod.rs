//! Hierarchical Statistical Tier Simulation
//!
//! Planets, star systems, sectors, and galaxies as aggregate entities:
//! each tier summarizes its notional sub-populations through closed-form
//! update equations, so a galaxy of quadrillions ticks in the same
//! constant time as a single world. Higher tiers never iterate the
//! lower-tier entities they represent.

pub mod events;
pub mod galaxy;
pub mod lifecycle;
pub mod planet;
pub mod sector;
pub mod simulation;
pub mod stats;
pub mod system;
pub mod systems;

mod validate;

pub use events::{EventKind, EventLog, TierEvent};
pub use galaxy::{GalacticCivilization, Galaxy, GalaxyOverrides};
pub use lifecycle::{Lifecycle, LifecycleStage};
pub use planet::{Planet, PlanetOverrides};
pub use sector::{PoliticalEntity, Sector, SectorOverrides};
pub use simulation::{
    read_snapshot, simulate_batch, simulate_galaxy_tier, simulate_planet_tier,
    simulate_sector_tier, simulate_system_tier, write_snapshot, AnyTier, Simulate,
};
pub use stats::{Population, Stability, Tech};
pub use system::{StarSystem, SystemOverrides};
