//! System tier update engine

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::config;
use crate::tier::events::EventKind;
use crate::tier::system::{OrbitalStructure, OrbitalStructureKind, StarSystem};
use crate::tier::systems::{logistic_delta, research_rate, EventTable};

/// Tech level at which a system's civilizations crack faster-than-light
/// travel
const FTL_TECH_LEVEL: u32 = 9;

/// Advance a star system by one tick.
pub fn step(system: &mut StarSystem, rng: &mut ChaCha8Rng) {
    let cfg = config();
    let tick = system.ticks_elapsed + 1;

    // 1. Population dynamics
    let capacity = system.carrying_capacity();
    let stability_modifier = 0.5 + system.stability.fraction() * 0.75;
    let delta = logistic_delta(
        system.population.total,
        capacity,
        cfg.system_base_growth,
        stability_modifier,
    );
    if system.population.apply_growth(delta) {
        system.events.push(
            tick,
            EventKind::PopulationCrash,
            -1.0,
            format!("{} goes dark", system.name),
        );
        system.stability.shift(-20.0);
    }

    // 2. Technology accumulation
    let belt_bonus = 1.0 + system.asteroid_belts.iter().map(|b| b.density).sum::<f64>() * 0.1;
    let gained = system.tech.accumulate(
        research_rate(system.population.total, system.tech.level) * belt_bonus,
    );
    if gained > 0 {
        tracing::debug!(system = %system.id, level = system.tech.level, "tech level gained");
        system.events.push(
            tick,
            EventKind::TechBreakthrough,
            0.4,
            format!("{} reaches tech level {}", system.name, system.tech.level),
        );
    }

    // 3. Derived stats - pure functions of current population and tech
    let was_ftl = system.stats.ftl_capable;
    let stab = system.stability.fraction();
    let pop = system.population.total;
    system.stats.ftl_capable = system.tech.level >= FTL_TECH_LEVEL;
    system.stats.spacefaring_civs = if system.tech.level >= 6 && pop >= 1.0 {
        1 + (pop.log10() / 4.0) as u32
    } else if pop >= 1.0 {
        1
    } else {
        0
    };
    system.stats.economic_output =
        pop * 1.0e-4 * (1.0 + system.tech.level as f64 * 0.6) * stab * belt_bonus;
    system.stats.defense_power =
        pop * 2.0e-4 * (1.0 + system.tech.level as f64 * 0.8) * (1.5 - stab * 0.5);

    if system.stats.ftl_capable && !was_ftl {
        system.events.push(
            tick,
            EventKind::FtlBreakthrough,
            0.9,
            format!("{} achieves faster-than-light travel", system.name),
        );
    }

    // 4. Stability feedback
    let relative_growth = if pop > 0.0 {
        (system.population.growth / pop).max(0.0)
    } else {
        0.0
    };
    system.stability.shift(
        cfg.stability_recovery
            - relative_growth * cfg.growth_stability_pressure
            - gained as f64 * cfg.tech_surge_penalty,
    );

    // 5. Event sampling. Low stability plus a large fleet biases toward
    // war; high tech and high stability toward orbital construction.
    let defense_scale = (system.stats.defense_power.max(1.0)).log10() / 10.0;
    let mut table = EventTable::new();
    table.push(
        (1.0 - stab).powi(2) * (0.3 + defense_scale),
        EventKind::War,
        -0.5,
        format!("Interplanetary war erupts in {}", system.name),
    );
    table.push(
        stab * system.tech.level as f64 * 0.04,
        EventKind::OrbitalConstruction,
        0.5,
        String::new(),
    );
    table.push(
        system.star.class.volatility() * 0.25,
        EventKind::SolarFlare,
        -0.2,
        format!("{} is scoured by a stellar flare", system.name),
    );
    table.push(
        stab.powi(2) * 0.2,
        EventKind::GoldenAge,
        0.6,
        format!("{} enters an age of plenty", system.name),
    );

    if let Some(event) = table.sample(rng) {
        match event.kind {
            EventKind::War => {
                system.stability.shift(-6.0);
                let crashed = system.population.scale(0.99);
                system.events.push(tick, event.kind, event.impact, event.description);
                if crashed {
                    system.events.push(
                        tick,
                        EventKind::PopulationCrash,
                        -1.0,
                        format!("{} goes dark after the war", system.name),
                    );
                }
            }
            EventKind::OrbitalConstruction => {
                let kind = match rng.gen_range(0..5) {
                    0 => OrbitalStructureKind::Shipyard,
                    1 => OrbitalStructureKind::HabitatRing,
                    2 => OrbitalStructureKind::ResearchStation,
                    3 => OrbitalStructureKind::DefensePlatform,
                    _ => OrbitalStructureKind::StellarCollector,
                };
                let name = format!(
                    "{} {:?} {}",
                    system.name,
                    kind,
                    system.orbital_infrastructure.len() + 1
                );
                system.orbital_infrastructure.push(OrbitalStructure {
                    kind,
                    name: name.clone(),
                    tick_built: tick,
                });
                system.events.push(
                    tick,
                    event.kind,
                    event.impact,
                    format!("{name} enters service"),
                );
            }
            EventKind::SolarFlare => {
                system.stability.shift(-3.0);
                let crashed = system.population.scale(0.998);
                system.events.push(tick, event.kind, event.impact, event.description);
                if crashed {
                    system.events.push(
                        tick,
                        EventKind::PopulationCrash,
                        -1.0,
                        format!("{} goes dark after the flare", system.name),
                    );
                }
            }
            EventKind::GoldenAge => {
                system.stability.shift(5.0);
                system.events.push(tick, event.kind, event.impact, event.description);
            }
            _ => {
                system.events.push(tick, event.kind, event.impact, event.description);
            }
        }
    }

    system.ticks_elapsed = tick;
}
