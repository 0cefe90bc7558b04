//! Galaxy tier update engine

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::config;
use crate::tier::events::EventKind;
use crate::tier::galaxy::{GalacticCivilization, GalacticGovernance, Galaxy};
use crate::tier::lifecycle::{Lifecycle, Transition};
use crate::tier::systems::{logistic_delta, research_rate, EventTable};

/// Solar luminosity in watts, the unit for galactic energy bookkeeping
const SOLAR_LUMINOSITY_W: f64 = 3.8e26;

/// Advance a galaxy by one tick.
pub fn step(galaxy: &mut Galaxy, rng: &mut ChaCha8Rng) {
    let cfg = config();
    let tick = galaxy.ticks_elapsed + 1;

    // 0. Settle extinctions from the previous tick: the dead
    // civilization's contribution leaves the aggregate and the accounting
    // counters move together.
    settle_extinctions(galaxy);

    // 1. Population dynamics
    let capacity = galaxy.carrying_capacity();
    let stability_modifier = 0.5 + galaxy.stability.fraction() * 0.75;
    let delta = logistic_delta(
        galaxy.population.total,
        capacity,
        cfg.galaxy_base_growth,
        stability_modifier,
    );
    if galaxy.population.apply_growth(delta) {
        galaxy.events.push(
            tick,
            EventKind::PopulationCrash,
            -1.0,
            format!("{} falls silent", galaxy.name),
        );
        galaxy.stability.shift(-20.0);
        // A galactic dark age drags every stable civilization into decline
        let mut dragged: Vec<String> = Vec::new();
        for civ in &mut galaxy.civilizations {
            if civ.lifecycle.force_decline() {
                dragged.push(civ.name.clone());
            }
        }
        for name in dragged {
            galaxy.events.push(
                tick,
                EventKind::CivilizationDeclined,
                -0.4,
                format!("{name} is dragged down by the dark age"),
            );
        }
    }

    // 2. Technology accumulation
    let gained = galaxy.tech.accumulate(
        research_rate(galaxy.population.total, galaxy.tech.level)
            * (1.0 + galaxy.infrastructure.wormhole_network.node_count as f64 * 0.01),
    );
    if gained > 0 {
        tracing::debug!(galaxy = %galaxy.id, level = galaxy.tech.level, "tech level gained");
        galaxy.events.push(
            tick,
            EventKind::TechBreakthrough,
            0.4,
            format!("{} reaches tech level {}", galaxy.name, galaxy.tech.level),
        );
    }

    // 3. Derived stats
    let active: Vec<f64> = galaxy
        .civilizations
        .iter()
        .filter(|c| c.lifecycle.is_active())
        .map(|c| c.kardashev)
        .collect();
    galaxy.stats.avg_kardashev = if active.is_empty() {
        0.0
    } else {
        active.iter().sum::<f64>() / active.len() as f64
    };
    galaxy.stats.total_energy_output = galaxy.stats.total_stars
        * SOLAR_LUMINOSITY_W
        * (0.1 + galaxy.stats.avg_kardashev * 0.3);
    galaxy.stats.economic_output = galaxy.population.total
        * (1.0 + galaxy.tech.level as f64 * 0.5)
        * galaxy.stability.fraction();

    // 4. Stability feedback and civilization lifecycle
    let relative_growth = if galaxy.population.total > 0.0 {
        (galaxy.population.growth / galaxy.population.total).max(0.0)
    } else {
        0.0
    };
    galaxy.stability.shift(
        cfg.stability_recovery
            - relative_growth * cfg.growth_stability_pressure
            - gained as f64 * cfg.tech_surge_penalty,
    );

    advance_civilizations(galaxy, tick, rng);

    // New civilizations emerge while the galaxy is calm and has room
    if galaxy.stability.fraction() > cfg.stable_threshold
        && galaxy.civilizations.len() < cfg.max_galactic_civilizations
        && rng.gen::<f64>() < cfg.emergence_chance
    {
        let id = galaxy.next_civ_id();
        let name = format!("{} Civilization {id}", galaxy.name);
        galaxy.civilizations.push(GalacticCivilization {
            id,
            name: name.clone(),
            lifecycle: Lifecycle::emerging(),
            kardashev: 0.8,
            population_share: 0.01,
            stability: 0.6,
        });
        galaxy.stats.active_civilizations += 1;
        galaxy.events.push(
            tick,
            EventKind::CivilizationEmerged,
            0.6,
            format!("{name} makes first contact"),
        );
    }

    // Governance forms once, when enough mature civilizations coexist
    maybe_form_governance(galaxy, tick);

    // 5. Event sampling
    let stab = galaxy.stability.fraction();
    let mut table = EventTable::new();
    table.push(
        (1.0 - stab).powi(2) * (0.3 + galaxy.stats.active_civilizations as f64 * 0.05),
        EventKind::War,
        -0.6,
        format!("War spreads between the civilizations of {}", galaxy.name),
    );
    table.push(
        0.3,
        EventKind::Supernova,
        -0.2,
        format!("A supernova chain lights up {}", galaxy.name),
    );
    table.push(
        0.05,
        EventKind::GammaRayBurst,
        -0.7,
        format!("A gamma-ray burst sterilizes an arm of {}", galaxy.name),
    );
    table.push(
        stab * galaxy.stats.avg_kardashev * 0.15,
        EventKind::WormholeNetworkExpanded,
        0.5,
        String::new(),
    );

    if let Some(event) = table.sample(rng) {
        match event.kind {
            EventKind::War => {
                galaxy.stability.shift(-5.0);
                for civ in galaxy
                    .civilizations
                    .iter_mut()
                    .filter(|c| c.lifecycle.is_active())
                {
                    civ.stability = (civ.stability - 0.06).max(0.0);
                }
                galaxy.events.push(tick, event.kind, event.impact, event.description);
            }
            EventKind::Supernova => {
                galaxy.stability.shift(-2.0);
                galaxy.events.push(tick, event.kind, event.impact, event.description);
            }
            EventKind::GammaRayBurst => {
                galaxy.stability.shift(-6.0);
                let crashed = galaxy.population.scale(0.995);
                galaxy.events.push(tick, event.kind, event.impact, event.description);
                if crashed {
                    galaxy.events.push(
                        tick,
                        EventKind::PopulationCrash,
                        -1.0,
                        format!("{} falls silent after the burst", galaxy.name),
                    );
                }
            }
            EventKind::WormholeNetworkExpanded => {
                galaxy.infrastructure.wormhole_network.node_count += 1;
                galaxy.events.push(
                    tick,
                    event.kind,
                    event.impact,
                    format!(
                        "{} wormhole network grows to {} nodes",
                        galaxy.name, galaxy.infrastructure.wormhole_network.node_count
                    ),
                );
            }
            _ => {
                galaxy.events.push(tick, event.kind, event.impact, event.description);
            }
        }
    }

    galaxy.ticks_elapsed = tick;
}

/// Decrement active and increment extinct in the same step, one tick after
/// the extinction transition fired.
fn settle_extinctions(galaxy: &mut Galaxy) {
    let mut removed_share = 0.0;
    let mut settled = 0;
    for civ in &mut galaxy.civilizations {
        if civ.lifecycle.pending_removal {
            civ.lifecycle.pending_removal = false;
            removed_share += civ.population_share;
            civ.population_share = 0.0;
            settled += 1;
        }
    }
    if settled > 0 {
        galaxy.stats.active_civilizations = galaxy.stats.active_civilizations.saturating_sub(settled);
        galaxy.stats.extinct_civilizations += settled;
        galaxy.population.total *= (1.0 - removed_share).max(0.0);
        tracing::debug!(galaxy = %galaxy.id, settled, "extinct civilization contribution removed");
    }
}

fn advance_civilizations(galaxy: &mut Galaxy, tick: u64, rng: &mut ChaCha8Rng) {
    let target = galaxy.stability.fraction();

    let mut transitions: Vec<(String, Transition)> = Vec::new();
    for civ in galaxy
        .civilizations
        .iter_mut()
        .filter(|c| c.lifecycle.is_active())
    {
        // Kardashev climbs with internal cohesion, capped at the
        // theoretical ceiling
        civ.kardashev = (civ.kardashev + 0.005 * civ.stability).min(4.0);
        let noise = (rng.gen::<f64>() - 0.5) * 0.06;
        civ.stability = (civ.stability * 0.8 + target * 0.2 + noise).clamp(0.0, 1.0);
        if let Some(transition) = civ.lifecycle.advance(civ.stability) {
            transitions.push((civ.name.clone(), transition));
        }
    }

    for (name, transition) in transitions {
        match transition {
            Transition::Stabilized => {
                tracing::debug!(civilization = %name, "civilization stabilized");
            }
            Transition::Declined => {
                galaxy.events.push(
                    tick,
                    EventKind::CivilizationDeclined,
                    -0.4,
                    format!("{name} begins its long decline"),
                );
            }
            Transition::WentExtinct => {
                galaxy.events.push(
                    tick,
                    EventKind::CivilizationExtinct,
                    -0.9,
                    format!("{name} goes extinct"),
                );
                galaxy.stability.shift(-3.0);
            }
        }
    }
}

fn maybe_form_governance(galaxy: &mut Galaxy, tick: u64) {
    if galaxy.governance.is_some() {
        return;
    }
    let mature = galaxy
        .civilizations
        .iter()
        .filter(|c| c.lifecycle.is_active() && c.kardashev >= 2.0)
        .count() as u32;
    if mature >= 3 && galaxy.stats.avg_kardashev >= 2.0 {
        let governance = GalacticGovernance {
            name: format!("{} Concord", galaxy.name),
            founded_tick: tick,
            member_civilizations: mature,
        };
        galaxy.events.push(
            tick,
            EventKind::GalacticGovernanceFormed,
            0.8,
            format!("The {} unites {mature} civilizations", governance.name),
        );
        galaxy.governance = Some(governance);
    }
}
