//! Sector tier update engine
//!
//! Political entities are the sector's explicit state machines; everything
//! else about its notional hundreds of systems is summary statistics.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::config;
use crate::tier::events::EventKind;
use crate::tier::lifecycle::{Lifecycle, Transition};
use crate::tier::sector::{PoliticalEntity, Sector, WormholeGate};
use crate::tier::systems::{logistic_delta, research_rate, EventTable};

/// Advance a sector by one tick.
pub fn step(sector: &mut Sector, rng: &mut ChaCha8Rng) {
    let cfg = config();
    let tick = sector.ticks_elapsed + 1;

    // 0. Settle extinctions from the previous tick: remove the dead
    // polity's contribution from the aggregate exactly one tick after the
    // transition fired.
    settle_extinctions(sector);

    // 1. Population dynamics
    let capacity = sector.carrying_capacity();
    let stability_modifier =
        (0.4 + sector.stability.fraction() * 0.6) * (0.6 + sector.stats.political_stability * 0.4);
    let delta = logistic_delta(
        sector.population.total,
        capacity,
        cfg.sector_base_growth,
        stability_modifier,
    );
    if sector.population.apply_growth(delta) {
        sector.events.push(
            tick,
            EventKind::PopulationCrash,
            -1.0,
            format!("{} collapses", sector.name),
        );
        sector.stability.shift(-20.0);
        // A sector-wide collapse drags every stable polity into decline
        let mut dragged: Vec<String> = Vec::new();
        for entity in &mut sector.political_entities {
            if entity.lifecycle.force_decline() {
                dragged.push(entity.name.clone());
            }
        }
        for name in dragged {
            sector.events.push(
                tick,
                EventKind::CivilizationDeclined,
                -0.4,
                format!("{name} is dragged down by the collapse"),
            );
        }
    }

    // 2. Technology accumulation
    let gained = sector.tech.accumulate(
        research_rate(sector.population.total, sector.tech.level)
            * (0.8 + sector.stats.economic_integration * 0.4),
    );
    if gained > 0 {
        tracing::debug!(sector = %sector.id, level = sector.tech.level, "tech level gained");
        sector.events.push(
            tick,
            EventKind::TechBreakthrough,
            0.4,
            format!("{} reaches tech level {}", sector.name, sector.tech.level),
        );
    }

    // 3. Derived stats
    let active: Vec<f64> = sector
        .political_entities
        .iter()
        .filter(|e| e.lifecycle.is_active())
        .map(|e| e.stability)
        .collect();
    sector.stats.political_stability = if active.is_empty() {
        sector.stability.fraction()
    } else {
        active.iter().sum::<f64>() / active.len() as f64
    };
    sector.stats.economic_integration = (sector.infrastructure.wormhole_gates.len() as f64 * 0.08
        + sector.stats.political_stability * 0.5
        + sector.tech.level as f64 * 0.02)
        .clamp(0.0, 1.0);

    // 4. Stability feedback and political lifecycle
    let relative_growth = if sector.population.total > 0.0 {
        (sector.population.growth / sector.population.total).max(0.0)
    } else {
        0.0
    };
    sector.stability.shift(
        cfg.stability_recovery
            - relative_growth * cfg.growth_stability_pressure
            - gained as f64 * cfg.tech_surge_penalty
            - sector.stats.active_wars as f64 * 0.8,
    );

    advance_political_entities(sector, tick, rng);

    // Fragmentation: a shaky sector splits its largest polity
    if sector.stats.political_stability < 0.3
        && sector.political_entities.len() < cfg.max_political_entities
        && rng.gen::<f64>() < cfg.fragmentation_chance
    {
        fragment_largest_entity(sector, tick);
    }

    // Ongoing wars wind down probabilistically
    let mut ended = 0;
    for _ in 0..sector.stats.active_wars {
        if rng.gen::<f64>() < cfg.war_decay_chance {
            ended += 1;
        }
    }
    sector.stats.active_wars -= ended;

    // New polities coalesce while the sector is calm and has room
    if sector.stats.political_stability > cfg.stable_threshold
        && sector.political_entities.len() < cfg.max_political_entities
        && rng.gen::<f64>() < cfg.emergence_chance
    {
        let id = sector.next_entity_id();
        let name = format!("{} Polity {id}", sector.name);
        sector.political_entities.push(PoliticalEntity {
            id,
            name: name.clone(),
            lifecycle: Lifecycle::emerging(),
            population_share: 0.02,
            stability: sector.stats.political_stability * 0.9,
        });
        sector.events.push(
            tick,
            EventKind::CivilizationEmerged,
            0.5,
            format!("{name} declares sovereignty"),
        );
    }

    // 5. Event sampling
    let ps = sector.stats.political_stability;
    let mut table = EventTable::new();
    table.push(
        (1.0 - ps).powi(2) * (0.5 + sector.active_entities().count() as f64 * 0.2),
        EventKind::War,
        -0.6,
        format!("Interstellar war ignites across {}", sector.name),
    );
    table.push(
        sector.stability.fraction() * sector.tech.level as f64 * 0.03,
        EventKind::WormholeGateBuilt,
        0.6,
        String::new(),
    );
    table.push(
        ps.powi(2) * sector.stability.fraction() * 0.3,
        EventKind::GoldenAge,
        0.6,
        format!("{} enjoys a long peace", sector.name),
    );

    if let Some(event) = table.sample(rng) {
        match event.kind {
            EventKind::War => {
                sector.stats.active_wars += 1;
                sector.stability.shift(-5.0);
                // Wars push every surviving polity toward the brink
                for entity in sector
                    .political_entities
                    .iter_mut()
                    .filter(|e| e.lifecycle.is_active())
                {
                    entity.stability = (entity.stability - 0.08).max(0.0);
                }
                sector.events.push(tick, event.kind, event.impact, event.description);
            }
            EventKind::WormholeGateBuilt => {
                let name = format!(
                    "{} Gate {}",
                    sector.name,
                    sector.infrastructure.wormhole_gates.len() + 1
                );
                sector.infrastructure.wormhole_gates.push(WormholeGate {
                    name: name.clone(),
                    tick_built: tick,
                });
                sector.events.push(
                    tick,
                    event.kind,
                    event.impact,
                    format!("{name} comes online"),
                );
            }
            EventKind::GoldenAge => {
                sector.stability.shift(4.0);
                sector.events.push(tick, event.kind, event.impact, event.description);
            }
            _ => {
                sector.events.push(tick, event.kind, event.impact, event.description);
            }
        }
    }

    sector.ticks_elapsed = tick;
}

/// Remove extinct polities' contribution from the aggregate, one tick
/// after their transition fired.
fn settle_extinctions(sector: &mut Sector) {
    let mut removed_share = 0.0;
    for entity in &mut sector.political_entities {
        if entity.lifecycle.pending_removal {
            entity.lifecycle.pending_removal = false;
            removed_share += entity.population_share;
            entity.population_share = 0.0;
        }
    }
    if removed_share > 0.0 {
        sector.population.total *= (1.0 - removed_share).max(0.0);
        tracing::debug!(sector = %sector.id, share = removed_share, "extinct polity contribution removed");
    }
}

/// Drift entity stability toward the sector mean and advance each polity's
/// state machine.
fn advance_political_entities(sector: &mut Sector, tick: u64, rng: &mut ChaCha8Rng) {
    let target = sector.stats.political_stability;

    // Collect transitions first to avoid borrowing the log mid-iteration
    let mut transitions: Vec<(String, Transition)> = Vec::new();
    for entity in sector
        .political_entities
        .iter_mut()
        .filter(|e| e.lifecycle.is_active())
    {
        let noise = (rng.gen::<f64>() - 0.5) * 0.06;
        entity.stability = (entity.stability * 0.8 + target * 0.2 + noise).clamp(0.0, 1.0);
        if let Some(transition) = entity.lifecycle.advance(entity.stability) {
            transitions.push((entity.name.clone(), transition));
        }
    }

    for (name, transition) in transitions {
        match transition {
            Transition::Stabilized => {
                tracing::debug!(polity = %name, "polity stabilized");
            }
            Transition::Declined => {
                sector.events.push(
                    tick,
                    EventKind::CivilizationDeclined,
                    -0.4,
                    format!("{name} slides into decline"),
                );
            }
            Transition::WentExtinct => {
                sector.events.push(
                    tick,
                    EventKind::CivilizationExtinct,
                    -0.9,
                    format!("{name} vanishes from history"),
                );
                sector.stability.shift(-4.0);
            }
        }
    }
}

fn fragment_largest_entity(sector: &mut Sector, tick: u64) {
    let Some(largest) = sector
        .political_entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.lifecycle.is_active())
        .max_by(|(_, a), (_, b)| {
            a.population_share
                .partial_cmp(&b.population_share)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
    else {
        return;
    };

    let id = sector.next_entity_id();
    let parent = &mut sector.political_entities[largest];
    parent.population_share /= 2.0;
    let share = parent.population_share;
    let stability = (parent.stability - 0.05).max(0.0);
    let parent_name = parent.name.clone();

    let name = format!("{} Splinter {id}", sector.name);
    sector.political_entities.push(PoliticalEntity {
        id,
        name: name.clone(),
        lifecycle: Lifecycle::emerging(),
        population_share: share,
        stability,
    });
    sector.events.push(
        tick,
        EventKind::Fragmentation,
        -0.3,
        format!("{parent_name} fractures; {name} breaks away"),
    );
}
