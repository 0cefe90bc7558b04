//! Structured history events and the append-only event log

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// A structured history event emitted by a tier update step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierEvent {
    pub tick: Tick,
    pub kind: EventKind,
    /// Signed severity in [-1, 1]: sign is valence, magnitude is how much
    /// the event mattered to the tier that recorded it.
    pub impact: f64,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    // Conflict
    War,
    Fragmentation,

    // Collapse class - recorded instead of thrown for in-band domain
    // violations (population hitting zero, civilization death)
    PopulationCrash,
    CivilizationExtinct,

    // Technology
    TechBreakthrough,
    FtlBreakthrough,

    // Society
    GoldenAge,
    Pandemic,
    CivilizationEmerged,
    CivilizationDeclined,
    GalacticGovernanceFormed,

    // Construction
    MegastructureCompleted,
    OrbitalConstruction,
    WormholeGateBuilt,
    WormholeNetworkExpanded,

    // Astrophysics
    SolarFlare,
    Supernova,
    GammaRayBurst,
}

impl EventKind {
    /// Collapse-class events mark severe in-band state transitions: a
    /// living population clamping to zero, or a tracked civilization
    /// dying. Domain violations are recorded here, never thrown.
    pub fn is_collapse_class(self) -> bool {
        matches!(self, EventKind::PopulationCrash | EventKind::CivilizationExtinct)
    }

    pub fn is_negative(self) -> bool {
        matches!(
            self,
            EventKind::War
                | EventKind::Fragmentation
                | EventKind::PopulationCrash
                | EventKind::CivilizationExtinct
                | EventKind::CivilizationDeclined
                | EventKind::Pandemic
                | EventKind::SolarFlare
                | EventKind::Supernova
                | EventKind::GammaRayBurst
        )
    }
}

/// Append-only event log carried by every tier entity
///
/// Unbounded by contract; hosts window or slice for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<TierEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, kind: EventKind, impact: f64, description: String) {
        self.events.push(TierEvent {
            tick,
            kind,
            impact: impact.clamp(-1.0, 1.0),
            description,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TierEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&TierEvent> {
        self.events.last()
    }

    /// Events at or after the given tick.
    pub fn since(&self, tick: Tick) -> impl Iterator<Item = &TierEvent> {
        self.events.iter().filter(move |e| e.tick >= tick)
    }

    pub fn collapse_events(&self) -> impl Iterator<Item = &TierEvent> {
        self.events.iter().filter(|e| e.kind.is_collapse_class())
    }

    /// Tally of events by kind, a cheap read projection for hosts.
    pub fn counts_by_kind(&self) -> AHashMap<EventKind, usize> {
        let mut counts = AHashMap::new();
        for event in &self.events {
            *counts.entry(event.kind).or_insert(0) += 1;
        }
        counts
    }
}
