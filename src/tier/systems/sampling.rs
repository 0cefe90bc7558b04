//! Weighted event sampling
//!
//! Each tier engine rebuilds its table every tick from current derived
//! stats, then rolls at most one table event. Threshold-driven events
//! (crashes, breakthroughs, fragmentation) bypass the table and are
//! appended directly by the engines.

use rand::Rng;

use crate::core::config::config;
use crate::tier::events::EventKind;

/// An event drawn from a weighted table
#[derive(Clone, Debug)]
pub struct SampledEvent {
    pub kind: EventKind,
    pub impact: f64,
    pub description: String,
}

/// A per-tick weighted probability table
#[derive(Debug, Default)]
pub struct EventTable {
    entries: Vec<(f64, SampledEvent)>,
    total_weight: f64,
}

impl EventTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate event. Non-positive weights are dropped so callers
    /// can write weights as straight-line formulas without branching.
    pub fn push(&mut self, weight: f64, kind: EventKind, impact: f64, description: String) {
        if weight > 0.0 && weight.is_finite() {
            self.total_weight += weight;
            self.entries.push((
                weight,
                SampledEvent {
                    kind,
                    impact,
                    description,
                },
            ));
        }
    }

    /// Roll the table once.
    ///
    /// Fires with probability min(total_weight * event_base_chance, 0.9);
    /// when it fires, the entry is chosen proportionally to weight. Always
    /// draws exactly one random number when the table is non-empty, two
    /// when it fires, keeping the RNG stream aligned across runs.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<SampledEvent> {
        if self.entries.is_empty() {
            return None;
        }

        let fire_chance = (self.total_weight * config().event_base_chance).min(0.9);
        if rng.gen::<f64>() >= fire_chance {
            return None;
        }

        let mut roll = rng.gen::<f64>() * self.total_weight;
        for (weight, event) in &self.entries {
            roll -= weight;
            if roll <= 0.0 {
                return Some(event.clone());
            }
        }
        // Floating point remainder lands on the last entry
        self.entries.last().map(|(_, e)| e.clone())
    }
}
