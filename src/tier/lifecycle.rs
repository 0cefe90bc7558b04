//! Civilization and political-entity lifecycle state machine
//!
//! Explicit finite states with guarded transitions, driven by per-entity
//! streak counters rather than global history. `Extinct` is terminal and
//! only reachable from `Declining`.

use serde::{Deserialize, Serialize};

use crate::core::config::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleStage {
    Emerging,
    Stable,
    Declining,
    Extinct,
}

/// A transition that fired during [`Lifecycle::advance`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stabilized,
    Declined,
    WentExtinct,
}

/// Per-entity lifecycle state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub stage: LifecycleStage,
    pub ticks_in_stage: u32,
    /// Consecutive ticks the current transition guard has held
    streak: u32,
    /// Set when freshly extinct; the parent aggregate removes this
    /// entity's contribution on the following tick and clears the flag.
    pub pending_removal: bool,
}

impl Lifecycle {
    pub fn emerging() -> Self {
        Self {
            stage: LifecycleStage::Emerging,
            ticks_in_stage: 0,
            streak: 0,
            pending_removal: false,
        }
    }

    pub fn stable() -> Self {
        Self {
            stage: LifecycleStage::Stable,
            ticks_in_stage: 0,
            streak: 0,
            pending_removal: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != LifecycleStage::Extinct
    }

    /// Advance one tick given the entity's normalized stability (0..1).
    ///
    /// Returns the transition that fired, if any. Guards require the
    /// condition to hold for `sustain_ticks` consecutive ticks.
    pub fn advance(&mut self, stability: f64) -> Option<Transition> {
        let cfg = config();
        self.ticks_in_stage += 1;

        match self.stage {
            LifecycleStage::Emerging => {
                if stability >= cfg.stable_threshold {
                    self.streak += 1;
                    if self.streak >= cfg.sustain_ticks {
                        self.enter(LifecycleStage::Stable);
                        return Some(Transition::Stabilized);
                    }
                } else {
                    self.streak = 0;
                }
                None
            }
            LifecycleStage::Stable => {
                if stability < cfg.stable_threshold {
                    self.streak += 1;
                    if self.streak >= cfg.sustain_ticks {
                        self.enter(LifecycleStage::Declining);
                        return Some(Transition::Declined);
                    }
                } else {
                    self.streak = 0;
                }
                None
            }
            LifecycleStage::Declining => {
                if stability < cfg.extinct_floor {
                    self.streak += 1;
                    if self.streak >= cfg.sustain_ticks {
                        self.enter(LifecycleStage::Extinct);
                        self.pending_removal = true;
                        return Some(Transition::WentExtinct);
                    }
                } else {
                    self.streak = 0;
                }
                None
            }
            LifecycleStage::Extinct => None,
        }
    }

    /// Immediate Stable -> Declining, triggered by a war or collapse event
    /// rather than sustained low stability. Returns true if it fired.
    pub fn force_decline(&mut self) -> bool {
        if self.stage == LifecycleStage::Stable {
            self.enter(LifecycleStage::Declining);
            true
        } else {
            false
        }
    }

    fn enter(&mut self, stage: LifecycleStage) {
        self.stage = stage;
        self.ticks_in_stage = 0;
        self.streak = 0;
    }
}
