//! Starloom - Hierarchical Statistical Universe Simulation

pub mod core;
pub mod tier;
