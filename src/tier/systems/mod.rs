//! Closed-form update systems
//!
//! Shared numeric machinery (logistic growth, research accumulation,
//! weighted event sampling) plus one step engine per tier. Every function
//! here recomputes aggregates directly from tier-level state; none of them
//! iterates the notional population a tier represents.

pub mod galaxy;
pub mod growth;
pub mod planet;
pub mod research;
pub mod sampling;
pub mod sector;
pub mod system;

pub use growth::{carrying_capacity, logistic_delta};
pub use research::{research_rate, research_threshold};
pub use sampling::EventTable;
