pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, EngineConfig};
pub use error::{Result, SimError};
pub use types::{Tick, TierKind};
