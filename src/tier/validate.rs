//! Construction-time domain validation
//!
//! Pass-through checkers: each returns the validated value so constructors
//! can validate and bind in one expression.

use crate::core::error::{Result, SimError};
use crate::core::types::TierKind;

pub(crate) fn identity(id: &str, name: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(SimError::validation("id", "must be a non-empty string"));
    }
    if name.trim().is_empty() {
        return Err(SimError::validation("name", "must be a non-empty string"));
    }
    Ok(())
}

pub(crate) fn in_range(field: &'static str, value: f64, lo: f64, hi: f64) -> Result<f64> {
    if !value.is_finite() || value < lo || value > hi {
        return Err(SimError::validation(
            field,
            format!("{value} outside [{lo}, {hi}]"),
        ));
    }
    Ok(value)
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimError::validation(field, format!("{value} must be >= 0")));
    }
    Ok(value)
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimError::validation(field, format!("{value} must be > 0")));
    }
    Ok(value)
}

pub(crate) fn tech_floor(tier: TierKind, level: u32) -> Result<u32> {
    let floor = tier.min_tech_level();
    if level < floor {
        return Err(SimError::validation(
            "tech_level",
            format!("{level} below the {} tier minimum of {floor}", tier.label()),
        ));
    }
    Ok(level)
}
