//! Configuration validation errors.
//!
//! Every tunable struct in the workspace validates itself once, when it is
//! loaded, so the per-tick code can assume sane values.

use thiserror::Error;

/// A configuration value that cannot produce well-defined motion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{low_field} ({low}) must not exceed {high_field} ({high})")]
    InvertedRange {
        low_field: &'static str,
        low: f32,
        high_field: &'static str,
        high: f32,
    },

    #[error("{field} ({value}) must lie within [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Reject NaN and infinities.
pub fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

/// Require a strictly positive, finite value.
pub fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Require `low <= high`.
pub fn ensure_ordered(
    low_field: &'static str,
    low: f32,
    high_field: &'static str,
    high: f32,
) -> Result<(), ConfigError> {
    ensure_finite(low_field, low)?;
    ensure_finite(high_field, high)?;
    if low <= high {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            low_field,
            low,
            high_field,
            high,
        })
    }
}

/// Require `min <= value <= max`.
pub fn ensure_within(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}
