//! # Validation Module
//!
//! Checks for settings and host-supplied numbers.
//!
//! Enrichment and markup never validate-and-fail: a bad quantity from the
//! host is turned into 0 where it is used. These validators guard the
//! places where a bad value is a configuration mistake the operator should
//! hear about, such as stock thresholds loaded from a config file.
//!
//! ## Usage
//! ```rust
//! use stockmark_core::stock::StockThresholds;
//! use stockmark_core::validation::{validate_quantity, validate_thresholds};
//!
//! validate_thresholds(&StockThresholds::default()).unwrap();
//! assert!(validate_quantity(f64::NAN).is_err());
//! ```

use crate::error::ValidationError;
use crate::stock::StockThresholds;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates that a quantity is a finite number.
pub fn validate_quantity(qty: f64) -> ValidationResult<f64> {
    if !qty.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }
    Ok(qty)
}

/// Validates stock level thresholds.
///
/// ## Rules
/// - Both values finite
/// - `low_below` > 0
/// - `low_below` ≤ `medium_max`
pub fn validate_thresholds(thresholds: &StockThresholds) -> ValidationResult<()> {
    for (field, value) in [
        ("low_below", thresholds.low_below),
        ("medium_max", thresholds.medium_max),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: field.to_string(),
            });
        }
    }

    if thresholds.low_below <= 0.0 || thresholds.low_below > thresholds.medium_max {
        return Err(ValidationError::OutOfRange {
            field: "low_below".to_string(),
            min: 0.0,
            max: thresholds.medium_max,
        });
    }

    Ok(())
}

/// Validates that a text setting is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
