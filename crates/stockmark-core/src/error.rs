//! # Error Types
//!
//! Domain-specific error types for stockmark-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockmark-core errors (this file)                                     │
//! │  ├── LookupError      - Host data unavailable (returned by lookups)    │
//! │  ├── ValidationError  - Settings / input validation failures          │
//! │  └── CoreError        - Umbrella for callers that want one type        │
//! │                                                                         │
//! │  stockmark-cli errors (separate crate)                                 │
//! │  └── CliError         - Config / snapshot I/O                          │
//! │                                                                         │
//! │  Enrichment and markup NEVER return these: a LookupError is absorbed   │
//! │  into a default value (quantity 0, no tags) at the item it affects.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::RecordId;

// =============================================================================
// Lookup Error
// =============================================================================

/// Failure reported by a host lookup capability.
///
/// Every variant is a data-unavailable condition. Enrichment logs it and
/// falls back to the documented default for the affected item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// The host has no record for the requested id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: RecordId },

    /// The host could not answer (transient failure, closed cursor, ...).
    #[error("Host lookup unavailable: {0}")]
    Unavailable(String),

    /// The host answered with data that cannot be used.
    ///
    /// ## When This Occurs
    /// - On-hand quantity is NaN or infinite
    /// - Product references a template that no longer exists
    #[error("Inconsistent {entity} {id}: {reason}")]
    Inconsistent {
        entity: String,
        id: RecordId,
        reason: String,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for code that composes lookups and validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Host lookup failed (wraps LookupError).
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type returned by host lookup capabilities.
pub type LookupResult<T> = Result<T, LookupError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_messages() {
        let err = LookupError::NotFound {
            entity: "product".to_string(),
            id: 42,
        };
        assert_eq!(err.to_string(), "product not found: 42");

        let err = LookupError::Inconsistent {
            entity: "product".to_string(),
            id: 7,
            reason: "quantity is NaN".to_string(),
        };
        assert_eq!(err.to_string(), "Inconsistent product 7: quantity is NaN");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::NotFinite {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be a finite number");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = LookupError::Unavailable("cursor closed".into()).into();
        assert!(matches!(core_err, CoreError::Lookup(_)));

        let core_err: CoreError = ValidationError::Required {
            field: "label".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
