//! # Error Types
//!
//! Domain-specific error types for vetclinic-core.
//!
//! Errors are enum variants with context fields, never strings. Managers in
//! vetclinic-db wrap these in their own `DbError` so that callers can branch
//! on cause (validation vs. conflict vs. persistence) instead of inspecting
//! a boolean success flag.

use thiserror::Error;

use crate::types::AppointmentStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations and domain logic failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Inventory item cannot be found.
    #[error("Inventory item not found: {0}")]
    ItemNotFound(String),

    /// Insufficient stock to complete an operation.
    ///
    /// Raised when a sale line or stock adjustment would drive an item's
    /// stock below zero. The whole operation is rejected, never partially
    /// applied.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Appointment cannot be found.
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    /// Requested status change is not allowed by the appointment lifecycle.
    ///
    /// SCHEDULED may move to IN_PROGRESS or CANCELLED; IN_PROGRESS may move
    /// to COMPLETED or CANCELLED; COMPLETED and CANCELLED are terminal.
    #[error("Cannot change appointment status from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// Checkout was attempted with no cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. malformed decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A stated total does not equal the sum of its line subtotals.
    #[error("total mismatch: stated {stated} centavos, lines sum to {computed} centavos")]
    TotalMismatch { stated: i64, computed: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Sterile Bandage 5cm x 5m".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Sterile Bandage 5cm x 5m: available 3, requested 5"
        );
    }

    #[test]
    fn test_transition_error_message() {
        let err = CoreError::InvalidTransition {
            from: AppointmentStatus::Cancelled,
            to: AppointmentStatus::Completed,
        };
        assert_eq!(
            err.to_string(),
            "Cannot change appointment status from CANCELLED to COMPLETED"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "patient_name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_total_mismatch_message() {
        let err = ValidationError::TotalMismatch {
            stated: 130_000,
            computed: 125_000,
        };
        assert_eq!(
            err.to_string(),
            "total mismatch: stated 130000 centavos, lines sum to 125000 centavos"
        );
    }
}
