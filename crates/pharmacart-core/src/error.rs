//! # Error Types
//!
//! Domain-specific error types for pharmacart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pharmacart-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  pharmacart-store errors (separate crate)                               │
//! │  └── StoreError       - Storage operation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Frontend              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, limits, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A 100% discount percent would make the back-computed original price
    /// divide by zero.
    ///
    /// ## When This Occurs
    /// - A catalog record carries `discountPercent: 100` with no list price
    ///
    /// The pricing engine catches this internally and falls back to a zero
    /// discount instead of propagating an infinite original price.
    #[error("Invalid discount percent {percent} for product {product_id}")]
    InvalidDiscount { product_id: String, percent: u8 },

    /// Cart has exceeded the maximum number of unique line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line item quantity exceeds the maximum allowed.
    ///
    /// ## When This Occurs
    /// - Adding to an existing line pushes its quantity past the cap
    /// - A single add requests more than the cap outright
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a record arriving at the cart-mutation boundary
/// doesn't meet requirements. Malformed numerics are rejected here so the
/// pricing functions stay total.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Catalog record has neither a list price nor a final price.
    #[error("product {product_id} has no usable price")]
    MissingPrice { product_id: String },
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
        let err = CoreError::QuantityTooLarge {
            requested: 1200,
            max: 999,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 1200 exceeds maximum allowed (999)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "selected_unit".to_string(),
        };
        assert_eq!(err.to_string(), "selected_unit is required");

        let err = ValidationError::MissingPrice {
            product_id: "p-42".to_string(),
        };
        assert_eq!(err.to_string(), "product p-42 has no usable price");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
