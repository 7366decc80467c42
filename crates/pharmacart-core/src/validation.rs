//! # Validation Module
//!
//! Input validation at the cart-mutation boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty input, length)                         │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (cart-mutation boundary)                         │
//! │  ├── Numeric sanity: prices, quantities, discount percents             │
//! │  └── Rejects malformed records before they reach the pricing engine    │
//! │                                                                         │
//! │  The pricing functions stay total because nothing malformed gets       │
//! │  past this boundary.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## Example
/// ```rust
/// use pharmacart_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in paise.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a catalog discount percent.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
///
/// A value of 100 passes here (the catalog does ship such records) but is
/// treated as an invalid input by the discount back-calculation, which
/// falls back to a zero discount rather than dividing by zero.
pub fn validate_discount_percent(percent: u8) -> ValidationResult<()> {
    if percent > 100 {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a selected packaging unit, e.g. "Strip of 10".
///
/// ## Rules
/// - Must not be empty after trimming
/// - Maximum 50 characters
pub fn validate_selected_unit(unit: &str) -> ValidationResult<()> {
    let unit = unit.trim();

    if unit.is_empty() {
        return Err(ValidationError::Required {
            field: "selected_unit".to_string(),
        });
    }

    if unit.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "selected_unit".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates the shape of a coupon code before it is matched.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Maximum 32 characters
///
/// Whether the code is *accepted* is a separate question answered by
/// [`crate::coupon::validate_coupon`]; this only rejects garbage input.
pub fn validate_coupon_shape(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: 32,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
