//! # Coupon Module
//!
//! Gates a user-entered code against the single accepted coupon and tracks
//! the applied-coupon slot.
//!
//! ## State Machine
//! ```text
//!            apply(valid code)
//!   NotApplied ──────────────────► Applied(code)
//!       ▲                               │
//!       └───────────────────────────────┘
//!                   cancel()
//!
//!   apply(invalid code): stays in the current state, records an error
//!   message for the UI, never panics.
//! ```
//!
//! The coupon has no monetary effect wired into the pricing engine; the
//! validator only toggles the applied state. [`CouponSlot::discount_for`]
//! is the explicit hook for attaching an amount later.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// The one accepted coupon code. There is no coupon registry; the client
/// ships with a single promotional code.
pub const ACCEPTED_CODE: &str = "DISCOUNT10";

/// Error message surfaced when a code doesn't match.
pub const INVALID_CODE_MESSAGE: &str = "Invalid coupon code. Please try again.";

/// Returns true iff the trimmed, upper-cased input equals the accepted code.
///
/// ## Example
/// ```rust
/// use pharmacart_core::coupon::validate_coupon;
///
/// assert!(validate_coupon("DISCOUNT10"));
/// assert!(validate_coupon("discount10"));
/// assert!(validate_coupon("  DISCOUNT10  "));
/// assert!(!validate_coupon("DISCOUNT11"));
/// ```
pub fn validate_coupon(code: &str) -> bool {
    code.trim().to_uppercase() == ACCEPTED_CODE
}

// =============================================================================
// Coupon Slot
// =============================================================================

/// A single mutable slot holding at most one applied code.
///
/// Set by a successful validation, cleared by explicit cancel. No expiry,
/// no per-user scoping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CouponSlot {
    applied: Option<String>,
    error: Option<String>,
}

impl CouponSlot {
    /// Creates an empty slot (no coupon applied).
    pub fn new() -> Self {
        CouponSlot::default()
    }

    /// Attempts to apply a code.
    ///
    /// On success the normalized code is stored and any prior error is
    /// cleared; returns true. On failure a user-visible message is recorded
    /// and the applied slot is left untouched; returns false.
    pub fn apply(&mut self, code: &str) -> bool {
        if validate_coupon(code) {
            self.applied = Some(code.trim().to_uppercase());
            self.error = None;
            true
        } else {
            self.error = Some(INVALID_CODE_MESSAGE.to_string());
            false
        }
    }

    /// Cancels the applied coupon, returning the slot to empty.
    pub fn cancel(&mut self) {
        self.applied = None;
        self.error = None;
    }

    /// The applied code, if any.
    pub fn applied_code(&self) -> Option<&str> {
        self.applied.as_deref()
    }

    /// The last validation error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a coupon is currently applied.
    pub fn is_applied(&self) -> bool {
        self.applied.is_some()
    }

    /// Coupon-derived reduction for a given subtotal.
    ///
    /// Always zero today: the applied coupon toggles display state but has
    /// no monetary linkage. This method exists so product intent can attach
    /// an amount without touching the grand-total calculation's callers.
    pub fn discount_for(&self, _subtotal: Money) -> Money {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coupon_case_and_whitespace() {
        assert!(validate_coupon("DISCOUNT10"));
        assert!(validate_coupon("discount10"));
        assert!(validate_coupon(" DISCOUNT10 "));
        assert!(!validate_coupon("DISCOUNT11"));
        assert!(!validate_coupon(""));
    }

    #[test]
    fn test_apply_valid_code() {
        let mut slot = CouponSlot::new();
        assert!(slot.apply("  discount10 "));

        assert!(slot.is_applied());
        assert_eq!(slot.applied_code(), Some("DISCOUNT10"));
        assert_eq!(slot.error(), None);
    }

    #[test]
    fn test_apply_invalid_code_leaves_slot_untouched() {
        let mut slot = CouponSlot::new();
        slot.apply("DISCOUNT10");

        assert!(!slot.apply("DISCOUNT11"));
        // Prior application survives, error is surfaced.
        assert_eq!(slot.applied_code(), Some("DISCOUNT10"));
        assert_eq!(slot.error(), Some(INVALID_CODE_MESSAGE));
    }

    #[test]
    fn test_success_clears_prior_error() {
        let mut slot = CouponSlot::new();
        slot.apply("WRONG");
        assert!(slot.error().is_some());

        slot.apply("DISCOUNT10");
        assert!(slot.error().is_none());
    }

    #[test]
    fn test_cancel() {
        let mut slot = CouponSlot::new();
        slot.apply("DISCOUNT10");

        slot.cancel();
        assert!(!slot.is_applied());
        assert_eq!(slot.applied_code(), None);
    }

    #[test]
    fn test_no_monetary_effect() {
        let mut slot = CouponSlot::new();
        slot.apply("DISCOUNT10");
        assert!(slot.discount_for(Money::from_paise(100_000)).is_zero());
    }
}
