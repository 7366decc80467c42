//! # pharmacart-core: Pure Business Logic for PharmaCart
//!
//! This crate is the **heart** of the PharmaCart client. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PharmaCart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile Frontend (React Native)                  │   │
//! │  │    Store UI ──► Bag UI ──► Checkout UI ──► Payment UI           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ pharmacart-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   money   │  │   cart    │  │  pricing  │  │  coupon   │   │   │
//! │  │   │   Money   │  │   Cart    │  │  totals   │  │  slot +   │   │   │
//! │  │   │  TaxRate  │  │ LineItem  │  │  summary  │  │ validator │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               pharmacart-store (Storage Layer)                  │   │
//! │  │        SQLite key-value store, session, persistent cart         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (Product, TaxRate, ShippingPolicy)
//! - [`cart`] - The cart collection and its mutation rules
//! - [`pricing`] - Pure reducers turning a cart into an order summary
//! - [`coupon`] - Coupon validation and the applied-coupon slot
//! - [`checkout`] - Snapshot handed to the checkout collaborator
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation at the cart-mutation boundary
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every pricing function is deterministic and
//!    idempotent - same cart snapshot, same figures, any number of times
//! 2. **No I/O**: persistence lives in `pharmacart-store`, never here
//! 3. **Integer Money**: all monetary values are in paise (i64)
//! 4. **Explicit Errors**: malformed input is rejected at the cart boundary
//!    with typed errors, never inside the pricing functions
//!
//! ## Example Usage
//!
//! ```rust
//! use pharmacart_core::money::Money;
//! use pharmacart_core::types::TaxRate;
//!
//! // Create money from paise (never from floats!)
//! let price = Money::from_paise(10000); // ₹100.00
//!
//! // GST at the standard 18% rate, defined in exactly one place
//! let tax = price.calculate_tax(TaxRate::GST_STANDARD);
//! assert_eq!(tax.paise(), 1800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pharmacart_core::Money` instead of
// `use pharmacart_core::money::Money`

pub use cart::{Cart, LineItem};
pub use checkout::CheckoutRequest;
pub use coupon::CouponSlot;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::OrderSummary;
pub use types::{Product, ShippingPolicy, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unique line items allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
/// Can be made configurable in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
