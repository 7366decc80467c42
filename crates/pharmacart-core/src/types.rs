//! # Domain Types
//!
//! Core domain types used throughout PharmaCart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │    TaxRate      │   │   ShippingPolicy    │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (opaque)    │   │  bps (u32)      │   │  Flat(fee)          │   │
//! │  │  name           │   │  1800 = 18%     │   │  FreeOverThreshold  │   │
//! │  │  price_paise    │   │  GST_STANDARD   │   │    { fee, threshold }│  │
//! │  │  units          │   └─────────────────┘   └─────────────────────┘   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Product ids come from the catalog service and are treated as opaque
//! strings; together with a selected unit they form a cart line's identity.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (standard GST on the catalog)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// The standard 18% GST applied to every order.
    ///
    /// This is the single place the rate is defined; pricing code takes a
    /// `TaxRate` parameter rather than hardcoding the percentage.
    pub const GST_STANDARD: TaxRate = TaxRate(1800);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Shipping Policy
// =============================================================================

/// How the shipping fee is derived from the order subtotal.
///
/// The client shipped with two different fee schedules on two screens and
/// never reconciled them. They are kept as two distinct, independently
/// configurable policies rather than merged:
///
/// - the checkout screen charges a flat ₹5.99;
/// - the shopping bag charges ₹99, waived above a ₹1999 subtotal.
///
/// Either way the fee applies only to a non-empty cart (see
/// [`crate::pricing::shipping`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingPolicy {
    /// Flat fee on every order.
    Flat { fee: Money },

    /// Flat fee waived when the subtotal exceeds the threshold.
    FreeOverThreshold { fee: Money, threshold: Money },
}

impl ShippingPolicy {
    /// The checkout screen's flat ₹5.99 fee.
    pub const fn checkout_flat() -> Self {
        ShippingPolicy::Flat {
            fee: Money::from_paise(599),
        }
    }

    /// The shopping bag's ₹99 fee with free delivery over ₹1999.
    pub const fn delivery_standard() -> Self {
        ShippingPolicy::FreeOverThreshold {
            fee: Money::from_paise(9900),
            threshold: Money::from_paise(199_900),
        }
    }

    /// Fee charged for an order with the given subtotal.
    ///
    /// The empty-cart exemption is handled by the pricing engine, not here:
    /// this answers "what would shipping cost for this subtotal".
    pub fn fee_for(&self, subtotal: Money) -> Money {
        match *self {
            ShippingPolicy::Flat { fee } => fee,
            ShippingPolicy::FreeOverThreshold { fee, threshold } => {
                if subtotal > threshold {
                    Money::zero()
                } else {
                    fee
                }
            }
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as supplied by the product detail and store screens.
///
/// The engine does not validate catalog schema beyond what the cart-mutation
/// boundary needs: a usable price and sane numerics. `price_paise` is the
/// list price, `final_price_paise` the charged price after any catalog
/// discount; either may be absent, but not both on a sellable product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque catalog identifier.
    pub id: String,

    /// Display name shown in the store and on the order summary.
    pub name: String,

    /// Optional description for the detail screen.
    pub description: Option<String>,

    /// List price in paise, before catalog discount.
    pub price_paise: Option<i64>,

    /// Charged per-unit price in paise. Preferred over `price_paise`
    /// when both are present.
    pub final_price_paise: Option<i64>,

    /// Catalog discount percent (0-100), used only to back-compute an
    /// implied list price when `price_paise` is absent.
    pub discount_percent: Option<u8>,

    /// Packaging variants the buyer can choose from, e.g. "Strip of 10".
    pub units: Vec<String>,

    /// Whether the product is currently sellable.
    pub in_stock: bool,
}

impl Product {
    /// Returns the per-unit charged price, preferring the final price.
    ///
    /// `None` when the catalog record carries no price at all; such a
    /// record is rejected at the cart boundary.
    pub fn unit_price(&self) -> Option<Money> {
        self.final_price_paise
            .or(self.price_paise)
            .map(Money::from_paise)
    }

    /// Returns the list price, when the catalog supplies one.
    pub fn list_price(&self) -> Option<Money> {
        self.price_paise.map(Money::from_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
