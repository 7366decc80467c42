//! # Pricing Engine
//!
//! Pure reducer functions that turn a cart snapshot into the displayed
//! order summary: subtotal, discount, tax, shipping and grand total.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pricing Data Flow                                 │
//! │                                                                         │
//! │  LineItem ──► item_total ──┐                                            │
//! │           └─► item_discount│                                            │
//! │                            ▼                                            │
//! │  Cart ───► cart_subtotal ──┬──► tax (GST 18%) ──┐                       │
//! │        └─► cart_discount   │                    ├──► grand_total        │
//! │                            └──► shipping ───────┘                       │
//! │                                                                         │
//! │  Same cart snapshot in, same figures out, any number of times.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount figure is informational: the grand total does not subtract
//! it, matching the shipped client. A coupon-derived monetary effect would
//! hook in through [`crate::coupon::CouponSlot::discount_for`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, LineItem};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ShippingPolicy, TaxRate};

// =============================================================================
// Per-Item Figures
// =============================================================================

/// Line total: per-unit charged price times quantity.
///
/// The unit price prefers `final_price` over `price` when both are present.
///
/// ## Example
/// ```rust
/// use pharmacart_core::{Cart, Product};
/// use pharmacart_core::pricing::item_total;
///
/// let product = Product {
///     id: "A".into(),
///     name: "Cetirizine".into(),
///     description: None,
///     price_paise: Some(15000),
///     final_price_paise: Some(10000),
///     discount_percent: None,
///     units: vec!["Strip of 10".into()],
///     in_stock: true,
/// };
/// let mut cart = Cart::new();
/// cart.add_item(&product, "Strip of 10", 2).unwrap();
/// assert_eq!(item_total(&cart.items[0]).paise(), 20000); // ₹200
/// ```
pub fn item_total(item: &LineItem) -> Money {
    item.unit_price().multiply_quantity(item.quantity)
}

/// Per-line discount against the implied original price.
///
/// The original price is the list price when present. When only a final
/// price and a discount percent are known, the original is back-computed as
/// `final * 100 / (100 - percent)`. A percent of 100 would divide by zero;
/// that is an invalid input and the discount falls back to zero rather than
/// propagating an infinite figure.
pub fn item_discount(item: &LineItem) -> Money {
    let unit = item.unit_price();
    let original = match implied_original_price(item) {
        Ok(price) => price,
        // Invalid discount input: zero discount, never Infinity/NaN.
        Err(_) => return Money::zero(),
    };
    (original - unit).multiply_quantity(item.quantity)
}

/// Back-computes the original (pre-discount) per-unit price.
///
/// Priority: explicit list price, then back-calculation from the discount
/// percent, then the charged price itself (discount zero).
fn implied_original_price(item: &LineItem) -> CoreResult<Money> {
    if let Some(paise) = item.price_paise {
        return Ok(Money::from_paise(paise));
    }

    match item.discount_percent {
        Some(percent) if percent >= 100 => Err(CoreError::InvalidDiscount {
            product_id: item.product_id.clone(),
            percent,
        }),
        Some(percent) if percent > 0 => {
            let final_paise = item.final_price_paise.unwrap_or(0) as i128;
            let remainder = (100 - percent as i128) as i128;
            // Rounded integer division, same scheme as Money::calculate_tax.
            let original = (final_paise * 100 + remainder / 2) / remainder;
            Ok(Money::from_paise(original as i64))
        }
        _ => Ok(item.unit_price()),
    }
}

// =============================================================================
// Aggregate Figures
// =============================================================================

/// Sum of line totals. Empty cart is zero.
pub fn cart_subtotal(cart: &Cart) -> Money {
    cart.items
        .iter()
        .map(item_total)
        .fold(Money::zero(), |acc, total| acc + total)
}

/// Sum of line discounts. Informational display figure only.
pub fn cart_discount(cart: &Cart) -> Money {
    cart.items
        .iter()
        .map(item_discount)
        .fold(Money::zero(), |acc, discount| acc + discount)
}

/// Tax on the cart subtotal at the given rate.
///
/// Callers pass [`TaxRate::GST_STANDARD`]; the rate is a policy constant
/// defined in exactly one place, never a literal at the call site.
pub fn tax(cart: &Cart, rate: TaxRate) -> Money {
    cart_subtotal(cart).calculate_tax(rate)
}

/// Shipping fee for the cart under the given policy.
///
/// An empty cart ships nothing and pays nothing, regardless of policy.
pub fn shipping(cart: &Cart, policy: &ShippingPolicy) -> Money {
    if cart.is_empty() {
        return Money::zero();
    }
    policy.fee_for(cart_subtotal(cart))
}

/// Grand total: subtotal + tax + shipping.
///
/// The discount figure is **not** subtracted here; it is displayed
/// separately, exactly as the client behaves in production. Wiring a
/// coupon-derived reduction is the extension point in the coupon module.
pub fn grand_total(cart: &Cart, rate: TaxRate, policy: &ShippingPolicy) -> Money {
    cart_subtotal(cart) + tax(cart, rate) + shipping(cart, policy)
}

// =============================================================================
// Order Summary
// =============================================================================

/// The displayed order summary, every figure derived from one cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Computes all figures for a cart snapshot.
    pub fn compute(cart: &Cart, rate: TaxRate, policy: &ShippingPolicy) -> Self {
        let subtotal = cart_subtotal(cart);
        let tax = subtotal.calculate_tax(rate);
        let shipping = shipping(cart, policy);
        OrderSummary {
            subtotal,
            discount: cart_discount(cart),
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn product(id: &str, price: Option<i64>, final_price: Option<i64>, percent: Option<u8>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: None,
            price_paise: price,
            final_price_paise: final_price,
            discount_percent: percent,
            units: vec!["Strip of 10".to_string()],
            in_stock: true,
        }
    }

    fn single_item_cart(p: &Product, qty: i64) -> Cart {
        let mut cart = Cart::new();
        cart.add_item(p, "Strip of 10", qty).unwrap();
        cart
    }

    #[test]
    fn test_reference_scenario() {
        // {final ₹100, list ₹150, qty 2}:
        // item_total ₹200, item_discount ₹100, tax ₹36.
        let p = product("A", Some(15000), Some(10000), None);
        let cart = single_item_cart(&p, 2);

        assert_eq!(item_total(&cart.items[0]).paise(), 20000);
        assert_eq!(item_discount(&cart.items[0]).paise(), 10000);
        assert_eq!(tax(&cart, TaxRate::GST_STANDARD).paise(), 3600);
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let cart = Cart::new();
        let policy = ShippingPolicy::checkout_flat();

        assert!(cart_subtotal(&cart).is_zero());
        assert!(cart_discount(&cart).is_zero());
        assert!(shipping(&cart, &policy).is_zero());
        assert!(grand_total(&cart, TaxRate::GST_STANDARD, &policy).is_zero());
    }

    #[test]
    fn test_subtotal_is_sum_of_item_totals() {
        let a = product("A", None, Some(10000), None);
        let b = product("B", None, Some(2500), None);
        let mut cart = Cart::new();
        cart.add_item(&a, "Strip of 10", 2).unwrap();
        cart.add_item(&b, "Strip of 10", 3).unwrap();

        let expected: i64 = cart.items.iter().map(|i| item_total(i).paise()).sum();
        assert_eq!(cart_subtotal(&cart).paise(), expected);
        assert_eq!(expected, 27500);
    }

    #[test]
    fn test_item_total_monotone_in_quantity() {
        let p = product("A", None, Some(4999), None);
        let mut previous = Money::zero();
        for qty in 1..=10 {
            let cart = single_item_cart(&p, qty);
            let total = item_total(&cart.items[0]);
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn test_discount_back_computed_from_percent() {
        // final ₹80 at 20% off: original = 8000 * 100 / 80 = ₹100,
        // discount = ₹20 per unit.
        let p = product("A", None, Some(8000), Some(20));
        let cart = single_item_cart(&p, 1);
        assert_eq!(item_discount(&cart.items[0]).paise(), 2000);
    }

    #[test]
    fn test_discount_percent_100_falls_back_to_zero() {
        // Would divide by zero; documented fallback is a zero discount.
        let p = product("A", None, Some(5000), Some(100));
        let cart = single_item_cart(&p, 1);
        assert_eq!(item_discount(&cart.items[0]).paise(), 0);
    }

    #[test]
    fn test_discount_zero_when_only_final_price_known() {
        let p = product("A", None, Some(5000), None);
        let cart = single_item_cart(&p, 4);
        assert!(item_discount(&cart.items[0]).is_zero());
    }

    #[test]
    fn test_list_price_wins_over_back_calculation() {
        // Both a list price and a percent present: the explicit list
        // price is the original, the percent is ignored.
        let p = product("A", Some(12000), Some(10000), Some(50));
        let cart = single_item_cart(&p, 1);
        assert_eq!(item_discount(&cart.items[0]).paise(), 2000);
    }

    #[test]
    fn test_shipping_flat_policy() {
        let p = product("A", None, Some(10000), None);
        let cart = single_item_cart(&p, 1);
        let policy = ShippingPolicy::checkout_flat();
        assert_eq!(shipping(&cart, &policy).paise(), 599);
    }

    #[test]
    fn test_shipping_free_over_threshold() {
        let policy = ShippingPolicy::delivery_standard();

        let cheap = single_item_cart(&product("A", None, Some(10000), None), 1);
        assert_eq!(shipping(&cheap, &policy).paise(), 9900);

        // ₹2000 subtotal clears the ₹1999 threshold.
        let pricey = single_item_cart(&product("B", None, Some(200_000), None), 1);
        assert_eq!(shipping(&pricey, &policy).paise(), 0);
    }

    #[test]
    fn test_grand_total_components() {
        let p = product("A", None, Some(10000), None);
        let cart = single_item_cart(&p, 2);
        let policy = ShippingPolicy::checkout_flat();

        // subtotal ₹200 + tax ₹36 + shipping ₹5.99
        assert_eq!(
            grand_total(&cart, TaxRate::GST_STANDARD, &policy).paise(),
            20000 + 3600 + 599
        );
    }

    #[test]
    fn test_grand_total_does_not_subtract_discount() {
        let p = product("A", Some(15000), Some(10000), None);
        let cart = single_item_cart(&p, 2);
        let policy = ShippingPolicy::checkout_flat();

        let summary = OrderSummary::compute(&cart, TaxRate::GST_STANDARD, &policy);
        assert_eq!(summary.discount.paise(), 10000);
        // Total is subtotal + tax + shipping, discount untouched.
        assert_eq!(
            summary.total,
            summary.subtotal + summary.tax + summary.shipping
        );
    }

    #[test]
    fn test_summary_matches_free_functions() {
        let p = product("A", None, Some(7500), Some(10));
        let cart = single_item_cart(&p, 3);
        let policy = ShippingPolicy::delivery_standard();
        let rate = TaxRate::GST_STANDARD;

        let summary = OrderSummary::compute(&cart, rate, &policy);
        assert_eq!(summary.subtotal, cart_subtotal(&cart));
        assert_eq!(summary.discount, cart_discount(&cart));
        assert_eq!(summary.tax, tax(&cart, rate));
        assert_eq!(summary.shipping, shipping(&cart, &policy));
        assert_eq!(summary.total, grand_total(&cart, rate, &policy));
    }
}
