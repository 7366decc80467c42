//! # Cart Module
//!
//! The in-memory cart collection and its mutation rules.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Frontend Action            Operation             Cart Change           │
//! │  ───────────────            ─────────             ───────────           │
//! │  Tap "Add to cart" ───────► add_item() ─────────► merge or append       │
//! │  Change quantity ─────────► update_quantity() ──► items[i].qty = n      │
//! │  Tap remove ──────────────► remove_item() ──────► retain(!matches)      │
//! │  Place order ─────────────► clear()                                     │
//! │                                                                         │
//! │  Identity: a line is keyed by (product_id, selected_unit).             │
//! │  Adding an existing key increments its quantity, never duplicates.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Insertion order is preserved for display; totals are order-independent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// One entry in the cart: a product reference plus a chosen packaging
/// variant and quantity.
///
/// ## Price Freezing
/// The price fields are captured when the item is added. If the catalog
/// record changes afterwards, the cart line keeps what the buyer saw.
///
/// ## Identity
/// `(product_id, selected_unit)` is the line's identity key and is unique
/// within a cart. The same product in two packaging variants is two lines.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Opaque catalog identifier (frozen).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Chosen packaging variant, e.g. "Strip of 10".
    pub selected_unit: String,

    /// Quantity in cart, always >= 1.
    pub quantity: i64,

    /// List price in paise at time of adding (frozen).
    pub price_paise: Option<i64>,

    /// Charged per-unit price in paise at time of adding (frozen).
    pub final_price_paise: Option<i64>,

    /// Catalog discount percent at time of adding (frozen).
    pub discount_percent: Option<u8>,

    /// When this line was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a validated line item from a catalog product.
    ///
    /// This is the cart-mutation boundary: malformed numerics are rejected
    /// here so every `LineItem` the pricing engine sees is well-formed.
    ///
    /// ## Rules
    /// - the unit must be a non-empty variant name
    /// - quantity must be 1..=999
    /// - at least one of list price / final price must be present
    /// - prices must be non-negative, discount percent <= 100
    pub fn new(product: &Product, selected_unit: &str, quantity: i64) -> Result<Self, ValidationError> {
        validation::validate_selected_unit(selected_unit)?;
        validation::validate_quantity(quantity)?;

        if product.price_paise.is_none() && product.final_price_paise.is_none() {
            return Err(ValidationError::MissingPrice {
                product_id: product.id.clone(),
            });
        }
        if let Some(paise) = product.price_paise {
            validation::validate_price_paise(paise)?;
        }
        if let Some(paise) = product.final_price_paise {
            validation::validate_price_paise(paise)?;
        }
        if let Some(percent) = product.discount_percent {
            validation::validate_discount_percent(percent)?;
        }

        Ok(LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            selected_unit: selected_unit.trim().to_string(),
            quantity,
            price_paise: product.price_paise,
            final_price_paise: product.final_price_paise,
            discount_percent: product.discount_percent,
            added_at: Utc::now(),
        })
    }

    /// The per-unit charged price, preferring the final price.
    ///
    /// Total over validated line items: the constructor guarantees at
    /// least one price field is present.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.final_price_paise.or(self.price_paise).unwrap_or(0))
    }

    /// Whether this line matches the given identity key.
    #[inline]
    pub fn matches(&self, product_id: &str, selected_unit: &str) -> bool {
        self.product_id == product_id && self.selected_unit == selected_unit
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered collection of line items.
///
/// ## Invariants
/// - Lines are unique by `(product_id, selected_unit)`
/// - Every line has quantity 1..=999
/// - At most 100 unique lines
///
/// Created empty at session start. In-memory only here; durability is the
/// store crate's concern (`pharmacart_store::CartService`).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, merging with an existing line.
    ///
    /// ## Behavior
    /// - If `(product.id, selected_unit)` is already in the cart, its
    ///   quantity is incremented by `quantity`.
    /// - Otherwise a new validated line is appended.
    ///
    /// ## Errors
    /// - `QuantityTooLarge` if the merged quantity would exceed 999
    /// - `CartTooLarge` if a new line would exceed 100 unique items
    /// - `Validation` for malformed product records or quantities
    pub fn add_item(&mut self, product: &Product, selected_unit: &str, quantity: i64) -> CoreResult<()> {
        validation::validate_quantity(quantity)?;

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.matches(&product.id, selected_unit))
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(LineItem::new(product, selected_unit, quantity)?);
        Ok(())
    }

    /// Removes the line matching the identity pair.
    ///
    /// Removing a pair that isn't in the cart is a no-op, not an error:
    /// the UI may fire a stale remove after the line is already gone.
    pub fn remove_item(&mut self, product_id: &str, selected_unit: &str) {
        self.items
            .retain(|line| !line.matches(product_id, selected_unit));
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - A pair not in the cart is a no-op, matching `remove_item`
    pub fn update_quantity(&mut self, product_id: &str, selected_unit: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            self.remove_item(product_id, selected_unit);
            return Ok(());
        }

        validation::validate_quantity(quantity)?;

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.matches(product_id, selected_unit))
        {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of unique lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, final_paise: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: None,
            price_paise: None,
            final_price_paise: Some(final_paise),
            discount_percent: None,
            units: vec!["Strip of 10".to_string(), "Strip of 15".to_string()],
            in_stock: true,
        }
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let product = test_product("A", 10000);

        cart.add_item(&product, "Strip of 10", 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.items[0].unit_price().paise(), 10000);
    }

    #[test]
    fn test_add_same_pair_merges_quantity() {
        let mut cart = Cart::new();
        let product = test_product("A", 10000);

        cart.add_item(&product, "Strip of 10", 1).unwrap();
        cart.add_item(&product, "Strip of 10", 2).unwrap();

        // One line, quantity 3 - never a duplicate entry.
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_same_product_different_unit_is_new_line() {
        let mut cart = Cart::new();
        let product = test_product("A", 10000);

        cart.add_item(&product, "Strip of 10", 1).unwrap();
        cart.add_item(&product, "Strip of 15", 1).unwrap();

        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_merge_respects_quantity_cap() {
        let mut cart = Cart::new();
        let product = test_product("A", 10000);

        cart.add_item(&product, "Strip of 10", 998).unwrap();
        let err = cart.add_item(&product, "Strip of 10", 2).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(cart.items[0].quantity, 998);
    }

    #[test]
    fn test_remove_missing_pair_is_noop() {
        let mut cart = Cart::new();
        let product = test_product("A", 10000);
        cart.add_item(&product, "Strip of 10", 1).unwrap();

        cart.remove_item("A", "Strip of 15");
        cart.remove_item("B", "Strip of 10");

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].selected_unit, "Strip of 10");
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let product = test_product("A", 10000);
        cart.add_item(&product, "Strip of 10", 1).unwrap();

        cart.remove_item("A", "Strip of 10");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        let product = test_product("A", 10000);
        cart.add_item(&product, "Strip of 10", 3).unwrap();

        cart.update_quantity("A", "Strip of 10", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_unpriced_product() {
        let mut cart = Cart::new();
        let mut product = test_product("A", 0);
        product.final_price_paise = None;
        product.price_paise = None;

        let err = cart.add_item(&product, "Strip of 10", 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MissingPrice { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_bad_quantity() {
        let mut cart = Cart::new();
        let product = test_product("A", 10000);

        assert!(cart.add_item(&product, "Strip of 10", 0).is_err());
        assert!(cart.add_item(&product, "Strip of 10", -2).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        let product = test_product("A", 10000);
        cart.add_item(&product, "Strip of 10", 2).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }
}
