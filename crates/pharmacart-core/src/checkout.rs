//! # Checkout Hand-off
//!
//! The frozen snapshot handed to the checkout/payment collaborator.
//!
//! The pricing engine never calls a payment gateway; it produces this
//! request and the navigation layer carries it to the payment screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, LineItem};
use crate::pricing::OrderSummary;

/// A cart snapshot plus its computed summary, frozen at checkout time.
///
/// The line items are copies: later cart mutations do not change a request
/// already handed to the payment screen.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Draft identifier (UUID v4), unique without coordination.
    pub id: String,

    /// Frozen line items, in display order.
    pub items: Vec<LineItem>,

    /// The summary as displayed when the buyer tapped "checkout".
    pub summary: OrderSummary,

    /// When the snapshot was taken.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl CheckoutRequest {
    /// Freezes the current cart and summary into a checkout request.
    pub fn new(cart: &Cart, summary: OrderSummary) -> Self {
        CheckoutRequest {
            id: Uuid::new_v4().to_string(),
            items: cart.items.clone(),
            summary,
            created_at: Utc::now(),
        }
    }
}
