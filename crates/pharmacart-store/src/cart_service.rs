//! # Cart Service
//!
//! The durable cart: `pharmacart_core::Cart` behind a mutex, serialized to
//! the key-value store so the cart survives an app restart.
//!
//! ## Persistence Discipline
//! ```text
//!   app start ──► load()            (read 'cart', fail open to empty)
//!   mutation  ──► mutate in memory, then persist the snapshot
//!   reads     ──► in-memory only, never touch storage
//! ```
//!
//! The in-memory cart is authoritative. A persist failure is surfaced to
//! the caller but the mutation has already happened; the next successful
//! persist writes the whole snapshot, so nothing is ever half-written.
//!
//! All mutations originate from user actions on a single interaction
//! thread; the mutex is there so clones of the service can be handed to
//! whichever component needs the cart, not for writer contention.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use pharmacart_core::{
    Cart, CheckoutRequest, OrderSummary, Product, ShippingPolicy, TaxRate,
};

use crate::error::StoreResult;
use crate::kv::KvRepository;

/// The storage key for the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Owns the cart and its persistence.
#[derive(Debug, Clone)]
pub struct CartService {
    kv: KvRepository,
    cart: Arc<Mutex<Cart>>,
}

impl CartService {
    /// Creates a service with an empty cart. Call [`load`](Self::load) at
    /// app start to restore a persisted cart.
    pub fn new(kv: KvRepository) -> Self {
        CartService {
            kv,
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Restores the cart from storage.
    ///
    /// Missing key means a fresh cart. A corrupt blob or a storage failure
    /// is logged and leaves the empty cart in place - losing a stale cart
    /// beats crashing at startup.
    pub async fn load(&self) {
        match self.kv.get_json::<Cart>(CART_STORAGE_KEY).await {
            Ok(Some(cart)) => {
                debug!(items = cart.item_count(), "Restored cart");
                *self.lock() = cart;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "Cart storage unavailable, starting empty");
            }
        }
    }

    /// Adds a product to the cart and persists the result.
    ///
    /// Merge semantics are the core cart's: an existing
    /// `(product_id, selected_unit)` line gets its quantity incremented.
    pub async fn add_item(
        &self,
        product: &Product,
        selected_unit: &str,
        quantity: i64,
    ) -> StoreResult<()> {
        {
            let mut cart = self.lock();
            cart.add_item(product, selected_unit, quantity)?;
        }
        self.persist().await
    }

    /// Removes a line and persists. Removing an absent pair is a no-op
    /// but still persists the (unchanged) snapshot.
    pub async fn remove_item(&self, product_id: &str, selected_unit: &str) -> StoreResult<()> {
        self.lock().remove_item(product_id, selected_unit);
        self.persist().await
    }

    /// Sets a line's quantity (0 removes) and persists.
    pub async fn update_quantity(
        &self,
        product_id: &str,
        selected_unit: &str,
        quantity: i64,
    ) -> StoreResult<()> {
        {
            let mut cart = self.lock();
            cart.update_quantity(product_id, selected_unit, quantity)?;
        }
        self.persist().await
    }

    /// Empties the cart and persists.
    pub async fn clear(&self) -> StoreResult<()> {
        self.lock().clear();
        self.persist().await
    }

    /// A copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Whether the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The displayed order summary for the current cart.
    pub fn summary(&self, rate: TaxRate, policy: &ShippingPolicy) -> OrderSummary {
        OrderSummary::compute(&self.lock(), rate, policy)
    }

    /// Freezes the cart and summary for the checkout collaborator.
    pub fn checkout_request(&self, rate: TaxRate, policy: &ShippingPolicy) -> CheckoutRequest {
        let cart = self.lock();
        let summary = OrderSummary::compute(&cart, rate, policy);
        CheckoutRequest::new(&cart, summary)
    }

    /// Writes the current snapshot to storage.
    async fn persist(&self) -> StoreResult<()> {
        let snapshot = self.snapshot();
        self.kv.put_json(CART_STORAGE_KEY, &snapshot).await
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        self.cart.lock().expect("cart mutex poisoned")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
