//! # pharmacart-store: Storage Layer for PharmaCart
//!
//! This crate provides local durable storage for the PharmaCart client.
//! It uses SQLite as a key-value store with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PharmaCart Data Flow                               │
//! │                                                                         │
//! │  Frontend action (login, add to cart)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  pharmacart-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌────────────────┐   ┌─────────────────┐  │   │
//! │  │   │    Store     │   │ SessionManager │   │   CartService   │  │   │
//! │  │   │  (pool.rs)   │   │ 'jwtToken' key │   │   'cart' key    │  │   │
//! │  │   │  SqlitePool  │◄──│ login/logout   │   │ load-on-start   │  │   │
//! │  │   │  migrations  │   │ bearer header  │   │ save-on-mutate  │  │   │
//! │  │   └──────────────┘   └────────────────┘   └─────────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (single kv_entries table, JSON values)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`kv`] - The key-value repository (get/put/delete, JSON helpers)
//! - [`session`] - Auth session: explicit object, fails open to logged-out
//! - [`cart_service`] - Durable cart wrapping `pharmacart_core::Cart`
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pharmacart_store::{Store, StoreConfig, SessionManager, CartService};
//!
//! let store = Store::new(StoreConfig::new("pharmacart.db")).await?;
//!
//! let session = SessionManager::new(store.kv());
//! session.load().await; // restores auth state, fails open
//!
//! let cart = CartService::new(store.kv());
//! cart.load().await;
//! cart.add_item(&product, "Strip of 10", 1).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_service;
pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_service::{CartService, CART_STORAGE_KEY};
pub use error::{StoreError, StoreResult};
pub use kv::KvRepository;
pub use pool::{Store, StoreConfig};
pub use session::{AuthPayload, Session, SessionManager, AUTH_STORAGE_KEY};
