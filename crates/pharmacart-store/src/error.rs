//! # Storage Error Types
//!
//! Error types for the key-value store and the services built on it.
//!
//! ## Error Flow
//! ```text
//! SQLite error (sqlx::Error)
//!      │
//!      ▼
//! StoreError (this module) ← adds context and categorization
//!      │
//!      ▼
//! Frontend displays a user-friendly message
//! ```
//!
//! One deliberate exception: session loading never surfaces a StoreError.
//! A storage failure while restoring auth state is logged and fails open
//! to the logged-out state instead (see [`crate::session`]).

use thiserror::Error;

use pharmacart_core::CoreError;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored JSON blob could not be (de)serialized.
    ///
    /// ## When This Occurs
    /// - A corrupt or hand-edited value under a well-known key
    /// - A schema change between app versions
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A business rule rejected the mutation (wraps CoreError).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through() {
        let core = CoreError::CartTooLarge { max: 100 };
        let store: StoreError = core.into();
        // `transparent` keeps the domain message intact for the UI.
        assert_eq!(store.to_string(), "Cart cannot have more than 100 items");
    }

    #[test]
    fn test_serialization_error_wraps() {
        let bad: Result<pharmacart_core::Cart, _> = serde_json::from_str("not json");
        let store: StoreError = bad.unwrap_err().into();
        assert!(matches!(store, StoreError::Serialization(_)));
    }
}
