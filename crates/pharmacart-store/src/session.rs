//! # Auth Session
//!
//! The authentication session as an explicit object with a lifecycle,
//! rather than ambient global state:
//!
//! ```text
//!   created at app start ──► load() restores from storage
//!        │
//!        ├── login(token, user) ──► persisted + in-memory session
//!        │
//!        └── logout() ──► stored entry deleted, session cleared
//! ```
//!
//! The persisted blob lives under the single key `jwtToken` as JSON
//! `{ token, user }`; the user is an opaque payload the backend returned
//! at login. There is no token refresh, expiry or revocation.
//!
//! ## Failure Semantics
//! Storage failures while *restoring* state are logged and fail open to
//! the logged-out state - the app never crashes because local storage is
//! unavailable. Failures while *persisting* a login are surfaced to the
//! caller and leave the in-memory session unchanged.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::StoreResult;
use crate::kv::KvRepository;

/// The storage key for the auth blob. Matches the key the mobile client
/// has always used, so an upgrade picks up an existing login.
pub const AUTH_STORAGE_KEY: &str = "jwtToken";

// =============================================================================
// Payload and Session
// =============================================================================

/// The persisted auth blob, exactly as the login endpoint returned it.
///
/// Both fields are optional on read: a blob written by an older client
/// version may be missing either. A blob without a token means logged out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: Option<String>,
    pub user: Option<Value>,
}

/// An active authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token for outbound HTTP calls.
    pub token: String,

    /// Opaque user payload from the login response.
    pub user: Option<Value>,

    /// When this session object was populated (not the token's issue time;
    /// the token is opaque here).
    pub started_at: DateTime<Utc>,
}

// =============================================================================
// Session Manager
// =============================================================================

/// Owns the current session and its persistence.
///
/// ## Thread Safety
/// The session is behind `Arc<Mutex<..>>` so clones share state; the lock
/// is held only for in-memory reads and writes, never across an await.
#[derive(Debug, Clone)]
pub struct SessionManager {
    kv: KvRepository,
    inner: Arc<Mutex<Option<Session>>>,
}

impl SessionManager {
    /// Creates a manager with no session. Call [`load`](Self::load) at app
    /// start to restore a persisted login.
    pub fn new(kv: KvRepository) -> Self {
        SessionManager {
            kv,
            inner: Arc::new(Mutex::new(None)),
        }
    }

    /// Restores the session from storage.
    ///
    /// Returns whether a session is active afterwards. Never errors:
    /// missing blob, blob without a token, corrupt JSON and storage
    /// failures all resolve to logged-out, the last two with a warning.
    pub async fn load(&self) -> bool {
        let restored = match self.kv.get_json::<AuthPayload>(AUTH_STORAGE_KEY).await {
            Ok(Some(payload)) => match payload.token {
                Some(token) if !token.is_empty() => {
                    info!("Restored authenticated session");
                    Some(Session {
                        token,
                        user: payload.user,
                        started_at: Utc::now(),
                    })
                }
                _ => None,
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "Auth storage unavailable, continuing logged out");
                None
            }
        };

        let active = restored.is_some();
        *self.lock() = restored;
        active
    }

    /// Persists a successful login and populates the session.
    ///
    /// On a storage failure the error is returned and the in-memory state
    /// stays as it was.
    pub async fn login(&self, token: impl Into<String>, user: Option<Value>) -> StoreResult<()> {
        let token = token.into();
        let payload = AuthPayload {
            token: Some(token.clone()),
            user: user.clone(),
        };

        self.kv.put_json(AUTH_STORAGE_KEY, &payload).await?;

        *self.lock() = Some(Session {
            token,
            user,
            started_at: Utc::now(),
        });
        info!("Session started");
        Ok(())
    }

    /// Deletes the stored entry and clears the session.
    ///
    /// The in-memory session is cleared even when the delete fails; a
    /// stale blob is picked up again on next start, but the user asked to
    /// be logged out now.
    pub async fn logout(&self) {
        if let Err(err) = self.kv.delete(AUTH_STORAGE_KEY).await {
            warn!(error = %err, "Failed to delete stored session");
        }
        *self.lock() = None;
        info!("Session ended");
    }

    /// Whether a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    /// The current bearer token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.lock().as_ref().map(|s| s.token.clone())
    }

    /// The `Authorization` header value to attach to outbound HTTP calls.
    pub fn bearer_header(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }

    /// The opaque user payload from the login response, if any.
    pub fn current_user(&self) -> Option<Value> {
        self.lock().as_ref().and_then(|s| s.user.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.inner.lock().expect("session mutex poisoned")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use serde_json::json;

    async fn test_manager() -> (SessionManager, KvRepository) {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        (SessionManager::new(store.kv()), store.kv())
    }

    #[tokio::test]
    async fn test_load_from_empty_store_is_logged_out() {
        let (manager, _) = test_manager().await;
        assert!(!manager.load().await);
        assert!(!manager.is_authenticated());
        assert_eq!(manager.bearer_header(), None);
    }

    #[tokio::test]
    async fn test_login_then_load() {
        let (manager, kv) = test_manager().await;
        manager
            .login("tok-123", Some(json!({ "name": "Asha" })))
            .await
            .unwrap();

        assert!(manager.is_authenticated());
        assert_eq!(manager.bearer_header().as_deref(), Some("Bearer tok-123"));
        assert_eq!(manager.current_user(), Some(json!({ "name": "Asha" })));

        // A fresh manager over the same store restores the session.
        let restored = SessionManager::new(kv);
        assert!(restored.load().await);
        assert_eq!(restored.token().as_deref(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_logout_clears_store_and_memory() {
        let (manager, kv) = test_manager().await;
        manager.login("tok-123", None).await.unwrap();

        manager.logout().await;
        assert!(!manager.is_authenticated());
        assert_eq!(kv.get(AUTH_STORAGE_KEY).await.unwrap(), None);

        let restored = SessionManager::new(kv);
        assert!(!restored.load().await);
    }

    #[tokio::test]
    async fn test_blob_without_token_is_logged_out() {
        let (manager, kv) = test_manager().await;
        kv.put(AUTH_STORAGE_KEY, r#"{"user":{"name":"Asha"}}"#)
            .await
            .unwrap();

        assert!(!manager.load().await);
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_corrupt_blob_fails_open() {
        let (manager, kv) = test_manager().await;
        kv.put(AUTH_STORAGE_KEY, "{definitely not json").await.unwrap();

        // No panic, no error: logged out.
        assert!(!manager.load().await);
        assert!(!manager.is_authenticated());
    }
}
