//! # Key-Value Repository
//!
//! The one durable surface of the client: JSON blobs under string keys,
//! backed by the `kv_entries` table. Mirrors the async-storage API the
//! frontend expects (get/set/remove), with typed JSON helpers on top.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;

/// Repository for key-value operations.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Reads the raw value under a key. `None` when the key is absent.
    pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_entries WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Writes a value under a key, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(key = %key, "kv put");

        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes the entry under a key.
    ///
    /// Returns whether an entry existed. Deleting an absent key is not an
    /// error.
    pub async fn delete(&self, key: &str) -> StoreResult<bool> {
        debug!(key = %key, "kv delete");

        let result = sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reads and deserializes a JSON value under a key.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serializes and writes a JSON value under a key.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.put(key, &raw).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    async fn test_kv() -> KvRepository {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.kv()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let kv = test_kv().await;
        assert_eq!(kv.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let kv = test_kv().await;
        kv.put("greeting", "hello").await.unwrap();
        assert_eq!(kv.get("greeting").await.unwrap().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let kv = test_kv().await;
        kv.put("k", "one").await.unwrap();
        kv.put("k", "two").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_delete() {
        let kv = test_kv().await;
        kv.put("k", "v").await.unwrap();

        assert!(kv.delete("k").await.unwrap());
        assert_eq!(kv.get("k").await.unwrap(), None);

        // Absent key: not an error, just false.
        assert!(!kv.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let kv = test_kv().await;
        let value = serde_json::json!({ "token": "abc", "user": { "name": "Asha" } });

        kv.put_json("blob", &value).await.unwrap();
        let restored: serde_json::Value = kv.get_json("blob").await.unwrap().unwrap();
        assert_eq!(restored, value);
    }

    #[tokio::test]
    async fn test_get_json_corrupt_value_errors() {
        let kv = test_kv().await;
        kv.put("blob", "{not json").await.unwrap();

        let result: StoreResult<Option<serde_json::Value>> = kv.get_json("blob").await;
        assert!(result.is_err());
    }
}
