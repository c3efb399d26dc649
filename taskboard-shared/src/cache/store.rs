/// Cache store backends
///
/// [`CacheStore`] is the contract the resource layer caches through: byte
/// values, TTL on write, multi-key delete. Two implementations:
///
/// - [`RedisStore`]: production backend over the shared Redis client
/// - [`MemoryStore`]: in-process backend for tests and cache-less deployments
///
/// Backends report errors honestly; the fail-open policy (degrade to a miss
/// rather than fail the request) lives one level up in [`crate::cache::Cache`].

use async_trait::async_trait;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::redis::client::RedisClient;

/// Cache backend errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backend could not execute the operation
    #[error("cache backend error: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

/// Key-value store contract for the read-through cache
///
/// A miss is `Ok(None)`, never an error. `set` attaches a TTL so entries
/// expire even if an invalidation is lost. `delete` takes a batch because
/// writes routinely invalidate several keys at once.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads a value. A missing key is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Writes a value with an expiry.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    /// Deletes the given keys. Keys that do not exist are not an error.
    async fn delete(&self, keys: &[String]) -> Result<(), CacheError>;
}

/// Redis-backed cache store
pub struct RedisStore {
    client: RedisClient,
}

impl RedisStore {
    /// Wraps a connected Redis client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.client.get_connection();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.client.get_connection();
        // SET key value EX seconds, spelled out so the TTL argument type
        // does not depend on the redis crate's command helpers.
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), CacheError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_connection();
        conn.del::<_, ()>(keys.to_vec()).await?;
        Ok(())
    }
}

/// In-memory cache store
///
/// Honors TTLs on read: an expired entry is dropped and reported as a miss.
/// Used by tests and by deployments that run without a cache tier.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

struct MemoryEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_vec(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_set_get() {
        let store = MemoryStore::new();
        store
            .set("k", b"value", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_expiry() {
        let store = MemoryStore::new();
        store.set("k", b"value", Duration::ZERO).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_delete_batch() {
        let store = MemoryStore::new();
        store.set("a", b"1", Duration::from_secs(60)).await.unwrap();
        store.set("b", b"2", Duration::from_secs(60)).await.unwrap();
        store.set("c", b"3", Duration::from_secs(60)).await.unwrap();

        store
            .delete(&["a".to_string(), "b".to_string(), "nope".to_string()])
            .await
            .unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap(), None);
        assert_eq!(store.get("c").await.unwrap(), Some(b"3".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_store_overwrite_wins() {
        let store = MemoryStore::new();
        store
            .set("k", b"old", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .set("k", b"new", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(b"new".to_vec()));
    }
}
