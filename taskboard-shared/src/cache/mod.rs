/// Read-through cache for per-user resource lists
///
/// The resource layer consults this cache before PostgreSQL on reads and
/// deletes the affected keys on writes. The cache is an accelerator, never an
/// authority: every operation here is fail-open, meaning a cache-tier outage
/// degrades reads to database queries and makes invalidations best-effort
/// instead of failing the request.
///
/// - `keys`: the persisted key scheme and list TTL
/// - `store`: the `CacheStore` contract plus Redis and in-memory backends
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::cache::{keys, Cache};
/// use uuid::Uuid;
///
/// # async fn example(cache: Cache, owner: Uuid) {
/// let key = keys::board_list(owner);
/// if let Some(boards) = cache.get_json::<Vec<serde_json::Value>>(&key).await {
///     // cache hit
/// }
/// cache.invalidate(&[key]).await;
/// # }
/// ```

pub mod keys;
pub mod store;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::redis::client::RedisClient;
use store::{CacheStore, MemoryStore, RedisStore};

/// Cloneable handle over a cache backend
///
/// All methods are infallible from the caller's point of view: backend
/// errors are logged and swallowed, per the fail-open policy.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    /// Wraps an arbitrary backend
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Redis-backed cache over a connected client
    pub fn redis(client: RedisClient) -> Self {
        Self::new(Arc::new(RedisStore::new(client)))
    }

    /// In-process cache; used by tests and cache-less deployments
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Reads and deserializes a cached value
    ///
    /// Returns `None` on a miss, on a backend error, and on a payload that
    /// does not deserialize - all three fall through to the source of truth.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.store.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "cache payload did not deserialize, treating as miss");
                None
            }
        }
    }

    /// Serializes and writes a value with the list TTL
    ///
    /// Best-effort: on failure the entry simply is not cached and the next
    /// read falls through to the source of truth.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache serialization failed, skipping write");
                return;
            }
        };

        if let Err(e) = self.store.set(key, &bytes, keys::LIST_TTL).await {
            tracing::warn!(key, error = %e, "cache write failed");
        }
    }

    /// Deletes the given keys
    ///
    /// Best-effort: a failed delete is logged and does not fail the
    /// surrounding write. Until the TTL expires, the affected entries may
    /// serve stale data - that risk is accepted over failing mutations.
    pub async fn invalidate(&self, keys: &[String]) {
        if keys.is_empty() {
            return;
        }

        if let Err(e) = self.store.delete(keys).await {
            tracing::warn!(?keys, error = %e, "cache invalidation failed, entries stale until TTL expiry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use store::CacheError;

    /// Backend that fails every operation, standing in for a Redis outage.
    struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Err(CacheError::Backend("connection refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<(), CacheError> {
            Err(CacheError::Backend("connection refused".to_string()))
        }

        async fn delete(&self, _keys: &[String]) -> Result<(), CacheError> {
            Err(CacheError::Backend("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let cache = Cache::memory();
        cache.put_json("k", &vec!["a", "b"]).await;

        let back: Option<Vec<String>> = cache.get_json("k").await;
        assert_eq!(back, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let cache = Cache::memory();
        cache.put_json("k", &1u32).await;
        cache.invalidate(&["k".to_string()]).await;

        assert_eq!(cache.get_json::<u32>("k").await, None);
    }

    #[tokio::test]
    async fn test_broken_backend_degrades_to_miss() {
        let cache = Cache::new(Arc::new(BrokenStore));

        // Reads miss, writes and invalidations are swallowed; nothing panics
        // or errors.
        assert_eq!(cache.get_json::<u32>("k").await, None);
        cache.put_json("k", &1u32).await;
        cache.invalidate(&["k".to_string()]).await;
    }

    #[tokio::test]
    async fn test_undeserializable_payload_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("k", b"not json at all", Duration::from_secs(60))
            .await
            .unwrap();

        let cache = Cache::new(store);
        assert_eq!(cache.get_json::<Vec<u32>>("k").await, None);
    }

    #[tokio::test]
    async fn test_invalidate_empty_is_noop() {
        let cache = Cache::new(Arc::new(BrokenStore));
        // Must not even reach the backend.
        cache.invalidate(&[]).await;
    }
}
