//! In-memory cache store implementation using moka

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::{CacheStore, DomainError};

/// Process-local store with the same contract as the file store.
///
/// Entries have no TTL, matching the durable semantics: region sets live
/// until invalidated and cost entries are superseded by newer buckets.
/// Capacity-based eviction only protects against unbounded growth of old
/// cost buckets.
#[derive(Debug)]
pub struct InMemoryStore {
    cache: MokaCache<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            cache: MokaCache::builder().max_capacity(max_capacity).build(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cache.get(key).await)
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let existed = self.cache.get(key).await.is_some();
        self.cache.remove(key).await;
        Ok(existed)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CacheStoreExt;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryStore::new();

        store.set("key1", &"value1").await.unwrap();

        let result: Option<String> = store.get("key1").await.unwrap();
        assert_eq!(result, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = InMemoryStore::new();

        let result: Option<String> = store.get("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryStore::new();

        store.set("key1", &"value1").await.unwrap();

        assert!(store.delete("key1").await.unwrap());
        assert!(!store.delete("key1").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemoryStore::new();

        store.set("key1", &"value1").await.unwrap();
        store.set("key2", &"value2").await.unwrap();

        store.clear().await.unwrap();

        let result: Option<String> = store.get("key1").await.unwrap();
        assert!(result.is_none());
    }
}
