//! Cache store trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::domain::DomainError;

/// Durable key-value store backing the region and cost caches.
///
/// Entries have no TTL: staleness is handled by the keys themselves (region
/// entries live until explicitly invalidated, cost entries embed a time
/// bucket). The trait uses JSON strings internally to be dyn-compatible;
/// use the [`CacheStoreExt`] helpers for typed access.
///
/// Writes must be atomic enough that a concurrent reader never observes a
/// partial value. Concurrent writers racing on the same key is acceptable:
/// both compute the same value from the same inputs, so last-writer-wins.
#[async_trait]
pub trait CacheStore: Send + Sync + Debug {
    /// Gets a raw JSON value, `None` when the key is absent
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Sets a raw JSON value
    async fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Deletes a value, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Clears all entries from the store
    async fn clear(&self) -> Result<(), DomainError>;
}

/// Extension trait providing typed get/set operations
pub trait CacheStoreExt: CacheStore {
    /// Gets a typed value from the store
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::cache(format!("Failed to deserialize cache value: {}", e))
                    })?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }
    }

    /// Sets a typed value in the store
    fn set<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::cache(format!("Failed to serialize cache value: {}", e))
            })?;
            self.set_raw(key, &data).await
        }
    }
}

// Blanket implementation for all types implementing CacheStore
impl<T: CacheStore + ?Sized> CacheStoreExt for T {}
