//! Time-bucketed cache around the cost attribution pipeline

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::store::{CacheStore, CacheStoreExt, CostCacheKey, TimeBucket};
use crate::domain::{AwsCredentials, DomainError};

use super::ServiceCostSummary;

/// Default bucket width. Billing data moves a few times a day at most, so
/// 15 minutes bounds staleness while absorbing dashboard polling.
pub const DEFAULT_BUCKET: Duration = Duration::from_secs(15 * 60);

/// Serves per-service attribution results from a durable store, keyed by
/// `(credential partition, service, time bucket)`.
///
/// A hit is returned unconditionally without revalidation; a new bucket
/// simply produces a new key, so entries are immutable once written. Old
/// buckets accumulate until externally pruned.
#[derive(Debug, Clone)]
pub struct CostCache {
    store: Arc<dyn CacheStore>,
    bucket: Duration,
}

impl CostCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            bucket: DEFAULT_BUCKET,
        }
    }

    pub fn with_bucket(mut self, bucket: Duration) -> Self {
        self.bucket = bucket;
        self
    }

    /// Returns the cached summaries for the current bucket, or runs
    /// `compute` and stores its result under the current bucket.
    ///
    /// Unreadable or corrupt entries count as a miss and are overwritten
    /// after recompute. Compute errors propagate and are never cached.
    pub async fn get_or_compute<F, Fut>(
        &self,
        credentials: &AwsCredentials,
        service: &str,
        compute: F,
    ) -> Result<Vec<ServiceCostSummary>, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ServiceCostSummary>, DomainError>>,
    {
        self.get_or_compute_at(Utc::now(), credentials, service, compute)
            .await
    }

    async fn get_or_compute_at<F, Fut>(
        &self,
        now: DateTime<Utc>,
        credentials: &AwsCredentials,
        service: &str,
        compute: F,
    ) -> Result<Vec<ServiceCostSummary>, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ServiceCostSummary>, DomainError>>,
    {
        let bucket = TimeBucket::floor(now, self.bucket);
        let key = CostCacheKey::new(credentials.partition_key(), service, bucket);

        match self.store.get::<Vec<ServiceCostSummary>>(key.as_str()).await {
            Ok(Some(summaries)) => {
                debug!(key = %key, "Cost cache hit");
                return Ok(summaries);
            }
            Ok(None) => {
                debug!(key = %key, "Cost cache miss");
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Cost cache entry unreadable, recomputing");
            }
        }

        let summaries = compute().await?;

        if let Err(err) = self.store.set(key.as_str(), &summaries).await {
            warn!(key = %key, error = %err, "Failed to persist cost cache entry");
        }

        Ok(summaries)
    }
}
