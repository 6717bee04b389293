//! Enabled-region discovery with a durable per-account cache

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::domain::store::{CacheStore, CacheStoreExt, RegionCacheKey};
use crate::domain::{AwsCredentials, DomainError};

use super::{RegionLister, RegionStatus};

/// Discovers which regions are enabled by default for an account.
///
/// The result is written to a durable store keyed by the credential
/// partition and has no TTL: regions change rarely enough that a stale set
/// is acceptable until [`RegionDirectory::invalidate`] evicts it.
#[derive(Clone)]
pub struct RegionDirectory {
    lister: Arc<dyn RegionLister>,
    store: Arc<dyn CacheStore>,
}

impl RegionDirectory {
    pub fn new(lister: Arc<dyn RegionLister>, store: Arc<dyn CacheStore>) -> Self {
        Self { lister, store }
    }

    /// Returns the enabled-by-default region set for the account.
    ///
    /// Cache hits return without any network call. On a miss, all regions
    /// are listed and their opt statuses checked concurrently; any listing
    /// or status failure aborts the whole fetch and leaves the cache
    /// untouched, so a partial set is never returned or persisted.
    pub async fn fetch_regions(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<Vec<String>, DomainError> {
        let key = RegionCacheKey::new(credentials.partition_key());

        match self.store.get::<Vec<String>>(key.as_str()).await {
            Ok(Some(regions)) => {
                debug!(key = %key, count = regions.len(), "Region cache hit");
                return Ok(regions);
            }
            Ok(None) => {
                debug!(key = %key, "Region cache miss");
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Region cache unreadable, refetching");
            }
        }

        let all_regions = self.lister.list_all_regions(credentials).await?;

        let checks = all_regions.iter().map(|region| async move {
            let status = self.lister.region_status(credentials, region).await?;
            Ok::<_, DomainError>((region.clone(), status))
        });
        let statuses = try_join_all(checks).await?;

        let enabled: Vec<String> = statuses
            .into_iter()
            .filter(|(_, status)| *status == RegionStatus::EnabledByDefault)
            .map(|(region, _)| region)
            .collect();

        if let Err(err) = self.store.set(key.as_str(), &enabled).await {
            warn!(key = %key, error = %err, "Failed to persist region set");
        }

        debug!(count = enabled.len(), "Fetched enabled regions");
        Ok(enabled)
    }

    /// Evicts the cached region set for the account.
    ///
    /// Returns whether an entry existed. The next fetch recomputes.
    pub async fn invalidate(&self, credentials: &AwsCredentials) -> Result<bool, DomainError> {
        let key = RegionCacheKey::new(credentials.partition_key());
        self.store.delete(key.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::region::MockRegionLister;
    use crate::domain::store::mock::MockStore;
    use mockall::predicate::eq;

    fn creds() -> AwsCredentials {
        AwsCredentials::new("AKIATEST", "secret", "us-east-1")
    }

    fn region_key() -> String {
        RegionCacheKey::new(creds().partition_key())
            .as_str()
            .to_string()
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let mut lister = MockRegionLister::new();
        lister.expect_list_all_regions().times(0);
        lister.expect_region_status().times(0);

        let store = MockStore::new().with_entry(
            &region_key(),
            &vec!["us-east-1".to_string(), "eu-west-1".to_string()],
        );

        let directory = RegionDirectory::new(Arc::new(lister), Arc::new(store));
        let regions = directory.fetch_regions(&creds()).await.unwrap();

        assert_eq!(regions, vec!["us-east-1", "eu-west-1"]);
    }

    #[tokio::test]
    async fn test_miss_keeps_only_enabled_by_default() {
        let mut lister = MockRegionLister::new();
        lister.expect_list_all_regions().times(1).returning(|_| {
            Ok(vec![
                "us-east-1".to_string(),
                "eu-west-1".to_string(),
                "ap-east-1".to_string(),
            ])
        });
        lister
            .expect_region_status()
            .with(mockall::predicate::always(), eq("us-east-1"))
            .returning(|_, _| Ok(RegionStatus::EnabledByDefault));
        lister
            .expect_region_status()
            .with(mockall::predicate::always(), eq("eu-west-1"))
            .returning(|_, _| Ok(RegionStatus::EnabledByDefault));
        lister
            .expect_region_status()
            .with(mockall::predicate::always(), eq("ap-east-1"))
            .returning(|_, _| Ok(RegionStatus::Disabled));

        let store = Arc::new(MockStore::new());
        let directory = RegionDirectory::new(Arc::new(lister), store.clone());

        let regions = directory.fetch_regions(&creds()).await.unwrap();
        assert_eq!(regions, vec!["us-east-1", "eu-west-1"]);

        // The set was persisted for the next request
        let cached: Vec<String> =
            serde_json::from_str(&store.raw_entry(&region_key()).unwrap()).unwrap();
        assert_eq!(cached, regions);
    }

    #[tokio::test]
    async fn test_status_failure_aborts_without_cache_write() {
        let mut lister = MockRegionLister::new();
        lister
            .expect_list_all_regions()
            .returning(|_| Ok(vec!["us-east-1".to_string(), "eu-west-1".to_string()]));
        lister
            .expect_region_status()
            .with(mockall::predicate::always(), eq("us-east-1"))
            .returning(|_, _| Ok(RegionStatus::EnabledByDefault));
        lister
            .expect_region_status()
            .with(mockall::predicate::always(), eq("eu-west-1"))
            .returning(|_, _| Err(DomainError::region_lookup("opt status unavailable")));

        let store = Arc::new(MockStore::new());
        let directory = RegionDirectory::new(Arc::new(lister), store.clone());

        let result = directory.fetch_regions(&creds()).await;
        assert!(matches!(result, Err(DomainError::RegionLookup { .. })));
        assert!(store.raw_entry(&region_key()).is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_cache_treated_as_miss() {
        let mut lister = MockRegionLister::new();
        lister
            .expect_list_all_regions()
            .times(1)
            .returning(|_| Ok(vec!["us-east-1".to_string()]));
        lister
            .expect_region_status()
            .returning(|_, _| Ok(RegionStatus::EnabledByDefault));

        let store = MockStore::new().with_corrupt_entry(&region_key());
        let directory = RegionDirectory::new(Arc::new(lister), Arc::new(store));

        let regions = directory.fetch_regions(&creds()).await.unwrap();
        assert_eq!(regions, vec!["us-east-1"]);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let mut lister = MockRegionLister::new();
        lister
            .expect_list_all_regions()
            .times(1)
            .returning(|_| Ok(vec!["us-east-1".to_string()]));
        lister
            .expect_region_status()
            .returning(|_, _| Ok(RegionStatus::EnabledByDefault));

        let store = Arc::new(
            MockStore::new().with_entry(&region_key(), &vec!["stale-region".to_string()]),
        );
        let directory = RegionDirectory::new(Arc::new(lister), store.clone());

        assert!(directory.invalidate(&creds()).await.unwrap());

        let regions = directory.fetch_regions(&creds()).await.unwrap();
        assert_eq!(regions, vec!["us-east-1"]);
    }
}
