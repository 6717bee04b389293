//! Cost attribution pipeline wiring

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::cost::{
    attribute, BillingQueryApi, CostCache, CostQueryFilter, GroupDimension, QueryWindow,
    ServiceCostSource, ServiceCostSummary,
};
use crate::domain::region::RegionDirectory;
use crate::domain::{AwsCredentials, DomainError};

/// Trailing window every attribution request covers
const TRAILING_WINDOW_DAYS: u64 = 14;

/// Runs the attribution pipeline: enabled regions, the two grouped billing
/// queries, and the join.
///
/// `all_service_costs` is uncached and discovers the service filter through
/// dimension enumeration; `service_cost` pins a single service and serves
/// repeated requests from the bucketed cost cache. Only region-lookup and
/// billing-query failures abort either operation.
#[derive(Clone)]
pub struct CostAttributionService {
    billing: Arc<dyn BillingQueryApi>,
    directory: RegionDirectory,
    cache: CostCache,
}

impl CostAttributionService {
    pub fn new(
        billing: Arc<dyn BillingQueryApi>,
        directory: RegionDirectory,
        cache: CostCache,
    ) -> Self {
        Self {
            billing,
            directory,
            cache,
        }
    }

    /// Attributes costs for every service with billing activity in the
    /// window. Always recomputes.
    pub async fn all_service_costs(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<Vec<ServiceCostSummary>, DomainError> {
        let window = QueryWindow::trailing_days(TRAILING_WINDOW_DAYS);
        let services = self.billing.list_service_names(credentials, &window).await?;

        self.compute(credentials, services, window).await
    }

    /// Attributes costs for one service, served from the cost cache within
    /// a bucket.
    pub async fn service_cost(
        &self,
        credentials: &AwsCredentials,
        service: &str,
    ) -> Result<Vec<ServiceCostSummary>, DomainError> {
        let window = QueryWindow::trailing_days(TRAILING_WINDOW_DAYS);

        self.cache
            .get_or_compute(credentials, service, || {
                self.compute(credentials, vec![service.to_string()], window)
            })
            .await
    }

    async fn compute(
        &self,
        credentials: &AwsCredentials,
        services: Vec<String>,
        window: QueryWindow,
    ) -> Result<Vec<ServiceCostSummary>, DomainError> {
        let regions = self.directory.fetch_regions(credentials).await?;
        let filter = CostQueryFilter::new(regions, services);

        // Both grouped queries run concurrently; the join waits for both
        let (by_service, by_region) = futures::try_join!(
            self.billing.query_grouped_cost(
                credentials,
                &filter,
                (GroupDimension::Service, GroupDimension::ResourceId),
                &window,
            ),
            self.billing.query_grouped_cost(
                credentials,
                &filter,
                (GroupDimension::Region, GroupDimension::ResourceId),
                &window,
            ),
        )?;

        debug!(
            service_rows = by_service.len(),
            region_rows = by_region.len(),
            "Joining grouped billing results"
        );

        Ok(attribute(&by_service, &by_region))
    }
}

#[async_trait]
impl ServiceCostSource for CostAttributionService {
    async fn service_cost(
        &self,
        credentials: &AwsCredentials,
        service: &str,
    ) -> Result<Vec<ServiceCostSummary>, DomainError> {
        CostAttributionService::service_cost(self, credentials, service).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cost::{CostGroup, MockBillingQueryApi};
    use crate::domain::region::MockRegionLister;
    use crate::domain::store::mock::MockStore;
    use crate::domain::store::RegionCacheKey;

    fn creds() -> AwsCredentials {
        AwsCredentials::new("AKIATEST", "secret", "us-east-1")
    }

    /// Directory pre-seeded so no region listing happens
    fn cached_directory(regions: &[&str]) -> RegionDirectory {
        let key = RegionCacheKey::new(creds().partition_key());
        let regions: Vec<String> = regions.iter().map(|r| r.to_string()).collect();
        let store = MockStore::new().with_entry(key.as_str(), &regions);
        RegionDirectory::new(Arc::new(MockRegionLister::new()), Arc::new(store))
    }

    fn is_service_grouping(group_by: (GroupDimension, GroupDimension)) -> bool {
        group_by == (GroupDimension::Service, GroupDimension::ResourceId)
    }

    #[tokio::test]
    async fn test_all_service_costs_joins_both_queries() {
        let mut billing = MockBillingQueryApi::new();
        billing
            .expect_list_service_names()
            .times(1)
            .returning(|_, _| Ok(vec!["S3".to_string()]));
        billing
            .expect_query_grouped_cost()
            .times(2)
            .returning(|_, filter, group_by, _| {
                assert_eq!(filter.regions, vec!["us-east-1", "eu-west-1"]);
                assert_eq!(filter.services, vec!["S3"]);

                if is_service_grouping(group_by) {
                    Ok(vec![
                        CostGroup::new("S3", "bucket-a", 5.0),
                        CostGroup::new("S3", "bucket-b", -2.0),
                    ])
                } else {
                    Ok(vec![
                        CostGroup::new("us-east-1", "bucket-a", 5.0),
                        CostGroup::new("eu-west-1", "bucket-b", -2.0),
                    ])
                }
            });

        let service = CostAttributionService::new(
            Arc::new(billing),
            cached_directory(&["us-east-1", "eu-west-1"]),
            CostCache::new(Arc::new(MockStore::new())),
        );

        let summaries = service.all_service_costs(&creds()).await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].service, "S3");
        assert_eq!(summaries[0].total_cost, 5.0);
        assert_eq!(summaries[0].resources[0].region, "us-east-1");
        assert_eq!(summaries[0].resources[1].region, "eu-west-1");
    }

    #[tokio::test]
    async fn test_service_cost_pins_service_without_enumeration() {
        let mut billing = MockBillingQueryApi::new();
        billing.expect_list_service_names().times(0);
        billing
            .expect_query_grouped_cost()
            .times(2)
            .returning(|_, filter, _, _| {
                assert_eq!(filter.services, vec!["Amazon Elastic Block Store"]);
                Ok(vec![])
            });

        let service = CostAttributionService::new(
            Arc::new(billing),
            cached_directory(&["us-east-1"]),
            CostCache::new(Arc::new(MockStore::new())),
        );

        let summaries = service
            .service_cost(&creds(), "Amazon Elastic Block Store")
            .await
            .unwrap();
        assert!(summaries.is_empty());
    }

    #[tokio::test]
    async fn test_service_cost_is_served_from_cache_within_bucket() {
        let mut billing = MockBillingQueryApi::new();
        billing
            .expect_query_grouped_cost()
            .times(2)
            .returning(|_, _, group_by, _| {
                if is_service_grouping(group_by) {
                    Ok(vec![CostGroup::new("S3", "bucket-a", 1.0)])
                } else {
                    Ok(vec![CostGroup::new("us-east-1", "bucket-a", 1.0)])
                }
            });

        let service = CostAttributionService::new(
            Arc::new(billing),
            cached_directory(&["us-east-1"]),
            CostCache::new(Arc::new(MockStore::new())),
        );

        let first = service.service_cost(&creds(), "S3").await.unwrap();
        // Second call inside the same bucket must not touch the billing API
        let second = service.service_cost(&creds(), "S3").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_billing_failure_propagates_and_is_not_cached() {
        let mut billing = MockBillingQueryApi::new();
        billing
            .expect_query_grouped_cost()
            .returning(|_, _, _, _| Err(DomainError::billing_query("throttled")));

        let cost_store = Arc::new(MockStore::new());
        let service = CostAttributionService::new(
            Arc::new(billing),
            cached_directory(&["us-east-1"]),
            CostCache::new(cost_store.clone()),
        );

        let result = service.service_cost(&creds(), "S3").await;

        assert!(matches!(result, Err(DomainError::BillingQuery { .. })));
        assert_eq!(cost_store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_region_failure_aborts_attribution() {
        let mut lister = MockRegionLister::new();
        lister
            .expect_list_all_regions()
            .returning(|_| Err(DomainError::region_lookup("denied")));

        let directory = RegionDirectory::new(Arc::new(lister), Arc::new(MockStore::new()));

        let mut billing = MockBillingQueryApi::new();
        billing.expect_query_grouped_cost().times(0);

        let service = CostAttributionService::new(
            Arc::new(billing),
            directory,
            CostCache::new(Arc::new(MockStore::new())),
        );

        let result = service.service_cost(&creds(), "S3").await;
        assert!(matches!(result, Err(DomainError::RegionLookup { .. })));
    }
}
