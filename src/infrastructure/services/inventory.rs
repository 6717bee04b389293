//! Region-fanned inventory listings with cost attachment

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::domain::cost::{CostMap, ServiceCostSource, EBS_SERVICE, EC2_COMPUTE_SERVICE, S3_SERVICE};
use crate::domain::inventory::{
    list_across_regions, BucketInventory, BucketLister, EbsVolume, Ec2Instance, InstanceLister,
    ObjectInventory, ObjectLister, ReservedCapacity, ReservedCapacityLister, VolumeLister,
};
use crate::domain::region::RegionDirectory;
use crate::domain::{AwsCredentials, DomainError};

/// Default bound on each regional inventory call
pub const DEFAULT_REGIONAL_TIMEOUT: Duration = Duration::from_secs(30);

/// Attributed costs for one service, degraded to an empty map when the
/// pipeline is unavailable. A broken billing API must not take the
/// inventory listing down with it.
async fn cost_map_or_empty(
    costs: &dyn ServiceCostSource,
    credentials: &AwsCredentials,
    service: &str,
) -> CostMap {
    match costs.service_cost(credentials, service).await {
        Ok(summaries) => CostMap::from_summaries(&summaries),
        Err(err) => {
            warn!(service = service, error = %err, "Cost attribution unavailable, defaulting costs to 0");
            CostMap::default()
        }
    }
}

/// EC2 inventory: instances and volumes fanned out across the enabled
/// regions, reserved capacity through the optional capability trait.
#[derive(Clone)]
pub struct Ec2InventoryService {
    instances: Arc<dyn InstanceLister>,
    volumes: Arc<dyn VolumeLister>,
    reserved: Arc<dyn ReservedCapacityLister>,
    directory: RegionDirectory,
    costs: Arc<dyn ServiceCostSource>,
    regional_timeout: Duration,
}

impl Ec2InventoryService {
    pub fn new(
        instances: Arc<dyn InstanceLister>,
        volumes: Arc<dyn VolumeLister>,
        reserved: Arc<dyn ReservedCapacityLister>,
        directory: RegionDirectory,
        costs: Arc<dyn ServiceCostSource>,
    ) -> Self {
        Self {
            instances,
            volumes,
            reserved,
            directory,
            costs,
            regional_timeout: DEFAULT_REGIONAL_TIMEOUT,
        }
    }

    pub fn with_regional_timeout(mut self, timeout: Duration) -> Self {
        self.regional_timeout = timeout;
        self
    }

    /// All instances across the enabled regions, with attributed costs.
    ///
    /// A failed region contributes nothing; a failed cost pipeline leaves
    /// every cost at 0. Only the region lookup can abort the listing.
    pub async fn list_instances(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<Vec<Ec2Instance>, DomainError> {
        let regions = self.directory.fetch_regions(credentials).await?;

        let mut instances = list_across_regions(&regions, self.regional_timeout, |region| {
            let lister = self.instances.clone();
            async move { lister.list_instances(credentials, &region).await }
        })
        .await;

        let cost_map =
            cost_map_or_empty(self.costs.as_ref(), credentials, EC2_COMPUTE_SERVICE).await;
        cost_map.attach(&mut instances);

        Ok(instances)
    }

    /// All volumes across the enabled regions, with attributed costs.
    pub async fn list_volumes(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<Vec<EbsVolume>, DomainError> {
        let regions = self.directory.fetch_regions(credentials).await?;

        let mut volumes = list_across_regions(&regions, self.regional_timeout, |region| {
            let lister = self.volumes.clone();
            async move { lister.list_volumes(credentials, &region).await }
        })
        .await;

        let cost_map = cost_map_or_empty(self.costs.as_ref(), credentials, EBS_SERVICE).await;
        cost_map.attach(&mut volumes);

        Ok(volumes)
    }

    /// Reserved capacity across the enabled regions. Reservations carry no
    /// attributed cost.
    pub async fn list_reserved_capacity(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<Vec<ReservedCapacity>, DomainError> {
        let regions = self.directory.fetch_regions(credentials).await?;

        Ok(list_across_regions(&regions, self.regional_timeout, |region| {
            let lister = self.reserved.clone();
            async move { lister.list_reserved_capacity(credentials, &region).await }
        })
        .await)
    }
}

/// S3 inventory: global bucket listing with per-bucket location lookups,
/// region-pinned object listing, both with attributed costs.
#[derive(Clone)]
pub struct S3InventoryService {
    buckets: Arc<dyn BucketLister>,
    objects: Arc<dyn ObjectLister>,
    costs: Arc<dyn ServiceCostSource>,
}

impl S3InventoryService {
    pub fn new(
        buckets: Arc<dyn BucketLister>,
        objects: Arc<dyn ObjectLister>,
        costs: Arc<dyn ServiceCostSource>,
    ) -> Self {
        Self {
            buckets,
            objects,
            costs,
        }
    }

    /// All buckets with their regions, attributed costs, and the
    /// service-level S3 total for the window.
    pub async fn list_buckets(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<BucketInventory, DomainError> {
        let mut buckets = self.buckets.list_buckets(credentials).await?;

        for bucket in &mut buckets {
            if let Some(name) = bucket.name.clone() {
                bucket.region = self.buckets.bucket_region(credentials, &name).await?;
            }
        }

        let (total_cost, cost_map) = self.s3_costs(credentials).await;
        cost_map.attach(&mut buckets);

        Ok(BucketInventory {
            total_cost,
            buckets,
        })
    }

    /// Objects in one bucket, listed through a client pinned to the
    /// bucket's region.
    pub async fn list_objects(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
        region: &str,
    ) -> Result<ObjectInventory, DomainError> {
        let mut objects = self.objects.list_objects(credentials, bucket, region).await?;

        let (total_cost, cost_map) = self.s3_costs(credentials).await;
        cost_map.attach(&mut objects);

        Ok(ObjectInventory {
            total_cost,
            objects,
        })
    }

    /// S3 service total and cost map, zeroed when attribution is
    /// unavailable or the window has no S3 summary.
    async fn s3_costs(&self, credentials: &AwsCredentials) -> (f64, CostMap) {
        match self.costs.service_cost(credentials, S3_SERVICE).await {
            Ok(summaries) => {
                let total = summaries.first().map(|s| s.total_cost).unwrap_or(0.0);
                (total, CostMap::from_summaries(&summaries))
            }
            Err(err) => {
                warn!(service = S3_SERVICE, error = %err, "Cost attribution unavailable, defaulting costs to 0");
                (0.0, CostMap::default())
            }
        }
    }
}
