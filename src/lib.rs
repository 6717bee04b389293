//! Cloudscope cost attribution engine
//!
//! Attributes AWS spend to individual resources and regions for account
//! dashboards:
//! - Enabled-region discovery behind a durable per-account cache
//! - Two resource-level Cost Explorer queries joined on resource id
//! - Per-service totals that exclude billing credits
//! - A 15-minute-bucketed cost cache absorbing dashboard polling
//! - Concurrent multi-region inventory listing that tolerates individual
//!   region failures

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use domain::cost::CostCache;
use domain::region::RegionDirectory;
use infrastructure::aws::{AccountRegionLister, CostExplorerBillingApi, Ec2Api, S3Api};
use infrastructure::services::{CostAttributionService, Ec2InventoryService, S3InventoryService};
use infrastructure::store::FileStore;

/// Fully wired engine: the region directory, the attribution pipeline, and
/// the inventory services sharing it.
#[derive(Clone)]
pub struct Engine {
    pub regions: RegionDirectory,
    pub costs: Arc<CostAttributionService>,
    pub ec2: Ec2InventoryService,
    pub s3: S3InventoryService,
}

/// Wires the AWS adapters and file-backed caches into an [`Engine`].
pub fn build_engine(config: &AppConfig) -> Engine {
    let region_store = Arc::new(FileStore::new(config.cache.dir.join("region_cache")));
    let cost_store = Arc::new(FileStore::new(config.cache.dir.join("cost_cache")));

    let directory = RegionDirectory::new(Arc::new(AccountRegionLister::new()), region_store);

    let cost_cache = CostCache::new(cost_store)
        .with_bucket(Duration::from_secs(config.cache.cost_bucket_minutes * 60));
    let costs = Arc::new(CostAttributionService::new(
        Arc::new(CostExplorerBillingApi::new()),
        directory.clone(),
        cost_cache,
    ));

    let ec2_api = Arc::new(Ec2Api::new());
    let ec2 = Ec2InventoryService::new(
        ec2_api.clone(),
        ec2_api.clone(),
        ec2_api,
        directory.clone(),
        costs.clone(),
    )
    .with_regional_timeout(Duration::from_secs(config.fan_out.regional_timeout_secs));

    let s3_api = Arc::new(S3Api::new());
    let s3 = S3InventoryService::new(s3_api.clone(), s3_api, costs.clone());

    Engine {
        regions: directory,
        costs,
        ec2,
        s3,
    }
}
