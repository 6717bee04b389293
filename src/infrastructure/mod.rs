//! Infrastructure layer - AWS SDK adapters, cache store backends, services

pub mod aws;
pub mod logging;
pub mod services;
pub mod store;

pub use aws::{AccountRegionLister, CostExplorerBillingApi, Ec2Api, S3Api};
pub use services::{CostAttributionService, Ec2InventoryService, S3InventoryService};
pub use store::{FileStore, InMemoryStore};
