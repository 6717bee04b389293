//! Domain layer - core entities, collaborator seams, and the attribution
//! logic

pub mod cost;
pub mod credentials;
pub mod error;
pub mod inventory;
pub mod region;
pub mod store;

pub use cost::{
    attribute, BillingQueryApi, CostAttachable, CostCache, CostGroup, CostMap, CostQueryFilter,
    GroupDimension, QueryWindow, ResourceCostRecord, ServiceCostSource, ServiceCostSummary,
};
pub use credentials::AwsCredentials;
pub use error::DomainError;
pub use inventory::{
    list_across_regions, BucketInventory, BucketLister, EbsVolume, Ec2Instance, InstanceLister,
    ObjectInventory, ObjectLister, ReservedCapacity, ReservedCapacityLister, S3Bucket, S3Object,
    VolumeLister,
};
pub use region::{RegionDirectory, RegionLister, RegionStatus};
pub use store::{CacheStore, CacheStoreExt};
