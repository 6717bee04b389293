//! Per-service inventory listing traits

use async_trait::async_trait;

use crate::domain::{AwsCredentials, DomainError};

use super::{EbsVolume, Ec2Instance, ReservedCapacity, S3Bucket, S3Object};

#[cfg(test)]
use mockall::automock;

/// Lists EC2 instances in one region.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InstanceLister: Send + Sync {
    async fn list_instances(
        &self,
        credentials: &AwsCredentials,
        region: &str,
    ) -> Result<Vec<Ec2Instance>, DomainError>;
}

/// Lists EBS volumes in one region.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VolumeLister: Send + Sync {
    async fn list_volumes(
        &self,
        credentials: &AwsCredentials,
        region: &str,
    ) -> Result<Vec<EbsVolume>, DomainError>;
}

/// Optional capability: reserved-capacity listing.
///
/// Adapters for services without reservations simply do not implement this
/// trait; the decision is made at compile time, not by probing at runtime.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReservedCapacityLister: Send + Sync {
    async fn list_reserved_capacity(
        &self,
        credentials: &AwsCredentials,
        region: &str,
    ) -> Result<Vec<ReservedCapacity>, DomainError>;
}

/// Lists S3 buckets and resolves their locations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BucketLister: Send + Sync {
    /// Lists the account's buckets (a global call, issued from the home
    /// region)
    async fn list_buckets(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<Vec<S3Bucket>, DomainError>;

    /// Resolves one bucket's location constraint, empty for the legacy
    /// us-east-1 encoding
    async fn bucket_region(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
    ) -> Result<String, DomainError>;
}

/// Lists objects in one bucket, using a client pinned to the bucket's
/// region.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectLister: Send + Sync {
    async fn list_objects(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
        region: &str,
    ) -> Result<Vec<S3Object>, DomainError>;
}
