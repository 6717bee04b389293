//! AWS SDK adapters for the domain's collaborator seams

mod account;
mod cost_explorer;
mod ec2;
mod s3;

pub use account::AccountRegionLister;
pub use cost_explorer::CostExplorerBillingApi;
pub use ec2::Ec2Api;
pub use s3::S3Api;

/// Provider name stamped on statically-built SDK credentials
pub(crate) const SDK_PROVIDER_NAME: &str = "cloudscope";

/// Converts an SDK timestamp to UTC, `None` for out-of-range values.
pub(crate) fn to_utc(
    timestamp: &aws_smithy_types::DateTime,
) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}
