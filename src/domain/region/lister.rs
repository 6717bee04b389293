//! Region listing trait

use async_trait::async_trait;

use crate::domain::{AwsCredentials, DomainError};

#[cfg(test)]
use mockall::automock;

/// Opt-in status of a region for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStatus {
    EnabledByDefault,
    Enabled,
    Enabling,
    Disabled,
    Disabling,
    Unknown,
}

/// Account-level region discovery seam.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegionLister: Send + Sync {
    /// Lists every region the account knows about
    async fn list_all_regions(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<Vec<String>, DomainError>;

    /// Returns the opt status of a single region
    async fn region_status(
        &self,
        credentials: &AwsCredentials,
        region: &str,
    ) -> Result<RegionStatus, DomainError>;
}
