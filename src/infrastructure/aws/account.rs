//! Region discovery via the AWS Account API

use async_trait::async_trait;
use aws_sdk_account::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_account::error::DisplayErrorContext;
use aws_sdk_account::types::RegionOptStatus;

use crate::domain::{AwsCredentials, DomainError, RegionLister, RegionStatus};

use super::SDK_PROVIDER_NAME;

/// [`RegionLister`] backed by `ListRegions` + `GetRegionOptStatus`.
///
/// Clients are built per call from the request credentials, matching their
/// one-request lifetime.
#[derive(Debug, Default, Clone)]
pub struct AccountRegionLister;

impl AccountRegionLister {
    pub fn new() -> Self {
        Self
    }

    fn client(credentials: &AwsCredentials) -> aws_sdk_account::Client {
        let conf = aws_sdk_account::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(credentials.region().to_string()))
            .credentials_provider(Credentials::new(
                credentials.access_key_id(),
                credentials.secret_access_key(),
                None,
                None,
                SDK_PROVIDER_NAME,
            ))
            .build();
        aws_sdk_account::Client::from_conf(conf)
    }
}

fn from_opt_status(status: Option<&RegionOptStatus>) -> RegionStatus {
    match status {
        Some(RegionOptStatus::EnabledByDefault) => RegionStatus::EnabledByDefault,
        Some(RegionOptStatus::Enabled) => RegionStatus::Enabled,
        Some(RegionOptStatus::Enabling) => RegionStatus::Enabling,
        Some(RegionOptStatus::Disabled) => RegionStatus::Disabled,
        Some(RegionOptStatus::Disabling) => RegionStatus::Disabling,
        _ => RegionStatus::Unknown,
    }
}

#[async_trait]
impl RegionLister for AccountRegionLister {
    async fn list_all_regions(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<Vec<String>, DomainError> {
        let response = Self::client(credentials)
            .list_regions()
            .send()
            .await
            .map_err(|e| {
                DomainError::region_lookup(format!("{}", DisplayErrorContext(&e)))
            })?;

        Ok(response
            .regions()
            .iter()
            .filter_map(|region| region.region_name())
            .map(|name| name.to_string())
            .collect())
    }

    async fn region_status(
        &self,
        credentials: &AwsCredentials,
        region: &str,
    ) -> Result<RegionStatus, DomainError> {
        let response = Self::client(credentials)
            .get_region_opt_status()
            .region_name(region)
            .send()
            .await
            .map_err(|e| {
                DomainError::region_lookup(format!("{}", DisplayErrorContext(&e)))
            })?;

        Ok(from_opt_status(response.region_opt_status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_status_mapping() {
        assert_eq!(
            from_opt_status(Some(&RegionOptStatus::EnabledByDefault)),
            RegionStatus::EnabledByDefault
        );
        assert_eq!(
            from_opt_status(Some(&RegionOptStatus::Disabled)),
            RegionStatus::Disabled
        );
        assert_eq!(from_opt_status(None), RegionStatus::Unknown);
    }
}
