//! EC2 inventory listing

use async_trait::async_trait;
use aws_sdk_ec2::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{Instance, ReservedInstances, Volume};

use crate::domain::inventory::{
    EbsVolume, Ec2Instance, InstanceLister, ReservedCapacity, ReservedCapacityLister, VolumeLister,
};
use crate::domain::{AwsCredentials, DomainError};

use super::{to_utc, SDK_PROVIDER_NAME};

/// EC2 adapter, one client per `(credentials, region)` call.
///
/// Implements [`ReservedCapacityLister`] in addition to the plain listers:
/// reservations are an EC2-only capability.
#[derive(Debug, Default, Clone)]
pub struct Ec2Api;

impl Ec2Api {
    pub fn new() -> Self {
        Self
    }

    fn client(credentials: &AwsCredentials, region: &str) -> aws_sdk_ec2::Client {
        let conf = aws_sdk_ec2::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(Credentials::new(
                credentials.access_key_id(),
                credentials.secret_access_key(),
                None,
                None,
                SDK_PROVIDER_NAME,
            ))
            .build();
        aws_sdk_ec2::Client::from_conf(conf)
    }
}

fn from_instance(instance: &Instance) -> Ec2Instance {
    let name = instance
        .tags()
        .iter()
        .find(|tag| tag.key() == Some("Name"))
        .and_then(|tag| tag.value())
        .map(|value| value.to_string());

    Ec2Instance {
        instance_id: instance.instance_id().map(str::to_string),
        instance_type: instance
            .instance_type()
            .map(|kind| kind.as_str().to_string()),
        state: instance
            .state()
            .and_then(|state| state.name())
            .map(|name| name.as_str().to_string()),
        availability_zone: instance
            .placement()
            .and_then(|placement| placement.availability_zone())
            .map(str::to_string),
        launch_time: instance.launch_time().and_then(to_utc),
        name,
        cost: 0.0,
    }
}

fn from_volume(volume: &Volume) -> EbsVolume {
    EbsVolume {
        volume_id: volume.volume_id().map(str::to_string),
        volume_type: volume.volume_type().map(|kind| kind.as_str().to_string()),
        state: volume.state().map(|state| state.as_str().to_string()),
        size_gib: volume.size(),
        availability_zone: volume.availability_zone().map(str::to_string),
        encrypted: volume.encrypted(),
        create_time: volume.create_time().and_then(to_utc),
        cost: 0.0,
    }
}

fn from_reservation(reservation: &ReservedInstances) -> ReservedCapacity {
    ReservedCapacity {
        reservation_id: reservation.reserved_instances_id().map(str::to_string),
        instance_type: reservation
            .instance_type()
            .map(|kind| kind.as_str().to_string()),
        instance_count: reservation.instance_count(),
        state: reservation.state().map(|state| state.as_str().to_string()),
        offering_type: reservation
            .offering_type()
            .map(|kind| kind.as_str().to_string()),
        end: reservation.end().and_then(to_utc),
    }
}

#[async_trait]
impl InstanceLister for Ec2Api {
    async fn list_instances(
        &self,
        credentials: &AwsCredentials,
        region: &str,
    ) -> Result<Vec<Ec2Instance>, DomainError> {
        let response = Self::client(credentials, region)
            .describe_instances()
            .send()
            .await
            .map_err(|e| {
                DomainError::inventory("ec2", format!("{}", DisplayErrorContext(&e)))
            })?;

        Ok(response
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances())
            .map(from_instance)
            .collect())
    }
}

#[async_trait]
impl VolumeLister for Ec2Api {
    async fn list_volumes(
        &self,
        credentials: &AwsCredentials,
        region: &str,
    ) -> Result<Vec<EbsVolume>, DomainError> {
        let response = Self::client(credentials, region)
            .describe_volumes()
            .send()
            .await
            .map_err(|e| {
                DomainError::inventory("ebs", format!("{}", DisplayErrorContext(&e)))
            })?;

        Ok(response.volumes().iter().map(from_volume).collect())
    }
}

#[async_trait]
impl ReservedCapacityLister for Ec2Api {
    async fn list_reserved_capacity(
        &self,
        credentials: &AwsCredentials,
        region: &str,
    ) -> Result<Vec<ReservedCapacity>, DomainError> {
        let response = Self::client(credentials, region)
            .describe_reserved_instances()
            .send()
            .await
            .map_err(|e| {
                DomainError::inventory("ec2", format!("{}", DisplayErrorContext(&e)))
            })?;

        Ok(response
            .reserved_instances()
            .iter()
            .map(from_reservation)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::{InstanceState, InstanceStateName, InstanceType, Placement, Tag};

    #[test]
    fn test_instance_conversion_picks_name_tag() {
        let instance = Instance::builder()
            .instance_id("i-0abc")
            .instance_type(InstanceType::T3Micro)
            .state(
                InstanceState::builder()
                    .name(InstanceStateName::Running)
                    .build(),
            )
            .placement(Placement::builder().availability_zone("us-east-1a").build())
            .tags(Tag::builder().key("env").value("prod").build())
            .tags(Tag::builder().key("Name").value("api-server").build())
            .build();

        let converted = from_instance(&instance);

        assert_eq!(converted.instance_id.as_deref(), Some("i-0abc"));
        assert_eq!(converted.instance_type.as_deref(), Some("t3.micro"));
        assert_eq!(converted.state.as_deref(), Some("running"));
        assert_eq!(converted.availability_zone.as_deref(), Some("us-east-1a"));
        assert_eq!(converted.name.as_deref(), Some("api-server"));
        assert_eq!(converted.cost, 0.0);
    }

    #[test]
    fn test_volume_conversion_handles_missing_fields() {
        let volume = Volume::builder().volume_id("vol-0abc").build();

        let converted = from_volume(&volume);

        assert_eq!(converted.volume_id.as_deref(), Some("vol-0abc"));
        assert!(converted.volume_type.is_none());
        assert!(converted.size_gib.is_none());
        assert_eq!(converted.cost, 0.0);
    }
}
