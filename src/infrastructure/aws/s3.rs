//! S3 inventory listing

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{Bucket, Object};

use crate::domain::inventory::{BucketLister, ObjectLister, S3Bucket, S3Object};
use crate::domain::{AwsCredentials, DomainError};

use super::{to_utc, SDK_PROVIDER_NAME};

/// S3 adapter. Bucket listing is global and uses the credential's home
/// region; object listing pins the client to the bucket's own region.
#[derive(Debug, Default, Clone)]
pub struct S3Api;

impl S3Api {
    pub fn new() -> Self {
        Self
    }

    fn client(credentials: &AwsCredentials, region: &str) -> aws_sdk_s3::Client {
        let conf = aws_sdk_s3::Config::builder()
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
        aws_sdk_s3::Client::from_conf(conf)
    }
}

fn from_bucket(bucket: &Bucket) -> S3Bucket {
    S3Bucket {
        name: bucket.name().map(str::to_string),
        region: String::new(),
        creation_date: bucket.creation_date().and_then(to_utc),
        cost: 0.0,
    }
}

fn from_object(object: &Object) -> S3Object {
    S3Object {
        key: object.key().map(str::to_string),
        size_bytes: object.size(),
        storage_class: object
            .storage_class()
            .map(|class| class.as_str().to_string()),
        last_modified: object.last_modified().and_then(to_utc),
        cost: 0.0,
    }
}

#[async_trait]
impl BucketLister for S3Api {
    async fn list_buckets(
        &self,
        credentials: &AwsCredentials,
    ) -> Result<Vec<S3Bucket>, DomainError> {
        let response = Self::client(credentials, credentials.region())
            .list_buckets()
            .send()
            .await
            .map_err(|e| {
                DomainError::inventory("s3", format!("{}", DisplayErrorContext(&e)))
            })?;

        Ok(response.buckets().iter().map(from_bucket).collect())
    }

    async fn bucket_region(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
    ) -> Result<String, DomainError> {
        let response = Self::client(credentials, credentials.region())
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                DomainError::inventory("s3", format!("{}", DisplayErrorContext(&e)))
            })?;

        // Absent constraint is the legacy us-east-1 encoding; kept as-is
        Ok(response
            .location_constraint()
            .map(|constraint| constraint.as_str().to_string())
            .unwrap_or_default())
    }
}

#[async_trait]
impl ObjectLister for S3Api {
    async fn list_objects(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
        region: &str,
    ) -> Result<Vec<S3Object>, DomainError> {
        let response = Self::client(credentials, region)
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                DomainError::inventory("s3", format!("{}", DisplayErrorContext(&e)))
            })?;

        Ok(response.contents().iter().map(from_object).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::types::ObjectStorageClass;

    #[test]
    fn test_bucket_conversion_starts_unlocated() {
        let bucket = Bucket::builder().name("assets").build();

        let converted = from_bucket(&bucket);

        assert_eq!(converted.name.as_deref(), Some("assets"));
        assert_eq!(converted.region, "");
        assert_eq!(converted.cost, 0.0);
    }

    #[test]
    fn test_object_conversion() {
        let object = Object::builder()
            .key("logs/2024/06/01.gz")
            .size(2048)
            .storage_class(ObjectStorageClass::StandardIa)
            .build();

        let converted = from_object(&object);

        assert_eq!(converted.key.as_deref(), Some("logs/2024/06/01.gz"));
        assert_eq!(converted.size_bytes, Some(2048));
        assert_eq!(converted.storage_class.as_deref(), Some("STANDARD_IA"));
    }
}
