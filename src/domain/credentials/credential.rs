use serde::Deserialize;
use sha2::{Digest, Sha256};

/// AWS account credentials for a single request.
///
/// The same value authenticates every cloud call for the request and
/// partitions the durable caches. Instances live for one request only and
/// are never persisted.
#[derive(Clone, Deserialize)]
pub struct AwsCredentials {
    access_key_id: String,
    secret_access_key: String,
    region: String,
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Home region used for account-level and billing API clients.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Stable cache-partition key for this account identity.
    ///
    /// First 16 hex chars of SHA-256 over the access key id, so the raw key
    /// id never appears in cache paths.
    pub fn partition_key(&self) -> String {
        let digest = Sha256::digest(self.access_key_id.as_bytes());
        hex::encode(&digest[..8])
    }
}

// Secrets stay out of logs: only the key id prefix is shown.
impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key_prefix: String = self.access_key_id.chars().take(4).collect();
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &format!("{}***", key_prefix))
            .field("secret_access_key", &"***")
            .field("region", &self.region)
            .finish()
    }
}
