//! Seam between inventory consumers and the attribution pipeline

use async_trait::async_trait;

use crate::domain::{AwsCredentials, DomainError};

use super::ServiceCostSummary;

#[cfg(test)]
use mockall::automock;

/// Source of attributed per-service costs for inventory consumers.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServiceCostSource: Send + Sync {
    /// Attributed summaries for one service over the current window.
    async fn service_cost(
        &self,
        credentials: &AwsCredentials,
        service: &str,
    ) -> Result<Vec<ServiceCostSummary>, DomainError>;
}
