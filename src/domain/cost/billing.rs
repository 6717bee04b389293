//! Billing query trait

use async_trait::async_trait;

use crate::domain::{AwsCredentials, DomainError};

use super::{CostGroup, QueryWindow};

#[cfg(test)]
use mockall::automock;

/// Dimensions a billing query can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDimension {
    Service,
    Region,
    ResourceId,
}

impl GroupDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupDimension::Service => "SERVICE",
            GroupDimension::Region => "REGION",
            GroupDimension::ResourceId => "RESOURCE_ID",
        }
    }
}

/// Filter applied to every grouped query: region membership AND service
/// membership.
#[derive(Debug, Clone, PartialEq)]
pub struct CostQueryFilter {
    pub regions: Vec<String>,
    pub services: Vec<String>,
}

impl CostQueryFilter {
    pub fn new(regions: Vec<String>, services: Vec<String>) -> Self {
        Self { regions, services }
    }
}

/// Billing API seam.
///
/// One attribution request issues `query_grouped_cost` twice over the same
/// window and filter - once grouped `(SERVICE, RESOURCE_ID)`, once
/// `(REGION, RESOURCE_ID)` - plus, when no service is pinned, one
/// `list_service_names` call to discover the service filter.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BillingQueryApi: Send + Sync {
    /// Runs one resource-level grouped cost query, flattening all time
    /// periods into a single row list.
    async fn query_grouped_cost(
        &self,
        credentials: &AwsCredentials,
        filter: &CostQueryFilter,
        group_by: (GroupDimension, GroupDimension),
        window: &QueryWindow,
    ) -> Result<Vec<CostGroup>, DomainError>;

    /// Enumerates the service names with billing activity in the window.
    async fn list_service_names(
        &self,
        credentials: &AwsCredentials,
        window: &QueryWindow,
    ) -> Result<Vec<String>, DomainError>;
}
