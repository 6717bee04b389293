//! Billing queries via AWS Cost Explorer

use async_trait::async_trait;
use aws_sdk_costexplorer::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_costexplorer::error::DisplayErrorContext;
use aws_sdk_costexplorer::types::{
    DateInterval, Dimension, DimensionValues, Expression, Granularity, GroupDefinition,
    GroupDefinitionType,
};

use crate::domain::cost::{BillingQueryApi, CostGroup, CostQueryFilter, GroupDimension, QueryWindow};
use crate::domain::{AwsCredentials, DomainError};

use super::SDK_PROVIDER_NAME;

/// Cost metric every grouped query reads
const COST_METRIC: &str = "BlendedCost";

/// [`BillingQueryApi`] backed by `GetCostAndUsageWithResources` and
/// `GetDimensionValues`.
#[derive(Debug, Default, Clone)]
pub struct CostExplorerBillingApi;

impl CostExplorerBillingApi {
    pub fn new() -> Self {
        Self
    }

    fn client(credentials: &AwsCredentials) -> aws_sdk_costexplorer::Client {
        let conf = aws_sdk_costexplorer::Config::builder()
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
        aws_sdk_costexplorer::Client::from_conf(conf)
    }

    fn date_interval(window: &QueryWindow) -> Result<DateInterval, DomainError> {
        DateInterval::builder()
            .start(window.start())
            .end(window.end())
            .build()
            .map_err(|e| DomainError::billing_query(format!("Invalid query window: {}", e)))
    }

    /// `REGION ∈ regions AND SERVICE ∈ services`
    fn build_filter(filter: &CostQueryFilter) -> Expression {
        let regions = Expression::builder()
            .dimensions(
                DimensionValues::builder()
                    .key(Dimension::Region)
                    .set_values(Some(filter.regions.clone()))
                    .build(),
            )
            .build();
        let services = Expression::builder()
            .dimensions(
                DimensionValues::builder()
                    .key(Dimension::Service)
                    .set_values(Some(filter.services.clone()))
                    .build(),
            )
            .build();

        Expression::builder().and(regions).and(services).build()
    }

    fn group_definition(dimension: GroupDimension) -> GroupDefinition {
        GroupDefinition::builder()
            .r#type(GroupDefinitionType::Dimension)
            .key(dimension.as_str())
            .build()
    }
}

#[async_trait]
impl BillingQueryApi for CostExplorerBillingApi {
    async fn query_grouped_cost(
        &self,
        credentials: &AwsCredentials,
        filter: &CostQueryFilter,
        group_by: (GroupDimension, GroupDimension),
        window: &QueryWindow,
    ) -> Result<Vec<CostGroup>, DomainError> {
        let response = Self::client(credentials)
            .get_cost_and_usage_with_resources()
            .time_period(Self::date_interval(window)?)
            .granularity(Granularity::Monthly)
            .filter(Self::build_filter(filter))
            .metrics(COST_METRIC)
            .group_by(Self::group_definition(group_by.0))
            .group_by(Self::group_definition(group_by.1))
            .send()
            .await
            .map_err(|e| {
                DomainError::billing_query(format!("{}", DisplayErrorContext(&e)))
            })?;

        let mut groups = Vec::new();
        for result in response.results_by_time() {
            for group in result.groups() {
                let keys = group.keys();
                if keys.len() < 2 {
                    continue;
                }

                let amount = group
                    .metrics()
                    .and_then(|metrics| metrics.get(COST_METRIC))
                    .and_then(|metric| metric.amount())
                    .and_then(|amount| amount.parse::<f64>().ok())
                    .unwrap_or(0.0);

                groups.push(CostGroup::new(keys[0].clone(), keys[1].clone(), amount));
            }
        }

        Ok(groups)
    }

    async fn list_service_names(
        &self,
        credentials: &AwsCredentials,
        window: &QueryWindow,
    ) -> Result<Vec<String>, DomainError> {
        let response = Self::client(credentials)
            .get_dimension_values()
            .dimension(Dimension::Service)
            .time_period(Self::date_interval(window)?)
            .send()
            .await
            .map_err(|e| {
                DomainError::billing_query(format!("{}", DisplayErrorContext(&e)))
            })?;

        let names: Vec<String> = response
            .dimension_values()
            .iter()
            .filter_map(|value| value.value())
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string())
            .collect();

        if names.is_empty() {
            return Err(DomainError::billing_query(
                "No services found for the specified time period",
            ));
        }

        Ok(names)
    }
}
