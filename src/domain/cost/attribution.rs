//! Per-service cost attribution join

use std::collections::HashMap;

use super::{CostGroup, ResourceCostRecord, ServiceCostSummary, UNKNOWN_REGION};

/// Joins the two grouped query results on resource id.
///
/// `service_groups` rows are `(service, resource_id)` keyed,
/// `region_groups` rows `(region, resource_id)` keyed. Each billed resource
/// gets its region recovered through the id lookup; resources the region
/// query never saw are kept with region `"Unknown"` rather than dropped.
///
/// A resource id appearing under more than one region keeps the last-seen
/// region. The grouping query should not produce duplicates, but the API
/// does not rule them out; last-wins is the documented resolution.
///
/// Credits show up as negative amounts. They are retained in the
/// per-resource detail for audit but never subtracted from `total_cost`,
/// which only sums the non-negative amounts.
pub fn attribute(
    service_groups: &[CostGroup],
    region_groups: &[CostGroup],
) -> Vec<ServiceCostSummary> {
    let mut region_by_resource: HashMap<&str, &str> = HashMap::new();
    for group in region_groups {
        let (region, resource_id) = (&group.keys.0, &group.keys.1);
        if !resource_id.is_empty() {
            region_by_resource.insert(resource_id, region);
        }
    }

    // Summaries keep the first-seen service order of the query results
    let mut summaries: Vec<ServiceCostSummary> = Vec::new();
    let mut index_by_service: HashMap<String, usize> = HashMap::new();

    for group in service_groups {
        let (service, resource_id) = (&group.keys.0, &group.keys.1);
        let region = region_by_resource
            .get(resource_id.as_str())
            .copied()
            .unwrap_or(UNKNOWN_REGION);

        let index = *index_by_service
            .entry(service.clone())
            .or_insert_with(|| {
                summaries.push(ServiceCostSummary {
                    service: service.clone(),
                    total_cost: 0.0,
                    resources: Vec::new(),
                });
                summaries.len() - 1
            });

        let summary = &mut summaries[index];
        summary.resources.push(ResourceCostRecord {
            id: resource_id.clone(),
            region: region.to_string(),
            cost: group.amount,
        });

        if group.amount >= 0.0 {
            summary.total_cost += group.amount;
        }
    }

    summaries
}
