//! Cost attribution entities

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Cost Explorer service name for EC2 compute
pub const EC2_COMPUTE_SERVICE: &str = "Amazon Elastic Compute Cloud - Compute";
/// Cost Explorer service name for EBS
pub const EBS_SERVICE: &str = "Amazon Elastic Block Store";
/// Cost Explorer service name for S3
pub const S3_SERVICE: &str = "Amazon Simple Storage Service";

/// Region a resource resolves to when the region-grouped query has no entry
/// for it
pub const UNKNOWN_REGION: &str = "Unknown";

/// One row of a grouped billing query: the two group-by keys and the
/// blended-cost amount for the window.
#[derive(Debug, Clone, PartialEq)]
pub struct CostGroup {
    pub keys: (String, String),
    pub amount: f64,
}

impl CostGroup {
    pub fn new(first: impl Into<String>, second: impl Into<String>, amount: f64) -> Self {
        Self {
            keys: (first.into(), second.into()),
            amount,
        }
    }
}

/// Per-resource cost for one time window.
///
/// `cost` may be negative: credits and refunds are kept here for audit even
/// though they never count toward a service total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCostRecord {
    pub id: String,
    pub region: String,
    pub cost: f64,
}

/// Aggregated cost of one service over the window.
///
/// Invariant: `total_cost` is the sum of the non-negative resource costs
/// only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCostSummary {
    pub service: String,
    pub total_cost: f64,
    pub resources: Vec<ResourceCostRecord>,
}

/// `resource id -> cost` lookup used to attach costs to inventory items.
#[derive(Debug, Clone, Default)]
pub struct CostMap {
    by_resource: HashMap<String, f64>,
}

impl CostMap {
    /// Flattens summaries into a single lookup.
    pub fn from_summaries(summaries: &[ServiceCostSummary]) -> Self {
        let mut by_resource = HashMap::new();
        for summary in summaries {
            for resource in &summary.resources {
                by_resource.insert(resource.id.clone(), resource.cost);
            }
        }
        Self { by_resource }
    }

    /// Cost for a resource id, 0.0 when it has no billing record yet.
    pub fn cost_of(&self, resource_id: &str) -> f64 {
        self.by_resource.get(resource_id).copied().unwrap_or(0.0)
    }

    /// Fills the cost field of every item from this map.
    pub fn attach<T: CostAttachable>(&self, items: &mut [T]) {
        for item in items {
            let cost = item
                .resource_id()
                .map(|id| self.cost_of(id))
                .unwrap_or(0.0);
            item.set_cost(cost);
        }
    }
}

/// Inventory items that carry an attachable cost field.
pub trait CostAttachable {
    /// Identifier the billing records are keyed by, when the item has one
    fn resource_id(&self) -> Option<&str>;

    fn set_cost(&mut self, cost: f64);
}
