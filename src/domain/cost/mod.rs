//! Cost attribution: billing queries, the region join, and the bucketed
//! cost cache

mod attribution;
mod billing;
mod cache;
mod source;
mod types;
mod window;

pub use attribution::attribute;
pub use billing::{BillingQueryApi, CostQueryFilter, GroupDimension};
pub use cache::{CostCache, DEFAULT_BUCKET};
pub use source::ServiceCostSource;
pub use types::{
    CostAttachable, CostGroup, CostMap, ResourceCostRecord, ServiceCostSummary,
    EBS_SERVICE, EC2_COMPUTE_SERVICE, S3_SERVICE, UNKNOWN_REGION,
};
pub use window::QueryWindow;

#[cfg(test)]
pub use billing::MockBillingQueryApi;
#[cfg(test)]
pub use source::MockServiceCostSource;
