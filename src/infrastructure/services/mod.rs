//! Engine services wiring the domain pipeline to the adapters

mod cost_service;
mod inventory;

pub use cost_service::CostAttributionService;
pub use inventory::{Ec2InventoryService, S3InventoryService, DEFAULT_REGIONAL_TIMEOUT};
