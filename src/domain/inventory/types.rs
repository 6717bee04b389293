//! Inventory item entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cost::CostAttachable;

/// EC2 instance with its attributed cost over the query window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ec2Instance {
    pub instance_id: Option<String>,
    pub instance_type: Option<String>,
    pub state: Option<String>,
    pub availability_zone: Option<String>,
    pub launch_time: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub cost: f64,
}

impl CostAttachable for Ec2Instance {
    fn resource_id(&self) -> Option<&str> {
        self.instance_id.as_deref()
    }

    fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }
}

/// EBS volume with its attributed cost over the query window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EbsVolume {
    pub volume_id: Option<String>,
    pub volume_type: Option<String>,
    pub state: Option<String>,
    pub size_gib: Option<i32>,
    pub availability_zone: Option<String>,
    pub encrypted: Option<bool>,
    pub create_time: Option<DateTime<Utc>>,
    pub cost: f64,
}

impl CostAttachable for EbsVolume {
    fn resource_id(&self) -> Option<&str> {
        self.volume_id.as_deref()
    }

    fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }
}

/// Reserved EC2 capacity. Reservations are billed up front, so no cost is
/// attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedCapacity {
    pub reservation_id: Option<String>,
    pub instance_type: Option<String>,
    pub instance_count: Option<i32>,
    pub state: Option<String>,
    pub offering_type: Option<String>,
    pub end: Option<DateTime<Utc>>,
}

/// S3 bucket with its attributed cost over the query window.
///
/// `region` is the bucket's location constraint, empty when the API returns
/// none (the legacy us-east-1 encoding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: Option<String>,
    pub region: String,
    pub creation_date: Option<DateTime<Utc>>,
    pub cost: f64,
}

impl CostAttachable for S3Bucket {
    fn resource_id(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }
}

/// Object in an S3 bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Object {
    pub key: Option<String>,
    pub size_bytes: Option<i64>,
    pub storage_class: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub cost: f64,
}

impl CostAttachable for S3Object {
    fn resource_id(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }
}

/// Bucket listing plus the service-level S3 total for the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketInventory {
    pub total_cost: f64,
    pub buckets: Vec<S3Bucket>,
}

/// Object listing plus the service-level S3 total for the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInventory {
    pub total_cost: f64,
    pub objects: Vec<S3Object>,
}
