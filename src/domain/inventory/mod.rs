//! Resource inventories and the multi-region fan-out

mod fan_out;
mod listers;
mod types;

pub use fan_out::list_across_regions;
pub use listers::{
    BucketLister, InstanceLister, ObjectLister, ReservedCapacityLister, VolumeLister,
};
pub use types::{
    BucketInventory, EbsVolume, Ec2Instance, ObjectInventory, ReservedCapacity, S3Bucket, S3Object,
};

#[cfg(test)]
pub use listers::{
    MockBucketLister, MockInstanceLister, MockObjectLister, MockReservedCapacityLister,
    MockVolumeLister,
};
