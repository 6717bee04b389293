//! Typed cache keys for the region and cost stores

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Key for a credential's enabled-region set.
///
/// No time component: region entries live until explicitly invalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCacheKey(String);

impl RegionCacheKey {
    pub fn new(partition: impl AsRef<str>) -> Self {
        Self(format!("regions:{}", partition.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key for one `(credential, service, time-bucket)` cost entry.
///
/// All requests landing in the same bucket share one entry; a new bucket
/// produces a new key, so entries never need in-place refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostCacheKey(String);

impl CostCacheKey {
    pub fn new(partition: impl AsRef<str>, service: &str, bucket: TimeBucket) -> Self {
        Self(format!(
            "costs:{}:{}:{}",
            partition.as_ref(),
            service,
            bucket.start_secs()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CostCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wall-clock time floored to a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBucket {
    start_secs: i64,
}

impl TimeBucket {
    /// Floors `at` to the start of its `interval`-sized bucket.
    pub fn floor(at: DateTime<Utc>, interval: Duration) -> Self {
        let interval_secs = interval.as_secs().max(1) as i64;
        let start_secs = at.timestamp().div_euclid(interval_secs) * interval_secs;
        Self { start_secs }
    }

    /// Bucket start as a Unix timestamp in seconds.
    pub fn start_secs(&self) -> i64 {
        self.start_secs
    }
}
