//! Billing query time window

use chrono::{Days, NaiveDate, Utc};

/// Date-only window for billing queries.
///
/// Cost Explorer takes calendar dates; the trailing window is truncated to
/// days on both ends so every request in a day shares the same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl QueryWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window ending today (UTC) and starting `days` calendar days earlier.
    pub fn trailing_days(days: u64) -> Self {
        let end = Utc::now().date_naive();
        let start = end
            .checked_sub_days(Days::new(days))
            .unwrap_or(end);
        Self { start, end }
    }

    /// Start date as `YYYY-MM-DD`
    pub fn start(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// End date as `YYYY-MM-DD`
    pub fn end(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
