//! Dated ranking snapshot.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One periodic snapshot of a character's standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Day the snapshot was taken
    pub date: NaiveDate,

    /// Rank within the kind (1 = best)
    pub rank: u32,

    /// Cumulative point total at this date
    pub point: u64,
}

impl Record {
    pub fn new(date: NaiveDate, rank: u32, point: u64) -> Self {
        Self { date, rank, point }
    }

    /// Milliseconds since the Unix epoch at midnight UTC of the snapshot day.
    pub fn timestamp_millis(&self) -> i64 {
        self.date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    }
}
