use std::fmt::{Debug, Formatter};

use chrono::{NaiveDateTime, TimeDelta};

/// Time span between two consecutive readings of the same asset.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Debug for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl TimeRange {
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Elapsed time, negative when the endpoints are out of order.
    pub fn delta(self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }
}
