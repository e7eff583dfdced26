//! Half-open time intervals over absolute instants.
//!
//! A [`TimeInterval`] always satisfies `start < end`. Empty or inverted ranges are
//! never constructed: [`TimeInterval::new`] returns `None` for them, and
//! deserialization rejects them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` range between two UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = String;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        TimeInterval::new(raw.start, raw.end).ok_or_else(|| {
            format!(
                "interval start {} must be before end {}",
                raw.start.to_rfc3339(),
                raw.end.to_rfc3339()
            )
        })
    }
}

impl TimeInterval {
    /// Build an interval, or `None` when `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// True when `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Adjacent intervals, where one ends exactly when the other starts, do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when the two intervals overlap or share a boundary.
    pub fn touches(&self, other: &TimeInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The common part of two intervals, `[max(starts), min(ends))`, if non-empty.
    pub fn intersection(&self, other: &TimeInterval) -> Option<TimeInterval> {
        TimeInterval::new(self.start.max(other.start), self.end.min(other.end))
    }
}

/// Sum of the durations of `intervals`.
///
/// Only meaningful as a covered-time measure when the intervals are disjoint.
pub fn total_duration(intervals: &[TimeInterval]) -> Duration {
    intervals
        .iter()
        .fold(Duration::zero(), |acc, interval| acc + interval.duration())
}

