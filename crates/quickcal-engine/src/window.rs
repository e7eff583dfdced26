//! The query window bounding every availability computation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interval::TimeInterval;

/// Number of days covered when the caller does not choose a horizon.
pub const DEFAULT_DAYS: u32 = 5;

/// The range `[now, now + days)` over which free/busy time is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWindow {
    pub now: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    /// Window starting at `now` and spanning `days` whole days.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidWindow` when `days` is zero or the end would fall
    /// outside the representable date range.
    pub fn new(now: DateTime<Utc>, days: u32) -> Result<Self> {
        if days == 0 {
            return Err(EngineError::InvalidWindow(
                "days must be a positive integer".to_string(),
            ));
        }
        let end = Duration::try_days(i64::from(days))
            .and_then(|span| now.checked_add_signed(span))
            .ok_or_else(|| {
                EngineError::InvalidWindow(format!(
                    "{days} days from {} is out of range",
                    now.to_rfc3339()
                ))
            })?;
        Self::from_bounds(now, end)
    }

    /// Window with explicit bounds.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidWindow` unless `now < end`.
    pub fn from_bounds(now: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if now >= end {
            return Err(EngineError::InvalidWindow(format!(
                "window start {} must be before end {}",
                now.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { now, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.now
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.now <= instant && instant < self.end
    }

    /// The whole window as a single interval. `None` only for a hand-built window
    /// whose bounds are inverted.
    pub fn as_interval(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.now, self.end)
    }
}
