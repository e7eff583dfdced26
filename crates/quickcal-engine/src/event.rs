//! Calendar events and timestamp normalization.
//!
//! Every timestamp entering the engine is converted to an absolute UTC instant here,
//! at the ingestion boundary. Interval operations never see local wall-clock values.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interval::TimeInterval;

/// A single event as reported by a calendar data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub is_all_day: bool,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CalendarEvent {
    /// Build an event from raw source timestamps.
    ///
    /// `zone` localizes timestamps that carry no offset (naive date-times and bare
    /// dates), which is how calendar services report all-day and floating events.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidTimestamp` if either timestamp cannot be parsed.
    pub fn from_raw(
        title: impl Into<String>,
        start: &str,
        end: &str,
        is_all_day: bool,
        zone: Tz,
    ) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            is_all_day,
            start: parse_instant(start, zone)?,
            end: parse_instant(end, zone)?,
        })
    }

    /// The busy interval this event occupies, or `None` for a zero-length or
    /// inverted event.
    pub fn interval(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.start, self.end)
    }
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

/// Parse a source timestamp into an absolute instant.
///
/// Accepts, in order:
/// - RFC 3339 with an offset or `Z` (e.g., "2026-03-02T10:00:00-06:00")
/// - a local date-time without offset, read in `zone` (e.g., "2026-03-02T10:00:00")
/// - a bare date, read as the start of that day in `zone` (e.g., "2026-03-02")
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant. A day whose
/// midnight is skipped by a DST gap starts at the first local time after the gap.
///
/// # Errors
/// Returns `EngineError::InvalidTimestamp` for unparseable input and for local
/// date-times skipped by a DST gap.
pub fn parse_instant(raw: &str, zone: Tz) -> Result<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return localize(raw, naive, zone);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return start_of_day(raw, date, zone);
    }

    Err(EngineError::timestamp(
        raw,
        "expected RFC 3339, a local date-time, or a date",
    ))
}

/// First instant of `date` in `zone`, stepping past a DST gap at midnight.
fn start_of_day(raw: &str, date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| EngineError::timestamp(raw, "date has no midnight"))?;

    // Quarter-hour steps; no DST gap spans a whole day.
    (0..24 * 4)
        .map(|step| midnight + Duration::minutes(15 * step))
        .find_map(|local| zone.from_local_datetime(&local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            EngineError::timestamp(raw, format!("day does not exist in {}", zone.name()))
        })
}

fn localize(raw: &str, naive: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(EngineError::timestamp(
            raw,
            format!("local time does not exist in {}", zone.name()),
        )),
    }
}
