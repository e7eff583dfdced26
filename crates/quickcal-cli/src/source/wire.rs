//! Google Calendar v3 JSON shapes, shared by the API client and snapshot files.

use chrono_tz::Tz;
use quickcal_engine::{parse_timezone, CalendarEvent, EngineError};
use serde::Deserialize;
use tracing::warn;

use super::CalendarInfo;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalendarListResponse {
    #[serde(default)]
    pub items: Vec<CalendarListEntry>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalendarListEntry {
    pub id: String,
    pub summary: Option<String>,
    pub summary_override: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventsResponse {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleEvent {
    pub summary: Option<String>,
    pub status: Option<String>,
    pub start: Option<EventDateTime>,
    pub end: Option<EventDateTime>,
}

/// Either `dateTime` (timed event) or `date` (all-day event) is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventDateTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
    pub time_zone: Option<String>,
}

impl CalendarListEntry {
    /// An unknown calendar `timeZone` falls back to UTC so one bad entry cannot
    /// fail the whole listing. Events with offsets are unaffected.
    pub fn into_info(self) -> CalendarInfo {
        let time_zone = match self.time_zone.as_deref() {
            Some(name) => parse_timezone(name).unwrap_or_else(|e| {
                warn!(calendar_id = %self.id, error = %e, "unknown calendar timezone, using UTC");
                Tz::UTC
            }),
            None => Tz::UTC,
        };
        let name = self
            .summary_override
            .or(self.summary)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.id.clone());

        CalendarInfo {
            id: self.id,
            name,
            time_zone,
        }
    }
}

impl GoogleEvent {
    /// Normalize into an engine event. Cancelled events yield `None`.
    pub fn into_event(self, calendar_zone: Tz) -> Result<Option<CalendarEvent>, EngineError> {
        if self.status.as_deref() == Some("cancelled") {
            return Ok(None);
        }

        let start = self.start.ok_or_else(|| missing("start"))?;
        let end = self.end.ok_or_else(|| missing("end"))?;
        let is_all_day = start.date_time.is_none() && start.date.is_some();

        let (start_raw, start_zone) = start.resolve(calendar_zone, "start")?;
        let (end_raw, end_zone) = end.resolve(calendar_zone, "end")?;

        let title = self
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "(No title)".to_string());

        Ok(Some(CalendarEvent {
            title,
            is_all_day,
            start: quickcal_engine::parse_instant(&start_raw, start_zone)?,
            end: quickcal_engine::parse_instant(&end_raw, end_zone)?,
        }))
    }
}

impl EventDateTime {
    /// The raw timestamp and the zone to read it in. An event-level `timeZone`
    /// overrides the calendar's zone.
    fn resolve(self, calendar_zone: Tz, which: &str) -> Result<(String, Tz), EngineError> {
        let zone = match self.time_zone.as_deref() {
            Some(name) => parse_timezone(name)?,
            None => calendar_zone,
        };
        let raw = self.date_time.or(self.date).ok_or_else(|| missing(which))?;
        Ok((raw, zone))
    }
}

fn missing(which: &str) -> EngineError {
    EngineError::InvalidTimestamp {
        value: String::new(),
        reason: format!("event has no {which} time"),
    }
}
