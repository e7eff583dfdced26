//! Snapshot-file source: calendars and events read from a local JSON export.
//!
//! The file holds Google Calendar event objects grouped by calendar:
//!
//! ```json
//! {
//!   "calendars": [
//!     {
//!       "id": "primary",
//!       "summary": "Me",
//!       "timeZone": "America/Chicago",
//!       "items": [
//!         {"summary": "Standup",
//!          "start": {"dateTime": "2026-03-16T09:00:00-05:00"},
//!          "end": {"dateTime": "2026-03-16T09:15:00-05:00"}}
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;
use quickcal_engine::{CalendarEvent, QueryWindow};
use serde::Deserialize;

use super::wire::{CalendarListEntry, GoogleEvent};
use super::{CalendarInfo, CalendarSource, SourceError};

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    calendars: Vec<SnapshotCalendar>,
}

#[derive(Debug, Deserialize)]
struct SnapshotCalendar {
    #[serde(flatten)]
    entry: CalendarListEntry,
    #[serde(default)]
    items: Vec<GoogleEvent>,
}

/// Calendar source backed by a snapshot file loaded at construction.
#[derive(Debug)]
pub struct SnapshotSource {
    calendars: Vec<(CalendarInfo, Vec<GoogleEvent>)>,
}

impl SnapshotSource {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let calendars = snapshot
            .calendars
            .into_iter()
            .map(|calendar| (calendar.entry.into_info(), calendar.items))
            .collect();
        Ok(Self { calendars })
    }
}

#[async_trait]
impl CalendarSource for SnapshotSource {
    async fn list_calendars(&self) -> Result<Vec<CalendarInfo>, SourceError> {
        Ok(self.calendars.iter().map(|(info, _)| info.clone()).collect())
    }

    async fn fetch_events(
        &self,
        calendar: &CalendarInfo,
        window: &QueryWindow,
    ) -> Result<Vec<CalendarEvent>, SourceError> {
        let (info, items) = self
            .calendars
            .iter()
            .find(|(info, _)| info.id == calendar.id)
            .ok_or_else(|| SourceError::CalendarNotFound(calendar.id.clone()))?;

        let mut events = Vec::new();
        for item in items {
            if let Some(event) = item.clone().into_event(info.time_zone)? {
                // Same overlap rule the API applies to timeMin/timeMax.
                if event.start < window.end && event.end > window.now {
                    events.push(event);
                }
            }
        }
        Ok(events)
    }
}
