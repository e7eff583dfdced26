//! Per-calendar availability and the combined multi-calendar report.
//!
//! Each calendar's events are turned into a merged busy set and the free time left
//! inside the query window. The report then intersects every calendar's free time to
//! find the slots that are open on all of them at once.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::CalendarEvent;
use crate::freebusy;
use crate::intersect;
use crate::interval::TimeInterval;
use crate::merge;
use crate::window::QueryWindow;

/// The events fetched from one calendar for a query window.
#[derive(Debug, Clone)]
pub struct CalendarEvents {
    /// Opaque identifier for this calendar (e.g., "primary", "team@example.com").
    pub calendar_id: String,
    /// Human-readable calendar name.
    pub name: String,
    pub events: Vec<CalendarEvent>,
}

/// Busy and free time for a single calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarAvailability {
    pub calendar_id: String,
    pub name: String,
    /// Merged busy blocks (sorted by start, non-overlapping). Not clipped to the
    /// window: a block that straddles `now` keeps its real start.
    pub busy: Vec<TimeInterval>,
    /// Free intervals inside the window (sorted by start, non-overlapping).
    pub free: Vec<TimeInterval>,
}

/// A calendar whose events could not be fetched and was left out of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedCalendar {
    pub calendar_id: String,
    pub error: String,
}

/// Availability across all calendars for one query window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub window: QueryWindow,
    /// Per-calendar results, in the order the calendars were supplied.
    pub calendars: Vec<CalendarAvailability>,
    /// Time free on every calendar in `calendars`.
    pub combined: Vec<TimeInterval>,
    /// Calendars skipped because fetching them failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedCalendar>,
}

/// Build one calendar's availability within `window`.
///
/// All-day events are ignored: they do not block time in this model. Zero-length or
/// inverted events are dropped. A calendar without timed events is free for the
/// whole window.
pub fn build_calendar_availability(
    calendar_id: &str,
    name: &str,
    events: &[CalendarEvent],
    window: &QueryWindow,
) -> CalendarAvailability {
    let timed: Vec<TimeInterval> = events
        .iter()
        .filter(|event| !event.is_all_day)
        .filter_map(CalendarEvent::interval)
        .collect();

    let skipped = events.len() - timed.len();
    if skipped > 0 {
        debug!(calendar_id, skipped, "ignoring all-day and empty events");
    }

    let busy = merge::merge_intervals(&timed);
    let free = freebusy::free_intervals(window, &busy);

    debug!(
        calendar_id,
        busy = busy.len(),
        free = free.len(),
        "built calendar availability"
    );

    CalendarAvailability {
        calendar_id: calendar_id.to_string(),
        name: name.to_string(),
        busy,
        free,
    }
}

/// Build per-calendar availability for every calendar and intersect the results.
pub fn build_report(window: QueryWindow, calendars: &[CalendarEvents]) -> AvailabilityReport {
    let calendars: Vec<CalendarAvailability> = calendars
        .iter()
        .map(|calendar| {
            build_calendar_availability(
                &calendar.calendar_id,
                &calendar.name,
                &calendar.events,
                &window,
            )
        })
        .collect();

    AvailabilityReport::new(window, calendars)
}

impl AvailabilityReport {
    /// Assemble a report, computing the combined availability of `calendars`.
    pub fn new(window: QueryWindow, calendars: Vec<CalendarAvailability>) -> Self {
        let combined = intersect::intersect_availability(&calendars);
        Self {
            window,
            calendars,
            combined,
            failed: Vec::new(),
        }
    }

    /// Record calendars that were skipped because fetching them failed.
    pub fn with_failures(mut self, failed: Vec<FailedCalendar>) -> Self {
        self.failed = failed;
        self
    }

    /// Look up one calendar's availability by id.
    pub fn calendar(&self, calendar_id: &str) -> Option<&CalendarAvailability> {
        self.calendars
            .iter()
            .find(|calendar| calendar.calendar_id == calendar_id)
    }
}
