//! Text and JSON rendering of an availability report.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use quickcal_engine::{AvailabilityReport, TimeInterval};

const TIME_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// Render a human-readable report with times shown in `zone`.
pub fn render_text(report: &AvailabilityReport, zone: Tz) -> String {
    let mut out = String::from("Available times across all calendars:\n");

    for calendar in &report.calendars {
        let _ = writeln!(out, "\nCalendar: {}", calendar.name);
        if calendar.busy.is_empty() {
            out.push_str("All day available.\n");
            continue;
        }
        for busy in &calendar.busy {
            let _ = writeln!(out, "Busy: {}", format_interval(busy, zone));
        }
        for free in &calendar.free {
            let _ = writeln!(out, "Free: {}", format_interval(free, zone));
        }
    }

    for failed in &report.failed {
        let _ = writeln!(out, "\nSkipped calendar {}: {}", failed.calendar_id, failed.error);
    }

    out.push_str("\nOverall Available Times:\n");
    if report.combined.is_empty() {
        out.push_str("No available times.\n");
    } else {
        for slot in &report.combined {
            let _ = writeln!(out, "Available: {}", format_interval(slot, zone));
        }
    }

    out
}

/// Render the report as pretty-printed JSON with RFC 3339 UTC timestamps.
pub fn render_json(report: &AvailabilityReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn format_interval(interval: &TimeInterval, zone: Tz) -> String {
    format!(
        "{} - {}",
        format_instant(interval.start(), zone),
        format_instant(interval.end(), zone)
    )
}

fn format_instant(instant: DateTime<Utc>, zone: Tz) -> String {
    instant.with_timezone(&zone).format(TIME_FORMAT).to_string()
}
