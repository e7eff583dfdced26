//! Tests for per-calendar availability and the combined report.

use chrono::{DateTime, TimeZone, Utc};
use quickcal_engine::{
    build_calendar_availability, build_report, CalendarEvent, CalendarEvents, FailedCalendar,
    QueryWindow, TimeInterval,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn interval(start_hour: u32, end_hour: u32) -> TimeInterval {
    TimeInterval::new(at(start_hour, 0), at(end_hour, 0)).unwrap()
}

fn timed(title: &str, start_hour: u32, end_hour: u32) -> CalendarEvent {
    CalendarEvent {
        title: title.to_string(),
        is_all_day: false,
        start: at(start_hour, 0),
        end: at(end_hour, 0),
    }
}

fn all_day(title: &str) -> CalendarEvent {
    CalendarEvent {
        title: title.to_string(),
        is_all_day: true,
        start: Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap(),
    }
}

fn calendar(id: &str, events: Vec<CalendarEvent>) -> CalendarEvents {
    CalendarEvents {
        calendar_id: id.to_string(),
        name: format!("{id} calendar"),
        events,
    }
}

fn office_hours() -> QueryWindow {
    QueryWindow::from_bounds(at(9, 0), at(17, 0)).unwrap()
}

// ── Scenario 1: back-to-back meetings merge ─────────────────────────────────

#[test]
fn back_to_back_meetings_merge_into_one_busy_block() {
    let events = vec![timed("Planning", 10, 11), timed("Review", 11, 12)];

    let availability = build_calendar_availability("work", "Work", &events, &office_hours());

    assert_eq!(availability.calendar_id, "work");
    assert_eq!(availability.name, "Work");
    assert_eq!(availability.busy, vec![interval(10, 12)]);
    assert_eq!(availability.free, vec![interval(9, 10), interval(12, 17)]);
}

// ── Scenario 2: two calendars intersect ─────────────────────────────────────

#[test]
fn two_calendars_combine_to_shared_free_time() {
    // A is busy from 12:00, so free 09-12. B is busy until 10 and from 14, so free 10-14.
    let report = build_report(
        office_hours(),
        &[
            calendar("a", vec![timed("Offsite", 12, 17)]),
            calendar("b", vec![timed("Early", 9, 10), timed("Late", 14, 17)]),
        ],
    );

    assert_eq!(report.calendar("a").unwrap().free, vec![interval(9, 12)]);
    assert_eq!(report.calendar("b").unwrap().free, vec![interval(10, 14)]);
    assert_eq!(report.combined, vec![interval(10, 12)]);
}

// ── Scenario 3: no events ───────────────────────────────────────────────────

#[test]
fn calendar_without_events_is_free_for_the_whole_window() {
    let window = QueryWindow::new(at(9, 0), 5).unwrap();

    let availability = build_calendar_availability("empty", "Empty", &[], &window);

    assert!(availability.busy.is_empty());
    assert_eq!(
        availability.free,
        vec![TimeInterval::new(window.now, window.end).unwrap()]
    );
}

// ── Scenario 4: one fully booked calendar ───────────────────────────────────

#[test]
fn fully_booked_calendar_empties_the_combined_result() {
    let report = build_report(
        office_hours(),
        &[
            calendar("a", vec![timed("Focus", 9, 10)]),
            calendar("b", vec![timed("Conference", 8, 18)]),
            calendar("c", Vec::new()),
        ],
    );

    assert!(report.calendar("b").unwrap().free.is_empty());
    assert!(report.combined.is_empty());
}

// ── Scenario 5: all-day events are ignored ──────────────────────────────────

#[test]
fn all_day_events_do_not_block_time() {
    let with_all_day = vec![all_day("Holiday"), timed("Lunch", 12, 13)];
    let without = vec![timed("Lunch", 12, 13)];

    let a = build_calendar_availability("cal", "Cal", &with_all_day, &office_hours());
    let b = build_calendar_availability("cal", "Cal", &without, &office_hours());

    assert_eq!(a, b);
    assert_eq!(a.busy, vec![interval(12, 13)]);
}

#[test]
fn only_all_day_events_leave_the_window_free() {
    let availability =
        build_calendar_availability("cal", "Cal", &[all_day("Birthday")], &office_hours());
    assert_eq!(availability.free, vec![interval(9, 17)]);
}

// ── Edge cases ──────────────────────────────────────────────────────────────

#[test]
fn zero_length_events_are_dropped() {
    let events = vec![timed("Ping", 11, 11), timed("Sync", 14, 15)];
    let availability = build_calendar_availability("cal", "Cal", &events, &office_hours());

    assert_eq!(availability.busy, vec![interval(14, 15)]);
    assert_eq!(availability.free, vec![interval(9, 14), interval(15, 17)]);
}

#[test]
fn report_with_no_calendars_has_no_combined_time() {
    let report = build_report(office_hours(), &[]);
    assert!(report.calendars.is_empty());
    assert!(report.combined.is_empty());
}

#[test]
fn report_keeps_calendar_order() {
    let report = build_report(
        office_hours(),
        &[calendar("zeta", Vec::new()), calendar("alpha", Vec::new())],
    );
    let ids: Vec<&str> = report
        .calendars
        .iter()
        .map(|c| c.calendar_id.as_str())
        .collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);
}

#[test]
fn combined_free_time_equals_free_time_of_all_busy_blocks() {
    let calendars = [
        calendar("a", vec![timed("One", 9, 10), timed("Two", 13, 14)]),
        calendar("b", vec![timed("Three", 11, 12), timed("Four", 13, 15)]),
    ];
    let report = build_report(office_hours(), &calendars);

    assert_eq!(
        report.combined,
        vec![interval(10, 11), interval(12, 13), interval(15, 17)]
    );
}

#[test]
fn failures_are_carried_in_the_report() {
    let report = build_report(office_hours(), &[calendar("ok", Vec::new())]).with_failures(vec![
        FailedCalendar {
            calendar_id: "broken".to_string(),
            error: "HTTP 500".to_string(),
        },
    ]);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.combined, vec![interval(9, 17)]);
}

#[test]
fn report_serializes_intervals_as_rfc3339() {
    let report = build_report(
        office_hours(),
        &[calendar("a", vec![timed("Lunch", 12, 13)])],
    );
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["combined"][0]["start"], "2026-03-16T09:00:00Z");
    assert_eq!(json["combined"][0]["end"], "2026-03-16T12:00:00Z");
    assert_eq!(json["calendars"][0]["busy"][0]["start"], "2026-03-16T12:00:00Z");
    assert!(json.get("failed").is_none());
}
