//! WASM bindings for quickcal-engine.
//!
//! Exposes interval merging, free-time computation, and multi-calendar
//! availability to JavaScript via `wasm-bindgen`. All complex types are passed as
//! JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p quickcal-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/quickcal-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/quickcal_wasm.wasm
//! ```

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use quickcal_engine::{
    build_report, intersect_intervals, merge_intervals, parse_instant, parse_timezone,
    CalendarEvent, CalendarEvents, QueryWindow, TimeInterval,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

impl From<&TimeInterval> for IntervalDto {
    fn from(interval: &TimeInterval) -> Self {
        Self {
            start: interval.start().to_rfc3339(),
            end: interval.end().to_rfc3339(),
            duration_minutes: interval.duration_minutes(),
        }
    }
}

/// Input format for intervals passed from JavaScript.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
}

/// Input format for one calendar passed to `availabilityReport`.
#[derive(Deserialize)]
struct CalendarInput {
    calendar_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    events: Vec<EventInput>,
}

#[derive(Deserialize)]
struct EventInput {
    #[serde(default)]
    title: String,
    start: String,
    end: String,
    #[serde(default)]
    is_all_day: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Timestamps without an offset are read as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(s, Tz::UTC).map_err(|e| e.to_string())
}

/// Convert a JSON array of `{start, end}` objects into intervals.
fn parse_intervals_json(json: &str) -> Result<Vec<TimeInterval>, String> {
    let inputs: Vec<IntervalInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid intervals JSON: {}", e))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start)?;
            let end = parse_datetime(&input.end)?;
            TimeInterval::new(start, end).ok_or_else(|| {
                format!(
                    "Invalid interval: start '{}' must be before end '{}'",
                    input.start, input.end
                )
            })
        })
        .collect()
}

fn to_json(intervals: &[TimeInterval]) -> Result<String, String> {
    let dtos: Vec<IntervalDto> = intervals.iter().map(IntervalDto::from).collect();
    serde_json::to_string(&dtos).map_err(|e| format!("Serialization error: {}", e))
}

fn merge_json(intervals_json: &str) -> Result<String, String> {
    let intervals = parse_intervals_json(intervals_json)?;
    to_json(&merge_intervals(&intervals))
}

fn free_json(
    busy_json: &str,
    window_start: &str,
    window_end: &str,
    min_minutes: Option<u32>,
) -> Result<String, String> {
    let busy = merge_intervals(&parse_intervals_json(busy_json)?);
    let window = QueryWindow::from_bounds(parse_datetime(window_start)?, parse_datetime(window_end)?)
        .map_err(|e| e.to_string())?;

    let mut free = quickcal_engine::free_intervals(&window, &busy);
    if let Some(minutes) = min_minutes {
        free = quickcal_engine::freebusy::at_least(&free, Duration::minutes(i64::from(minutes)));
    }
    to_json(&free)
}

fn intersect_json(a_json: &str, b_json: &str) -> Result<String, String> {
    let a = merge_intervals(&parse_intervals_json(a_json)?);
    let b = merge_intervals(&parse_intervals_json(b_json)?);
    to_json(&intersect_intervals(&a, &b))
}

fn report_json(
    calendars_json: &str,
    now: &str,
    days: u32,
    timezone: Option<&str>,
) -> Result<String, String> {
    let zone = match timezone {
        Some(name) => parse_timezone(name).map_err(|e| e.to_string())?,
        None => Tz::UTC,
    };
    let window = QueryWindow::new(parse_datetime(now)?, days).map_err(|e| e.to_string())?;

    let inputs: Vec<CalendarInput> =
        serde_json::from_str(calendars_json).map_err(|e| format!("Invalid calendars JSON: {}", e))?;

    let calendars = inputs
        .into_iter()
        .map(|input| {
            let events = input
                .events
                .into_iter()
                .map(|event| {
                    CalendarEvent::from_raw(event.title, &event.start, &event.end, event.is_all_day, zone)
                        .map_err(|e| format!("Calendar '{}': {}", input.calendar_id, e))
                })
                .collect::<Result<Vec<_>, String>>()?;
            Ok(CalendarEvents {
                name: input.name.unwrap_or_else(|| input.calendar_id.clone()),
                calendar_id: input.calendar_id,
                events,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    serde_json::to_string(&build_report(window, &calendars))
        .map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Merge overlapping and touching intervals.
///
/// `intervals_json` must be a JSON array of `{start, end}` objects with ISO 8601
/// datetime strings. Returns a JSON array of `{start, end, duration_minutes}`
/// objects, sorted and pairwise disjoint.
#[wasm_bindgen(js_name = "mergeIntervals")]
pub fn merge_intervals_js(intervals_json: &str) -> Result<String, JsValue> {
    merge_json(intervals_json).map_err(|e| JsValue::from_str(&e))
}

/// Find the free time inside `[window_start, window_end)` given busy intervals.
///
/// Busy intervals may overlap and may extend past the window; they are merged
/// and clipped. `min_minutes` drops free slots shorter than that many minutes.
#[wasm_bindgen(js_name = "freeIntervals")]
pub fn free_intervals_js(
    busy_json: &str,
    window_start: &str,
    window_end: &str,
    min_minutes: Option<u32>,
) -> Result<String, JsValue> {
    free_json(busy_json, window_start, window_end, min_minutes).map_err(|e| JsValue::from_str(&e))
}

/// Intersect two sets of free intervals.
#[wasm_bindgen(js_name = "intersectIntervals")]
pub fn intersect_intervals_js(a_json: &str, b_json: &str) -> Result<String, JsValue> {
    intersect_json(a_json, b_json).map_err(|e| JsValue::from_str(&e))
}

/// Compute per-calendar busy/free time and the time free on every calendar.
///
/// `calendars_json` is a JSON array of
/// `{calendar_id, name?, events: [{title?, start, end, is_all_day?}]}`.
/// Timestamps without an offset are read in `timezone` (UTC when omitted).
/// The window runs from `now` for `days` days. Returns the report as JSON with
/// `window`, `calendars` and `combined` fields.
#[wasm_bindgen(js_name = "availabilityReport")]
pub fn availability_report_js(
    calendars_json: &str,
    now: &str,
    days: u32,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    report_json(calendars_json, now, days, timezone.as_deref()).map_err(|e| JsValue::from_str(&e))
}
