//! # quickcal-engine
//!
//! Free/busy availability across multiple calendars.
//!
//! The engine works on half-open intervals over absolute UTC instants. Each
//! calendar's events are merged into busy blocks, the busy blocks are inverted into
//! free time inside a query window, and the free time of every calendar is
//! intersected to find the slots open on all of them.
//!
//! ## Modules
//!
//! - [`interval`] — `TimeInterval`, the `[start, end)` primitive
//! - [`merge`] — Coalesce overlapping/adjacent intervals
//! - [`freebusy`] — Invert busy time into free time within a window
//! - [`availability`] — Per-calendar availability and the combined report
//! - [`intersect`] — Intersect free time across calendars
//! - [`event`] — Calendar events and timestamp normalization
//! - [`window`] — The `[now, now + days)` query window
//! - [`error`] — Error types

pub mod availability;
pub mod error;
pub mod event;
pub mod freebusy;
pub mod intersect;
pub mod interval;
pub mod merge;
pub mod window;

pub use availability::{
    build_calendar_availability, build_report, AvailabilityReport, CalendarAvailability,
    CalendarEvents, FailedCalendar,
};
pub use error::EngineError;
pub use event::{parse_instant, parse_timezone, CalendarEvent};
pub use freebusy::{first_free_interval, free_intervals};
pub use intersect::{intersect_all, intersect_availability, intersect_intervals};
pub use interval::TimeInterval;
pub use merge::merge_intervals;
pub use window::{QueryWindow, DEFAULT_DAYS};
