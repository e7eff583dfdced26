//! Compute free time from busy time.
//!
//! Walks a merged busy set with a cursor that starts at the window start, emitting
//! the gaps between busy periods and a trailing gap up to the window end.

use chrono::{DateTime, Duration, Utc};

use crate::interval::TimeInterval;
use crate::window::QueryWindow;

/// Invert a disjoint, start-sorted busy set into free intervals within `window`.
///
/// The busy set is expected to be the output of [`crate::merge_intervals`]. Busy
/// intervals that reach outside the window are clipped by it, so every returned
/// interval lies inside `[window.now, window.end)`. The union of the result with the
/// (clipped) busy set covers the window exactly.
pub fn free_intervals(window: &QueryWindow, busy: &[TimeInterval]) -> Vec<TimeInterval> {
    let (mut free, cursor) = busy.iter().fold(
        (Vec::new(), window.now),
        |(mut free, cursor): (Vec<TimeInterval>, DateTime<Utc>), interval| {
            if cursor < interval.start() {
                free.extend(TimeInterval::new(cursor, interval.start().min(window.end)));
            }
            (free, cursor.max(interval.end()))
        },
    );

    // Trailing free slot after the last busy period.
    free.extend(TimeInterval::new(cursor, window.end));
    free
}

/// Keep only free intervals lasting at least `min_duration`.
pub fn at_least(free: &[TimeInterval], min_duration: Duration) -> Vec<TimeInterval> {
    free.iter()
        .copied()
        .filter(|interval| interval.duration() >= min_duration)
        .collect()
}

/// Find the first free interval of at least `min_duration`.
pub fn first_free_interval(
    free: &[TimeInterval],
    min_duration: Duration,
) -> Option<TimeInterval> {
    free.iter()
        .copied()
        .find(|interval| interval.duration() >= min_duration)
}
