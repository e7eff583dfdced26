//! Coalesce overlapping or adjacent intervals into a minimal disjoint set.

use crate::interval::TimeInterval;

/// Merge overlapping or touching intervals.
///
/// Returns a sorted, non-overlapping list covering exactly the same time as the
/// input. Back-to-back intervals (`a.end == b.start`) coalesce into one.
pub fn merge_intervals(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted = intervals.to_vec();
    // Sort by start time (then by end time for stability).
    sorted.sort_by_key(|interval| (interval.start(), interval.end()));

    sorted.into_iter().fold(Vec::new(), |mut merged, next| {
        match merged.last_mut() {
            Some(current) if next.start() <= current.end() => {
                if next.end() > current.end() {
                    // `current.start <= next.start < next.end`, so this never fails.
                    if let Some(extended) = TimeInterval::new(current.start(), next.end()) {
                        *current = extended;
                    }
                }
            }
            _ => merged.push(next),
        }
        merged
    })
}

/// True when `intervals` is sorted by start and no two of them overlap or touch.
pub fn is_merged(intervals: &[TimeInterval]) -> bool {
    intervals.windows(2).all(|pair| pair[0].end() < pair[1].start())
}
