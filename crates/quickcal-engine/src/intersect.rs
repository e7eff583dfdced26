//! Intersect free time across calendars.

use crate::availability::CalendarAvailability;
use crate::interval::TimeInterval;

/// Pairwise intersection of two free-interval sequences.
///
/// Every interval of `a` is intersected with every interval of `b`; only non-empty
/// intersections are kept. For sorted, disjoint inputs the output is sorted and
/// disjoint as well.
pub fn intersect_intervals(a: &[TimeInterval], b: &[TimeInterval]) -> Vec<TimeInterval> {
    a.iter()
        .flat_map(|left| b.iter().filter_map(move |right| left.intersection(right)))
        .collect()
}

/// Reduce any number of free-interval sequences to the time free in all of them.
///
/// Zero sequences yield an empty result: no data is not the same as full availability.
pub fn intersect_all<'a, I>(sequences: I) -> Vec<TimeInterval>
where
    I: IntoIterator<Item = &'a [TimeInterval]>,
{
    let mut sequences = sequences.into_iter();
    let Some(first) = sequences.next() else {
        return Vec::new();
    };

    sequences.fold(first.to_vec(), |running, next| {
        intersect_intervals(&running, next)
    })
}

/// Time free on every calendar simultaneously.
pub fn intersect_availability(calendars: &[CalendarAvailability]) -> Vec<TimeInterval> {
    intersect_all(calendars.iter().map(|calendar| calendar.free.as_slice()))
}
