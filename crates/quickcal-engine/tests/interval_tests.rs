//! Tests for the `TimeInterval` primitive.

use chrono::{DateTime, Duration, TimeZone, Utc};
use quickcal_engine::interval::total_duration;
use quickcal_engine::TimeInterval;

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
}

fn interval(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> TimeInterval {
    TimeInterval::new(at(start_hour, start_min), at(end_hour, end_min)).unwrap()
}

#[test]
fn empty_and_inverted_ranges_are_never_constructed() {
    assert!(TimeInterval::new(at(10, 0), at(10, 0)).is_none());
    assert!(TimeInterval::new(at(11, 0), at(10, 0)).is_none());
    assert!(TimeInterval::new(at(10, 0), at(10, 1)).is_some());
}

#[test]
fn duration_is_end_minus_start() {
    let slot = interval(9, 15, 10, 45);
    assert_eq!(slot.duration(), Duration::minutes(90));
    assert_eq!(slot.duration_minutes(), 90);
}

#[test]
fn end_is_exclusive() {
    let slot = interval(9, 0, 10, 0);
    assert!(slot.contains(at(9, 0)));
    assert!(slot.contains(at(9, 59)));
    assert!(!slot.contains(at(10, 0)));
}

#[test]
fn adjacent_intervals_touch_but_do_not_overlap() {
    let a = interval(9, 0, 10, 0);
    let b = interval(10, 0, 11, 0);

    assert!(!a.overlaps(&b));
    assert!(a.touches(&b));
    assert!(a.intersection(&b).is_none());
}

#[test]
fn intersection_is_max_start_min_end() {
    let a = interval(9, 0, 12, 0);
    let b = interval(10, 0, 14, 0);

    assert!(a.overlaps(&b));
    assert_eq!(a.intersection(&b), Some(interval(10, 0, 12, 0)));
    assert_eq!(b.intersection(&a), Some(interval(10, 0, 12, 0)));
}

#[test]
fn contained_interval_intersects_to_itself() {
    let outer = interval(8, 0, 18, 0);
    let inner = interval(12, 30, 13, 0);
    assert_eq!(outer.intersection(&inner), Some(inner));
}

#[test]
fn total_duration_sums_disjoint_intervals() {
    let slots = [interval(9, 0, 10, 0), interval(11, 0, 11, 30)];
    assert_eq!(total_duration(&slots), Duration::minutes(90));
    assert_eq!(total_duration(&[]), Duration::zero());
}

#[test]
fn deserialization_rejects_inverted_intervals() {
    let ok = r#"{"start":"2026-03-02T09:00:00Z","end":"2026-03-02T10:00:00Z"}"#;
    let parsed: TimeInterval = serde_json::from_str(ok).unwrap();
    assert_eq!(parsed, interval(9, 0, 10, 0));

    let inverted = r#"{"start":"2026-03-02T10:00:00Z","end":"2026-03-02T09:00:00Z"}"#;
    let err = serde_json::from_str::<TimeInterval>(inverted).unwrap_err();
    assert!(err.to_string().contains("must be before end"), "{err}");
}
