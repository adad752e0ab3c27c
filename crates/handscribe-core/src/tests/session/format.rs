use crate::{format_duration, format_samples};

/// WHAT: Durations render as zero-padded MM:SS
/// WHY: Surfaces show 00:00 before the first tick
#[test]
fn given_elapsed_seconds_when_formatting_then_minutes_and_seconds() {
    assert_eq!(format_duration(0), "00:00");
    assert_eq!(format_duration(59), "00:59");
    assert_eq!(format_duration(60), "01:00");
    assert_eq!(format_duration(125), "02:05");
}

/// WHAT: Minutes keep counting past an hour
/// WHY: There is no hour field to roll over into
#[test]
fn given_more_than_an_hour_when_formatting_then_minutes_unbounded() {
    assert_eq!(format_duration(3_600), "60:00");
    assert_eq!(format_duration(6_000 * 60 + 7), "6000:07");
}

/// WHAT: Samples render with ellipsis suffixes separated by single spaces
/// WHY: Matches the placeholder transcript shown while recording
#[test]
fn given_samples_when_formatting_then_joined_with_ellipses() {
    assert_eq!(format_samples(&[]), "");
    assert_eq!(format_samples(&[42]), "42...");
    assert_eq!(format_samples(&[3, 0, 99]), "3... 0... 99...");
}
