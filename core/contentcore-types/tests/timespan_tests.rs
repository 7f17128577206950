use contentcore_types::{Error, TimeSpan};
use proptest::prelude::*;

fn span(s: &str) -> TimeSpan {
    s.parse().unwrap()
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parses_hours_minutes_seconds() {
    let t = span("01:02:03");
    assert_eq!(t, TimeSpan::from_parts(0, 1, 2, 3).unwrap());
    assert_eq!(t.hours(), 1);
    assert_eq!(t.minutes(), 2);
    assert_eq!(t.seconds(), 3);
}

#[test]
fn parses_hours_and_minutes_only() {
    assert_eq!(span("10:30"), TimeSpan::from_parts(0, 10, 30, 0).unwrap());
}

#[test]
fn parses_bare_days() {
    assert_eq!(span("3"), TimeSpan::from_parts(3, 0, 0, 0).unwrap());
}

#[test]
fn parses_days_with_dot_separator() {
    let t = span("2.04:05:06");
    assert_eq!(t.days(), 2);
    assert_eq!(t, TimeSpan::from_parts(2, 4, 5, 6).unwrap());
}

#[test]
fn parses_days_with_colon_separator() {
    assert_eq!(span("2:04:05:06"), span("2.04:05:06"));
}

#[test]
fn parses_fractional_seconds() {
    let t = span("00:00:01.5");
    assert_eq!(t.ticks(), 15_000_000);
    assert!((t.total_seconds() - 1.5).abs() < f64::EPSILON);
}

#[test]
fn parses_negative_spans() {
    let t = span("-01:00:00");
    assert!(t.is_negative());
    assert_eq!(t, -TimeSpan::from_parts(0, 1, 0, 0).unwrap());
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(span("  00:01:00 "), TimeSpan::from_seconds(60));
}

#[test]
fn rejects_garbage() {
    for bad in ["", "abc", "1:2:3:4:5", "01:xx", "1.5", "01:02:03.", "-"] {
        assert!(bad.parse::<TimeSpan>().is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn rejects_out_of_range_components() {
    let err = "24:00".parse::<TimeSpan>().unwrap_err();
    assert!(matches!(err, Error::TimeSpanOverflow(_)));
    assert!("00:60:00".parse::<TimeSpan>().is_err());
    assert!("00:00:60".parse::<TimeSpan>().is_err());
}

#[test]
fn rejects_more_than_seven_fraction_digits() {
    assert!("00:00:01.12345678".parse::<TimeSpan>().is_err());
}

#[test]
fn rejects_days_beyond_range() {
    let err = "99999999".parse::<TimeSpan>().unwrap_err();
    assert!(matches!(err, Error::TimeSpanOverflow(_)));
}

// ── Formatting ───────────────────────────────────────────────────

#[test]
fn zero_formats_as_clock() {
    assert_eq!(TimeSpan::ZERO.to_string(), "00:00:00");
    assert!(TimeSpan::default().is_zero());
}

#[test]
fn days_and_fraction_are_only_shown_when_present() {
    assert_eq!(span("1.02:03:04.5").to_string(), "1.02:03:04.5000000");
    assert_eq!(span("02:03:04").to_string(), "02:03:04");
}

#[test]
fn negative_spans_keep_sign_in_front() {
    assert_eq!(span("-1.00:00:01").to_string(), "-1.00:00:01");
}

#[test]
fn serializes_as_constant_string() {
    let json = serde_json::to_string(&span("00:01:30")).unwrap();
    assert_eq!(json, "\"00:01:30\"");
    let back: TimeSpan = serde_json::from_str(&json).unwrap();
    assert_eq!(back, TimeSpan::from_seconds(90));
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn display_output_parses_back(ticks in any::<i64>()) {
        let t = TimeSpan::from_ticks(ticks);
        let parsed: TimeSpan = t.to_string().parse().unwrap();
        prop_assert_eq!(parsed, t);
    }
}
