use chrono::{NaiveDate, NaiveDateTime};
use contentcore_model::{DataType, Value};
use contentcore_types::TimeSpan;
use serde_json::json;
use uuid::Uuid;

fn date_time(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

// ── Zero values ──────────────────────────────────────────────────

#[test]
fn zero_values_match_their_type() {
    for data_type in DataType::ALL {
        assert_eq!(Value::zero(data_type).data_type(), data_type);
    }
}

#[test]
fn zero_values_are_documented_placeholders() {
    assert_eq!(Value::zero(DataType::Boolean), Value::Boolean(false));
    assert_eq!(Value::zero(DataType::Bytes), Value::Bytes(vec![]));
    assert_eq!(Value::zero(DataType::DateTime), Value::DateTime(date_time(1, 1, 1, 0, 0, 0)));
    assert_eq!(Value::zero(DataType::Float), Value::Float(0.0));
    assert_eq!(Value::zero(DataType::Guid), Value::Guid(Uuid::nil()));
    assert_eq!(Value::zero(DataType::Integer), Value::Integer(0));
    assert_eq!(Value::zero(DataType::TimeSpan), Value::TimeSpan(TimeSpan::ZERO));
    assert_eq!(Value::zero(DataType::Uri), Value::Uri(None));
    assert_eq!(Value::zero(DataType::String), Value::String(String::new()));
}

// ── Boolean ──────────────────────────────────────────────────────

#[test]
fn boolean_parses_case_insensitively() {
    assert_eq!(Value::coerce(DataType::Boolean, "True"), Value::Boolean(true));
    assert_eq!(Value::coerce(DataType::Boolean, " FALSE "), Value::Boolean(false));
}

#[test]
fn boolean_falls_back_to_false() {
    assert_eq!(Value::coerce(DataType::Boolean, "maybe"), Value::Boolean(false));
    assert_eq!(Value::coerce(DataType::Boolean, "1"), Value::Boolean(false));
    assert_eq!(Value::coerce(DataType::Boolean, ""), Value::Boolean(false));
}

// ── Bytes ────────────────────────────────────────────────────────

#[test]
fn bytes_decode_base64() {
    assert_eq!(Value::coerce(DataType::Bytes, "aGVsbG8="), Value::Bytes(b"hello".to_vec()));
}

#[test]
fn bytes_ignore_embedded_whitespace() {
    assert_eq!(Value::coerce(DataType::Bytes, "aGVs\nbG8="), Value::Bytes(b"hello".to_vec()));
}

#[test]
fn empty_bytes_are_empty() {
    assert_eq!(Value::coerce(DataType::Bytes, ""), Value::Bytes(vec![]));
}

#[test]
fn bytes_accept_non_canonical_final_symbol() {
    assert_eq!(Value::coerce(DataType::Bytes, "QR=="), Value::Bytes(vec![0x41]));
}

#[test]
fn invalid_base64_falls_back_to_empty() {
    assert_eq!(Value::coerce(DataType::Bytes, "not base64!"), Value::Bytes(vec![]));
}

// ── DateTime ─────────────────────────────────────────────────────

#[test]
fn date_time_parses_iso_forms() {
    let expected = Value::DateTime(date_time(2024, 3, 15, 8, 30, 0));
    assert_eq!(Value::coerce(DataType::DateTime, "2024-03-15T08:30:00"), expected);
    assert_eq!(Value::coerce(DataType::DateTime, "2024-03-15 08:30:00"), expected);
    assert_eq!(Value::coerce(DataType::DateTime, "2024-03-15T08:30"), expected);
    assert_eq!(Value::coerce(DataType::DateTime, "2024-03-15T08:30:00Z"), expected);
}

#[test]
fn date_time_parses_invariant_forms() {
    let expected = Value::DateTime(date_time(2024, 3, 15, 8, 30, 0));
    assert_eq!(Value::coerce(DataType::DateTime, "03/15/2024 08:30:00"), expected);
    assert_eq!(Value::coerce(DataType::DateTime, "03/15/2024 8:30:00 AM"), expected);
}

#[test]
fn date_only_is_midnight() {
    let expected = Value::DateTime(date_time(2024, 3, 15, 0, 0, 0));
    assert_eq!(Value::coerce(DataType::DateTime, "2024-03-15"), expected);
    assert_eq!(Value::coerce(DataType::DateTime, "03/15/2024"), expected);
}

#[test]
fn date_time_keeps_fractional_seconds() {
    let v = Value::coerce(DataType::DateTime, "2024-03-15T08:30:00.250");
    let dt = v.as_date_time().unwrap();
    assert_eq!(dt.and_utc().timestamp_subsec_millis(), 250);
}

#[test]
fn date_time_falls_back_to_2000() {
    let expected = Value::DateTime(date_time(2000, 1, 1, 0, 0, 0));
    assert_eq!(Value::coerce(DataType::DateTime, "yesterday"), expected);
    assert_eq!(Value::coerce(DataType::DateTime, ""), expected);
    assert_eq!(Value::coerce(DataType::DateTime, "2024-02-30"), expected);
}

// ── Float ────────────────────────────────────────────────────────

#[test]
fn float_parses_decimal_and_exponent() {
    assert_eq!(Value::coerce(DataType::Float, "3.25"), Value::Float(3.25));
    assert_eq!(Value::coerce(DataType::Float, " -1e3 "), Value::Float(-1000.0));
}

#[test]
fn float_falls_back_to_zero() {
    assert_eq!(Value::coerce(DataType::Float, "three"), Value::Float(0.0));
    assert_eq!(Value::coerce(DataType::Float, "NaN"), Value::Float(0.0));
}

// ── Guid ─────────────────────────────────────────────────────────

#[test]
fn guid_parses_common_layouts() {
    let g = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
    for raw in [
        "67e55044-10b1-426f-9247-bb680e5fe0c8",
        "67e5504410b1426f9247bb680e5fe0c8",
        "{67e55044-10b1-426f-9247-bb680e5fe0c8}",
        "67E55044-10B1-426F-9247-BB680E5FE0C8",
    ] {
        assert_eq!(Value::coerce(DataType::Guid, raw), Value::Guid(g), "{raw}");
    }
}

#[test]
fn guid_falls_back_to_fresh_random() {
    let a = Value::coerce(DataType::Guid, "not-a-guid").as_guid().unwrap();
    let b = Value::coerce(DataType::Guid, "not-a-guid").as_guid().unwrap();
    assert_ne!(a, Uuid::nil());
    assert_ne!(a, b);
    assert_eq!(a.get_version_num(), 4);
}

// ── Integer ──────────────────────────────────────────────────────

#[test]
fn integer_parses_signed_32_bit() {
    assert_eq!(Value::coerce(DataType::Integer, "42"), Value::Integer(42));
    assert_eq!(Value::coerce(DataType::Integer, " -7 "), Value::Integer(-7));
    assert_eq!(Value::coerce(DataType::Integer, "2147483647"), Value::Integer(i32::MAX));
}

#[test]
fn integer_falls_back_to_zero() {
    assert_eq!(Value::coerce(DataType::Integer, "not-a-number"), Value::Integer(0));
    assert_eq!(Value::coerce(DataType::Integer, "2147483648"), Value::Integer(0));
    assert_eq!(Value::coerce(DataType::Integer, "4.5"), Value::Integer(0));
}

// ── TimeSpan ─────────────────────────────────────────────────────

#[test]
fn time_span_parses_clock_form() {
    assert_eq!(
        Value::coerce(DataType::TimeSpan, "01:30:00"),
        Value::TimeSpan(TimeSpan::from_seconds(5400))
    );
}

#[test]
fn time_span_falls_back_to_zero() {
    assert_eq!(Value::coerce(DataType::TimeSpan, "an hour"), Value::TimeSpan(TimeSpan::ZERO));
}

// ── Uri ──────────────────────────────────────────────────────────

#[test]
fn uri_parses_absolute_urls() {
    let v = Value::coerce(DataType::Uri, "https://example.com/a?b=c");
    assert_eq!(v.as_uri().unwrap().as_str(), "https://example.com/a?b=c");
}

#[test]
fn relative_uri_is_null() {
    let v = Value::coerce(DataType::Uri, "/relative/path");
    assert!(v.is_null());
    assert_eq!(v, Value::Uri(None));
}

// ── String ───────────────────────────────────────────────────────

#[test]
fn string_is_stored_verbatim() {
    assert_eq!(Value::coerce(DataType::String, "  padded  "), Value::from("  padded  "));
}

// ── Accessors and conversions ────────────────────────────────────

#[test]
fn accessors_only_answer_for_their_variant() {
    let v = Value::from(5);
    assert_eq!(v.as_i32(), Some(5));
    assert_eq!(v.as_bool(), None);
    assert_eq!(v.as_str(), None);
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from(2.5).as_f64(), Some(2.5));
    assert_eq!(Value::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
    assert_eq!(Value::from(TimeSpan::ZERO).as_time_span(), Some(TimeSpan::ZERO));
}

// ── Display and serialization ────────────────────────────────────

#[test]
fn display_uses_wire_text() {
    assert_eq!(Value::Boolean(true).to_string(), "true");
    assert_eq!(Value::Bytes(b"hello".to_vec()).to_string(), "aGVsbG8=");
    assert_eq!(Value::DateTime(date_time(2000, 1, 1, 0, 0, 0)).to_string(), "2000-01-01T00:00:00");
    assert_eq!(Value::TimeSpan(TimeSpan::from_seconds(61)).to_string(), "00:01:01");
    assert_eq!(Value::Uri(None).to_string(), "");
}

#[test]
fn display_of_whole_float_differs_from_json() {
    assert_eq!(Value::Float(42.0).to_string(), "42");
    assert_eq!(serde_json::to_string(&Value::Float(42.0)).unwrap(), "42.0");
}

#[test]
fn serialization_uses_native_json_forms() {
    assert_eq!(serde_json::to_value(Value::Boolean(true)).unwrap(), json!(true));
    assert_eq!(serde_json::to_value(Value::Integer(42)).unwrap(), json!(42));
    assert_eq!(serde_json::to_value(Value::Float(1.5)).unwrap(), json!(1.5));
    assert_eq!(serde_json::to_value(Value::Bytes(b"hi".to_vec())).unwrap(), json!("aGk="));
    assert_eq!(serde_json::to_value(Value::Uri(None)).unwrap(), json!(null));
    assert_eq!(
        serde_json::to_value(Value::Guid(Uuid::nil())).unwrap(),
        json!("00000000-0000-0000-0000-000000000000")
    );
    assert_eq!(
        serde_json::to_value(Value::DateTime(date_time(2000, 1, 1, 0, 0, 0))).unwrap(),
        json!("2000-01-01T00:00:00")
    );
    assert_eq!(
        serde_json::to_value(Value::TimeSpan(TimeSpan::from_seconds(90))).unwrap(),
        json!("00:01:30")
    );
}
