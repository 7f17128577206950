//! Text-to-value coercion, one function per data type.
//!
//! Every coercer either parses the raw text or hands back the type's
//! fallback value; none of them can fail.

use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use contentcore_types::TimeSpan;
use url::Url;
use uuid::Uuid;

use crate::{DataType, Value};

/// Result of coercing one raw string.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Coercion {
    Parsed(Value),
    Fallback(Value),
}

impl Coercion {
    pub(crate) fn into_value(self) -> Value {
        match self {
            Coercion::Parsed(v) | Coercion::Fallback(v) => v,
        }
    }

    #[cfg(test)]
    fn is_fallback(&self) -> bool {
        matches!(self, Coercion::Fallback(_))
    }
}

type Coercer = fn(&str) -> Coercion;

/// Indexed by `DataType::index`, so the order must follow `DataType::ALL`.
static COERCERS: [Coercer; 9] = [
    coerce_boolean,
    coerce_bytes,
    coerce_date_time,
    coerce_float,
    coerce_guid,
    coerce_integer,
    coerce_time_span,
    coerce_uri,
    coerce_string,
];

/// Standard alphabet, tolerant of non-zero bits in the final symbol.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Date and time layouts tried after RFC 3339, most specific first.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

/// Date-only layouts; the time of day is midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

pub(crate) fn coerce(data_type: DataType, raw: &str) -> Coercion {
    COERCERS[data_type.index()](raw)
}

/// The value a DateTime field takes when its text does not parse.
pub(crate) fn fallback_date_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn coerce_boolean(raw: &str) -> Coercion {
    let text = raw.trim();
    if text.eq_ignore_ascii_case("true") {
        Coercion::Parsed(Value::Boolean(true))
    } else if text.eq_ignore_ascii_case("false") {
        Coercion::Parsed(Value::Boolean(false))
    } else {
        Coercion::Fallback(Value::Boolean(false))
    }
}

fn coerce_bytes(raw: &str) -> Coercion {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    match BASE64.decode(compact.as_bytes()) {
        Ok(bytes) => Coercion::Parsed(Value::Bytes(bytes)),
        Err(_) => Coercion::Fallback(Value::Bytes(Vec::new())),
    }
}

fn coerce_date_time(raw: &str) -> Coercion {
    match parse_date_time(raw.trim()) {
        Some(dt) => Coercion::Parsed(Value::DateTime(dt)),
        None => Coercion::Fallback(Value::DateTime(fallback_date_time())),
    }
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }
    // Offsets are normalized to UTC.
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn coerce_float(raw: &str) -> Coercion {
    match raw.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => Coercion::Parsed(Value::Float(x)),
        _ => Coercion::Fallback(Value::Float(0.0)),
    }
}

fn coerce_guid(raw: &str) -> Coercion {
    match Uuid::parse_str(raw.trim()) {
        Ok(g) => Coercion::Parsed(Value::Guid(g)),
        Err(_) => Coercion::Fallback(Value::Guid(Uuid::new_v4())),
    }
}

fn coerce_integer(raw: &str) -> Coercion {
    match raw.trim().parse::<i32>() {
        Ok(i) => Coercion::Parsed(Value::Integer(i)),
        Err(_) => Coercion::Fallback(Value::Integer(0)),
    }
}

fn coerce_time_span(raw: &str) -> Coercion {
    match raw.parse::<TimeSpan>() {
        Ok(t) => Coercion::Parsed(Value::TimeSpan(t)),
        Err(_) => Coercion::Fallback(Value::TimeSpan(TimeSpan::ZERO)),
    }
}

fn coerce_uri(raw: &str) -> Coercion {
    match Url::parse(raw.trim()) {
        Ok(u) => Coercion::Parsed(Value::Uri(Some(u))),
        Err(_) => Coercion::Fallback(Value::Uri(None)),
    }
}

fn coerce_string(raw: &str) -> Coercion {
    Coercion::Parsed(Value::String(raw.to_string()))
}
