use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{NaiveDate, NaiveDateTime};
use contentcore_types::TimeSpan;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;
use uuid::Uuid;

use crate::DataType;
use crate::coerce;

/// The native value held by a field, one variant per [`DataType`].
///
/// `Uri(None)` is the only null a record can hold: it is both the unset
/// value of a Uri field and the result of text that is not an absolute URI.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Bytes(Vec<u8>),
    DateTime(NaiveDateTime),
    Float(f64),
    Guid(Uuid),
    Integer(i32),
    TimeSpan(TimeSpan),
    Uri(Option<Url>),
    String(String),
}

impl Value {
    /// The data type this value belongs to.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Boolean(_) => DataType::Boolean,
            Value::Bytes(_) => DataType::Bytes,
            Value::DateTime(_) => DataType::DateTime,
            Value::Float(_) => DataType::Float,
            Value::Guid(_) => DataType::Guid,
            Value::Integer(_) => DataType::Integer,
            Value::TimeSpan(_) => DataType::TimeSpan,
            Value::Uri(_) => DataType::Uri,
            Value::String(_) => DataType::String,
        }
    }

    /// The unset placeholder for a freshly created field.
    ///
    /// DateTime starts at `0001-01-01T00:00:00`, Guid at the nil UUID, Uri at
    /// null and String at the empty string.
    pub fn zero(data_type: DataType) -> Self {
        match data_type {
            DataType::Boolean => Value::Boolean(false),
            DataType::Bytes => Value::Bytes(Vec::new()),
            DataType::DateTime => Value::DateTime(min_date_time()),
            DataType::Float => Value::Float(0.0),
            DataType::Guid => Value::Guid(Uuid::nil()),
            DataType::Integer => Value::Integer(0),
            DataType::TimeSpan => Value::TimeSpan(TimeSpan::ZERO),
            DataType::Uri => Value::Uri(None),
            DataType::String => Value::String(String::new()),
        }
    }

    /// Parses `raw` as `data_type`, substituting the type's fallback value
    /// when the text does not parse.
    pub fn coerce(data_type: DataType, raw: &str) -> Self {
        coerce::coerce(data_type, raw).into_value()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Uri(None))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_guid(&self) -> Option<Uuid> {
        match self {
            Value::Guid(g) => Some(*g),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_time_span(&self) -> Option<TimeSpan> {
        match self {
            Value::TimeSpan(t) => Some(*t),
            _ => None,
        }
    }

    /// The URI, if this is a non-null Uri value.
    pub fn as_uri(&self) -> Option<&Url> {
        match self {
            Value::Uri(u) => u.as_ref(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Uuid> for Value {
    fn from(g: Uuid) -> Self {
        Value::Guid(g)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<TimeSpan> for Value {
    fn from(t: TimeSpan) -> Self {
        Value::TimeSpan(t)
    }
}

impl From<Url> for Value {
    fn from(u: Url) -> Self {
        Value::Uri(Some(u))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

/// Plain text form. Strings, dates, GUIDs, bytes and time spans print as
/// the JSON encoding carries them; a whole Float drops its `.0` and a null
/// Uri prints as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Bytes(b) => f.write_str(&BASE64.encode(b)),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::Float(x) => write!(f, "{x}"),
            Value::Guid(g) => write!(f, "{}", g.hyphenated()),
            Value::Integer(i) => write!(f, "{i}"),
            Value::TimeSpan(t) => write!(f, "{t}"),
            Value::Uri(Some(u)) => f.write_str(u.as_str()),
            Value::Uri(None) => Ok(()),
            Value::String(s) => f.write_str(s),
        }
    }
}

/// Each variant uses the default serde form of its native type: JSON
/// booleans and numbers, hyphenated GUID strings, ISO-8601 date strings,
/// standard base64 for bytes and `null` for an unset Uri.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Bytes(b) => serializer.serialize_str(&BASE64.encode(b)),
            Value::DateTime(dt) => dt.serialize(serializer),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Guid(g) => g.serialize(serializer),
            Value::Integer(i) => serializer.serialize_i32(*i),
            Value::TimeSpan(t) => t.serialize(serializer),
            Value::Uri(Some(u)) => serializer.serialize_str(u.as_str()),
            Value::Uri(None) => serializer.serialize_none(),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

fn min_date_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
