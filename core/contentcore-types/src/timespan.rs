//! Signed time interval with 100-nanosecond resolution.
//!
//! Text form follows the invariant "constant" layout used by content
//! documents: `[-][d.]hh:mm:ss[.fffffff]`. Parsing also accepts the
//! shorter `hh:mm`, `d.hh:mm`, `d:hh:mm:ss[.f]` and bare `d` (whole days)
//! forms.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::Error;

const TICKS_PER_SECOND: i64 = 10_000_000;
const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;

/// Digits allowed after the seconds separator.
const MAX_FRACTION_DIGITS: usize = 7;

/// A signed duration counted in 100ns ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSpan {
    ticks: i64,
}

impl TimeSpan {
    /// The empty interval.
    pub const ZERO: Self = Self { ticks: 0 };

    /// Ticks in one second.
    pub const TICKS_PER_SECOND: i64 = TICKS_PER_SECOND;

    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Whole seconds, saturating at the representable range.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self {
            ticks: seconds.saturating_mul(TICKS_PER_SECOND),
        }
    }

    /// Builds a span from clock components. All components share the sign
    /// of the result; returns `None` when the total does not fit.
    #[must_use]
    pub fn from_parts(days: i64, hours: i64, minutes: i64, seconds: i64) -> Option<Self> {
        let total = i128::from(days) * i128::from(TICKS_PER_DAY)
            + i128::from(hours) * i128::from(TICKS_PER_HOUR)
            + i128::from(minutes) * i128::from(TICKS_PER_MINUTE)
            + i128::from(seconds) * i128::from(TICKS_PER_SECOND);
        i64::try_from(total).ok().map(Self::from_ticks)
    }

    #[must_use]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.ticks == 0
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.ticks < 0
    }

    /// Whole days component (signed).
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.ticks / TICKS_PER_DAY
    }

    /// Hours component in `-23..=23`.
    #[must_use]
    pub const fn hours(&self) -> i64 {
        (self.ticks / TICKS_PER_HOUR) % 24
    }

    /// Minutes component in `-59..=59`.
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        (self.ticks / TICKS_PER_MINUTE) % 60
    }

    /// Seconds component in `-59..=59`.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        (self.ticks / TICKS_PER_SECOND) % 60
    }

    /// The span expressed in fractional seconds.
    #[must_use]
    pub fn total_seconds(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }
}

impl Neg for TimeSpan {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            ticks: self.ticks.saturating_neg(),
        }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ticks < 0 {
            f.write_str("-")?;
        }
        let magnitude = self.ticks.unsigned_abs();
        let per_day = TICKS_PER_DAY as u64;
        let per_hour = TICKS_PER_HOUR as u64;
        let per_minute = TICKS_PER_MINUTE as u64;
        let per_second = TICKS_PER_SECOND as u64;

        let days = magnitude / per_day;
        let hours = magnitude % per_day / per_hour;
        let minutes = magnitude % per_hour / per_minute;
        let seconds = magnitude % per_minute / per_second;
        let fraction = magnitude % per_second;

        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if fraction > 0 {
            write!(f, ".{fraction:07}")?;
        }
        Ok(())
    }
}

impl FromStr for TimeSpan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidTimeSpan(s.to_string());

        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let parts: Vec<&str> = body.split(':').collect();
        let (days, hours, minutes, seconds, fraction) = match parts.as_slice() {
            [days] => (digits(days).ok_or_else(invalid)?, 0, 0, 0, 0),
            [head, minutes] => {
                let (days, hours) = split_days(head).ok_or_else(invalid)?;
                (days, hours, digits(minutes).ok_or_else(invalid)?, 0, 0)
            }
            [head, minutes, seconds] => {
                let (days, hours) = split_days(head).ok_or_else(invalid)?;
                let (seconds, fraction) = split_fraction(seconds).ok_or_else(invalid)?;
                (days, hours, digits(minutes).ok_or_else(invalid)?, seconds, fraction)
            }
            [days, hours, minutes, seconds] => {
                let (seconds, fraction) = split_fraction(seconds).ok_or_else(invalid)?;
                (
                    digits(days).ok_or_else(invalid)?,
                    digits(hours).ok_or_else(invalid)?,
                    digits(minutes).ok_or_else(invalid)?,
                    seconds,
                    fraction,
                )
            }
            _ => return Err(invalid()),
        };

        if hours >= 24 || minutes >= 60 || seconds >= 60 {
            return Err(Error::TimeSpanOverflow(s.to_string()));
        }

        let magnitude = i128::from(days) * i128::from(TICKS_PER_DAY)
            + i128::from(hours) * i128::from(TICKS_PER_HOUR)
            + i128::from(minutes) * i128::from(TICKS_PER_MINUTE)
            + i128::from(seconds) * i128::from(TICKS_PER_SECOND)
            + i128::from(fraction);
        let signed = if negative { -magnitude } else { magnitude };

        i64::try_from(signed)
            .map(Self::from_ticks)
            .map_err(|_| Error::TimeSpanOverflow(s.to_string()))
    }
}

impl Serialize for TimeSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSpan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Unsigned decimal made only of ASCII digits.
fn digits(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// `d.hh` or `hh`.
fn split_days(head: &str) -> Option<(u32, u32)> {
    match head.split_once('.') {
        Some((days, hours)) => Some((digits(days)?, digits(hours)?)),
        None => Some((0, digits(head)?)),
    }
}

/// `ss` or `ss.fffffff`; the fraction is returned in ticks.
fn split_fraction(part: &str) -> Option<(u32, u32)> {
    let Some((seconds, fraction)) = part.split_once('.') else {
        return Some((digits(part)?, 0));
    };
    if fraction.len() > MAX_FRACTION_DIGITS {
        return None;
    }
    let value = digits(fraction)?;
    let scale = 10u32.pow((MAX_FRACTION_DIGITS - fraction.len()) as u32);
    Some((digits(seconds)?, value * scale))
}
