//! Construction sources for [`JulianDay`]
//!
//! Every way of producing a [`JulianDay`] is a variant of [`Source`].
//! Statically typed callers get there through `From` conversions; dynamic
//! input (JSON values or strings from the command line) goes through
//! `TryFrom`/`FromStr`, which is where unsupported kinds are rejected.

use super::{ratio, CalendarFields, JulianDay, JulianDayRepr};
use crate::{JulianDayError, Result};
use chrono::{DateTime, Utc};
use num::{BigInt, BigRational, Num};
use serde_json::{Number, Value};
use std::str::FromStr;

/// Where the value of a [`JulianDay`] comes from
#[derive(Debug, Clone, Default)]
pub enum Source {
    /// The current instant of the system clock
    #[default]
    Now,
    /// Another value, including its calendar mode
    JulianDay(JulianDay),
    /// A continuous Julian date in days
    DayCount(BigRational),
    /// A UTC timestamp
    Timestamp(DateTime<Utc>),
    /// A timestamp from the `time` crate, in any offset
    OffsetTimestamp(::time::OffsetDateTime),
    /// Seconds since 1970-01-01T00:00:00Z
    UnixTime(BigRational),
    /// Calendar fields read in the target's calendar mode
    Fields(CalendarFields),
}

impl Source {
    /// A Julian date given as a float, converted exactly from its binary value
    pub fn day_count_f64(days: f64) -> Result<Self> {
        exact_f64(days).map(Source::DayCount)
    }

    /// Unix time in whole seconds
    pub fn unix_time(seconds: i64) -> Self {
        Source::UnixTime(BigRational::from_integer(BigInt::from(seconds)))
    }

    /// Unix time given as a float, converted exactly from its binary value
    pub fn unix_time_f64(seconds: f64) -> Result<Self> {
        exact_f64(seconds).map(Source::UnixTime)
    }

    /// Short name of the variant for messages
    pub fn kind(&self) -> &'static str {
        match self {
            Source::Now => "now",
            Source::JulianDay(_) => "julian day",
            Source::DayCount(_) => "day count",
            Source::Timestamp(_) => "timestamp",
            Source::OffsetTimestamp(_) => "offset timestamp",
            Source::UnixTime(_) => "unix time",
            Source::Fields(_) => "calendar fields",
        }
    }
}

fn exact_f64(value: f64) -> Result<BigRational> {
    BigRational::from_float(value)
        .ok_or_else(|| JulianDayError::TypeMismatch(format!("{} is not a finite number", value)))
}

/// Exact value of a JSON number
pub(crate) fn number_to_rational(number: &Number) -> Result<BigRational> {
    if let Some(value) = number.as_i64() {
        Ok(BigRational::from_integer(BigInt::from(value)))
    } else if let Some(value) = number.as_u64() {
        Ok(BigRational::from_integer(BigInt::from(value)))
    } else {
        match number.as_f64() {
            Some(value) => exact_f64(value),
            None => Err(JulianDayError::TypeMismatch(format!(
                "{} is not a representable number",
                number
            ))),
        }
    }
}

/// Parse a plain decimal such as `-2451545.125` into an exact rational
fn parse_decimal(text: &str) -> Option<BigRational> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let numer = BigInt::from_str_radix(&format!("{}{}", whole, fraction), 10).ok()?;
    let denom = num::pow(BigInt::from(10), fraction.len());
    let value = BigRational::new(numer, denom);
    Some(if negative { -value } else { value })
}

/// Parse `YYYY-MM-DD`, optionally followed by `Thh:mm` or `Thh:mm:ss`
fn parse_calendar(text: &str) -> Option<Result<CalendarFields>> {
    let (date, time) = match text.split_once(|c: char| c == 'T' || c == ' ') {
        Some((date, time)) => (date, Some(time)),
        None => (text, None),
    };

    // A leading minus belongs to the year, not to the separators.
    let (sign, date) = match date.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, date),
    };
    let mut parts = date.splitn(3, '-');
    let year = parts.next()?.parse::<i64>().ok()? * sign;
    let month = parts.next()?.parse::<i64>().ok()?;
    let day = parts.next()?.parse::<i64>().ok()?;

    let mut values = vec![Some(year), Some(month), Some(day)];
    if let Some(time) = time {
        for part in time.split(':') {
            values.push(Some(part.parse::<i64>().ok()?));
        }
        if values.len() > 6 {
            return None;
        }
    }
    Some(CalendarFields::from_sequence(&values))
}

impl FromStr for Source {
    type Err = JulianDayError;

    /// Accepts a decimal Julian date, an RFC 3339 timestamp, or a calendar
    /// date `YYYY-MM-DD[Thh:mm[:ss]]` in UTC
    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Some(days) = parse_decimal(text) {
            return Ok(Source::DayCount(days));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Source::Timestamp(dt.with_timezone(&Utc)));
        }
        match parse_calendar(text) {
            Some(fields) => fields.map(Source::Fields),
            None => Err(JulianDayError::TypeMismatch(format!(
                "{:?} is neither a Julian date, a timestamp nor a calendar date",
                text
            ))),
        }
    }
}

impl TryFrom<&Value> for Source {
    type Error = JulianDayError;

    /// `null` is now, a number a Julian date, an array a field sequence, a
    /// string anything [`FromStr`] accepts and an object a serialized
    /// [`JulianDay`]
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Source::Now),
            Value::Number(number) => number_to_rational(number).map(Source::DayCount),
            Value::Array(items) => {
                let values = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| match item {
                        Value::Null => Ok(None),
                        Value::Number(number) => number.as_i64().map(Some).ok_or_else(|| {
                            JulianDayError::TypeMismatch(format!(
                                "field {} must be an integer, got {}",
                                index, number
                            ))
                        }),
                        other => Err(JulianDayError::TypeMismatch(format!(
                            "field {} must be an integer, got {}",
                            index, other
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                CalendarFields::from_sequence(&values).map(Source::Fields)
            }
            Value::String(text) => text.parse(),
            Value::Object(_) => {
                let repr: JulianDayRepr = serde_json::from_value(value.clone()).map_err(|err| {
                    JulianDayError::TypeMismatch(format!("object is not a julian day: {}", err))
                })?;
                JulianDay::try_from(repr).map(Source::JulianDay)
            }
            Value::Bool(flag) => Err(JulianDayError::TypeMismatch(format!(
                "boolean {} is not a time source",
                flag
            ))),
        }
    }
}

impl TryFrom<Value> for Source {
    type Error = JulianDayError;

    fn try_from(value: Value) -> Result<Self> {
        Source::try_from(&value)
    }
}

impl From<JulianDay> for Source {
    fn from(jd: JulianDay) -> Self {
        Source::JulianDay(jd)
    }
}

impl From<&JulianDay> for Source {
    fn from(jd: &JulianDay) -> Self {
        Source::JulianDay(jd.clone())
    }
}

impl From<BigRational> for Source {
    fn from(days: BigRational) -> Self {
        Source::DayCount(days)
    }
}

impl From<&BigRational> for Source {
    fn from(days: &BigRational) -> Self {
        Source::DayCount(days.clone())
    }
}

impl From<BigInt> for Source {
    fn from(days: BigInt) -> Self {
        Source::DayCount(BigRational::from_integer(days))
    }
}

impl From<i64> for Source {
    fn from(days: i64) -> Self {
        Source::DayCount(ratio(days, 1))
    }
}

impl From<i32> for Source {
    fn from(days: i32) -> Self {
        Source::DayCount(ratio(i64::from(days), 1))
    }
}

impl From<DateTime<Utc>> for Source {
    fn from(dt: DateTime<Utc>) -> Self {
        Source::Timestamp(dt)
    }
}

impl From<::time::OffsetDateTime> for Source {
    fn from(dt: ::time::OffsetDateTime) -> Self {
        Source::OffsetTimestamp(dt)
    }
}

impl From<CalendarFields> for Source {
    fn from(fields: CalendarFields) -> Self {
        Source::Fields(fields)
    }
}

impl From<(i64, u32, u32)> for Source {
    fn from(date: (i64, u32, u32)) -> Self {
        Source::Fields(date.into())
    }
}

impl From<(i64, u32, u32, u32, u32, u32)> for Source {
    fn from(tuple: (i64, u32, u32, u32, u32, u32)) -> Self {
        Source::Fields(tuple.into())
    }
}
