//! Calendar field tuples
//!
//! A [`CalendarFields`] value is the broken-down form of a [`JulianDay`]:
//! a civil date and time in some calendar, plus the timezone offset the
//! fields are expressed in.
//!
//! [`JulianDay`]: super::JulianDay

use crate::calendar::{compute_julian_day, CalendarMode};
use crate::constants::{DAY_S, MAX_ABS_YEAR, MAX_TZ_OFFSET_MIN};
use crate::{range_violation, JulianDayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of entries in a full field sequence
const SEQUENCE_LEN: usize = 8;

/// Calendar date, time of day and timezone offset
///
/// `tz_offset` is in minutes, east of Greenwich positive (JST is 540).
/// A `day` of 0 stands for the last day of the previous month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarFields {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
    pub tz_offset: i32,
}

impl Default for CalendarFields {
    fn default() -> Self {
        Self {
            year: 2000,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            tz_offset: 0,
        }
    }
}

impl CalendarFields {
    /// Midnight UTC at the start of the given date
    pub fn new(year: i64, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            ..Self::default()
        }
    }

    /// Set the time of day
    pub fn with_time(mut self, hour: u32, minute: u32, second: u32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    /// Set the sub-second part
    pub fn with_microsecond(mut self, microsecond: u32) -> Self {
        self.microsecond = microsecond;
        self
    }

    /// Set the timezone offset in minutes
    pub fn with_tz_offset(mut self, tz_offset: i32) -> Self {
        self.tz_offset = tz_offset;
        self
    }

    /// Build fields from a sequence `[year, month, day, hour, min, sec, usec, tz_offset]`
    ///
    /// Missing trailing entries and `None` entries take the defaults
    /// `[2000, 1, 1, 0, 0, 0, 0, 0]`.
    pub fn from_sequence(values: &[Option<i64>]) -> Result<Self> {
        if values.len() > SEQUENCE_LEN {
            return Err(JulianDayError::TypeMismatch(format!(
                "a field sequence has at most {} entries, got {}",
                SEQUENCE_LEN,
                values.len()
            )));
        }

        let get = |index: usize| values.get(index).copied().flatten();
        let defaults = Self::default();

        let fields = Self {
            year: get(0).unwrap_or(defaults.year),
            month: to_field("month", get(1), defaults.month)?,
            day: to_field("day", get(2), defaults.day)?,
            hour: to_field("hour", get(3), defaults.hour)?,
            minute: to_field("minute", get(4), defaults.minute)?,
            second: to_field("second", get(5), defaults.second)?,
            microsecond: to_field("microsecond", get(6), defaults.microsecond)?,
            tz_offset: match get(7) {
                None => defaults.tz_offset,
                Some(value) => i32::try_from(value)
                    .map_err(|_| range_violation("tz_offset", value, TZ_BOUNDS))?,
            },
        };
        fields.validate()?;
        Ok(fields)
    }

    /// Build fields from a complete or partial integer sequence
    pub fn from_slice(values: &[i64]) -> Result<Self> {
        let values: Vec<Option<i64>> = values.iter().copied().map(Some).collect();
        Self::from_sequence(&values)
    }

    /// The fields as the sequence `[year, month, day, hour, min, sec, usec, tz_offset]`
    pub fn to_array(&self) -> [i64; SEQUENCE_LEN] {
        [
            self.year,
            i64::from(self.month),
            i64::from(self.day),
            i64::from(self.hour),
            i64::from(self.minute),
            i64::from(self.second),
            i64::from(self.microsecond),
            i64::from(self.tz_offset),
        ]
    }

    /// Check every field against its valid range
    pub fn validate(&self) -> Result<()> {
        if self.year.unsigned_abs() > MAX_ABS_YEAR.unsigned_abs() {
            return Err(range_violation("year", self.year, "±1000000000000"));
        }
        check("month", self.month, 1, 12)?;
        check("day", self.day, 0, 31)?;
        check("hour", self.hour, 0, 23)?;
        check("minute", self.minute, 0, 59)?;
        // 60 leaves room for a leap second; it is not checked any further.
        check("second", self.second, 0, 60)?;
        check("microsecond", self.microsecond, 0, 999_999)?;
        validate_tz_offset(self.tz_offset)
    }

    /// Resolve the fields to `(jdn, seconds of day, microseconds)` in UTC
    ///
    /// Nothing is computed unless every field is in range.
    pub(crate) fn to_day_parts(&self, mode: CalendarMode) -> Result<(i64, u32, u32)> {
        self.validate()?;

        let jdn = compute_julian_day(self.year, self.month, self.day, mode);
        let sec = 3600 * i64::from(self.hour) + 60 * i64::from(self.minute) + i64::from(self.second)
            - 60 * i64::from(self.tz_offset);

        // The offset is less than a day, so one carry or borrow is enough.
        let (jdn, sec) = if sec >= DAY_S {
            (jdn + 1, sec - DAY_S)
        } else if sec < 0 {
            (jdn - 1, sec + DAY_S)
        } else {
            (jdn, sec)
        };

        Ok((jdn, sec as u32, self.microsecond))
    }
}

const TZ_BOUNDS: &str = "-1080..=1080";

/// Reject a timezone offset of more than 18 hours either way
pub(crate) fn validate_tz_offset(tz_offset: i32) -> Result<()> {
    if tz_offset.unsigned_abs() > MAX_TZ_OFFSET_MIN.unsigned_abs() {
        return Err(range_violation("tz_offset", tz_offset, TZ_BOUNDS));
    }
    Ok(())
}

fn check(name: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(range_violation(name, value, &format!("{}..={}", min, max)));
    }
    Ok(())
}

fn to_field(name: &str, value: Option<i64>, default: u32) -> Result<u32> {
    match value {
        None => Ok(default),
        Some(v) => u32::try_from(v).map_err(|_| range_violation(name, v, "a non-negative field")),
    }
}

impl From<(i64, u32, u32)> for CalendarFields {
    fn from(date: (i64, u32, u32)) -> Self {
        Self::new(date.0, date.1, date.2)
    }
}

impl From<(i64, u32, u32, u32, u32, u32)> for CalendarFields {
    fn from(tuple: (i64, u32, u32, u32, u32, u32)) -> Self {
        Self::new(tuple.0, tuple.1, tuple.2).with_time(tuple.3, tuple.4, tuple.5)
    }
}

impl fmt::Display for CalendarFields {
    /// ISO 8601 style, e.g. `2000-01-01T21:00:00.000000+09:00`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.tz_offset < 0 { '-' } else { '+' };
        let offset = self.tz_offset.unsigned_abs();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}{}{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.microsecond,
            sign,
            offset / 60,
            offset % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_defaults() {
        let fields = CalendarFields::from_sequence(&[]).unwrap();
        assert_eq!(fields, CalendarFields::default());

        let fields = CalendarFields::from_sequence(&[Some(1999), None, Some(15)]).unwrap();
        assert_eq!(fields, CalendarFields::new(1999, 1, 15));

        let fields = CalendarFields::from_slice(&[2012, 5, 6, 12, 34, 56, 7, 540]).unwrap();
        assert_eq!(
            fields,
            CalendarFields::new(2012, 5, 6)
                .with_time(12, 34, 56)
                .with_microsecond(7)
                .with_tz_offset(540)
        );
        assert_eq!(fields.to_array(), [2012, 5, 6, 12, 34, 56, 7, 540]);
    }

    #[test]
    fn test_sequence_rejections() {
        assert!(matches!(
            CalendarFields::from_slice(&[2000, 1, 1, 0, 0, 0, 0, 0, 0]),
            Err(JulianDayError::TypeMismatch(_))
        ));
        assert!(matches!(
            CalendarFields::from_slice(&[2000, -1]),
            Err(JulianDayError::RangeViolation(_))
        ));
        assert!(matches!(
            CalendarFields::from_slice(&[2000, 1, 1, 0, 0, 0, 0, i64::from(i32::MAX) + 1]),
            Err(JulianDayError::RangeViolation(_))
        ));
    }

    #[test]
    fn test_validate_bounds() {
        let ok = [
            CalendarFields::new(2000, 12, 31).with_time(23, 59, 60),
            CalendarFields::new(2000, 3, 0),
            CalendarFields::default().with_tz_offset(-1080),
            CalendarFields::default().with_microsecond(999_999),
        ];
        for fields in ok {
            assert!(fields.validate().is_ok(), "{fields:?}");
        }

        let bad = [
            CalendarFields::new(2000, 0, 1),
            CalendarFields::new(2000, 13, 1),
            CalendarFields::new(2000, 1, 32),
            CalendarFields::default().with_time(24, 0, 0),
            CalendarFields::default().with_time(0, 60, 0),
            CalendarFields::default().with_time(0, 0, 61),
            CalendarFields::default().with_microsecond(1_000_000),
            CalendarFields::default().with_tz_offset(1081),
            CalendarFields::new(MAX_ABS_YEAR + 1, 1, 1),
        ];
        for fields in bad {
            assert!(
                matches!(fields.validate(), Err(JulianDayError::RangeViolation(_))),
                "{fields:?}"
            );
        }
    }

    #[test]
    fn test_day_parts_offset_carry() {
        // 00:30 JST is 15:30 UTC on the previous day
        let fields = CalendarFields::new(2000, 1, 2)
            .with_time(0, 30, 0)
            .with_tz_offset(540);
        assert_eq!(
            fields.to_day_parts(CalendarMode::Gregorian).unwrap(),
            (2_451_545, 15 * 3600 + 30 * 60, 0)
        );

        // 20:00 EST is 01:00 UTC on the next day
        let fields = CalendarFields::new(2000, 1, 1)
            .with_time(20, 0, 0)
            .with_tz_offset(-300);
        assert_eq!(
            fields.to_day_parts(CalendarMode::Gregorian).unwrap(),
            (2_451_546, 3600, 0)
        );

        // a leap second slot rolls into the next day
        let fields = CalendarFields::new(2016, 12, 31).with_time(23, 59, 60);
        let (jdn, sec, _) = fields.to_day_parts(CalendarMode::Gregorian).unwrap();
        assert_eq!(
            (jdn, sec),
            (compute_julian_day(2017, 1, 1, CalendarMode::Gregorian), 0)
        );
    }

    #[test]
    fn test_display() {
        let fields = CalendarFields::new(2000, 1, 1)
            .with_time(21, 0, 0)
            .with_microsecond(5)
            .with_tz_offset(330);
        assert_eq!(fields.to_string(), "2000-01-01T21:00:00.000005+05:30");

        let fields = CalendarFields::new(1999, 12, 31).with_tz_offset(-300);
        assert_eq!(fields.to_string(), "1999-12-31T00:00:00.000000-05:00");
    }
}
