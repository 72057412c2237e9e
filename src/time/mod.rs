//! Time module for Julian Day calculations
//!
//! This module provides [`JulianDay`], an instant stored as a Julian day
//! number plus the seconds and microseconds elapsed since the civil
//! midnight that begins that day. The continuous Julian date of a value is
//!
//! ```text
//! jd = jdn - 1/2 + sec / 86400 + usec / 86_400_000_000
//! ```
//!
//! and every conversion in and out of that form is done with exact
//! rationals. Floating point only appears in the explicitly lossy
//! projections such as [`JulianDay::to_f64`].

mod fields;
mod format;
mod ops;
mod source;

pub use fields::CalendarFields;
pub use source::Source;

use crate::calendar::{compute_calendar_date, compute_julian_day, CalendarMode};
use crate::constants::{
    DAYS_PER_JULIAN_CENTURY, DAY_MIN, DAY_S, DAY_US, J2000_JDN, MJD_OFFSET, SECOND_US,
    UNIX_EPOCH_JD, UNIX_EPOCH_JDN,
};
use crate::{range_violation, JulianDayError, Result};
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use fields::validate_tz_offset;
use lazy_static::lazy_static;
use num::{BigInt, BigRational, Integer, ToPrimitive};
use serde::{Deserialize, Serialize};

lazy_static! {
    /// The J2000.0 epoch, JD 2451545.0 (2000-01-01 12:00)
    pub static ref J2000: JulianDay = JulianDay::at_noon(J2000_JDN);
}

/// Build the exact rational `numer / denom`
pub(crate) fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

fn integer(value: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

/// Split a continuous Julian date into `(jdn, seconds of day, microseconds)`
///
/// The day number is the floor of `jd + 1/2`, the seconds are truncated and
/// the microseconds rounded half up. A microsecond count that rounds up to a
/// full second carries into the seconds and, from there, into the day.
fn split_day_count(jd: &BigRational) -> Result<(i64, u32, u32)> {
    let scaled = (jd + ratio(1, 2)) * integer(DAY_US) + ratio(1, 2);
    let total = scaled.floor().to_integer();
    let (days, micros) = total.div_mod_floor(&BigInt::from(DAY_US));

    match (days.to_i64(), micros.to_i64()) {
        (Some(jdn), Some(micros)) => {
            let sec = (micros / SECOND_US) as u32;
            let usec = (micros % SECOND_US) as u32;
            log::trace!("split jd {} into jdn={} sec={} usec={}", jd, jdn, sec, usec);
            Ok((jdn, sec, usec))
        }
        _ => Err(range_violation("jdn", days, "the i64 range")),
    }
}

/// Seconds of day for a chrono instant, with chrono's leap second
/// representation (nanoseconds past one billion) mapped to second 60
fn day_parts_from_datetime(dt: &DateTime<Utc>) -> (i64, u32, u32) {
    let nanos = dt.nanosecond();
    let leap = u32::from(nanos >= 1_000_000_000);
    let jdn = compute_julian_day(
        i64::from(dt.year()),
        dt.month(),
        dt.day(),
        CalendarMode::Gregorian,
    );
    let sec = dt.num_seconds_from_midnight() + leap;
    let usec = (nanos % 1_000_000_000) / 1_000;

    if i64::from(sec) >= DAY_S {
        (jdn + 1, sec - DAY_S as u32, usec)
    } else {
        (jdn, sec, usec)
    }
}

/// An instant as a Julian day number, time of day and calendar mode
///
/// Two values compare equal when they denote the same instant, whatever
/// their calendar modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "JulianDayRepr")]
pub struct JulianDay {
    /// Julian day number of the civil day
    jdn: i64,
    /// Seconds since the civil midnight, `0..86400`
    sec: u32,
    /// Microseconds within the second, `0..1_000_000`
    usec: u32,
    /// Calendar used to read and write calendar fields
    mode: CalendarMode,
}

/// Unvalidated serialized form of a [`JulianDay`]
#[derive(Debug, Deserialize)]
pub(crate) struct JulianDayRepr {
    jdn: i64,
    sec: u32,
    usec: u32,
    #[serde(default)]
    mode: CalendarMode,
}

impl TryFrom<JulianDayRepr> for JulianDay {
    type Error = JulianDayError;

    fn try_from(repr: JulianDayRepr) -> Result<Self> {
        if i64::from(repr.sec) >= DAY_S {
            return Err(range_violation("sec", repr.sec, "0..86400"));
        }
        if i64::from(repr.usec) >= SECOND_US {
            return Err(range_violation("usec", repr.usec, "0..1000000"));
        }
        Ok(Self {
            jdn: repr.jdn,
            sec: repr.sec,
            usec: repr.usec,
            mode: repr.mode,
        })
    }
}

impl Default for JulianDay {
    /// The J2000.0 epoch in the Gregorian calendar
    fn default() -> Self {
        Self::at_noon(J2000_JDN)
    }
}

impl JulianDay {
    /// Create a value from any supported source
    ///
    /// `mode` is the calendar used for calendar-field sources and for later
    /// decompositions. A [`Source::JulianDay`] source brings its own mode.
    pub fn new<S: Into<Source>>(source: S, mode: CalendarMode) -> Result<Self> {
        let mut jd = Self {
            mode,
            ..Self::default()
        };
        jd.set(source)?;
        Ok(jd)
    }

    /// The current instant, read from the system clock
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Noon of the given Julian day number, i.e. the whole Julian date `jdn`
    pub fn at_noon(jdn: i64) -> Self {
        Self {
            jdn,
            sec: (DAY_S / 2) as u32,
            usec: 0,
            mode: CalendarMode::Gregorian,
        }
    }

    /// Create a value from an exact continuous Julian date
    pub fn from_jd(jd: &BigRational) -> Result<Self> {
        let (jdn, sec, usec) = split_day_count(jd)?;
        Ok(Self {
            jdn,
            sec,
            usec,
            mode: CalendarMode::Gregorian,
        })
    }

    /// Create a value from calendar fields in the given calendar
    pub fn from_fields<F: Into<CalendarFields>>(fields: F, mode: CalendarMode) -> Result<Self> {
        Self::new(Source::Fields(fields.into()), mode)
    }

    /// Create a Gregorian value from a UTC timestamp
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let (jdn, sec, usec) = day_parts_from_datetime(&dt);
        Self {
            jdn,
            sec,
            usec,
            mode: CalendarMode::Gregorian,
        }
    }

    /// Create a Gregorian value from seconds since 1970-01-01T00:00:00Z
    pub fn from_unix_time(seconds: &BigRational) -> Result<Self> {
        Self::new(Source::UnixTime(seconds.clone()), CalendarMode::Gregorian)
    }

    /// Replace the stored instant with one taken from `source`
    ///
    /// Calendar fields are read in the current calendar mode. Copying from
    /// another [`JulianDay`] adopts its mode as well. On error nothing is
    /// changed.
    pub fn set<S: Into<Source>>(&mut self, source: S) -> Result<()> {
        self.set_with_mode(source, self.mode)
    }

    /// Like [`set`](Self::set), reading calendar fields in `mode` for this call only
    pub fn set_with_mode<S: Into<Source>>(&mut self, source: S, mode: CalendarMode) -> Result<()> {
        let source = source.into();
        log::debug!("setting julian day from {} source", source.kind());

        let (jdn, sec, usec, adopted) = match source {
            Source::Now => {
                let (jdn, sec, usec) = day_parts_from_datetime(&Utc::now());
                (jdn, sec, usec, None)
            }
            Source::JulianDay(other) => (other.jdn, other.sec, other.usec, Some(other.mode)),
            Source::DayCount(jd) => {
                let (jdn, sec, usec) = split_day_count(&jd)?;
                (jdn, sec, usec, None)
            }
            Source::Timestamp(dt) => {
                let (jdn, sec, usec) = day_parts_from_datetime(&dt);
                (jdn, sec, usec, None)
            }
            Source::OffsetTimestamp(dt) => {
                let utc = DateTime::<Utc>::from_timestamp(dt.unix_timestamp(), dt.nanosecond())
                    .ok_or_else(|| range_violation("timestamp", dt, "the chrono range"))?;
                let (jdn, sec, usec) = day_parts_from_datetime(&utc);
                (jdn, sec, usec, None)
            }
            Source::UnixTime(seconds) => {
                let jd = ratio(UNIX_EPOCH_JD.0, UNIX_EPOCH_JD.1) + seconds / integer(DAY_S);
                let (jdn, sec, usec) = split_day_count(&jd)?;
                (jdn, sec, usec, None)
            }
            Source::Fields(fields) => {
                let (jdn, sec, usec) = fields.to_day_parts(mode)?;
                (jdn, sec, usec, None)
            }
        };

        self.jdn = jdn;
        self.sec = sec;
        self.usec = usec;
        if let Some(mode) = adopted {
            self.mode = mode;
        }
        Ok(())
    }

    /// Replace the stored instant with an exact continuous Julian date
    pub fn set_jd(&mut self, jd: &BigRational) -> Result<()> {
        self.set(Source::DayCount(jd.clone()))
    }

    /// Switch to the Gregorian calendar
    pub fn gregorian(&mut self) {
        self.mode = CalendarMode::Gregorian;
    }

    /// Switch to the Julian calendar
    pub fn julian(&mut self) {
        self.mode = CalendarMode::Julian;
    }

    /// Set the calendar mode
    pub fn set_mode(&mut self, mode: CalendarMode) {
        self.mode = mode;
    }

    /// The same instant in another calendar mode
    pub fn with_mode(mut self, mode: CalendarMode) -> Self {
        self.mode = mode;
        self
    }

    /// Current calendar mode
    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn is_gregorian(&self) -> bool {
        self.mode.is_gregorian()
    }

    pub fn is_julian(&self) -> bool {
        self.mode.is_julian()
    }

    /// Julian day number (the Julian date plus one half, floored)
    pub fn jdn(&self) -> i64 {
        self.jdn
    }

    /// Alias of [`jdn`](Self::jdn)
    pub fn to_i64(&self) -> i64 {
        self.jdn
    }

    /// Seconds since 00:00 of the civil day
    pub fn sec(&self) -> u32 {
        self.sec
    }

    /// Microseconds within the second
    pub fn usec(&self) -> u32 {
        self.usec
    }

    /// Exact continuous Julian date
    pub fn jd(&self) -> BigRational {
        integer(self.jdn) - ratio(1, 2)
            + ratio(i64::from(self.sec), DAY_S)
            + ratio(i64::from(self.usec), DAY_US)
    }

    /// Exact modified Julian date (JD - 2400000.5)
    pub fn mjd(&self) -> BigRational {
        self.jd() - ratio(MJD_OFFSET.0, MJD_OFFSET.1)
    }

    /// Julian date as a float; sub-second precision is lost for large dates
    pub fn to_f64(&self) -> f64 {
        self.jd().to_f64().unwrap_or(f64::NAN)
    }

    /// Julian centuries elapsed since J2000.0
    pub fn julian_centuries(&self) -> BigRational {
        (self.jd() - J2000.jd()) / integer(DAYS_PER_JULIAN_CENTURY)
    }

    /// Seconds since the unix epoch as a float
    pub fn to_unix_time(&self) -> f64 {
        let seconds =
            (i128::from(self.jdn) - i128::from(UNIX_EPOCH_JDN)) * i128::from(DAY_S) + i128::from(self.sec);
        seconds as f64 + f64::from(self.usec) / SECOND_US as f64
    }

    /// Whole seconds since the unix epoch and the microsecond remainder
    pub fn unix_parts(&self) -> Result<(i64, u32)> {
        let seconds =
            (i128::from(self.jdn) - i128::from(UNIX_EPOCH_JDN)) * i128::from(DAY_S) + i128::from(self.sec);
        let seconds = i64::try_from(seconds)
            .map_err(|_| range_violation("unix seconds", seconds, "the i64 range"))?;
        Ok((seconds, self.usec))
    }

    /// The instant as a chrono UTC timestamp
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        let (seconds, usec) = self.unix_parts()?;
        DateTime::<Utc>::from_timestamp(seconds, usec * 1_000)
            .ok_or_else(|| range_violation("unix seconds", seconds, "the chrono range"))
    }

    /// The instant as a `time` crate timestamp in UTC
    pub fn to_offset_datetime(&self) -> Result<::time::OffsetDateTime> {
        let (seconds, usec) = self.unix_parts()?;
        let nanos = i128::from(seconds) * 1_000_000_000 + i128::from(usec) * 1_000;
        ::time::OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map_err(|err| range_violation("unix seconds", seconds, &err.to_string()))
    }

    /// Day of the week, 0 (Sunday) to 6 (Saturday)
    ///
    /// Uses the stored UTC civil day; shift the value first to get the
    /// weekday in another timezone.
    pub fn wday(&self) -> u32 {
        ((self.jdn.rem_euclid(7) + 1) % 7) as u32
    }

    /// Day of the week as a chrono [`Weekday`]
    pub fn weekday(&self) -> Weekday {
        match self.wday() {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    /// Calendar fields in the current calendar mode at the given offset
    ///
    /// `tz_offset` is in minutes east of UTC and must lie within ±18 hours.
    pub fn datetime(&self, tz_offset: i32) -> Result<CalendarFields> {
        self.datetime_in(tz_offset, self.mode)
    }

    /// Calendar fields in an explicit calendar at the given offset
    pub fn datetime_in(&self, tz_offset: i32, mode: CalendarMode) -> Result<CalendarFields> {
        validate_tz_offset(tz_offset)?;

        let shifted = self.checked_add(&ratio(i64::from(tz_offset), DAY_MIN))?;
        let (year, month, day) = compute_calendar_date(shifted.jdn, mode)
            .ok_or_else(|| range_violation("jdn", shifted.jdn, "the convertible day range"))?;

        Ok(CalendarFields {
            year,
            month,
            day,
            hour: shifted.sec / 3600,
            minute: shifted.sec % 3600 / 60,
            second: shifted.sec % 60,
            microsecond: shifted.usec,
            tz_offset,
        })
    }

    /// UTC calendar date (year, month, day) in the current calendar mode
    pub fn date(&self) -> Result<(i64, u32, u32)> {
        compute_calendar_date(self.jdn, self.mode)
            .ok_or_else(|| range_violation("jdn", self.jdn, "the convertible day range"))
    }

    /// The value `days` later, keeping the calendar mode
    pub fn checked_add(&self, days: &BigRational) -> Result<Self> {
        let (jdn, sec, usec) = split_day_count(&(self.jd() + days))?;
        Ok(Self {
            jdn,
            sec,
            usec,
            mode: self.mode,
        })
    }

    /// The value `days` earlier, keeping the calendar mode
    pub fn checked_sub(&self, days: &BigRational) -> Result<Self> {
        self.checked_add(&-days)
    }

    /// The same time one day later, keeping the calendar mode
    pub fn succ(&self) -> Self {
        self + 1
    }
}
