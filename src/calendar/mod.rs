//! Calendar date and Julian day number conversion functions
//!
//! This module provides the integer algorithms converting between civil
//! dates and Julian day numbers in the proleptic Gregorian and proleptic
//! Julian calendars. Both directions count days from the base date
//! "-4800-03-00" (the last day of February of the year -4800), which is the
//! start of a 400-year Gregorian cycle and of a 4-year Julian cycle.
//!
//! All divisions are floor divisions, so dates before the base year convert
//! as correctly as dates after it.

use crate::constants::{BASE_YEAR, GREGORIAN_EPOCH_OFFSET, JULIAN_EPOCH_OFFSET};
use serde::{Deserialize, Serialize};
use std::fmt;

const DAYS_PER_400_YEARS: i64 = 146_097;
const DAYS_PER_100_YEARS: i64 = 36_524;
const DAYS_PER_4_YEARS: i64 = 1_461;
const DAYS_PER_YEAR: i64 = 365;

/// Day of a March-based year on which each month starts, March first.
///
/// The final entry is one past the end of February in a leap year.
const MARCH_YDAY: [i64; 13] = [1, 32, 62, 93, 123, 154, 185, 215, 246, 276, 307, 338, 367];

/// Calendar used when converting between day numbers and calendar fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarMode {
    /// Proleptic Gregorian calendar
    #[default]
    Gregorian,
    /// Proleptic Julian calendar
    Julian,
}

impl CalendarMode {
    /// Returns true for the Gregorian calendar
    pub fn is_gregorian(self) -> bool {
        self == CalendarMode::Gregorian
    }

    /// Returns true for the Julian calendar
    pub fn is_julian(self) -> bool {
        self == CalendarMode::Julian
    }
}

impl fmt::Display for CalendarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarMode::Gregorian => write!(f, "gregorian"),
            CalendarMode::Julian => write!(f, "julian"),
        }
    }
}

/// Whether `year` is a leap year in the given calendar
pub fn is_leap_year(year: i64, mode: CalendarMode) -> bool {
    match mode {
        CalendarMode::Julian => year.rem_euclid(4) == 0,
        CalendarMode::Gregorian => {
            year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
        }
    }
}

/// Number of days in a month (1-12) of the given year and calendar
pub fn days_in_month(year: i64, month: u32, mode: CalendarMode) -> u32 {
    match month {
        2 if is_leap_year(year, mode) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Convert a calendar date to a Julian day number
///
/// `month` must lie in 1-12. `day` is used linearly, so a day of 0 yields
/// the last day of the previous month and days past the end of the month
/// spill into the next one.
pub fn compute_julian_day(year: i64, month: u32, day: u32, mode: CalendarMode) -> i64 {
    let month = i64::from(month);

    // Shift to a year that starts in March so the leap day is the last day.
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;

    let days = DAYS_PER_YEAR * y + y.div_euclid(4) + (153 * m + 2) / 5 + i64::from(day);
    match mode {
        CalendarMode::Gregorian => {
            days - y.div_euclid(100) + y.div_euclid(400) - GREGORIAN_EPOCH_OFFSET
        }
        CalendarMode::Julian => days - JULIAN_EPOCH_OFFSET,
    }
}

/// Convert a Julian day number to a calendar date (year, month, day)
///
/// Returns `None` only when `jdn` is so close to the `i64` limits that the
/// base date offset cannot be applied.
pub fn compute_calendar_date(jdn: i64, mode: CalendarMode) -> Option<(i64, u32, u32)> {
    let (years, month, day) = match mode {
        CalendarMode::Julian => split_four_year_cycles(jdn.checked_add(JULIAN_EPOCH_OFFSET)?),
        CalendarMode::Gregorian => {
            let days = jdn.checked_add(GREGORIAN_EPOCH_OFFSET)?;
            let years = 400 * days.div_euclid(DAYS_PER_400_YEARS);
            let days = days.rem_euclid(DAYS_PER_400_YEARS);
            if days == 0 {
                (years, 2, 29)
            } else {
                let years = years + 100 * (days / DAYS_PER_100_YEARS);
                let days = days % DAYS_PER_100_YEARS;
                if days == 0 {
                    // Century years other than every fourth are common years.
                    (years, 2, 28)
                } else {
                    let (more, month, day) = split_four_year_cycles(days);
                    (years + more, month, day)
                }
            }
        }
    };

    let year = BASE_YEAR + years;
    if month > 12 {
        Some((year + 1, month - 12, day))
    } else {
        Some((year, month, day))
    }
}

/// Split a day count from a leap-year-ending March 0 into whole years and a
/// March-based (month, day), where months 13 and 14 are January and February
fn split_four_year_cycles(days: i64) -> (i64, u32, u32) {
    let years = 4 * days.div_euclid(DAYS_PER_4_YEARS);
    let days = days.rem_euclid(DAYS_PER_4_YEARS);
    if days == 0 {
        return (years, 2, 29);
    }

    let (month, day) = month_day_from_march(days % DAYS_PER_YEAR);
    (years + days / DAYS_PER_YEAR, month, day)
}

/// Convert a day of a common March-based year into (month, day)
///
/// Day 0 is the last day of the preceding February, which is always the
/// 28th here because leap days are resolved by the callers.
fn month_day_from_march(yday: i64) -> (u32, u32) {
    if yday == 0 {
        return (2, 28);
    }

    let index = MARCH_YDAY.partition_point(|&start| start <= yday) - 1;
    let day = yday - MARCH_YDAY[index] + 1;
    (index as u32 + 3, day as u32)
}

/// Format a calendar date as YYYY-MM-DD
pub fn format_date(year: i64, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2000, 1, 1, 2_451_545)]
    #[case(2020, 1, 1, 2_458_850)]
    #[case(1969, 7, 20, 2_440_423)]
    #[case(1900, 1, 1, 2_415_021)]
    #[case(1970, 1, 1, 2_440_588)]
    #[case(1582, 10, 15, 2_299_161)]
    #[case(-4713, 11, 24, 0)]
    fn test_gregorian_julian_day(
        #[case] year: i64,
        #[case] month: u32,
        #[case] day: u32,
        #[case] jdn: i64,
    ) {
        assert_eq!(
            compute_julian_day(year, month, day, CalendarMode::Gregorian),
            jdn
        );
        assert_eq!(
            compute_calendar_date(jdn, CalendarMode::Gregorian),
            Some((year, month, day))
        );
    }

    #[rstest]
    #[case(1582, 10, 4, 2_299_160)]
    #[case(-4712, 1, 1, 0)]
    #[case(2000, 1, 1, 2_451_558)]
    #[case(1, 1, 1, 1_721_424)]
    fn test_julian_julian_day(
        #[case] year: i64,
        #[case] month: u32,
        #[case] day: u32,
        #[case] jdn: i64,
    ) {
        assert_eq!(compute_julian_day(year, month, day, CalendarMode::Julian), jdn);
        assert_eq!(
            compute_calendar_date(jdn, CalendarMode::Julian),
            Some((year, month, day))
        );
    }

    #[test]
    fn test_day_zero_is_previous_month_end() {
        let mode = CalendarMode::Gregorian;
        assert_eq!(
            compute_julian_day(2000, 3, 0, mode),
            compute_julian_day(2000, 2, 29, mode)
        );
        assert_eq!(
            compute_julian_day(1900, 3, 0, mode),
            compute_julian_day(1900, 2, 28, mode)
        );
        assert_eq!(
            compute_julian_day(2001, 1, 0, mode),
            compute_julian_day(2000, 12, 31, mode)
        );
        assert_eq!(
            compute_julian_day(1900, 3, 0, CalendarMode::Julian),
            compute_julian_day(1900, 2, 29, CalendarMode::Julian)
        );
    }

    #[test]
    fn test_leap_days() {
        let jdn = compute_julian_day(2000, 2, 29, CalendarMode::Gregorian);
        assert_eq!(
            compute_calendar_date(jdn, CalendarMode::Gregorian),
            Some((2000, 2, 29))
        );

        // 1900-02-28 is followed directly by 1900-03-01 in the Gregorian calendar
        let feb28 = compute_julian_day(1900, 2, 28, CalendarMode::Gregorian);
        assert_eq!(
            compute_calendar_date(feb28 + 1, CalendarMode::Gregorian),
            Some((1900, 3, 1))
        );

        // but not in the Julian calendar
        let feb28 = compute_julian_day(1900, 2, 28, CalendarMode::Julian);
        assert_eq!(
            compute_calendar_date(feb28 + 1, CalendarMode::Julian),
            Some((1900, 2, 29))
        );
    }

    #[test]
    fn test_cycle_boundaries() {
        // Walk a full 400-year cycle (and a bit) across the base date and
        // check that consecutive day numbers give consecutive dates.
        for mode in [CalendarMode::Gregorian, CalendarMode::Julian] {
            let start = compute_julian_day(-4_801, 1, 1, mode);
            let mut previous = compute_calendar_date(start, mode).unwrap();
            for jdn in start + 1..start + DAYS_PER_400_YEARS + 800 {
                let (year, month, day) = compute_calendar_date(jdn, mode).unwrap();
                let (py, pm, pd) = previous;
                if day == 1 {
                    assert_eq!(pd, days_in_month(py, pm, mode), "{mode} jdn {jdn}");
                    if month == 1 {
                        assert_eq!((year, pm), (py + 1, 12));
                    } else {
                        assert_eq!((year, month), (py, pm + 1));
                    }
                } else {
                    assert_eq!((year, month, day), (py, pm, pd + 1));
                }
                assert_eq!(compute_julian_day(year, month, day, mode), jdn);
                previous = (year, month, day);
            }
        }
    }

    #[test]
    fn test_calendar_date_overflow() {
        assert_eq!(compute_calendar_date(i64::MAX, CalendarMode::Gregorian), None);
        assert_eq!(compute_calendar_date(i64::MAX, CalendarMode::Julian), None);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2000, CalendarMode::Gregorian));
        assert!(!is_leap_year(1900, CalendarMode::Gregorian));
        assert!(is_leap_year(1900, CalendarMode::Julian));
        assert!(is_leap_year(-4800, CalendarMode::Gregorian));
        assert!(!is_leap_year(-1, CalendarMode::Julian));
        assert_eq!(days_in_month(2024, 2, CalendarMode::Gregorian), 29);
        assert_eq!(days_in_month(2023, 4, CalendarMode::Gregorian), 30);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(2000, 1, 1), "2000-01-01");
        assert_eq!(format_date(-4712, 1, 1), "-4712-01-01");
    }
}
