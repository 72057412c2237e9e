//! Property tests for calendar round-trips and day arithmetic

use julianday::calendar::{compute_calendar_date, compute_julian_day, days_in_month};
use julianday::{BigRational, CalendarFields, CalendarMode, JulianDay};
use num::BigInt;
use quickcheck::{Arbitrary, Gen, TestResult};

/// A valid set of calendar fields together with the calendar they are read in
#[derive(Debug, Clone)]
struct ValidFields {
    fields: CalendarFields,
    mode: CalendarMode,
}

impl Arbitrary for ValidFields {
    fn arbitrary(g: &mut Gen) -> ValidFields {
        let mode = if bool::arbitrary(g) {
            CalendarMode::Gregorian
        } else {
            CalendarMode::Julian
        };
        let year = i64::arbitrary(g) % 1_000_000;
        let month = u32::arbitrary(g) % 12 + 1;
        let day = u32::arbitrary(g) % days_in_month(year, month, mode) + 1;
        let fields = CalendarFields::new(year, month, day)
            .with_time(
                u32::arbitrary(g) % 24,
                u32::arbitrary(g) % 60,
                u32::arbitrary(g) % 60,
            )
            .with_microsecond(u32::arbitrary(g) % 1_000_000)
            .with_tz_offset(i32::arbitrary(g) % 1081);
        ValidFields { fields, mode }
    }
}

/// A Julian day number anywhere in the convertible range, at some time of day
#[derive(Debug, Clone)]
struct AnyInstant(JulianDay);

impl Arbitrary for AnyInstant {
    fn arbitrary(g: &mut Gen) -> AnyInstant {
        let jdn = i64::arbitrary(g) % 1_000_000_000_000;
        let usec_of_day = u64::arbitrary(g) % 86_400_000_000;
        let jd = JulianDay::at_noon(jdn)
            .checked_add(&BigRational::new(
                BigInt::from(usec_of_day),
                BigInt::from(86_400_000_000_u64),
            ))
            .unwrap();
        AnyInstant(jd)
    }
}

fn days(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

quickcheck::quickcheck! {
    fn prop_fields_round_trip(input: ValidFields) -> bool {
        let ValidFields { fields, mode } = input;
        let jd = JulianDay::from_fields(fields, mode).unwrap();
        jd.datetime(fields.tz_offset).unwrap() == fields
    }

    fn prop_date_round_trip(input: ValidFields) -> bool {
        let ValidFields { fields, mode } = input;
        let jdn = compute_julian_day(fields.year, fields.month, fields.day, mode);
        compute_calendar_date(jdn, mode) == Some((fields.year, fields.month, fields.day))
    }

    fn prop_day_zero_is_previous_month_end(input: ValidFields) -> bool {
        let ValidFields { fields, mode } = input;
        let (year, month) = match fields.month {
            1 => (fields.year - 1, 12),
            m => (fields.year, m - 1),
        };
        let zero = CalendarFields { day: 0, ..fields };
        let last = CalendarFields {
            year,
            month,
            day: days_in_month(year, month, mode),
            ..fields
        };
        JulianDay::from_fields(zero, mode).unwrap() == JulianDay::from_fields(last, mode).unwrap()
    }

    fn prop_adding_days_moves_forward(start: AnyInstant, n: u32) -> TestResult {
        if n == 0 {
            return TestResult::discard();
        }
        let v = start.0;
        let n = i64::from(n);
        let later = &v + n;
        TestResult::from_bool(v < later && &later - &v == days(n))
    }

    fn prop_week_cycle(start: AnyInstant, weeks: i32) -> bool {
        let v = start.0;
        let shifted = &v + 7 * i64::from(weeks);
        v.wday() == shifted.wday() && i64::from(v.wday()) == (v.jdn() + 1).rem_euclid(7)
    }

    fn prop_decimal_string_is_exact_to_the_microsecond(start: AnyInstant) -> bool {
        let v = start.0;
        let text = v.to_decimal_string();
        let reparsed = JulianDay::new(text.parse::<julianday::Source>().unwrap(), v.mode()).unwrap();
        reparsed == v
    }
}
