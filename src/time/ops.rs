// Arithmetic and comparison operations for JulianDay

use super::source::{number_to_rational, Source};
use super::JulianDay;
use crate::{JulianDayError, Result};
use num::{BigInt, BigRational};
use serde_json::Value;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

impl JulianDay {
    /// Sort key of the instant; normalized values order like their Julian dates
    fn key(&self) -> (i64, u32, u32) {
        (self.jdn, self.sec, self.usec)
    }

    /// Shift by `days`, panicking like integer overflow when the result
    /// leaves the `i64` day range
    fn shifted(&self, days: &BigRational) -> JulianDay {
        match self.checked_add(days) {
            Ok(jd) => jd,
            Err(err) => panic!("julian day arithmetic overflow: {}", err),
        }
    }

    /// Three-way comparison against a dynamically typed operand
    ///
    /// A JSON number is compared as a Julian date and a serialized
    /// [`JulianDay`] object as an instant. Every other kind is a
    /// `TypeMismatch`.
    pub fn try_cmp(&self, other: &Value) -> Result<Ordering> {
        match other {
            Value::Number(number) => Ok(self.jd().cmp(&number_to_rational(number)?)),
            Value::Object(_) => match Source::try_from(other)? {
                Source::JulianDay(jd) => Ok(self.cmp(&jd)),
                source => Err(JulianDayError::TypeMismatch(format!(
                    "cannot compare a julian day with {}",
                    source.kind()
                ))),
            },
            _ => Err(JulianDayError::TypeMismatch(format!(
                "cannot compare a julian day with {}",
                other
            ))),
        }
    }
}

fn days(value: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

impl PartialEq for JulianDay {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for JulianDay {}

impl Hash for JulianDay {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for JulianDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JulianDay {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

// Comparison with raw Julian dates

impl PartialEq<BigRational> for JulianDay {
    fn eq(&self, other: &BigRational) -> bool {
        self.jd() == *other
    }
}

impl PartialOrd<BigRational> for JulianDay {
    fn partial_cmp(&self, other: &BigRational) -> Option<Ordering> {
        Some(self.jd().cmp(other))
    }
}

impl PartialEq<i64> for JulianDay {
    fn eq(&self, other: &i64) -> bool {
        self.jd() == days(*other)
    }
}

impl PartialOrd<i64> for JulianDay {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.jd().cmp(&days(*other)))
    }
}

impl PartialEq<f64> for JulianDay {
    fn eq(&self, other: &f64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<f64> for JulianDay {
    /// Compares with the exact binary value of `other`; NaN is unordered
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        BigRational::from_float(*other).map(|other| self.jd().cmp(&other))
    }
}

// Addition and subtraction of days

impl Add<&BigRational> for &JulianDay {
    type Output = JulianDay;

    fn add(self, days: &BigRational) -> JulianDay {
        self.shifted(days)
    }
}

impl Add<BigRational> for JulianDay {
    type Output = JulianDay;

    fn add(self, days: BigRational) -> JulianDay {
        self.shifted(&days)
    }
}

impl Add<i64> for &JulianDay {
    type Output = JulianDay;

    fn add(self, n: i64) -> JulianDay {
        self.shifted(&days(n))
    }
}

impl Add<i64> for JulianDay {
    type Output = JulianDay;

    fn add(self, n: i64) -> JulianDay {
        self.shifted(&days(n))
    }
}

impl Sub<&BigRational> for &JulianDay {
    type Output = JulianDay;

    fn sub(self, days: &BigRational) -> JulianDay {
        self.shifted(&-days)
    }
}

impl Sub<BigRational> for JulianDay {
    type Output = JulianDay;

    fn sub(self, days: BigRational) -> JulianDay {
        self.shifted(&-days)
    }
}

impl Sub<i64> for &JulianDay {
    type Output = JulianDay;

    fn sub(self, n: i64) -> JulianDay {
        self.shifted(&-days(n))
    }
}

impl Sub<i64> for JulianDay {
    type Output = JulianDay;

    fn sub(self, n: i64) -> JulianDay {
        self.shifted(&-days(n))
    }
}

// The difference of two instants is an exact number of days

impl Sub<&JulianDay> for &JulianDay {
    type Output = BigRational;

    fn sub(self, other: &JulianDay) -> BigRational {
        self.jd() - other.jd()
    }
}

impl Sub<JulianDay> for JulianDay {
    type Output = BigRational;

    fn sub(self, other: JulianDay) -> BigRational {
        &self - &other
    }
}
