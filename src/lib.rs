//! julianday: exact Julian Day arithmetic for astronomical calculations
//!
//! This crate converts between a continuous Julian Day count and civil
//! calendar dates in the proleptic Gregorian or proleptic Julian calendar.
//! Sub-day time is kept at microsecond resolution and every internal
//! computation uses exact rationals, so values survive round-trips even at
//! astronomically large day counts.
//!
//! ```rust
//! use julianday::{CalendarFields, CalendarMode, JulianDay};
//!
//! // 2000-01-01 12:00:00 UTC is the J2000.0 epoch
//! let fields = CalendarFields::new(2000, 1, 1).with_time(12, 0, 0);
//! let jd = JulianDay::new(fields, CalendarMode::Gregorian).unwrap();
//! assert_eq!(jd.jdn(), 2_451_545);
//! assert_eq!(jd.to_string(), "2451545.000000000000000000000000");
//!
//! // Decompose in Japan Standard Time
//! let local = jd.datetime(julianday::constants::JST).unwrap();
//! assert_eq!((local.day, local.hour), (1, 21));
//! ```

use thiserror::Error;

pub mod calendar;
pub mod constants;
pub mod time;

// Re-export commonly used types
pub use crate::calendar::CalendarMode;
pub use num::BigRational;
pub use crate::time::{CalendarFields, JulianDay, Source, J2000};

/// Main error type for the julianday library
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JulianDayError {
    /// An operand or construction source is of a kind the operation does not accept
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// A calendar field, timezone offset or resulting day number is out of bounds
    #[error("Range violation: {0}")]
    RangeViolation(String),
}

/// Result type for julianday operations
pub type Result<T> = std::result::Result<T, JulianDayError>;

/// Build a `RangeViolation` for a named value and the bounds it must respect
pub(crate) fn range_violation(name: &str, value: impl std::fmt::Display, bounds: &str) -> JulianDayError {
    log::warn!("rejected {} = {} (expected {})", name, value, bounds);
    JulianDayError::RangeViolation(format!("{} = {} is outside {}", name, value, bounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = range_violation("month", 13, "1..=12");
        assert_eq!(
            err.to_string(),
            "Range violation: month = 13 is outside 1..=12"
        );

        let err = JulianDayError::TypeMismatch("boolean is not a time source".into());
        assert_eq!(
            err.to_string(),
            "Type mismatch: boolean is not a time source"
        );
    }

    #[test]
    fn test_reexports() {
        assert_eq!(J2000.jdn(), constants::J2000_JDN);
        assert_eq!(CalendarMode::default(), CalendarMode::Gregorian);
    }
}
