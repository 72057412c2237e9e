// Decimal formatting of Julian dates

use super::JulianDay;
use num::{BigInt, BigRational};
use num_traits::{Signed, Zero};
use std::fmt;

/// Digits in each of the two fractional blocks
const BLOCK_DIGITS: usize = 12;

impl JulianDay {
    /// The Julian date as a decimal string with 24 fractional digits
    ///
    /// A float keeps about 16 significant digits, which is not enough for
    /// microseconds at day counts in the millions; this keeps all of them.
    pub fn to_decimal_string(&self) -> String {
        let jd = self.jd();
        let sign = if jd.is_negative() { "-" } else { "" };
        let jd = jd.abs();

        let block = BigInt::from(10).pow(BLOCK_DIGITS as u32);
        let scale = BigRational::from_integer(block.clone());

        let whole = jd.floor();
        let first = (&jd - &whole) * &scale;
        let first_digits = first.floor();
        let second_digits = ((&first - &first_digits) * &scale).round();

        let mut whole = whole.to_integer();
        let mut first = first_digits.to_integer();
        let mut second = second_digits.to_integer();
        if second == block {
            second = BigInt::zero();
            first += 1;
            if first == block {
                first = BigInt::zero();
                whole += 1;
            }
        }

        format!(
            "{}{}.{:0>width$}{:0>width$}",
            sign,
            whole,
            first.to_string(),
            second.to_string(),
            width = BLOCK_DIGITS
        )
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}
