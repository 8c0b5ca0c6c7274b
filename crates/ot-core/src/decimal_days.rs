//! Day counts with one decimal digit (half days and the like).

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ValueError;

static DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)(?:\.([0-9]))?$").unwrap());

/// Leading day count in a label such as `"1.5日"`.
static LEADING_DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+(?:\.[0-9])?)(?:[^0-9.]|$)").unwrap());

/// A day count with a single fractional digit, e.g. `10.0` or `0.5`.
///
/// The fractional digit is kept as a base-10 digit rather than a float, and
/// addition carries into the integer part when the digits sum to ten or more:
/// `0.5 + 0.5 == 1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecimalDays {
    integer: u64,
    digit: u8,
}

impl DecimalDays {
    pub const ZERO: Self = Self {
        integer: 0,
        digit: 0,
    };

    /// Builds a count from its integer part and fractional digit (0–9).
    pub fn from_parts(integer: u64, digit: u8) -> Result<Self, ValueError> {
        if digit > 9 {
            return Err(ValueError::InvalidDays {
                input: format!("{integer}.{digit}"),
            });
        }
        Ok(Self { integer, digit })
    }

    /// Parses `D` or `D.d`. Integer-only text is read as `D.0`.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidDays {
            input: text.to_string(),
        };

        let caps = DAYS_RE.captures(text.trim()).ok_or_else(invalid)?;
        let integer = caps[1].parse().map_err(|_| invalid())?;
        let digit = caps
            .get(2)
            .map_or(Ok(0), |m| m.as_str().parse())
            .map_err(|_| invalid())?;
        Ok(Self { integer, digit })
    }

    /// Reads the day count at the start of `text`, ignoring a trailing unit.
    ///
    /// Returns `None` when the text does not start with a count.
    pub fn parse_leading(text: &str) -> Option<Self> {
        let caps = LEADING_DAYS_RE.captures(text.trim())?;
        Self::parse(&caps[1]).ok()
    }

    #[must_use]
    pub const fn integer_part(self) -> u64 {
        self.integer
    }

    #[must_use]
    pub const fn decimal_digit(self) -> u8 {
        self.digit
    }

    /// Returns the count as whole days, failing if a fractional digit is set.
    pub fn to_whole_days(self) -> Result<u64, ValueError> {
        if self.digit != 0 {
            return Err(ValueError::FractionalDays {
                value: self.to_string(),
            });
        }
        Ok(self.integer)
    }
}

impl DecimalDays {
    /// Addition with carry that reports overflow of the integer part.
    pub fn checked_add(self, other: Self) -> Result<Self, ValueError> {
        let mut integer = self.integer.checked_add(other.integer);
        let mut digit = self.digit + other.digit;
        if digit >= 10 {
            digit -= 10;
            integer = integer.and_then(|i| i.checked_add(1));
        }
        let integer = integer.ok_or(ValueError::Overflow)?;
        Ok(Self { integer, digit })
    }
}

/// Panics when the integer part overflows; see [`DecimalDays::checked_add`].
impl Add for DecimalDays {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match self.checked_add(other) {
            Ok(sum) => sum,
            Err(_) => panic!("day count overflow: {self} + {other}"),
        }
    }
}

impl Sum for DecimalDays {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for DecimalDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.integer, self.digit)
    }
}

impl FromStr for DecimalDays {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DecimalDays {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DecimalDays {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn d(s: &str) -> DecimalDays {
        DecimalDays::parse(s).unwrap()
    }

    #[test]
    fn halves_carry_into_integer_part() {
        assert_eq!(d("0.5") + d("0.5"), d("1.0"));
        assert_eq!(d("2.7") + d("0.6"), d("3.3"));
        assert_eq!(d("19.5") + d("1.5"), d("21.0"));
    }

    #[test]
    fn addition_without_carry() {
        assert_eq!(d("10.0") + d("0.5"), d("10.5"));
        assert_eq!(d("0.0") + d("0.0"), DecimalDays::ZERO);
    }

    #[test]
    fn checked_add_reports_overflow() {
        let max = DecimalDays::from_parts(u64::MAX, 5).unwrap();
        assert_eq!(max.checked_add(d("0.0")), Ok(max));
        assert_eq!(max.checked_add(d("0.5")), Err(ValueError::Overflow));
        assert_eq!(max.checked_add(d("1.0")), Err(ValueError::Overflow));
        assert_eq!(d("0.5").checked_add(d("0.5")), Ok(d("1.0")));
    }

    #[test]
    fn integer_only_text_is_normalized() {
        let days = d("10");
        assert_eq!(days, d("10.0"));
        assert_eq!(days.to_string(), "10.0");
    }

    #[test]
    fn parse_rejects_other_shapes() {
        for input in ["", "abc", "1.25", ".5", "1.", "-1.0", "1,5", "1.5日"] {
            assert_eq!(
                DecimalDays::parse(input).unwrap_err(),
                ValueError::InvalidDays {
                    input: input.to_string()
                },
                "expected rejection for {input:?}"
            );
        }
    }

    #[test]
    fn from_parts_rejects_multi_digit_fraction() {
        assert!(DecimalDays::from_parts(1, 10).is_err());
        assert_eq!(DecimalDays::from_parts(1, 5).unwrap(), d("1.5"));
    }

    #[test]
    fn whole_days_requires_zero_fraction() {
        assert_eq!(d("20.0").to_whole_days().unwrap(), 20);
        assert_eq!(
            d("20.5").to_whole_days().unwrap_err(),
            ValueError::FractionalDays {
                value: "20.5".to_string()
            }
        );
    }

    #[test]
    fn parse_leading_strips_unit_suffix() {
        assert_eq!(DecimalDays::parse_leading("1.5日"), Some(d("1.5")));
        assert_eq!(DecimalDays::parse_leading(" 3 days"), Some(d("3.0")));
        assert_eq!(DecimalDays::parse_leading("12"), Some(d("12.0")));
        assert_eq!(DecimalDays::parse_leading("日"), None);
        assert_eq!(DecimalDays::parse_leading("1.25日"), None);
        assert_eq!(DecimalDays::parse_leading(""), None);
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(DecimalDays::default().to_string(), "0.0");
    }

    #[test]
    fn serde_uses_text_form() {
        assert_eq!(serde_json::to_string(&d("1.5")).unwrap(), "\"1.5\"");
        let parsed: DecimalDays = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(parsed, d("4.0"));
    }

    proptest! {
        #[test]
        fn parts_roundtrip_through_text(integer in any::<u64>(), digit in 0u8..=9) {
            let days = DecimalDays::from_parts(integer, digit).unwrap();
            prop_assert_eq!(DecimalDays::parse(&days.to_string()).unwrap(), days);
        }

        #[test]
        fn addition_matches_tenths_arithmetic(
            a in 0u64..100_000, da in 0u8..=9,
            b in 0u64..100_000, db in 0u8..=9,
        ) {
            let sum = DecimalDays::from_parts(a, da).unwrap() + DecimalDays::from_parts(b, db).unwrap();
            let tenths = (a * 10 + u64::from(da)) + (b * 10 + u64::from(db));
            prop_assert_eq!(sum.integer_part(), tenths / 10);
            prop_assert_eq!(u64::from(sum.decimal_digit()), tenths % 10);
        }
    }
}
