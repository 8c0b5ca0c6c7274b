//! Signed clock-time quantity in whole minutes.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ValueError;

/// `±H.MM`: sign, whole hours, a dot, and exactly two minute digits.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-]?)([0-9]+)\.([0-9]{2})$").unwrap());

/// A signed span of time stored as whole minutes.
///
/// The textual form is `±H.MM`, where the digits after the dot are minutes
/// (0–59), not a decimal fraction of an hour: `"9.30"` is nine and a half
/// hours. The sign applies to the whole value, so `"-1.30"` is -90 minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    total_minutes: i64,
}

impl ClockTime {
    /// The zero duration.
    pub const ZERO: Self = Self { total_minutes: 0 };

    /// Creates a time from a signed minute count.
    #[must_use]
    pub const fn from_minutes(total_minutes: i64) -> Self {
        Self { total_minutes }
    }

    /// Parses `±H.MM` text. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidTime {
            input: text.to_string(),
        };

        let caps = TIME_RE.captures(text.trim()).ok_or_else(invalid)?;
        let hours: u64 = caps[2].parse().map_err(|_| invalid())?;
        let minutes: u64 = caps[3].parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }

        let magnitude = hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .ok_or_else(invalid)?;
        let signed = if &caps[1] == "-" {
            -i128::from(magnitude)
        } else {
            i128::from(magnitude)
        };

        i64::try_from(signed)
            .map(Self::from_minutes)
            .map_err(|_| invalid())
    }

    /// Returns the signed minute count.
    #[must_use]
    pub const fn total_minutes(self) -> i64 {
        self.total_minutes
    }

    /// Whole hours of the magnitude.
    #[must_use]
    pub const fn hours(self) -> u64 {
        self.total_minutes.unsigned_abs() / 60
    }

    /// Minutes past the hour of the magnitude (0–59).
    #[must_use]
    pub const fn minutes(self) -> u64 {
        self.total_minutes.unsigned_abs() % 60
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.total_minutes < 0
    }

    /// Addition that reports overflow instead of panicking.
    pub fn checked_add(self, other: Self) -> Result<Self, ValueError> {
        self.total_minutes
            .checked_add(other.total_minutes)
            .map(Self::from_minutes)
            .ok_or(ValueError::Overflow)
    }

    /// Subtraction that reports overflow instead of panicking.
    pub fn checked_sub(self, other: Self) -> Result<Self, ValueError> {
        self.total_minutes
            .checked_sub(other.total_minutes)
            .map(Self::from_minutes)
            .ok_or(ValueError::Overflow)
    }

    /// Floor division by an integer, rounding toward negative infinity.
    pub fn divide_by(self, divisor: i64) -> Result<Self, ValueError> {
        if divisor == 0 {
            return Err(ValueError::DivisionByZero);
        }
        let Some(quotient) = self.total_minutes.checked_div(divisor) else {
            return Err(ValueError::Overflow);
        };
        let remainder = self.total_minutes % divisor;
        if remainder != 0 && (remainder < 0) != (divisor < 0) {
            Ok(Self::from_minutes(quotient - 1))
        } else {
            Ok(Self::from_minutes(quotient))
        }
    }
}

/// Operators follow `i64` semantics and panic on overflow in debug builds;
/// use [`ClockTime::checked_add`] and [`ClockTime::checked_sub`] on values
/// read from untrusted input.
impl Add for ClockTime {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_minutes(self.total_minutes + other.total_minutes)
    }
}

impl Sub for ClockTime {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::from_minutes(self.total_minutes - other.total_minutes)
    }
}

impl Neg for ClockTime {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_minutes(-self.total_minutes)
    }
}

impl Sum for ClockTime {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for ClockTime {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}{}.{:02}", self.hours(), self.minutes())
    }
}

impl FromStr for ClockTime {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for ClockTime {
    fn from(total_minutes: i64) -> Self {
        Self::from_minutes(total_minutes)
    }
}

impl TryFrom<f64> for ClockTime {
    type Error = ValueError;

    /// Accepts only finite, integral minute counts within `i64` range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
        if !value.is_finite() || value.fract() != 0.0 || !in_range {
            return Err(ValueError::NonIntegralMinutes {
                value: value.to_string(),
            });
        }
        Ok(Self::from_minutes(value as i64))
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
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

    fn t(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn parse_reads_minutes_literally() {
        assert_eq!(t("9.30").total_minutes(), 570);
        assert_eq!(t("8.00").total_minutes(), 480);
        assert_eq!(t("0.05").total_minutes(), 5);
        assert_eq!(t("12.59").total_minutes(), 779);
    }

    #[test]
    fn parse_applies_sign_to_whole_value() {
        assert_eq!(t("-1.30").total_minutes(), -90);
        assert_eq!(t("+1.30").total_minutes(), 90);
        assert_eq!(t("-0.45").total_minutes(), -45);
    }

    #[test]
    fn parse_trims_cell_padding() {
        assert_eq!(t("  7.15\n").total_minutes(), 435);
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for input in [
            "abc", "8.5", "8.000", "8", ".30", "8.", "", "--1.00", "+-1.00", "1,30", "8.60",
            "8.99", "１.００",
        ] {
            let err = ClockTime::parse(input).unwrap_err();
            assert_eq!(
                err,
                ValueError::InvalidTime {
                    input: input.to_string()
                },
                "expected rejection for {input:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_hour_overflow() {
        assert!(ClockTime::parse("99999999999999999999.00").is_err());
        assert!(ClockTime::parse("153722867280912930.08").is_err());
    }

    #[test]
    fn format_pads_minutes_and_only_signs_negatives() {
        assert_eq!(ClockTime::from_minutes(30).to_string(), "0.30");
        assert_eq!(ClockTime::from_minutes(-120).to_string(), "-2.00");
        assert_eq!(ClockTime::from_minutes(605).to_string(), "10.05");
        assert_eq!(ClockTime::from_minutes(-5).to_string(), "-0.05");
        assert_eq!(ClockTime::ZERO.to_string(), "0.00");
        assert_eq!(t("+3.07").to_string(), "3.07");
    }

    #[test]
    fn negative_zero_formats_as_zero() {
        assert_eq!(t("-0.00"), ClockTime::ZERO);
        assert_eq!(t("-0.00").to_string(), "0.00");
    }

    #[test]
    fn arithmetic_works_on_minutes() {
        assert_eq!(t("9.30") - t("8.00"), t("1.30"));
        assert_eq!(t("7.00") - t("8.00"), t("-1.00"));
        assert_eq!(t("1.30") + t("-1.00"), t("0.30"));
        assert_eq!(-t("2.15"), t("-2.15"));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = t("153722867280912930.07");
        assert_eq!(max, ClockTime::from_minutes(i64::MAX));
        assert_eq!(max.checked_add(t("0.01")), Err(ValueError::Overflow));
        assert_eq!(
            ClockTime::from_minutes(i64::MIN).checked_sub(t("0.01")),
            Err(ValueError::Overflow)
        );
        assert_eq!(t("9.30").checked_sub(t("8.00")), Ok(t("1.30")));
        assert_eq!(t("1.30").checked_add(t("-1.00")), Ok(t("0.30")));
    }

    #[test]
    fn divide_by_floors_toward_negative_infinity() {
        assert_eq!(ClockTime::from_minutes(7).divide_by(2).unwrap().total_minutes(), 3);
        assert_eq!(ClockTime::from_minutes(-7).divide_by(2).unwrap().total_minutes(), -4);
        assert_eq!(ClockTime::from_minutes(7).divide_by(-2).unwrap().total_minutes(), -4);
        assert_eq!(ClockTime::from_minutes(-7).divide_by(-2).unwrap().total_minutes(), 3);
        assert_eq!(t("8.00").divide_by(4).unwrap(), t("2.00"));
    }

    #[test]
    fn divide_by_zero_fails() {
        assert_eq!(
            t("8.00").divide_by(0).unwrap_err(),
            ValueError::DivisionByZero
        );
    }

    #[test]
    fn divide_min_by_minus_one_overflows() {
        assert_eq!(
            ClockTime::from_minutes(i64::MIN).divide_by(-1).unwrap_err(),
            ValueError::Overflow
        );
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(ClockTime::default(), ClockTime::ZERO);
    }

    #[test]
    fn try_from_float_rejects_non_integers() {
        assert_eq!(ClockTime::try_from(90.0).unwrap().total_minutes(), 90);
        assert_eq!(ClockTime::try_from(-15.0).unwrap().total_minutes(), -15);
        assert!(ClockTime::try_from(1.5).is_err());
        assert!(ClockTime::try_from(f64::NAN).is_err());
        assert!(ClockTime::try_from(f64::INFINITY).is_err());
        assert!(ClockTime::try_from(1e30).is_err());
    }

    #[test]
    fn sum_of_empty_is_zero() {
        let empty: Vec<ClockTime> = Vec::new();
        assert_eq!(empty.iter().sum::<ClockTime>(), ClockTime::ZERO);
    }

    #[test]
    fn serde_uses_text_form() {
        let json = serde_json::to_string(&t("-1.05")).unwrap();
        assert_eq!(json, "\"-1.05\"");
        let parsed: ClockTime = serde_json::from_str("\"8.00\"").unwrap();
        assert_eq!(parsed, t("8.00"));
        assert!(serde_json::from_str::<ClockTime>("\"8.5\"").is_err());
    }

    proptest! {
        #[test]
        fn format_then_parse_roundtrips(minutes in (i64::MIN + 1)..=i64::MAX) {
            let time = ClockTime::from_minutes(minutes);
            prop_assert_eq!(ClockTime::parse(&time.to_string()).unwrap(), time);
        }

        #[test]
        fn formatted_text_has_two_minute_digits(minutes in -1_000_000i64..1_000_000) {
            let text = ClockTime::from_minutes(minutes).to_string();
            let (_, frac) = text.split_once('.').unwrap();
            prop_assert_eq!(frac.len(), 2);
            prop_assert!(!text.starts_with('+'));
        }

        #[test]
        fn add_is_commutative_and_associative(
            a in -1_000_000i64..1_000_000,
            b in -1_000_000i64..1_000_000,
            c in -1_000_000i64..1_000_000,
        ) {
            let (a, b, c) = (
                ClockTime::from_minutes(a),
                ClockTime::from_minutes(b),
                ClockTime::from_minutes(c),
            );
            prop_assert_eq!(a + b, b + a);
            prop_assert_eq!((a + b) + c, a + (b + c));
        }

        #[test]
        fn sum_ignores_order(values in prop::collection::vec(-100_000i64..100_000, 0..32)) {
            let forward: ClockTime = values.iter().copied().map(ClockTime::from_minutes).sum();
            let backward: ClockTime = values.iter().rev().copied().map(ClockTime::from_minutes).sum();
            prop_assert_eq!(forward, backward);
            prop_assert_eq!(forward.total_minutes(), values.iter().sum::<i64>());
        }
    }
}
