//! Errors raised by the value types.

use thiserror::Error;

/// Failures from constructing or combining [`ClockTime`](crate::ClockTime)
/// and [`DecimalDays`](crate::DecimalDays) values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Text is not a `±H.MM` time.
    #[error("invalid time {input:?}: expected \"+/-H.MM\"")]
    InvalidTime { input: String },

    /// Text is not a `D` or `D.d` day count.
    #[error("invalid day count {input:?}: expected \"D.d\"")]
    InvalidDays { input: String },

    /// Minute counts must be whole numbers.
    #[error("minutes must be an integer, got {value}")]
    NonIntegralMinutes { value: String },

    /// Integer division by zero.
    #[error("cannot divide a time by zero")]
    DivisionByZero,

    /// The result does not fit in the minute counter.
    #[error("time arithmetic overflowed")]
    Overflow,

    /// Whole-day conversion of a count with a fractional digit.
    #[error("{value} days has a fractional part and cannot be converted to whole days")]
    FractionalDays { value: String },
}
