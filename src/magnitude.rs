//! The magnitude table and the `Magnitude` trait.
//!
//! A magnitude is the scalar representation of a value as a count of
//! milliseconds. Every value type in this crate reduces to one, and all
//! comparisons and arithmetic between different value types go through it.

use core::fmt;

use crate::{
    host::HostTimeZone, DateTimeResult, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND,
    MS_PER_WEEK,
};

/// A duration unit that carries a fixed length in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl Unit {
    /// Returns the length of this unit in milliseconds.
    #[inline]
    #[must_use]
    pub const fn milliseconds(self) -> i64 {
        match self {
            Self::Millisecond => 1,
            Self::Second => MS_PER_SECOND,
            Self::Minute => MS_PER_MINUTE,
            Self::Hour => MS_PER_HOUR,
            Self::Day => MS_PER_DAY,
            Self::Week => MS_PER_WEEK,
        }
    }

    /// Returns the plural field name of this unit.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Millisecond => "milliseconds",
            Self::Second => "seconds",
            Self::Minute => "minutes",
            Self::Hour => "hours",
            Self::Day => "days",
            Self::Week => "weeks",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// The unit to millisecond mapping, finest unit first.
pub const MAGNITUDE_TABLE: [(Unit, i64); 6] = [
    (Unit::Millisecond, Unit::Millisecond.milliseconds()),
    (Unit::Second, Unit::Second.milliseconds()),
    (Unit::Minute, Unit::Minute.milliseconds()),
    (Unit::Hour, Unit::Hour.milliseconds()),
    (Unit::Day, Unit::Day.milliseconds()),
    (Unit::Week, Unit::Week.milliseconds()),
];

/// The units a raw magnitude is decomposed into, coarsest first.
///
/// Weeks are never produced by decomposition.
pub(crate) const DECOMPOSITION_UNITS: [Unit; 5] = [
    Unit::Day,
    Unit::Hour,
    Unit::Minute,
    Unit::Second,
    Unit::Millisecond,
];

/// Greedily splits `magnitude` into `DECOMPOSITION_UNITS` coefficients.
///
/// Each coefficient is truncated toward zero and the remainder is carried to
/// the next finer unit, so every coefficient shares the sign of `magnitude`.
pub(crate) fn decompose(magnitude: i64) -> [i64; 5] {
    let mut remaining = magnitude;
    let mut result = [0; 5];
    for (slot, unit) in result.iter_mut().zip(DECOMPOSITION_UNITS) {
        let length = unit.milliseconds();
        *slot = remaining / length;
        remaining -= *slot * length;
    }
    result
}

/// A value that can be reduced to a millisecond magnitude.
///
/// Values that represent an instant resolve their magnitude as epoch
/// milliseconds, which may require the host's local time zone. Durations and
/// times of day ignore the host.
pub trait Magnitude {
    /// Returns this value's magnitude in milliseconds.
    fn magnitude_with_host(&self, host: &(impl HostTimeZone + ?Sized)) -> DateTimeResult<i64>;
}
