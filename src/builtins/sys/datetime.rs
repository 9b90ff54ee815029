use alloc::string::String;
use core::cmp::Ordering;

use crate::{
    construct::{DateTimeArg, UtcSource},
    magnitude::Magnitude,
    sys::LocalHostSystem,
    DateTime, DateTimeResult, Instant, Time, TimeDelta,
};

impl DateTime {
    /// Creates a `DateTime` by dispatching on the shape of `arg`, reading
    /// instants in the system's local time zone.
    ///
    /// See [`DateTime::new_with_host`].
    ///
    /// Enable with the `sys` feature flag.
    pub fn try_new(arg: impl Into<DateTimeArg>) -> DateTimeResult<Self> {
        Self::new_with_host(arg, &LocalHostSystem)
    }

    /// Returns the current local `DateTime`.
    ///
    /// Enable with the `sys` feature flag.
    pub fn now() -> DateTimeResult<Self> {
        Self::now_with_host(&LocalHostSystem)
    }

    /// Decomposes `instant` into local fields.
    ///
    /// Enable with the `sys` feature flag.
    pub fn from_instant(instant: Instant) -> DateTimeResult<Self> {
        Self::from_instant_with_host(instant, &LocalHostSystem)
    }

    /// Decomposes epoch milliseconds into local fields.
    ///
    /// Enable with the `sys` feature flag.
    pub fn from_epoch_milliseconds(epoch_milliseconds: i64) -> DateTimeResult<Self> {
        Self::from_epoch_milliseconds_with_host(epoch_milliseconds, &LocalHostSystem)
    }

    /// Decomposes an instant, epoch milliseconds, or the instant of a
    /// `DateTime` into UTC fields.
    ///
    /// Enable with the `sys` feature flag.
    pub fn utc(source: impl Into<UtcSource>) -> DateTimeResult<Self> {
        Self::utc_with_host(source, &LocalHostSystem)
    }

    /// Resolves `date_part` and replaces its time fields with those of
    /// `time_part`.
    ///
    /// Enable with the `sys` feature flag.
    pub fn combine_local(
        date_part: impl Into<DateTimeArg>,
        time_part: Time,
    ) -> DateTimeResult<Self> {
        Self::combine_with_host(date_part, time_part, &LocalHostSystem)
    }

    /// Returns the instant these fields describe.
    ///
    /// Enable with the `sys` feature flag.
    pub fn to_instant(&self) -> DateTimeResult<Instant> {
        self.to_instant_with_host(&LocalHostSystem)
    }

    /// Returns the epoch milliseconds of the instant these fields describe.
    ///
    /// Enable with the `sys` feature flag.
    pub fn epoch_milliseconds(&self) -> DateTimeResult<i64> {
        self.epoch_milliseconds_with_host(&LocalHostSystem)
    }

    /// Returns the balanced fields of this value's instant.
    ///
    /// Enable with the `sys` feature flag.
    pub fn normalized(&self) -> DateTimeResult<Self> {
        self.normalized_with_host(&LocalHostSystem)
    }

    /// Adds a `TimeDelta` to this value's instant.
    ///
    /// Enable with the `sys` feature flag.
    pub fn plus(&self, delta: &TimeDelta) -> DateTimeResult<Self> {
        self.plus_with_host(delta, &LocalHostSystem)
    }

    /// Subtracts a `TimeDelta` from this value's instant.
    ///
    /// Enable with the `sys` feature flag.
    pub fn minus(&self, delta: &TimeDelta) -> DateTimeResult<Self> {
        self.minus_with_host(delta, &LocalHostSystem)
    }

    /// Returns the `TimeDelta` between the magnitude of `other` and this
    /// value's instant.
    ///
    /// Enable with the `sys` feature flag.
    pub fn since(&self, other: &impl Magnitude) -> DateTimeResult<TimeDelta> {
        self.since_with_host(other, &LocalHostSystem)
    }

    /// Compares the instants two values describe.
    ///
    /// Enable with the `sys` feature flag.
    pub fn compare(&self, other: &Self) -> DateTimeResult<Ordering> {
        self.cmp_with_host(other, &LocalHostSystem)
    }

    /// Returns the `YYYY-MM-DD HH:MM:SS.ffffff` text form of this value's
    /// instant.
    ///
    /// Enable with the `sys` feature flag.
    pub fn str(&self) -> DateTimeResult<String> {
        self.str_with_host(&LocalHostSystem)
    }

    /// Formats this value's instant with a strftime-style pattern.
    ///
    /// Enable with the `sys` feature flag.
    pub fn strftime(&self, pattern: &str) -> DateTimeResult<String> {
        self.strftime_with_host(pattern, &LocalHostSystem)
    }
}
