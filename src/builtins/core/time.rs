//! This module implements `Time` and any directly related algorithms.

use alloc::string::String;
use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    construct::{resolve_time_arg, TimeArg},
    format::{FormattableTime, TIME_PATTERN},
    host::{HostHooks, HostTimeZone},
    iso::IsoTime,
    magnitude::Magnitude,
    DateTimeResult, MS_PER_DAY,
};

use super::{DateTime, TimeDelta};

/// A `PartialTime` represents partially filled `Time` fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialTime {
    // A potentially set `hour` field.
    pub hour: Option<i32>,
    // A potentially set `minute` field.
    pub minute: Option<i32>,
    // A potentially set `second` field.
    pub second: Option<i32>,
    // A potentially set `millisecond` field.
    pub millisecond: Option<i32>,
}

impl PartialTime {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Convenience methods for building a `PartialTime`
impl PartialTime {
    pub const fn new() -> Self {
        Self {
            hour: None,
            minute: None,
            second: None,
            millisecond: None,
        }
    }

    pub const fn with_hour(mut self, hour: Option<i32>) -> Self {
        self.hour = hour;
        self
    }

    pub const fn with_minute(mut self, minute: Option<i32>) -> Self {
        self.minute = minute;
        self
    }

    pub const fn with_second(mut self, second: Option<i32>) -> Self {
        self.second = second;
        self
    }

    pub const fn with_millisecond(mut self, millisecond: Option<i32>) -> Self {
        self.millisecond = millisecond;
        self
    }
}

/// A wall-clock time of day.
///
/// Fields are kept exactly as provided: an hour of `25` is not normalized.
/// Two `Time`s are equal when their magnitudes, the milliseconds since
/// midnight, are equal.
///
/// ```rust
/// use datetime_rs::{partial::PartialTime, Time, TimeDelta};
///
/// let time = Time::new(5, 6, 7, 8);
/// assert_eq!(time.to_string(), "05:06:07.008000");
///
/// let later = time.plus(&TimeDelta::from_hours(20));
/// assert_eq!(later, Time::new(1, 6, 7, 8));
///
/// let noon = Time::new(PartialTime::new().with_hour(Some(12)), 0, 0, 0);
/// assert_eq!(noon.total_milliseconds(), 43_200_000);
/// ```
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy)]
pub struct Time {
    pub(crate) iso: IsoTime,
}

// ==== Private API ====

impl Time {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoTime) -> Self {
        Self { iso }
    }

    /// Returns these fields on the host's current local date.
    fn on_current_date_with_host(&self, host: &impl HostHooks) -> DateTimeResult<DateTime> {
        let today = DateTime::now_with_host(host)?;
        Ok(DateTime::combine(today, *self))
    }

    /// Returns the time of day these fields reach after `magnitude` more
    /// milliseconds, wrapping around a day.
    fn wrapped(&self, magnitude: i128) -> Self {
        let total = i128::from(self.total_milliseconds()) + magnitude;
        let in_day = total.rem_euclid(i128::from(MS_PER_DAY)) as i64;
        Self::new_unchecked(IsoTime::from_milliseconds_in_day(in_day))
    }
}

// ==== Public API ====

impl Time {
    /// Creates a `Time` by dispatching on the shape of the leading argument.
    ///
    /// A [`PartialTime`] is used as a component record and the trailing
    /// arguments are ignored. A number is the hour, followed by the minute,
    /// second, and millisecond.
    #[must_use]
    pub fn new(leading: impl Into<TimeArg>, minute: i32, second: i32, millisecond: i32) -> Self {
        Self::new_unchecked(resolve_time_arg(
            leading.into(),
            [minute, second, millisecond],
        ))
    }

    /// Creates a `Time` from literal fields.
    #[inline]
    #[must_use]
    pub const fn from_components(hour: i32, minute: i32, second: i32, millisecond: i32) -> Self {
        Self::new_unchecked(IsoTime::new_unchecked(hour, minute, second, millisecond))
    }

    /// Creates a `Time` from a component record, absent fields being zero.
    #[must_use]
    pub fn from_partial(partial: PartialTime) -> Self {
        Self::new(partial, 0, 0, 0)
    }

    /// Returns the `hour` field.
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> i32 {
        self.iso.hour
    }

    /// Returns the `minute` field.
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> i32 {
        self.iso.minute
    }

    /// Returns the `second` field.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> i32 {
        self.iso.second
    }

    /// Returns the `millisecond` field.
    #[inline]
    #[must_use]
    pub const fn millisecond(&self) -> i32 {
        self.iso.millisecond
    }

    /// Returns the milliseconds since midnight described by the fields.
    #[inline]
    #[must_use]
    pub fn total_milliseconds(&self) -> i64 {
        self.iso.to_milliseconds()
    }

    /// Returns a new `Time` with the fields set in `partial` replaced.
    #[must_use]
    pub fn replace(&self, partial: PartialTime) -> Self {
        Self::from_components(
            partial.hour.unwrap_or(self.iso.hour),
            partial.minute.unwrap_or(self.iso.minute),
            partial.second.unwrap_or(self.iso.second),
            partial.millisecond.unwrap_or(self.iso.millisecond),
        )
    }

    /// Returns the fields as a `PartialTime` with every field set.
    #[must_use]
    pub const fn to_partial(&self) -> PartialTime {
        PartialTime {
            hour: Some(self.iso.hour),
            minute: Some(self.iso.minute),
            second: Some(self.iso.second),
            millisecond: Some(self.iso.millisecond),
        }
    }

    /// Adds a `TimeDelta`, wrapping around a day.
    #[must_use]
    pub fn plus(&self, delta: &TimeDelta) -> Self {
        self.wrapped(i128::from(delta.total_milliseconds()))
    }

    /// Subtracts a `TimeDelta`, wrapping around a day.
    #[must_use]
    pub fn minus(&self, delta: &TimeDelta) -> Self {
        self.wrapped(-i128::from(delta.total_milliseconds()))
    }

    /// Returns the `TimeDelta` from `other` to this `Time`.
    #[must_use]
    pub fn since(&self, other: &Self) -> TimeDelta {
        TimeDelta::from_milliseconds(self.total_milliseconds() - other.total_milliseconds())
    }

    /// Returns the `HH:MM:SS.ffffff` text form of these fields placed on the
    /// host's current local date.
    ///
    /// Out of range fields carry the way the local date arithmetic carries.
    pub fn str_with_host(&self, host: &impl HostHooks) -> DateTimeResult<String> {
        self.strftime_with_host(TIME_PATTERN, host)
    }

    /// Formats these fields placed on the host's current local date with a
    /// strftime-style pattern.
    pub fn strftime_with_host(&self, pattern: &str, host: &impl HostHooks) -> DateTimeResult<String> {
        self.on_current_date_with_host(host)?
            .strftime_with_host(pattern, host)
    }
}

impl Magnitude for Time {
    fn magnitude_with_host(&self, _: &(impl HostTimeZone + ?Sized)) -> DateTimeResult<i64> {
        Ok(self.total_milliseconds())
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.total_milliseconds() == other.total_milliseconds()
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_milliseconds().cmp(&other.total_milliseconds())
    }
}

impl Hash for Time {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total_milliseconds().hash(state);
    }
}

impl From<DateTime> for Time {
    fn from(value: DateTime) -> Self {
        value.time()
    }
}

impl From<PartialTime> for Time {
    fn from(value: PartialTime) -> Self {
        Self::from_partial(value)
    }
}

/// Writes the wrapped time of day as `HH:MM:SS.ffffff`.
impl Writeable for Time {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattableTime::from(self.wrapped(0).iso).write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(15)
    }
}

impl_display_with_writeable!(Time);

#[cfg(test)]
mod tests {
    use super::{PartialTime, Time};
    use crate::{
        host::test_hosts::{CentralEuropeHost, SPRING_FORWARD},
        FixedHostSystem, TimeDelta, MS_PER_HOUR,
    };
    use alloc::format;
    use writeable::assert_writeable_eq;

    #[test]
    fn fields_are_kept_verbatim() {
        let time = Time::new(25, 61, 0, 0);
        assert_eq!((time.hour(), time.minute()), (25, 61));
        assert_eq!(time.total_milliseconds(), 25 * MS_PER_HOUR + 61 * 60_000);
        assert_writeable_eq!(time, "02:01:00.000000");
    }

    #[test]
    fn text_form() {
        assert_writeable_eq!(Time::new(5, 6, 7, 8), "05:06:07.008000");
        let host = FixedHostSystem::new(1_583_125_567_008, -5 * MS_PER_HOUR);
        assert_eq!(
            Time::new(5, 6, 7, 8).str_with_host(&host).unwrap(),
            "05:06:07.008000"
        );
        assert_eq!(
            Time::new(5, 6, 7, 8).strftime_with_host("%I:%M %p on %d", &host).unwrap(),
            "05:06 AM on 02"
        );
    }

    #[test]
    fn text_form_carries_through_local_date() {
        // The current local date is 2020-03-29, when 02:00 does not exist.
        let host = CentralEuropeHost {
            now: SPRING_FORWARD + MS_PER_HOUR,
        };
        assert_eq!(
            Time::new(2, 30, 0, 0).str_with_host(&host).unwrap(),
            "03:30:00.000000"
        );
    }

    #[test]
    fn arithmetic_wraps() {
        let time = Time::new(23, 0, 0, 0);
        assert_eq!(time.plus(&TimeDelta::from_hours(2)), Time::new(1, 0, 0, 0));
        assert_eq!(time.minus(&TimeDelta::from_days(1)), time);
        assert_eq!(
            Time::new(0, 0, 0, 0).minus(&TimeDelta::from_components(0, 0, 1, 0, 0, 0)),
            Time::new(23, 59, 59, 999)
        );
        let since = Time::new(10, 0, 0, 0).since(&Time::new(12, 30, 0, 0));
        assert_eq!(since.total_milliseconds(), -(2 * MS_PER_HOUR + 30 * 60_000));
    }

    #[test]
    fn ordering_is_by_magnitude() {
        assert_eq!(Time::new(1, 60, 0, 0), Time::new(2, 0, 0, 0));
        assert!(Time::new(1, 59, 0, 0) < Time::new(2, 0, 0, 0));
    }

    #[test]
    fn replace_and_partials() {
        let time = Time::new(5, 6, 7, 8);
        let replaced = time.replace(PartialTime::new().with_minute(Some(0)));
        assert_eq!(
            (replaced.hour(), replaced.minute(), replaced.second()),
            (5, 0, 7)
        );
        assert!(PartialTime::new().is_empty());
        assert_eq!(Time::from_partial(time.to_partial()), time);
        assert_eq!(
            Time::new(PartialTime::new().with_second(Some(30)), 9, 9, 9),
            Time::new(0, 0, 30, 0)
        );
    }
}
