//! This module implements `TimeDelta` and any directly related algorithms.

use alloc::string::String;
use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    ops::{Add, Neg, Sub},
};

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    construct::{resolve_delta_arg, TimeDeltaArg, TimeDeltaSource},
    error::ErrorMessage,
    format::{format_fields, FormattableTime, TIME_PATTERN},
    host::HostTimeZone,
    iso::IsoTime,
    magnitude::{decompose, Magnitude, MAGNITUDE_TABLE},
    utils, DateTimeError, DateTimeResult, Sign,
};

use super::Instant;


/// A `PartialTimeDelta` represents partially filled `TimeDelta` fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialTimeDelta {
    // A potentially set `weeks` field.
    pub weeks: Option<i64>,
    // A potentially set `days` field.
    pub days: Option<i64>,
    // A potentially set `hours` field.
    pub hours: Option<i64>,
    // A potentially set `minutes` field.
    pub minutes: Option<i64>,
    // A potentially set `seconds` field.
    pub seconds: Option<i64>,
    // A potentially set `milliseconds` field.
    pub milliseconds: Option<i64>,
}

impl PartialTimeDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Convenience methods for building a `PartialTimeDelta`
impl PartialTimeDelta {
    pub const fn new() -> Self {
        Self {
            weeks: None,
            days: None,
            hours: None,
            minutes: None,
            seconds: None,
            milliseconds: None,
        }
    }

    pub const fn with_weeks(mut self, weeks: Option<i64>) -> Self {
        self.weeks = weeks;
        self
    }

    pub const fn with_days(mut self, days: Option<i64>) -> Self {
        self.days = days;
        self
    }

    pub const fn with_hours(mut self, hours: Option<i64>) -> Self {
        self.hours = hours;
        self
    }

    pub const fn with_minutes(mut self, minutes: Option<i64>) -> Self {
        self.minutes = minutes;
        self
    }

    pub const fn with_seconds(mut self, seconds: Option<i64>) -> Self {
        self.seconds = seconds;
        self
    }

    pub const fn with_milliseconds(mut self, milliseconds: Option<i64>) -> Self {
        self.milliseconds = milliseconds;
        self
    }
}

/// A signed span of time in weeks, days, hours, minutes, seconds and
/// milliseconds.
///
/// Fields are stored as provided and are not balanced against each other, so
/// `25` hours stays `25` hours. Two `TimeDelta`s are equal when their
/// magnitudes are equal.
///
/// ```rust
/// use datetime_rs::{partial::PartialTimeDelta, TimeDelta};
///
/// // Small leading numbers are days.
/// let two_days = TimeDelta::new(2, 0, 0, 0, 0, 0);
/// assert_eq!(two_days.total_milliseconds(), 2 * 86_400_000);
///
/// // Larger ones are milliseconds.
/// let delta = TimeDelta::new(90_061_001, 0, 0, 0, 0, 0);
/// assert_eq!(
///     (delta.days(), delta.hours(), delta.minutes(), delta.seconds(), delta.milliseconds()),
///     (1, 1, 1, 1, 1)
/// );
///
/// let partial = PartialTimeDelta::new().with_days(Some(10)).with_hours(Some(12));
/// assert_eq!(TimeDelta::from_partial(partial).to_string(), "12:00:00.000000");
/// ```
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeDelta {
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    milliseconds: i64,
}

// ==== Private API ====

impl TimeDelta {
    /// Returns the fields paired with their unit lengths, in
    /// `MAGNITUDE_TABLE` order.
    fn unit_fields(&self) -> [(i64, i64); 6] {
        let values = [
            self.milliseconds,
            self.seconds,
            self.minutes,
            self.hours,
            self.days,
            self.weeks,
        ];
        let mut fields = [(0, 0); 6];
        for ((slot, value), (_, length)) in fields.iter_mut().zip(values).zip(MAGNITUDE_TABLE) {
            *slot = (value, length);
        }
        fields
    }

    /// Returns the magnitude without saturation.
    fn checked_total_milliseconds(&self) -> Option<i64> {
        self.unit_fields()
            .into_iter()
            .try_fold(0i64, |total, (value, length)| {
                total.checked_add(value.checked_mul(length)?)
            })
    }

    /// Returns the time of day that the magnitude reaches when counted
    /// from midnight, wrapping around a day.
    pub(crate) fn wrapped_time_of_day(&self) -> IsoTime {
        IsoTime::from_milliseconds_in_day(utils::epoch_time_to_time_in_day(
            self.total_milliseconds(),
        ))
    }
}

// ==== Public API ====

impl TimeDelta {
    /// Creates a `TimeDelta` by dispatching on the shape of the leading
    /// argument.
    ///
    /// The positional order is days, seconds, milliseconds, minutes, hours,
    /// weeks.
    ///
    /// - A [`PartialTimeDelta`] is used as a component record, and the
    ///   trailing arguments are ignored.
    /// - A number whose absolute value is greater than `900` is a millisecond
    ///   magnitude and is decomposed, and the trailing arguments are ignored.
    /// - Any other number is a count of days, and every argument is taken
    ///   literally.
    #[must_use]
    pub fn new(
        leading: impl Into<TimeDeltaArg>,
        seconds: i64,
        milliseconds: i64,
        minutes: i64,
        hours: i64,
        weeks: i64,
    ) -> Self {
        match resolve_delta_arg(
            leading.into(),
            [seconds, milliseconds, minutes, hours, weeks],
        ) {
            TimeDeltaSource::Magnitude(magnitude) => Self::from_milliseconds(magnitude),
            TimeDeltaSource::Fields(fields) => Self::from_partial(fields),
        }
    }

    /// Creates a `TimeDelta` from a single leading argument.
    #[inline]
    #[must_use]
    pub fn from_arg(leading: impl Into<TimeDeltaArg>) -> Self {
        Self::new(leading, 0, 0, 0, 0, 0)
    }

    /// Creates a `TimeDelta` from literal fields in positional order.
    #[inline]
    #[must_use]
    pub const fn from_components(
        days: i64,
        seconds: i64,
        milliseconds: i64,
        minutes: i64,
        hours: i64,
        weeks: i64,
    ) -> Self {
        Self {
            weeks,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Creates a `TimeDelta` from a component record, absent fields being zero.
    #[must_use]
    pub fn from_partial(partial: PartialTimeDelta) -> Self {
        Self {
            weeks: partial.weeks.unwrap_or_default(),
            days: partial.days.unwrap_or_default(),
            hours: partial.hours.unwrap_or_default(),
            minutes: partial.minutes.unwrap_or_default(),
            seconds: partial.seconds.unwrap_or_default(),
            milliseconds: partial.milliseconds.unwrap_or_default(),
        }
    }

    /// Creates a `TimeDelta` by decomposing a millisecond magnitude into
    /// days, hours, minutes, seconds, and milliseconds.
    ///
    /// Every coefficient is truncated toward zero with the remainder carried
    /// into the next finer unit. Weeks are never populated.
    #[must_use]
    pub fn from_milliseconds(magnitude: i64) -> Self {
        let [days, hours, minutes, seconds, milliseconds] = decompose(magnitude);
        Self {
            weeks: 0,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Creates a `TimeDelta` of whole weeks.
    #[inline]
    #[must_use]
    pub const fn from_weeks(weeks: i64) -> Self {
        Self::from_components(0, 0, 0, 0, 0, weeks)
    }

    /// Creates a `TimeDelta` of whole days.
    #[inline]
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        Self::from_components(days, 0, 0, 0, 0, 0)
    }

    /// Creates a `TimeDelta` of whole hours.
    #[inline]
    #[must_use]
    pub const fn from_hours(hours: i64) -> Self {
        Self::from_components(0, 0, 0, 0, hours, 0)
    }

    /// Creates a `TimeDelta` of whole minutes.
    #[inline]
    #[must_use]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self::from_components(0, 0, 0, minutes, 0, 0)
    }

    /// Creates a `TimeDelta` of whole seconds.
    #[inline]
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::from_components(0, seconds, 0, 0, 0, 0)
    }

    /// Returns the `weeks` field.
    #[inline]
    #[must_use]
    pub const fn weeks(&self) -> i64 {
        self.weeks
    }

    /// Returns the `days` field.
    #[inline]
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.days
    }

    /// Returns the `hours` field.
    #[inline]
    #[must_use]
    pub const fn hours(&self) -> i64 {
        self.hours
    }

    /// Returns the `minutes` field.
    #[inline]
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Returns the `seconds` field.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the `milliseconds` field.
    #[inline]
    #[must_use]
    pub const fn milliseconds(&self) -> i64 {
        self.milliseconds
    }

    /// Returns the fields as a `PartialTimeDelta` with every field set.
    #[must_use]
    pub const fn to_partial(&self) -> PartialTimeDelta {
        PartialTimeDelta {
            weeks: Some(self.weeks),
            days: Some(self.days),
            hours: Some(self.hours),
            minutes: Some(self.minutes),
            seconds: Some(self.seconds),
            milliseconds: Some(self.milliseconds),
        }
    }

    /// Returns the magnitude: each field times its unit length, summed.
    ///
    /// Saturates at the `i64` bounds.
    #[must_use]
    pub fn total_milliseconds(&self) -> i64 {
        self.checked_total_milliseconds().unwrap_or_else(|| {
            let negative = self
                .unit_fields()
                .into_iter()
                .map(|(value, length)| i128::from(value) * i128::from(length))
                .sum::<i128>()
                < 0;
            if negative {
                i64::MIN
            } else {
                i64::MAX
            }
        })
    }

    /// Returns the magnitude in seconds.
    #[inline]
    #[must_use]
    pub fn total_seconds(&self) -> f64 {
        self.total_milliseconds() as f64 / 1000.0
    }

    /// Returns the `Sign` of the magnitude.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::from(self.total_milliseconds())
    }

    /// Returns whether the magnitude is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign() == Sign::Zero
    }

    /// Returns a `TimeDelta` with every field negated.
    #[must_use]
    pub const fn negated(&self) -> Self {
        Self {
            weeks: self.weeks.saturating_neg(),
            days: self.days.saturating_neg(),
            hours: self.hours.saturating_neg(),
            minutes: self.minutes.saturating_neg(),
            seconds: self.seconds.saturating_neg(),
            milliseconds: self.milliseconds.saturating_neg(),
        }
    }

    /// Returns a `TimeDelta` with a non-negative magnitude.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.sign() == Sign::Negative {
            return self.negated();
        }
        *self
    }

    /// Adds two `TimeDelta`s, returning a decomposed result.
    pub fn checked_add(&self, other: &Self) -> DateTimeResult<Self> {
        self.checked_total_milliseconds()
            .zip(other.checked_total_milliseconds())
            .and_then(|(lhs, rhs)| lhs.checked_add(rhs))
            .map(Self::from_milliseconds)
            .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::ArithmeticOutOfRange))
    }

    /// Subtracts `other` from this `TimeDelta`, returning a decomposed result.
    pub fn checked_sub(&self, other: &Self) -> DateTimeResult<Self> {
        self.checked_total_milliseconds()
            .zip(other.checked_total_milliseconds())
            .and_then(|(lhs, rhs)| lhs.checked_sub(rhs))
            .map(Self::from_milliseconds)
            .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::ArithmeticOutOfRange))
    }

    /// Returns the `HH:MM:SS.ffffff` text form of the magnitude read as an
    /// epoch offset in the host's time zone.
    ///
    /// The `Display` form wraps the magnitude in UTC instead.
    pub fn str_with_host(&self, host: &(impl HostTimeZone + ?Sized)) -> DateTimeResult<String> {
        self.strftime_with_host(TIME_PATTERN, host)
    }

    /// Formats the magnitude, read as an epoch offset in the host's time
    /// zone, with a strftime-style pattern.
    pub fn strftime_with_host(
        &self,
        pattern: &str,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<String> {
        let fields = Instant::try_new(self.magnitude_with_host(host)?)?.to_local_fields(host)?;
        Ok(format_fields(&fields, pattern))
    }
}

impl Magnitude for TimeDelta {
    fn magnitude_with_host(&self, _: &(impl HostTimeZone + ?Sized)) -> DateTimeResult<i64> {
        self.checked_total_milliseconds()
            .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::ArithmeticOutOfRange))
    }
}

impl PartialEq for TimeDelta {
    fn eq(&self, other: &Self) -> bool {
        self.total_milliseconds() == other.total_milliseconds()
    }
}

impl Eq for TimeDelta {}

impl PartialOrd for TimeDelta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeDelta {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_milliseconds().cmp(&other.total_milliseconds())
    }
}

impl Hash for TimeDelta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total_milliseconds().hash(state);
    }
}

impl Add for TimeDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_milliseconds(
            self.total_milliseconds()
                .saturating_add(rhs.total_milliseconds()),
        )
    }
}

impl Sub for TimeDelta {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_milliseconds(
            self.total_milliseconds()
                .saturating_sub(rhs.total_milliseconds()),
        )
    }
}

impl Neg for TimeDelta {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl From<PartialTimeDelta> for TimeDelta {
    fn from(value: PartialTimeDelta) -> Self {
        Self::from_partial(value)
    }
}

/// Writes the magnitude as a time of day, `HH:MM:SS.ffffff`, wrapping around
/// a day.
impl Writeable for TimeDelta {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattableTime::from(self.wrapped_time_of_day()).write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(15)
    }
}

impl_display_with_writeable!(TimeDelta);
