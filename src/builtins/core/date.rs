//! This module implements `Date` and any directly related algorithms.

use alloc::string::String;
use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::ErrorMessage,
    format::{format_fields, FormattableDate},
    host::{HostHooks, HostTimeZone},
    iso::{IsoDate, IsoDateTime, IsoTime},
    magnitude::Magnitude,
    utils, DateTimeError, DateTimeResult,
};

use super::{DateTime, Instant, TimeDelta};

/// A `PartialDate` represents partially filled `Date` fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialDate {
    // A potentially set `year` field.
    pub year: Option<i32>,
    // A potentially set `month` field.
    pub month: Option<i32>,
    // A potentially set `day` field.
    pub day: Option<i32>,
}

impl PartialDate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Convenience methods for building a `PartialDate`
impl PartialDate {
    pub const fn new() -> Self {
        Self {
            year: None,
            month: None,
            day: None,
        }
    }

    pub const fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub const fn with_month(mut self, month: Option<i32>) -> Self {
        self.month = month;
        self
    }

    pub const fn with_day(mut self, day: Option<i32>) -> Self {
        self.day = day;
        self
    }
}

/// A calendar date in the proleptic Gregorian calendar.
///
/// Months are 1-indexed. Out of range months and days are kept as provided and
/// carry into neighboring fields whenever the date is resolved, so month `13`
/// of 2020 is January 2021 and day `0` is the last day of the previous month.
///
/// ```rust
/// use datetime_rs::Date;
///
/// let date = Date::new(2020, 3, 2);
/// assert_eq!(date.weekday(), 0);
/// assert_eq!(date.isoweekday(), 1);
/// assert_eq!(date.to_string(), "2020-03-02");
///
/// assert_eq!(Date::new(2020, 13, 1), Date::new(2021, 1, 1));
/// assert_eq!(Date::new(2020, 3, 0).to_string(), "2020-02-29");
/// ```
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy)]
pub struct Date {
    pub(crate) iso: IsoDate,
}

// ==== Private API ====

impl Date {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDate) -> Self {
        Self { iso }
    }

    /// The local midnight of this date, as a naive `DateTime`.
    fn midnight(&self) -> DateTime {
        DateTime::from(*self)
    }

    /// Resolves `magnitude` back into a local date.
    fn from_local_magnitude(
        magnitude: i64,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        let instant = Instant::try_new(magnitude)?;
        Ok(DateTime::from_instant_with_host(instant, host)?.date())
    }
}

// ==== Public API ====

impl Date {
    /// Creates a `Date` from positional fields.
    #[inline]
    #[must_use]
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self::new_unchecked(IsoDate::new_unchecked(year, month, day))
    }

    /// Creates a `Date` from a component record.
    ///
    /// An absent year is `1970`, and an absent month or day is `1`.
    #[must_use]
    pub fn from_partial(partial: PartialDate) -> Self {
        Self::new(
            partial.year.unwrap_or(1970),
            partial.month.unwrap_or(1),
            partial.day.unwrap_or(1),
        )
    }

    /// Returns the local date of `instant` in the host's time zone.
    pub fn from_instant_with_host(
        instant: Instant,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        DateTime::from_instant_with_host(instant, host).map(|dt| dt.date())
    }

    /// Returns the host's current local date.
    pub fn today_with_host(host: &impl HostHooks) -> DateTimeResult<Self> {
        DateTime::now_with_host(host).map(|dt| dt.date())
    }

    /// Returns the `year` field.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.iso.year
    }

    /// Returns the `month` field.
    #[inline]
    #[must_use]
    pub const fn month(&self) -> i32 {
        self.iso.month
    }

    /// Returns the `day` field.
    #[inline]
    #[must_use]
    pub const fn day(&self) -> i32 {
        self.iso.day
    }

    /// Returns a new `Date` with the fields set in `partial` replaced.
    #[must_use]
    pub fn replace(&self, partial: PartialDate) -> Self {
        Self::new(
            partial.year.unwrap_or(self.iso.year),
            partial.month.unwrap_or(self.iso.month),
            partial.day.unwrap_or(self.iso.day),
        )
    }

    /// Returns the fields as a `PartialDate` with every field set.
    #[must_use]
    pub const fn to_partial(&self) -> PartialDate {
        PartialDate {
            year: Some(self.iso.year),
            month: Some(self.iso.month),
            day: Some(self.iso.day),
        }
    }

    /// Returns the balanced copy of this date.
    ///
    /// Fails with a range error if the balanced year does not fit in an
    /// `i32`.
    pub fn balanced(&self) -> DateTimeResult<Self> {
        self.iso
            .balance()
            .map(Self::new_unchecked)
            .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::DateOutOfRange))
    }

    /// Returns the weekday, `0` being Monday and `6` being Sunday.
    #[inline]
    #[must_use]
    pub fn weekday(&self) -> u8 {
        utils::monday_based_weekday(self.iso.native_weekday())
    }

    /// Returns the ISO weekday, `1` being Monday and `7` being Sunday.
    #[inline]
    #[must_use]
    pub fn isoweekday(&self) -> u8 {
        self.weekday() + 1
    }

    /// Returns the instant of local midnight on this date in the host's time
    /// zone.
    pub fn local_midnight_with_host(
        &self,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Instant> {
        Instant::from_local_fields(
            &IsoDateTime::new_unchecked(self.iso, IsoTime::default()),
            host,
        )
    }

    /// Returns the epoch milliseconds of local midnight on this date.
    pub fn epoch_milliseconds_with_host(
        &self,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<i64> {
        self.local_midnight_with_host(host)
            .map(|instant| instant.epoch_milliseconds())
    }

    /// Adds a `TimeDelta` to local midnight and returns the resulting local
    /// date.
    pub fn plus_with_host(
        &self,
        delta: &TimeDelta,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        let magnitude = self.midnight().plus_magnitude_with_host(delta, host)?;
        Self::from_local_magnitude(magnitude, host)
    }

    /// Subtracts a `TimeDelta` from local midnight and returns the resulting
    /// local date.
    pub fn minus_with_host(
        &self,
        delta: &TimeDelta,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        self.plus_with_host(&delta.negated(), host)
    }

    /// Returns the `TimeDelta` from `other` to local midnight on this date.
    pub fn since_with_host(
        &self,
        other: &impl Magnitude,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<TimeDelta> {
        self.midnight().since_with_host(other, host)
    }

    /// Formats the balanced date at midnight with a strftime-style pattern.
    ///
    /// Fails with a range error if the balanced year does not fit in an
    /// `i32`.
    pub fn strftime(&self, pattern: &str) -> DateTimeResult<String> {
        let balanced = self.balanced()?;
        Ok(format_fields(
            &IsoDateTime::new_unchecked(balanced.iso, IsoTime::default()),
            pattern,
        ))
    }
}

impl Magnitude for Date {
    fn magnitude_with_host(&self, host: &(impl HostTimeZone + ?Sized)) -> DateTimeResult<i64> {
        self.epoch_milliseconds_with_host(host)
    }
}

impl PartialEq for Date {
    fn eq(&self, other: &Self) -> bool {
        self.iso.to_epoch_days() == other.iso.to_epoch_days()
    }
}

impl Eq for Date {}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iso.to_epoch_days().cmp(&other.iso.to_epoch_days())
    }
}

impl Hash for Date {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iso.to_epoch_days().hash(state);
    }
}

impl From<DateTime> for Date {
    fn from(value: DateTime) -> Self {
        value.date()
    }
}

impl From<PartialDate> for Date {
    fn from(value: PartialDate) -> Self {
        Self::from_partial(value)
    }
}

/// Writes the balanced date as `YYYY-MM-DD`.
///
/// A date whose balanced year does not fit in an `i32` is written with its
/// stored fields.
impl Writeable for Date {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattableDate::from(self.iso.balance().unwrap_or(self.iso)).write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        FormattableDate::from(self.iso.balance().unwrap_or(self.iso)).writeable_length_hint()
    }
}

impl_display_with_writeable!(Date);
