//! This module implements `DateTime` and any directly related algorithms.

use alloc::string::String;
use core::cmp::Ordering;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    construct::{resolve_datetime_arg, DateTimeArg, DateTimeSource, UtcSource},
    error::ErrorMessage,
    format::{format_fields, FormattableDateTime, StrftimePattern, DATETIME_PATTERN},
    host::{HostHooks, HostTimeZone},
    iso::{IsoDate, IsoDateTime, IsoTime},
    magnitude::Magnitude,
    parsers, DateTimeError, DateTimeResult,
};

use super::{Date, Instant, Time, TimeDelta};

#[cfg(test)]
mod tests;

/// How the fields of a [`DateTime`] are interpreted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The fields are a naive local wall-clock reading.
    #[default]
    Local,
    /// The fields are UTC calendar fields.
    Utc,
}

/// A `PartialDateTime` represents partially filled `DateTime` fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartialDateTime {
    // A potentially set `year` field.
    pub year: Option<i32>,
    // A potentially set `month` field.
    pub month: Option<i32>,
    // A potentially set `day` field.
    pub day: Option<i32>,
    // A potentially set `hour` field.
    pub hour: Option<i32>,
    // A potentially set `minute` field.
    pub minute: Option<i32>,
    // A potentially set `second` field.
    pub second: Option<i32>,
    // A potentially set `millisecond` field.
    pub millisecond: Option<i32>,
}

impl PartialDateTime {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Convenience methods for building a `PartialDateTime`
impl PartialDateTime {
    pub const fn new() -> Self {
        Self {
            year: None,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
            millisecond: None,
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

    /// Sets the date fields from a `PartialDate`.
    pub const fn with_date(mut self, date: super::PartialDate) -> Self {
        self.year = date.year;
        self.month = date.month;
        self.day = date.day;
        self
    }

    /// Sets the time fields from a `PartialTime`.
    pub const fn with_time(mut self, time: super::PartialTime) -> Self {
        self.hour = time.hour;
        self.minute = time.minute;
        self.second = time.second;
        self.millisecond = time.millisecond;
        self
    }
}

macro_rules! impl_partial_tuple {
    ($(($($field:ident),+)),+ $(,)?) => {
        $(
            impl From<($(impl_partial_tuple!(@ty $field),)+)> for PartialDateTime {
                fn from(($($field,)+): ($(impl_partial_tuple!(@ty $field),)+)) -> Self {
                    Self {
                        $($field,)+
                        ..Self::new()
                    }
                }
            }
        )+
    };
    (@ty $field:ident) => { Option<i32> };
}

impl_partial_tuple!(
    (year),
    (year, month),
    (year, month, day),
    (year, month, day, hour),
    (year, month, day, hour, minute),
    (year, month, day, hour, minute, second),
    (year, month, day, hour, minute, second, millisecond),
);

/// A combined date and time of day, either naive local time or anchored to
/// UTC.
///
/// A `DateTime` always stores all seven fields exactly as provided. Whenever
/// it is resolved to an instant, out of range fields carry into neighboring
/// fields. Resolving a [`Anchor::Local`] value needs a host time zone, so
/// those operations take a host.
///
/// Equality through `==` compares the stored fields and anchor. Use
/// [`DateTime::cmp_with_host`] to compare the instants two values describe.
///
/// ```rust
/// use datetime_rs::{Date, DateTime, FixedHostSystem, TimeDelta};
///
/// let host = FixedHostSystem::new(0, -18_000_000);
///
/// let dt = DateTime::from_components(2020, 3, 12, 0, 0, 0, 0);
/// let earlier = dt.minus_with_host(&TimeDelta::new(3, 0, 0, 0, 0, 0), &host).unwrap();
/// assert_eq!(earlier, DateTime::from_components(2020, 3, 9, 0, 0, 0, 0));
/// assert_eq!(earlier.date(), Date::new(2020, 3, 9));
///
/// // A lone number is epoch milliseconds, read as local time.
/// let epoch = DateTime::new_with_host(0_i64, &host).unwrap();
/// assert_eq!(epoch.str_with_host(&host).unwrap(), "1969-12-31 19:00:00.000000");
/// ```
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub(crate) iso: IsoDateTime,
    anchor: Anchor,
}

// ==== Private API ====

impl DateTime {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDateTime, anchor: Anchor) -> Self {
        Self { iso, anchor }
    }

    /// Decomposes `instant` with the accessors of `anchor`.
    fn from_instant_with_anchor(
        instant: Instant,
        anchor: Anchor,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        match anchor {
            Anchor::Local => Self::from_instant_with_host(instant, host),
            Anchor::Utc => Ok(Self::utc_from_instant(instant)),
        }
    }

    /// Returns this value's magnitude offset by `delta`.
    pub(crate) fn plus_magnitude_with_host(
        &self,
        delta: &TimeDelta,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<i64> {
        let magnitude = self.epoch_milliseconds_with_host(host)?;
        magnitude
            .checked_add(delta.magnitude_with_host(host)?)
            .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::ArithmeticOutOfRange))
    }

    /// The fields written by the host-free text form.
    fn display_fields(&self) -> IsoDateTime {
        self.iso.balance().unwrap_or(self.iso)
    }

    /// Returns the fields this value's instant decomposes into through the
    /// accessors of its anchor.
    fn rendered_fields_with_host(
        &self,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<IsoDateTime> {
        let instant = self.to_instant_with_host(host)?;
        match self.anchor {
            Anchor::Local => instant.to_local_fields(host),
            Anchor::Utc => Ok(instant.to_utc_fields()),
        }
    }
}

// ==== Public API ====

impl DateTime {
    /// Creates a `DateTime` by dispatching on the shape of `arg`.
    ///
    /// - A lone number (positional fields without a month or a day) is epoch
    ///   milliseconds, decomposed into local fields.
    /// - A `DateTime` is copied with its anchor. A `Date` is copied at
    ///   midnight with a local anchor.
    /// - An `Instant` is decomposed into local fields.
    /// - Any other positional fields are taken literally. An absent day is
    ///   `1` and absent time fields are `0`.
    ///
    /// ```rust
    /// use datetime_rs::{DateTime, Instant};
    ///
    /// let host = ();
    /// let dt = DateTime::new_with_host((2020, 3, 2, 5), &host).unwrap();
    /// assert_eq!(dt, DateTime::from_components(2020, 3, 2, 5, 0, 0, 0));
    ///
    /// let instant = Instant::try_new(1_583_125_567_008).unwrap();
    /// let dt = DateTime::new_with_host(instant, &host).unwrap();
    /// assert_eq!(dt, DateTime::from_components(2020, 3, 2, 5, 6, 7, 8));
    /// ```
    pub fn new_with_host(
        arg: impl Into<DateTimeArg>,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        match resolve_datetime_arg(arg.into())? {
            DateTimeSource::Fields(iso, anchor) => Ok(Self::new_unchecked(iso, anchor)),
            DateTimeSource::LocalInstant(instant) => Self::from_instant_with_host(instant, host),
        }
    }

    /// Creates a local `DateTime` from literal fields.
    #[inline]
    #[must_use]
    pub const fn from_components(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Self {
        Self::new_unchecked(
            IsoDateTime::new_unchecked(
                IsoDate::new_unchecked(year, month, day),
                IsoTime::new_unchecked(hour, minute, second, millisecond),
            ),
            Anchor::Local,
        )
    }

    /// Creates a UTC anchored `DateTime` from literal fields.
    #[inline]
    #[must_use]
    pub const fn from_components_utc(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Self {
        Self::from_components(year, month, day, hour, minute, second, millisecond)
            .with_anchor(Anchor::Utc)
    }

    /// Creates a local `DateTime` from a component record.
    ///
    /// The year and month are required. An absent day is `1` and absent time
    /// fields are `0`.
    pub fn from_partial(partial: PartialDateTime) -> DateTimeResult<Self> {
        let (Some(year), Some(month)) = (partial.year, partial.month) else {
            return Err(DateTimeError::r#type().with_enum(ErrorMessage::MissingYearOrMonth));
        };
        Ok(Self::from_components(
            year,
            month,
            partial.day.unwrap_or(1),
            partial.hour.unwrap_or_default(),
            partial.minute.unwrap_or_default(),
            partial.second.unwrap_or_default(),
            partial.millisecond.unwrap_or_default(),
        ))
    }

    /// Copies the fields, and anchor, of any value convertible to a
    /// `DateTime`.
    #[inline]
    #[must_use]
    pub fn copy_from(source: impl Into<Self>) -> Self {
        source.into()
    }

    /// Decomposes `instant` into local fields in the host's time zone.
    pub fn from_instant_with_host(
        instant: Instant,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        Ok(Self::new_unchecked(
            instant.to_local_fields(host)?,
            Anchor::Local,
        ))
    }

    /// Decomposes epoch milliseconds into local fields in the host's time
    /// zone.
    pub fn from_epoch_milliseconds_with_host(
        epoch_milliseconds: i64,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        Self::from_instant_with_host(Instant::try_new(epoch_milliseconds)?, host)
    }

    /// Decomposes `instant` into UTC fields.
    #[must_use]
    pub fn utc_from_instant(instant: Instant) -> Self {
        Self::new_unchecked(instant.to_utc_fields(), Anchor::Utc)
    }

    /// Decomposes epoch milliseconds into UTC fields.
    pub fn utc_from_epoch_milliseconds(epoch_milliseconds: i64) -> DateTimeResult<Self> {
        Instant::try_new(epoch_milliseconds).map(Self::utc_from_instant)
    }

    /// Decomposes an instant, epoch milliseconds, or the instant of a
    /// `DateTime` into UTC fields.
    ///
    /// ```rust
    /// use datetime_rs::{Anchor, DateTime, FixedHostSystem};
    ///
    /// let host = FixedHostSystem::new(0, 3_600_000);
    /// let local = DateTime::from_components(2020, 3, 2, 5, 0, 0, 0);
    /// let utc = DateTime::utc_with_host(local, &host).unwrap();
    /// assert_eq!(utc, DateTime::from_components_utc(2020, 3, 2, 4, 0, 0, 0));
    /// assert_eq!(utc.anchor(), Anchor::Utc);
    /// ```
    pub fn utc_with_host(
        source: impl Into<UtcSource>,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        let instant = match source.into() {
            UtcSource::EpochMilliseconds(epoch_milliseconds) => {
                Instant::try_new(epoch_milliseconds)?
            }
            UtcSource::Instant(instant) => instant,
            UtcSource::DateTime(dt) => dt.to_instant_with_host(host)?,
        };
        Ok(Self::utc_from_instant(instant))
    }

    /// Returns the host's current local `DateTime`.
    pub fn now_with_host(host: &impl HostHooks) -> DateTimeResult<Self> {
        let instant = Instant::try_new(host.get_system_epoch_milliseconds()?)?;
        Self::from_instant_with_host(instant, host)
    }

    /// Parses `text` against a strftime-style `pattern`.
    ///
    /// The parsed fields are anchored with `anchor`. Text that does not match
    /// fails with a value error carrying the text and pattern.
    ///
    /// ```rust
    /// use datetime_rs::{error::ErrorKind, Anchor, DateTime};
    ///
    /// let dt = DateTime::strptime("2020-04-12", "%Y-%m-%d", Anchor::Utc).unwrap();
    /// assert_eq!(dt, DateTime::from_components_utc(2020, 4, 12, 0, 0, 0, 0));
    ///
    /// let err = DateTime::strptime("bogus", "%Y-%m-%d", Anchor::Local).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Value);
    /// let mismatch = err.format_mismatch_details().unwrap();
    /// assert_eq!((mismatch.text(), mismatch.pattern()), ("bogus", "%Y-%m-%d"));
    /// ```
    pub fn strptime(text: &str, pattern: &str, anchor: Anchor) -> DateTimeResult<Self> {
        parsers::strptime(text, pattern)
            .map(|iso| Self::new_unchecked(iso, anchor))
            .ok_or_else(|| DateTimeError::format_mismatch(text, pattern))
    }

    /// Copies `date_part` and replaces its time fields with those of
    /// `time_part`.
    #[must_use]
    pub fn combine(date_part: impl Into<Self>, time_part: Time) -> Self {
        let date_part = date_part.into();
        Self::new_unchecked(
            IsoDateTime::new_unchecked(date_part.iso.date, time_part.iso),
            date_part.anchor,
        )
    }

    /// Resolves `date_part` through the construction dispatch of
    /// [`DateTime::new_with_host`] and replaces its time fields with those of
    /// `time_part`.
    pub fn combine_with_host(
        date_part: impl Into<DateTimeArg>,
        time_part: Time,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        Self::new_with_host(date_part, host).map(|dt| Self::combine(dt, time_part))
    }

    /// Returns the `year` field.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.iso.date.year
    }

    /// Returns the `month` field.
    #[inline]
    #[must_use]
    pub const fn month(&self) -> i32 {
        self.iso.date.month
    }

    /// Returns the `day` field.
    #[inline]
    #[must_use]
    pub const fn day(&self) -> i32 {
        self.iso.date.day
    }

    /// Returns the `hour` field.
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> i32 {
        self.iso.time.hour
    }

    /// Returns the `minute` field.
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> i32 {
        self.iso.time.minute
    }

    /// Returns the `second` field.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> i32 {
        self.iso.time.second
    }

    /// Returns the `millisecond` field.
    #[inline]
    #[must_use]
    pub const fn millisecond(&self) -> i32 {
        self.iso.time.millisecond
    }

    /// Returns the `Anchor` of this `DateTime`.
    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Returns whether the fields are UTC calendar fields.
    #[inline]
    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self.anchor, Anchor::Utc)
    }

    /// Returns a new `DateTime` with the fields set in `partial` replaced.
    ///
    /// `partial` is a [`PartialDateTime`] or a tuple of optional fields in
    /// constructor order, from the year through the millisecond. A `Some(0)`
    /// field is a real override.
    #[must_use]
    pub fn replace(&self, partial: impl Into<PartialDateTime>) -> Self {
        let partial = partial.into();
        let IsoDateTime { date, time } = self.iso;
        Self::new_unchecked(
            IsoDateTime::new_unchecked(
                IsoDate::new_unchecked(
                    partial.year.unwrap_or(date.year),
                    partial.month.unwrap_or(date.month),
                    partial.day.unwrap_or(date.day),
                ),
                IsoTime::new_unchecked(
                    partial.hour.unwrap_or(time.hour),
                    partial.minute.unwrap_or(time.minute),
                    partial.second.unwrap_or(time.second),
                    partial.millisecond.unwrap_or(time.millisecond),
                ),
            ),
            self.anchor,
        )
    }

    /// Returns the same fields with a different `Anchor`.
    #[inline]
    #[must_use]
    pub const fn with_anchor(&self, anchor: Anchor) -> Self {
        Self::new_unchecked(self.iso, anchor)
    }

    /// Returns the fields as a `PartialDateTime` with every field set.
    #[must_use]
    pub const fn to_partial(&self) -> PartialDateTime {
        PartialDateTime {
            year: Some(self.iso.date.year),
            month: Some(self.iso.date.month),
            day: Some(self.iso.date.day),
            hour: Some(self.iso.time.hour),
            minute: Some(self.iso.time.minute),
            second: Some(self.iso.time.second),
            millisecond: Some(self.iso.time.millisecond),
        }
    }

    /// Returns the time fields as a `Time`.
    #[inline]
    #[must_use]
    pub const fn time(&self) -> Time {
        Time::new_unchecked(self.iso.time)
    }

    /// Returns the date fields as a `Date`.
    #[inline]
    #[must_use]
    pub const fn date(&self) -> Date {
        Date::new_unchecked(self.iso.date)
    }

    /// Returns the weekday of the date fields, `0` being Monday.
    #[inline]
    #[must_use]
    pub fn weekday(&self) -> u8 {
        self.date().weekday()
    }

    /// Returns the ISO weekday of the date fields, `1` being Monday.
    #[inline]
    #[must_use]
    pub fn isoweekday(&self) -> u8 {
        self.date().isoweekday()
    }

    /// Returns the instant these fields describe.
    ///
    /// UTC anchored fields are read as UTC. Local fields are read through the
    /// host's time zone: a reading skipped by a forward transition uses the
    /// offset before the transition, and a repeated reading resolves to the
    /// earlier instant.
    pub fn to_instant_with_host(
        &self,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Instant> {
        match self.anchor {
            Anchor::Local => Instant::from_local_fields(&self.iso, host),
            Anchor::Utc => Instant::from_utc_fields(&self.iso),
        }
    }

    /// Returns the epoch milliseconds of the instant these fields describe.
    pub fn epoch_milliseconds_with_host(
        &self,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<i64> {
        self.to_instant_with_host(host)
            .map(|instant| instant.epoch_milliseconds())
    }

    /// Returns the balanced fields of this value's instant, decomposed
    /// through the accessors of its anchor.
    pub fn normalized_with_host(&self, host: &(impl HostTimeZone + ?Sized)) -> DateTimeResult<Self> {
        self.rendered_fields_with_host(host)
            .map(|iso| Self::new_unchecked(iso, self.anchor))
    }

    /// Adds a `TimeDelta` to this value's instant, and decomposes the result
    /// through the accessors of this value's anchor.
    pub fn plus_with_host(
        &self,
        delta: &TimeDelta,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        let magnitude = self.plus_magnitude_with_host(delta, host)?;
        Self::from_instant_with_anchor(Instant::try_new(magnitude)?, self.anchor, host)
    }

    /// Subtracts a `TimeDelta` from this value's instant, and decomposes the
    /// result through the accessors of this value's anchor.
    pub fn minus_with_host(
        &self,
        delta: &TimeDelta,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        self.plus_with_host(&delta.negated(), host)
    }

    /// Returns the `TimeDelta` between the magnitude of `other` and this
    /// value's instant.
    pub fn since_with_host(
        &self,
        other: &impl Magnitude,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<TimeDelta> {
        let lhs = self.epoch_milliseconds_with_host(host)?;
        let rhs = other.magnitude_with_host(host)?;
        lhs.checked_sub(rhs)
            .map(TimeDelta::from_milliseconds)
            .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::ArithmeticOutOfRange))
    }

    /// Compares the instants two values describe.
    pub fn cmp_with_host(
        &self,
        other: &Self,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Ordering> {
        Ok(self
            .to_instant_with_host(host)?
            .compare_instant(&other.to_instant_with_host(host)?))
    }

    /// Returns whether two values describe the same instant.
    pub fn eq_with_host(
        &self,
        other: &Self,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<bool> {
        self.cmp_with_host(other, host)
            .map(|ordering| ordering == Ordering::Equal)
    }

    /// Returns the `YYYY-MM-DD HH:MM:SS.ffffff` text form of this value's
    /// instant.
    ///
    /// Local values are rendered in the host's time zone and UTC anchored
    /// values are rendered in UTC.
    pub fn str_with_host(&self, host: &(impl HostTimeZone + ?Sized)) -> DateTimeResult<String> {
        self.strftime_with_host(DATETIME_PATTERN, host)
    }

    /// Formats this value's instant with a strftime-style pattern.
    ///
    /// Local values are rendered in the host's time zone and UTC anchored
    /// values are rendered in UTC.
    pub fn strftime_with_host(
        &self,
        pattern: &str,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<String> {
        self.rendered_fields_with_host(host)
            .map(|fields| format_fields(&fields, pattern))
    }
}

impl Magnitude for DateTime {
    fn magnitude_with_host(&self, host: &(impl HostTimeZone + ?Sized)) -> DateTimeResult<i64> {
        self.epoch_milliseconds_with_host(host)
    }
}

impl From<Date> for DateTime {
    fn from(value: Date) -> Self {
        Self::new_unchecked(
            IsoDateTime::new_unchecked(value.iso, IsoTime::default()),
            Anchor::Local,
        )
    }
}

/// Writes the balanced stored fields as `YYYY-MM-DD HH:MM:SS.ffffff`,
/// without resolving a time zone.
///
/// Fields whose balanced year does not fit in an `i32` are written as stored.
impl Writeable for DateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let pattern = StrftimePattern::parse(DATETIME_PATTERN);
        FormattableDateTime::new(self.display_fields(), &pattern).write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let pattern = StrftimePattern::parse(DATETIME_PATTERN);
        FormattableDateTime::new(self.display_fields(), &pattern).writeable_length_hint()
    }
}

impl_display_with_writeable!(DateTime);
