//! Construction argument shapes and their disambiguation.
//!
//! The value types accept several mutually exclusive argument shapes through
//! a single entry point (`TimeDelta::new`, `Time::new`, `DateTime::new_with_host`).
//! This module holds those shapes and the pure functions that decide how a
//! shape is interpreted, independent of the value types themselves.
//!
//! Two numeric heuristics are part of the construction contract:
//!
//! - A leading `TimeDelta` number whose absolute value is greater than
//!   [`DELTA_MAGNITUDE_THRESHOLD`] is a millisecond magnitude. Any number in
//!   `-900..=900` is a count of days.
//! - A positional `DateTime` with a year but neither month nor day reads the
//!   year as epoch milliseconds.

use num_traits::ToPrimitive;

use crate::{
    builtins::core::{Date, DateTime, Instant, PartialTime, PartialTimeDelta},
    iso::{IsoDate, IsoDateTime, IsoTime},
    Anchor, DateTimeError, DateTimeResult,
};

/// The largest absolute leading `TimeDelta` number that is read as a count of days.
pub const DELTA_MAGNITUDE_THRESHOLD: i64 = 900;

// ==== TimeDelta ====

/// The leading argument of [`TimeDelta::new`][crate::TimeDelta::new].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDeltaArg {
    /// A count of days or a millisecond magnitude.
    Number(i64),
    /// A component record.
    Fields(PartialTimeDelta),
}

impl From<i64> for TimeDeltaArg {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for TimeDeltaArg {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<PartialTimeDelta> for TimeDeltaArg {
    fn from(value: PartialTimeDelta) -> Self {
        Self::Fields(value)
    }
}

/// The interpretation of a leading `TimeDelta` number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaNumber {
    /// The number is a count of days.
    Days(i64),
    /// The number is a millisecond magnitude.
    Magnitude(i64),
}

/// Classifies a leading `TimeDelta` number against [`DELTA_MAGNITUDE_THRESHOLD`].
#[must_use]
pub const fn classify_delta_number(value: i64) -> DeltaNumber {
    if value.unsigned_abs() > DELTA_MAGNITUDE_THRESHOLD as u64 {
        DeltaNumber::Magnitude(value)
    } else {
        DeltaNumber::Days(value)
    }
}

/// The resolved source of a `TimeDelta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDeltaSource {
    /// A magnitude to decompose.
    Magnitude(i64),
    /// Literal fields, absent ones being zero.
    Fields(PartialTimeDelta),
}

/// Resolves a leading argument and the trailing positional values
/// `[seconds, milliseconds, minutes, hours, weeks]`.
///
/// Trailing values only apply when the leading argument is a day count.
#[must_use]
pub fn resolve_delta_arg(leading: TimeDeltaArg, trailing: [i64; 5]) -> TimeDeltaSource {
    match leading {
        TimeDeltaArg::Fields(fields) => TimeDeltaSource::Fields(fields),
        TimeDeltaArg::Number(value) => match classify_delta_number(value) {
            DeltaNumber::Magnitude(magnitude) => {
                #[cfg(feature = "log")]
                log::trace!("reading leading timedelta number {magnitude} as milliseconds");
                TimeDeltaSource::Magnitude(magnitude)
            }
            DeltaNumber::Days(days) => {
                let [seconds, milliseconds, minutes, hours, weeks] = trailing;
                TimeDeltaSource::Fields(PartialTimeDelta {
                    weeks: Some(weeks),
                    days: Some(days),
                    hours: Some(hours),
                    minutes: Some(minutes),
                    seconds: Some(seconds),
                    milliseconds: Some(milliseconds),
                })
            }
        },
    }
}

// ==== Time ====

/// The leading argument of [`Time::new`][crate::Time::new].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeArg {
    /// The hour, followed by positional fields.
    Number(i32),
    /// A component record.
    Fields(PartialTime),
}

impl From<i32> for TimeArg {
    fn from(value: i32) -> Self {
        Self::Number(value)
    }
}

impl From<PartialTime> for TimeArg {
    fn from(value: PartialTime) -> Self {
        Self::Fields(value)
    }
}

/// Resolves a leading `Time` argument and the trailing positional values
/// `[minute, second, millisecond]` into time fields.
#[must_use]
pub fn resolve_time_arg(leading: TimeArg, trailing: [i32; 3]) -> IsoTime {
    let fields = match leading {
        TimeArg::Fields(fields) => fields,
        TimeArg::Number(hour) => {
            let [minute, second, millisecond] = trailing;
            PartialTime::new()
                .with_hour(Some(hour))
                .with_minute(Some(minute))
                .with_second(Some(second))
                .with_millisecond(Some(millisecond))
        }
    };
    IsoTime::new_unchecked(
        fields.hour.unwrap_or_default(),
        fields.minute.unwrap_or_default(),
        fields.second.unwrap_or_default(),
        fields.millisecond.unwrap_or_default(),
    )
}

// ==== DateTime ====

/// Positional `DateTime` arguments.
///
/// `year` is wide enough to hold epoch milliseconds, since a year without a
/// month or day is read as one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PositionalDateTime {
    pub year: i64,
    pub month: Option<i32>,
    pub day: Option<i32>,
    pub hour: Option<i32>,
    pub minute: Option<i32>,
    pub second: Option<i32>,
    pub millisecond: Option<i32>,
}

/// The argument of [`DateTime::new_with_host`][crate::DateTime::new_with_host].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeArg {
    /// Positional numeric fields, or a lone epoch millisecond number.
    Positional(PositionalDateTime),
    /// A `DateTime` to copy.
    DateTime(DateTime),
    /// A `Date` to copy, at midnight.
    Date(Date),
    /// An instant to decompose into local fields.
    Instant(Instant),
}

impl From<i64> for DateTimeArg {
    fn from(value: i64) -> Self {
        Self::Positional(PositionalDateTime {
            year: value,
            ..Default::default()
        })
    }
}

impl From<PositionalDateTime> for DateTimeArg {
    fn from(value: PositionalDateTime) -> Self {
        Self::Positional(value)
    }
}

impl From<DateTime> for DateTimeArg {
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Date> for DateTimeArg {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<Instant> for DateTimeArg {
    fn from(value: Instant) -> Self {
        Self::Instant(value)
    }
}

macro_rules! impl_positional_tuple {
    ($(($($field:ident),+)),+ $(,)?) => {
        $(
            impl From<(i32, $(impl_positional_tuple!(@ty $field)),+)> for DateTimeArg {
                fn from((year, $($field),+): (i32, $(impl_positional_tuple!(@ty $field)),+)) -> Self {
                    Self::Positional(PositionalDateTime {
                        year: i64::from(year),
                        $($field: Some($field),)+
                        ..Default::default()
                    })
                }
            }
        )+
    };
    (@ty $field:ident) => { i32 };
}

impl_positional_tuple!(
    (month, day),
    (month, day, hour),
    (month, day, hour, minute),
    (month, day, hour, minute, second),
    (month, day, hour, minute, second, millisecond),
);

/// The resolved source of a `DateTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeSource {
    /// Fields copied or taken literally, with their anchor.
    Fields(IsoDateTime, Anchor),
    /// An instant to decompose into local fields.
    LocalInstant(Instant),
}

/// Classifies positional `DateTime` arguments.
///
/// Returns `Some(epoch_milliseconds)` when the year stands alone.
#[must_use]
pub const fn classify_datetime_positional(positional: &PositionalDateTime) -> Option<i64> {
    if positional.month.is_none() && positional.day.is_none() {
        Some(positional.year)
    } else {
        None
    }
}

/// Resolves a `DateTime` argument.
pub fn resolve_datetime_arg(arg: DateTimeArg) -> DateTimeResult<DateTimeSource> {
    match arg {
        DateTimeArg::Positional(positional) => {
            if let Some(epoch_milliseconds) = classify_datetime_positional(&positional) {
                #[cfg(feature = "log")]
                log::trace!("reading lone datetime year {epoch_milliseconds} as epoch milliseconds");
                return Instant::try_new(epoch_milliseconds).map(DateTimeSource::LocalInstant);
            }
            let year = positional.year.to_i32().ok_or_else(|| {
                DateTimeError::range().with_message("year is outside of the supported range.")
            })?;
            let date = IsoDate::new_unchecked(
                year,
                positional.month.unwrap_or(1),
                positional.day.unwrap_or(1),
            );
            let time = IsoTime::new_unchecked(
                positional.hour.unwrap_or_default(),
                positional.minute.unwrap_or_default(),
                positional.second.unwrap_or_default(),
                positional.millisecond.unwrap_or_default(),
            );
            Ok(DateTimeSource::Fields(
                IsoDateTime::new_unchecked(date, time),
                Anchor::Local,
            ))
        }
        DateTimeArg::DateTime(dt) => Ok(DateTimeSource::Fields(dt.iso, dt.anchor())),
        DateTimeArg::Date(date) => Ok(DateTimeSource::Fields(
            IsoDateTime::new_unchecked(date.iso, IsoTime::default()),
            Anchor::Local,
        )),
        DateTimeArg::Instant(instant) => Ok(DateTimeSource::LocalInstant(instant)),
    }
}

// ==== UTC decomposition ====

/// The argument of [`DateTime::utc_with_host`][crate::DateTime::utc_with_host].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtcSource {
    /// Epoch milliseconds, wrapped into an `Instant`.
    EpochMilliseconds(i64),
    /// An instant.
    Instant(Instant),
    /// A `DateTime`, resolved to its instant first.
    DateTime(DateTime),
}

impl From<i64> for UtcSource {
    fn from(value: i64) -> Self {
        Self::EpochMilliseconds(value)
    }
}

impl From<Instant> for UtcSource {
    fn from(value: Instant) -> Self {
        Self::Instant(value)
    }
}

impl From<DateTime> for UtcSource {
    fn from(value: DateTime) -> Self {
        Self::DateTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn delta_threshold_boundaries() {
        assert_eq!(classify_delta_number(900), DeltaNumber::Days(900));
        assert_eq!(classify_delta_number(-900), DeltaNumber::Days(-900));
        assert_eq!(classify_delta_number(0), DeltaNumber::Days(0));
        assert_eq!(classify_delta_number(901), DeltaNumber::Magnitude(901));
        assert_eq!(classify_delta_number(-901), DeltaNumber::Magnitude(-901));
        assert_eq!(
            classify_delta_number(i64::MIN),
            DeltaNumber::Magnitude(i64::MIN)
        );
    }

    #[test]
    fn delta_trailing_values() {
        let source = resolve_delta_arg(TimeDeltaArg::Number(1), [2, 3, 4, 5, 6]);
        let TimeDeltaSource::Fields(fields) = source else {
            panic!("expected fields, got {source:?}");
        };
        assert_eq!(fields.days, Some(1));
        assert_eq!(fields.seconds, Some(2));
        assert_eq!(fields.milliseconds, Some(3));
        assert_eq!(fields.minutes, Some(4));
        assert_eq!(fields.hours, Some(5));
        assert_eq!(fields.weeks, Some(6));

        // A magnitude ignores trailing values.
        assert_eq!(
            resolve_delta_arg(TimeDeltaArg::Number(1_000), [2, 3, 4, 5, 6]),
            TimeDeltaSource::Magnitude(1_000)
        );

        // So do fields.
        let partial = PartialTimeDelta::new().with_hours(Some(3));
        assert_eq!(
            resolve_delta_arg(partial.into(), [2, 3, 4, 5, 6]),
            TimeDeltaSource::Fields(partial)
        );
    }

    #[test]
    fn time_fields_and_positionals() {
        assert_eq!(
            resolve_time_arg(TimeArg::Number(5), [6, 7, 8]),
            IsoTime::new_unchecked(5, 6, 7, 8)
        );
        let partial = PartialTime::new().with_minute(Some(30));
        assert_eq!(
            resolve_time_arg(partial.into(), [6, 7, 8]),
            IsoTime::new_unchecked(0, 30, 0, 0)
        );
    }

    #[test]
    fn lone_year_is_epoch_milliseconds() {
        let arg = DateTimeArg::from(2020_i64);
        assert_eq!(
            resolve_datetime_arg(arg),
            Ok(DateTimeSource::LocalInstant(Instant::try_new(2020).unwrap()))
        );

        // A month alone is enough to read the year as a year.
        let positional = PositionalDateTime {
            year: 2020,
            month: Some(4),
            ..Default::default()
        };
        assert_eq!(classify_datetime_positional(&positional), None);
        let Ok(DateTimeSource::Fields(iso, anchor)) = resolve_datetime_arg(positional.into())
        else {
            panic!("expected fields");
        };
        assert_eq!(anchor, Anchor::Local);
        assert_eq!(iso.date, IsoDate::new_unchecked(2020, 4, 1));
        assert_eq!(iso.time, IsoTime::default());

        // As is a day alone.
        let positional = PositionalDateTime {
            year: 2020,
            day: Some(4),
            ..Default::default()
        };
        assert_eq!(classify_datetime_positional(&positional), None);
    }

    #[test]
    fn positional_tuples() {
        let Ok(DateTimeSource::Fields(iso, _)) =
            resolve_datetime_arg(DateTimeArg::from((2020, 3, 2, 5, 6, 7, 8)))
        else {
            panic!("expected fields");
        };
        assert_eq!(iso.date, IsoDate::new_unchecked(2020, 3, 2));
        assert_eq!(iso.time, IsoTime::new_unchecked(5, 6, 7, 8));

        let Ok(DateTimeSource::Fields(iso, _)) =
            resolve_datetime_arg(DateTimeArg::from((2020, 3, 2)))
        else {
            panic!("expected fields");
        };
        assert_eq!(iso.time, IsoTime::default());
    }

    #[test]
    fn copy_sources() {
        let date = Date::new(2020, 3, 2);
        assert_eq!(
            resolve_datetime_arg(date.into()),
            Ok(DateTimeSource::Fields(
                IsoDateTime::new_unchecked(date.iso, IsoTime::default()),
                Anchor::Local
            ))
        );

        let utc = DateTime::from_components_utc(2020, 3, 2, 5, 6, 7, 8);
        assert_eq!(
            resolve_datetime_arg(utc.into()),
            Ok(DateTimeSource::Fields(utc.iso, Anchor::Utc))
        );
    }

    #[test]
    fn out_of_range_positional_year() {
        let positional = PositionalDateTime {
            year: i64::from(i32::MAX) + 1,
            month: Some(1),
            day: Some(1),
            ..Default::default()
        };
        let err = resolve_datetime_arg(positional.into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = resolve_datetime_arg(DateTimeArg::from(i64::MAX)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }
}
