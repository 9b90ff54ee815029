//! This module implements the internal field records.
//!
//! The three record types are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! An `IsoDate` holds the year, 1-indexed month, and day fields.
//!
//! An `IsoTime` holds the hour, minute, second, and millisecond fields.
//!
//! An `IsoDateTime` has the fields of both an `IsoDate` and `IsoTime`.
//!
//! Records are never validated on construction. Out of range values are
//! balanced into neighboring fields whenever a record is reduced to epoch
//! milliseconds, and records built from epoch milliseconds are always
//! balanced.

use num_traits::ToPrimitive;

use crate::{utils, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};

/// `IsoDateTime` is the record of the `IsoDate` and `IsoTime` fields.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime` without any validation.
    #[inline]
    #[must_use]
    pub const fn new_unchecked(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Creates a balanced `IsoDateTime` from epoch milliseconds, reading the
    /// fields as UTC calendar fields.
    #[must_use]
    pub fn from_epoch_milliseconds(epoch_milliseconds: i64) -> Self {
        let days = utils::epoch_time_to_day_number(epoch_milliseconds);
        let time_in_day = utils::epoch_time_to_time_in_day(epoch_milliseconds);
        // An i64 millisecond count stays within roughly ±292 million years.
        let (year, month, day) = utils::ymd_from_epoch_days(days);
        Self::new_unchecked(
            IsoDate::new_unchecked(year as i32, i32::from(month), i32::from(day)),
            IsoTime::from_milliseconds_in_day(time_in_day),
        )
    }

    /// Returns the epoch milliseconds these fields describe when read as UTC
    /// calendar fields.
    ///
    /// The result is not range checked and uses `i128` so that arbitrary field
    /// values cannot overflow.
    #[must_use]
    pub fn to_epoch_milliseconds_unchecked(&self) -> i128 {
        i128::from(self.date.to_epoch_days()) * i128::from(MS_PER_DAY)
            + i128::from(self.time.to_milliseconds())
    }

    /// Returns a balanced copy of this record.
    ///
    /// Returns `None` if the balanced year does not fit in an `i32`.
    #[must_use]
    pub fn balance(&self) -> Option<Self> {
        let time = self.time.to_milliseconds();
        let days = self
            .date
            .to_epoch_days()
            .checked_add(time.div_euclid(MS_PER_DAY))?;
        Some(Self::new_unchecked(
            IsoDate::from_epoch_days(days)?,
            IsoTime::from_milliseconds_in_day(time.rem_euclid(MS_PER_DAY)),
        ))
    }
}

/// `IsoDate` serves as a record for the year, month, and day fields.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    #[inline]
    #[must_use]
    pub const fn new_unchecked(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// Creates a balanced `IsoDate` from a count of epoch days.
    ///
    /// Returns `None` if the year does not fit in an `i32`.
    #[must_use]
    pub fn from_epoch_days(epoch_days: i64) -> Option<Self> {
        let (year, month, day) = utils::ymd_from_epoch_days(epoch_days);
        Some(Self::new_unchecked(
            year.to_i32()?,
            i32::from(month),
            i32::from(day),
        ))
    }

    /// Returns the count of epoch days for this date, balancing any out of
    /// range month or day.
    #[inline]
    #[must_use]
    pub fn to_epoch_days(&self) -> i64 {
        utils::epoch_days_from_gregorian_date(self.year, self.month, self.day)
    }

    /// Returns the balanced copy of this date.
    ///
    /// Returns `None` if the balanced year does not fit in an `i32`.
    #[must_use]
    pub fn balance(&self) -> Option<Self> {
        Self::from_epoch_days(self.to_epoch_days())
    }

    /// Returns the weekday with 0 as Sunday and 6 as Saturday.
    #[inline]
    #[must_use]
    pub fn native_weekday(&self) -> u8 {
        utils::native_weekday_from_epoch_days(self.to_epoch_days())
    }

    /// Returns the ordinal day of the year of the balanced date.
    #[must_use]
    pub(crate) fn day_of_year(&self) -> u16 {
        let (year, month, day) = utils::ymd_from_epoch_days(self.to_epoch_days());
        utils::day_of_year(year, month, day)
    }
}

/// An `IsoTime` record that contains the hour, minute, second, and
/// millisecond fields.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoTime {
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub millisecond: i32,
}

impl IsoTime {
    /// Creates a new `IsoTime` without any validation.
    #[inline]
    #[must_use]
    pub const fn new_unchecked(hour: i32, minute: i32, second: i32, millisecond: i32) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// Creates a balanced `IsoTime` from milliseconds since midnight.
    ///
    /// The value is expected to be in `0..MS_PER_DAY`.
    #[must_use]
    pub fn from_milliseconds_in_day(ms: i64) -> Self {
        let hour = ms / MS_PER_HOUR;
        let minute = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
        let second = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
        let millisecond = ms % MS_PER_SECOND;
        Self::new_unchecked(
            hour as i32,
            minute as i32,
            second as i32,
            millisecond as i32,
        )
    }

    /// Returns the milliseconds since midnight these fields describe.
    ///
    /// Fields are summed without balancing, so the result may fall outside
    /// of a single day.
    #[inline]
    #[must_use]
    pub fn to_milliseconds(&self) -> i64 {
        i64::from(self.hour) * MS_PER_HOUR
            + i64::from(self.minute) * MS_PER_MINUTE
            + i64::from(self.second) * MS_PER_SECOND
            + i64::from(self.millisecond)
    }
}

#[cfg(test)]
mod tests {
    use super::{IsoDate, IsoDateTime, IsoTime};

    #[test]
    fn epoch_milliseconds_round_trip() {
        let iso = IsoDateTime::new_unchecked(
            IsoDate::new_unchecked(2020, 3, 2),
            IsoTime::new_unchecked(5, 6, 7, 8),
        );
        let ms = iso.to_epoch_milliseconds_unchecked();
        assert_eq!(ms, 1_583_125_567_008);
        assert_eq!(IsoDateTime::from_epoch_milliseconds(ms as i64), iso);
    }

    #[test]
    fn negative_epoch_milliseconds() {
        let iso = IsoDateTime::from_epoch_milliseconds(-1);
        assert_eq!(iso.date, IsoDate::new_unchecked(1969, 12, 31));
        assert_eq!(iso.time, IsoTime::new_unchecked(23, 59, 59, 999));
    }

    #[test]
    fn balance_carries_every_field() {
        let iso = IsoDateTime::new_unchecked(
            IsoDate::new_unchecked(2020, 12, 31),
            IsoTime::new_unchecked(25, 61, 0, 1_000),
        );
        let balanced = iso.balance().unwrap();
        assert_eq!(balanced.date, IsoDate::new_unchecked(2021, 1, 1));
        assert_eq!(balanced.time, IsoTime::new_unchecked(2, 1, 1, 0));
    }

    #[test]
    fn balancing_keeps_wide_years() {
        // The instant of these fields overflows i64 milliseconds, the
        // calendar date does not.
        let iso = IsoDateTime::new_unchecked(
            IsoDate::new_unchecked(2_000_000_000, 1, 1),
            IsoTime::new_unchecked(0, 0, 0, -1),
        );
        let balanced = iso.balance().unwrap();
        assert_eq!(balanced.date, IsoDate::new_unchecked(1_999_999_999, 12, 31));
        assert_eq!(balanced.time, IsoTime::new_unchecked(23, 59, 59, 999));
    }

    #[test]
    fn balancing_past_i32_years_fails() {
        assert_eq!(IsoDate::new_unchecked(i32::MAX, 13, 1).balance(), None);
        assert_eq!(
            IsoDate::new_unchecked(i32::MAX, 12, 31).balance(),
            Some(IsoDate::new_unchecked(i32::MAX, 12, 31))
        );
        assert_eq!(IsoDate::new_unchecked(i32::MIN, 0, 1).balance(), None);
        let iso = IsoDateTime::new_unchecked(
            IsoDate::new_unchecked(i32::MAX, 12, 31),
            IsoTime::new_unchecked(24, 0, 0, 0),
        );
        assert_eq!(iso.balance(), None);
        assert_eq!(IsoDate::new_unchecked(i32::MAX, 13, 1).day_of_year(), 1);
    }

    #[test]
    fn day_of_year_balances_first() {
        assert_eq!(IsoDate::new_unchecked(2020, 1, 32).day_of_year(), 32);
        assert_eq!(IsoDate::new_unchecked(2019, 13, 1).day_of_year(), 1);
    }
}
