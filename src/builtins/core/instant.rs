//! An implementation of the platform instant.

use core::cmp::Ordering;

use num_traits::ToPrimitive;

use crate::{
    error::ErrorMessage,
    host::HostTimeZone,
    iso::IsoDateTime,
    magnitude::Magnitude,
    DateTimeError, DateTimeResult, MS_MAX_INSTANT, MS_MIN_INSTANT, MS_PER_DAY,
};

/// An exact point in time, stored as milliseconds since the Unix epoch.
///
/// The representable range is ±8.64e15 milliseconds around the epoch.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl TryFrom<i64> for Instant {
    type Error = DateTimeError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Instant> for i64 {
    fn from(value: Instant) -> Self {
        value.0
    }
}

// ==== Private API ====

/// Reads the host's offset at `epoch_milliseconds`, which must be less than a
/// day in magnitude.
fn host_offset(host: &(impl HostTimeZone + ?Sized), epoch_milliseconds: i64) -> DateTimeResult<i64> {
    let offset = host.get_host_utc_offset(epoch_milliseconds)?;
    crate::datetime_assert!(
        offset.abs() < MS_PER_DAY,
        "host offset {offset} at {epoch_milliseconds} exceeds a day"
    );
    Ok(offset)
}

impl Instant {
    /// Creates an `Instant` from an unchecked `i128`, validating the range.
    pub(crate) fn try_from_i128(epoch_milliseconds: i128) -> DateTimeResult<Self> {
        let value = epoch_milliseconds
            .to_i64()
            .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::InstantOutOfRange))?;
        Self::try_new(value)
    }

    /// Decomposes this instant into UTC calendar fields.
    pub(crate) fn to_utc_fields(self) -> IsoDateTime {
        IsoDateTime::from_epoch_milliseconds(self.0)
    }

    /// Decomposes this instant into local calendar fields using the host's
    /// time zone.
    pub(crate) fn to_local_fields(
        self,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<IsoDateTime> {
        let offset = host_offset(host, self.0)?;
        Ok(IsoDateTime::from_epoch_milliseconds(self.0 + offset))
    }

    /// Interprets the fields as UTC calendar fields.
    pub(crate) fn from_utc_fields(iso: &IsoDateTime) -> DateTimeResult<Self> {
        Self::try_from_i128(iso.to_epoch_milliseconds_unchecked())
            .map_err(|_| DateTimeError::range().with_enum(ErrorMessage::DateTimeOutOfRange))
    }

    /// Interprets the fields as a local wall-clock reading in the host's time
    /// zone.
    ///
    /// A wall-clock reading that is skipped by a forward transition resolves
    /// with the offset in effect before the transition. A reading that occurs
    /// twice resolves to the earlier instant.
    pub(crate) fn from_local_fields(
        iso: &IsoDateTime,
        host: &(impl HostTimeZone + ?Sized),
    ) -> DateTimeResult<Self> {
        let local = iso
            .to_epoch_milliseconds_unchecked()
            .to_i64()
            .filter(|ms| (MS_MIN_INSTANT - MS_PER_DAY..=MS_MAX_INSTANT + MS_PER_DAY).contains(ms))
            .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::DateTimeOutOfRange))?;

        let offset_before = host_offset(host, local - MS_PER_DAY)?;
        let offset_after = host_offset(host, local + MS_PER_DAY)?;
        let candidate_before = local - offset_before;
        let candidate_after = local - offset_after;

        let before_valid = host_offset(host, candidate_before)? == offset_before;
        let after_valid = host_offset(host, candidate_after)? == offset_after;

        let epoch_ms = match (before_valid, after_valid) {
            (true, true) => {
                #[cfg(feature = "log")]
                if candidate_before != candidate_after {
                    log::debug!("local time {local} is ambiguous, using the earlier instant");
                }
                candidate_before.min(candidate_after)
            }
            (true, false) => candidate_before,
            (false, true) => candidate_after,
            (false, false) => {
                #[cfg(feature = "log")]
                log::debug!("local time {local} was skipped, using the offset before the transition");
                candidate_before
            }
        };

        Self::try_new(epoch_ms)
            .map_err(|_| DateTimeError::range().with_enum(ErrorMessage::DateTimeOutOfRange))
    }
}

// ==== Public API ====

impl Instant {
    /// The Unix epoch.
    pub const UNIX_EPOCH: Self = Self(0);

    /// Creates a new `Instant` from epoch milliseconds.
    pub fn try_new(epoch_milliseconds: i64) -> DateTimeResult<Self> {
        if !(MS_MIN_INSTANT..=MS_MAX_INSTANT).contains(&epoch_milliseconds) {
            return Err(DateTimeError::range().with_enum(ErrorMessage::InstantOutOfRange));
        }
        Ok(Self(epoch_milliseconds))
    }

    /// Returns the epoch milliseconds value for this `Instant`.
    #[inline]
    #[must_use]
    pub const fn epoch_milliseconds(&self) -> i64 {
        self.0
    }

    /// Returns the epoch seconds value for this `Instant`, truncated toward
    /// negative infinity.
    #[inline]
    #[must_use]
    pub const fn epoch_seconds(&self) -> i64 {
        self.0.div_euclid(1000)
    }

    /// Adds a signed count of milliseconds to this `Instant`.
    pub fn checked_add_milliseconds(&self, milliseconds: i64) -> DateTimeResult<Self> {
        let result = self
            .0
            .checked_add(milliseconds)
            .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::ArithmeticOutOfRange))?;
        Self::try_new(result)
    }

    /// Compares this `Instant` with another.
    #[inline]
    #[must_use]
    pub fn compare_instant(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Magnitude for Instant {
    fn magnitude_with_host(&self, _: &(impl HostTimeZone + ?Sized)) -> DateTimeResult<i64> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Instant;
    use crate::{
        error::ErrorKind,
        host::{
            test_hosts::{CentralEuropeHost, FALL_BACK, SPRING_FORWARD},
            FixedHostSystem,
        },
        iso::{IsoDate, IsoDateTime, IsoTime},
        MS_MAX_INSTANT, MS_MIN_INSTANT, MS_PER_HOUR,
    };

    fn iso(y: i32, mo: i32, d: i32, h: i32, mi: i32) -> IsoDateTime {
        IsoDateTime::new_unchecked(
            IsoDate::new_unchecked(y, mo, d),
            IsoTime::new_unchecked(h, mi, 0, 0),
        )
    }

    #[test]
    fn instant_limits() {
        assert!(Instant::try_new(MS_MAX_INSTANT).is_ok());
        assert!(Instant::try_new(MS_MIN_INSTANT).is_ok());
        let err = Instant::try_new(MS_MAX_INSTANT + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(Instant::try_new(MS_MIN_INSTANT - 1).is_err());
        let max = Instant::try_new(MS_MAX_INSTANT).unwrap();
        assert!(max.checked_add_milliseconds(1).is_err());
        assert!(max.checked_add_milliseconds(i64::MAX).is_err());
    }

    #[test]
    fn epoch_seconds_floor() {
        assert_eq!(Instant::try_new(-1).unwrap().epoch_seconds(), -1);
        assert_eq!(Instant::try_new(1_999).unwrap().epoch_seconds(), 1);
    }

    #[test]
    fn fixed_offset_local_round_trip() {
        let host = FixedHostSystem::new(0, -5 * MS_PER_HOUR);
        let fields = iso(2020, 3, 2, 5, 6);
        let instant = Instant::from_local_fields(&fields, &host).unwrap();
        assert_eq!(
            instant.epoch_milliseconds(),
            Instant::from_utc_fields(&fields).unwrap().epoch_milliseconds() + 5 * MS_PER_HOUR
        );
        assert_eq!(instant.to_local_fields(&host).unwrap(), fields);
    }

    #[test]
    fn skipped_local_time_uses_offset_before_transition() {
        let host = CentralEuropeHost { now: 0 };
        // 02:30 does not exist on 2020-03-29 in this zone.
        let instant = Instant::from_local_fields(&iso(2020, 3, 29, 2, 30), &host).unwrap();
        assert_eq!(
            instant.epoch_milliseconds(),
            SPRING_FORWARD + 30 * 60_000
        );
        assert_eq!(
            instant.to_local_fields(&host).unwrap(),
            iso(2020, 3, 29, 3, 30)
        );
    }

    #[test]
    fn repeated_local_time_uses_earlier_instant() {
        let host = CentralEuropeHost { now: 0 };
        // 02:30 happens twice on 2020-10-25 in this zone.
        let instant = Instant::from_local_fields(&iso(2020, 10, 25, 2, 30), &host).unwrap();
        assert_eq!(
            instant.epoch_milliseconds(),
            FALL_BACK - 30 * 60_000
        );
        assert_eq!(
            instant.to_local_fields(&host).unwrap(),
            iso(2020, 10, 25, 2, 30)
        );
    }

    #[test]
    fn host_offsets_beyond_a_day_are_rejected() {
        let host = FixedHostSystem::new(0, 25 * MS_PER_HOUR);
        let err = Instant::try_new(0).unwrap().to_local_fields(&host).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Assert);
        assert!(Instant::from_local_fields(&iso(2020, 3, 2, 5, 6), &host).is_err());
    }

    #[test]
    fn out_of_range_fields() {
        let err = Instant::from_utc_fields(&iso(300_000, 1, 1, 0, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        let err = Instant::from_local_fields(&iso(i32::MAX, 1, 1, 0, 0), &()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }
}
