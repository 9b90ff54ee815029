//! Trait definitions for accessing values from the host environment.
//!
//! The host supplies the two ambient inputs of this crate: the current clock
//! reading and the local time zone's UTC offset. Any value that needs either
//! accepts a host explicitly, so tests and embedders can substitute a
//! deterministic implementation.

use crate::DateTimeResult;

/// The `HostClock` trait defines an accessor to the host's clock.
pub trait HostClock {
    /// Returns the current time as milliseconds since the Unix epoch.
    fn get_host_epoch_milliseconds(&self) -> DateTimeResult<i64>;
}

/// The `HostTimeZone` trait defines the host's local time zone.
pub trait HostTimeZone {
    /// Returns the local time zone's offset from UTC, in milliseconds, at the
    /// provided epoch milliseconds.
    ///
    /// Local wall-clock time is `epoch_milliseconds + offset`.
    fn get_host_utc_offset(&self, epoch_milliseconds: i64) -> DateTimeResult<i64>;
}

/// `HostHooks` marks whether a trait implements the required host hooks with some
/// system methods.
pub trait HostHooks: HostClock + HostTimeZone {
    fn get_system_epoch_milliseconds(&self) -> DateTimeResult<i64> {
        self.get_host_epoch_milliseconds()
    }

    fn get_system_utc_offset(&self, epoch_milliseconds: i64) -> DateTimeResult<i64> {
        self.get_host_utc_offset(epoch_milliseconds)
    }
}

// Implement empty hosts

impl HostClock for () {
    fn get_host_epoch_milliseconds(&self) -> DateTimeResult<i64> {
        Ok(0)
    }
}

impl HostTimeZone for () {
    fn get_host_utc_offset(&self, _: i64) -> DateTimeResult<i64> {
        Ok(0)
    }
}

impl HostHooks for () {}

/// A host with a frozen clock and a constant UTC offset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixedHostSystem {
    epoch_milliseconds: i64,
    utc_offset: i64,
}

impl FixedHostSystem {
    /// Creates a host whose clock always reads `epoch_milliseconds` and whose
    /// local time is `utc_offset` milliseconds ahead of UTC.
    #[inline]
    #[must_use]
    pub const fn new(epoch_milliseconds: i64, utc_offset: i64) -> Self {
        Self {
            epoch_milliseconds,
            utc_offset,
        }
    }

    /// Returns a copy of this host with a different clock reading.
    #[inline]
    #[must_use]
    pub const fn with_epoch_milliseconds(self, epoch_milliseconds: i64) -> Self {
        Self {
            epoch_milliseconds,
            ..self
        }
    }

    /// Returns the offset from UTC in milliseconds.
    #[inline]
    #[must_use]
    pub const fn utc_offset(&self) -> i64 {
        self.utc_offset
    }
}

impl HostClock for FixedHostSystem {
    fn get_host_epoch_milliseconds(&self) -> DateTimeResult<i64> {
        Ok(self.epoch_milliseconds)
    }
}

impl HostTimeZone for FixedHostSystem {
    fn get_host_utc_offset(&self, _: i64) -> DateTimeResult<i64> {
        Ok(self.utc_offset)
    }
}

impl HostHooks for FixedHostSystem {}

#[cfg(test)]
pub(crate) mod test_hosts {
    //! Hosts with daylight saving transitions for exercising local time
    //! resolution.

    use super::{HostClock, HostHooks, HostTimeZone};
    use crate::{DateTimeResult, MS_PER_HOUR};

    /// A zone shaped like Central European Time for 2020: UTC+1, moving to
    /// UTC+2 at 2020-03-29T01:00Z and back to UTC+1 at 2020-10-25T01:00Z.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct CentralEuropeHost {
        pub(crate) now: i64,
    }

    /// 2020-03-29T01:00:00Z
    pub(crate) const SPRING_FORWARD: i64 = 1_585_443_600_000;
    /// 2020-10-25T01:00:00Z
    pub(crate) const FALL_BACK: i64 = 1_603_587_600_000;

    impl HostClock for CentralEuropeHost {
        fn get_host_epoch_milliseconds(&self) -> DateTimeResult<i64> {
            Ok(self.now)
        }
    }

    impl HostTimeZone for CentralEuropeHost {
        fn get_host_utc_offset(&self, epoch_milliseconds: i64) -> DateTimeResult<i64> {
            if (SPRING_FORWARD..FALL_BACK).contains(&epoch_milliseconds) {
                Ok(2 * MS_PER_HOUR)
            } else {
                Ok(MS_PER_HOUR)
            }
        }
    }

    impl HostHooks for CentralEuropeHost {}
}

#[cfg(test)]
mod tests {
    use super::{FixedHostSystem, HostClock, HostHooks, HostTimeZone};

    #[test]
    fn empty_host_is_utc_at_epoch() {
        assert_eq!(().get_system_epoch_milliseconds(), Ok(0));
        assert_eq!(().get_system_utc_offset(1_000), Ok(0));
    }

    #[test]
    fn fixed_host() {
        let host = FixedHostSystem::new(42, -18_000_000);
        assert_eq!(host.get_host_epoch_milliseconds(), Ok(42));
        assert_eq!(host.get_host_utc_offset(0), Ok(-18_000_000));
        let later = host.with_epoch_milliseconds(84);
        assert_eq!(later.get_host_epoch_milliseconds(), Ok(84));
        assert_eq!(later.utc_offset(), -18_000_000);
    }
}
