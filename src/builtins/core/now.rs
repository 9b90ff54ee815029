//! The `Now` component

use crate::host::HostHooks;
use crate::DateTimeResult;

#[cfg(feature = "sys")]
use alloc::string::String;

use super::{Date, DateTime, Instant, Time};

/// A reader of the current time from a host.
///
/// ```rust
/// use datetime_rs::{FixedHostSystem, Now};
///
/// // 2020-03-02T05:06:07.008Z read from a UTC-05:00 zone.
/// let host = FixedHostSystem::new(1_583_125_567_008, -18_000_000);
/// let now = Now::new(host);
///
/// let today = now.date().unwrap();
/// assert_eq!((today.year(), today.month(), today.day()), (2020, 3, 2));
/// assert_eq!(now.time().unwrap().hour(), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Now<H: HostHooks> {
    host: H,
}

impl<H: HostHooks> Now<H> {
    /// Creates a `Now` reading from the provided host.
    pub const fn new(host: H) -> Self {
        Self { host }
    }

    /// Returns a reference to the host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Returns the current instant.
    pub fn instant(&self) -> DateTimeResult<Instant> {
        Instant::try_new(self.host.get_system_epoch_milliseconds()?)
    }

    /// Returns the current epoch milliseconds.
    pub fn epoch_milliseconds(&self) -> DateTimeResult<i64> {
        self.instant().map(|instant| instant.epoch_milliseconds())
    }

    /// Returns the current local `DateTime`.
    pub fn date_time(&self) -> DateTimeResult<DateTime> {
        DateTime::from_instant_with_host(self.instant()?, &self.host)
    }

    /// Returns the current UTC-anchored `DateTime`.
    pub fn utc_date_time(&self) -> DateTimeResult<DateTime> {
        Ok(DateTime::utc_from_instant(self.instant()?))
    }

    /// Returns the current local `Date`.
    pub fn date(&self) -> DateTimeResult<Date> {
        self.date_time().map(|dt| dt.date())
    }

    /// Returns the current local `Time`.
    pub fn time(&self) -> DateTimeResult<Time> {
        self.date_time().map(|dt| dt.time())
    }
}

#[cfg(feature = "sys")]
impl<H: HostHooks> Now<H> {
    /// Returns the IANA identifier of the system time zone.
    ///
    /// Enable with the `sys` feature flag.
    pub fn time_zone_identifier(&self) -> DateTimeResult<String> {
        crate::sys::get_system_timezone()
    }
}
