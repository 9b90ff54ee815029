//! Host implementations backed by the running system.
//!
//! Enable with the `sys` feature flag.

use alloc::string::String;

use chrono::{Offset, TimeZone};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::builtins::core::Now;
use crate::error::ErrorMessage;
use crate::host::{HostClock, HostHooks, HostTimeZone};
use crate::{DateTimeError, DateTimeResult};

impl Now<LocalHostSystem> {
    /// Get a `Now` object with a [`LocalHostSystem`], which reads the system
    /// clock and the system's local time zone.
    #[must_use]
    pub fn local() -> Self {
        Now::new(LocalHostSystem)
    }
}

impl Now<UtcHostSystem> {
    /// Get a `Now` object with a [`UtcHostSystem`], which reads the system
    /// clock and treats local time as UTC.
    #[must_use]
    pub fn utc() -> Self {
        Now::new(UtcHostSystem)
    }
}

/// A local host system implementation that reads the system clock and the
/// system's local time zone.
///
/// This implementation is backed by [`std::time::SystemTime`] and [`chrono::Local`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocalHostSystem;

impl HostHooks for LocalHostSystem {}

impl HostClock for LocalHostSystem {
    fn get_host_epoch_milliseconds(&self) -> DateTimeResult<i64> {
        get_system_milliseconds()
    }
}

impl HostTimeZone for LocalHostSystem {
    fn get_host_utc_offset(&self, epoch_milliseconds: i64) -> DateTimeResult<i64> {
        get_system_utc_offset(epoch_milliseconds)
    }
}

/// A UTC host system implementation that reads the system clock and uses
/// UTC as its local time zone.
///
/// This implementation is backed by [`std::time::SystemTime`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UtcHostSystem;

impl HostHooks for UtcHostSystem {}

impl HostClock for UtcHostSystem {
    fn get_host_epoch_milliseconds(&self) -> DateTimeResult<i64> {
        get_system_milliseconds()
    }
}

impl HostTimeZone for UtcHostSystem {
    fn get_host_utc_offset(&self, _: i64) -> DateTimeResult<i64> {
        Ok(0)
    }
}

/// Returns the IANA identifier of the system time zone.
#[inline]
pub(crate) fn get_system_timezone() -> DateTimeResult<String> {
    iana_time_zone::get_timezone()
        .map_err(|_| DateTimeError::general(ErrorMessage::SystemTimeZoneUnavailable.to_str()))
}

/// Returns the system time in milliseconds.
pub(crate) fn get_system_milliseconds() -> DateTimeResult<i64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| DateTimeError::general(ErrorMessage::SystemTimeBeforeEpoch.to_str()))
        .map(|d| d.as_millis() as i64)
}

/// Returns the system's local offset from UTC in milliseconds at the provided
/// epoch milliseconds.
pub(crate) fn get_system_utc_offset(epoch_milliseconds: i64) -> DateTimeResult<i64> {
    let utc = chrono::DateTime::from_timestamp_millis(epoch_milliseconds)
        .ok_or_else(|| DateTimeError::range().with_enum(ErrorMessage::InstantOutOfRange))?;
    let offset = chrono::Local.offset_from_utc_datetime(&utc.naive_utc());
    Ok(i64::from(offset.fix().local_minus_utc()) * 1000)
}
