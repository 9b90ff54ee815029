use alloc::string::String;

use crate::{sys::LocalHostSystem, DateTimeResult, TimeDelta};

impl TimeDelta {
    /// Returns the `HH:MM:SS.ffffff` text form of the magnitude read as an
    /// epoch offset in the system's local time zone.
    ///
    /// Enable with the `sys` feature flag.
    pub fn str(&self) -> DateTimeResult<String> {
        self.str_with_host(&LocalHostSystem)
    }

    /// Formats the magnitude, read as an epoch offset in the system's local
    /// time zone, with a strftime-style pattern.
    ///
    /// Enable with the `sys` feature flag.
    pub fn strftime(&self, pattern: &str) -> DateTimeResult<String> {
        self.strftime_with_host(pattern, &LocalHostSystem)
    }
}
