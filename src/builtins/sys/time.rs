use alloc::string::String;

use crate::{sys::LocalHostSystem, DateTimeResult, Now, Time};

impl Time {
    /// Returns the current local time of day.
    ///
    /// Enable with the `sys` feature flag.
    pub fn now() -> DateTimeResult<Self> {
        Now::local().time()
    }

    /// Returns the `HH:MM:SS.ffffff` text form of these fields placed on the
    /// current local date.
    ///
    /// Enable with the `sys` feature flag.
    pub fn str(&self) -> DateTimeResult<String> {
        self.str_with_host(&LocalHostSystem)
    }

    /// Formats these fields placed on the current local date with a
    /// strftime-style pattern.
    ///
    /// Enable with the `sys` feature flag.
    pub fn strftime(&self, pattern: &str) -> DateTimeResult<String> {
        self.strftime_with_host(pattern, &LocalHostSystem)
    }
}
