use crate::{sys::LocalHostSystem, DateTimeResult, Instant, Now};

impl Instant {
    /// Returns the current instant from the system clock.
    ///
    /// Enable with the `sys` feature flag.
    pub fn now() -> DateTimeResult<Self> {
        Now::new(LocalHostSystem).instant()
    }
}
