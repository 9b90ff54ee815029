use crate::{
    magnitude::Magnitude, sys::LocalHostSystem, Date, DateTimeResult, Instant, TimeDelta,
};

impl Date {
    /// Returns the current local date.
    ///
    /// Enable with the `sys` feature flag.
    pub fn today() -> DateTimeResult<Self> {
        Self::today_with_host(&LocalHostSystem)
    }

    /// Returns the local date of `instant`.
    ///
    /// Enable with the `sys` feature flag.
    pub fn from_instant(instant: Instant) -> DateTimeResult<Self> {
        Self::from_instant_with_host(instant, &LocalHostSystem)
    }

    /// Returns the instant of local midnight on this date.
    ///
    /// Enable with the `sys` feature flag.
    pub fn local_midnight(&self) -> DateTimeResult<Instant> {
        self.local_midnight_with_host(&LocalHostSystem)
    }

    /// Returns the epoch milliseconds of local midnight on this date.
    ///
    /// Enable with the `sys` feature flag.
    pub fn epoch_milliseconds(&self) -> DateTimeResult<i64> {
        self.epoch_milliseconds_with_host(&LocalHostSystem)
    }

    /// Adds a `TimeDelta` to local midnight and returns the resulting date.
    ///
    /// Enable with the `sys` feature flag.
    pub fn plus(&self, delta: &TimeDelta) -> DateTimeResult<Self> {
        self.plus_with_host(delta, &LocalHostSystem)
    }

    /// Subtracts a `TimeDelta` from local midnight and returns the resulting
    /// date.
    ///
    /// Enable with the `sys` feature flag.
    pub fn minus(&self, delta: &TimeDelta) -> DateTimeResult<Self> {
        self.minus_with_host(delta, &LocalHostSystem)
    }

    /// Returns the `TimeDelta` from `other` to local midnight on this date.
    ///
    /// Enable with the `sys` feature flag.
    pub fn since(&self, other: &impl Magnitude) -> DateTimeResult<TimeDelta> {
        self.since_with_host(other, &LocalHostSystem)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::{Date, TimeDelta};

    #[test]
    fn arithmetic_in_the_system_zone() {
        let date = Date::new(2020, 3, 12);
        assert_eq!(
            date.minus(&TimeDelta::new(3, 0, 0, 0, 0, 0)),
            Ok(Date::new(2020, 3, 9))
        );
        assert_eq!(date.to_string(), "2020-03-12");
        assert!(Date::today().is_ok());
    }
}
