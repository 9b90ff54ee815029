//! The `datetime_rs` crate provides Python-style `date`, `time`, `datetime`
//! and `timedelta` value types in Rust.
//!
//! ```rust
//! use datetime_rs::{DateTime, FixedHostSystem, TimeDelta};
//!
//! // A host that reads local time as UTC+01:00.
//! let host = FixedHostSystem::new(0, 3_600_000);
//!
//! let start = DateTime::from_components(2020, 3, 12, 10, 10, 10, 10);
//! let delta = TimeDelta::new(1, 2, 3, 4, 5, 0);
//! let result = start.minus_with_host(&delta, &host).unwrap();
//!
//! assert_eq!(result, DateTime::from_components(2020, 3, 11, 5, 6, 8, 7));
//! assert_eq!(result.str_with_host(&host).unwrap(), "2020-03-11 05:06:08.007000");
//! ```
//!
//! All four value types are immutable `Copy` snapshots of their fields. Each
//! type reduces to a magnitude (a count of milliseconds) through the
//! [`Magnitude`] trait, and arithmetic between values is performed on those
//! magnitudes before the result is decomposed back into fields.
//!
//! A [`DateTime`] is either naive local wall-clock time or anchored to UTC
//! (see [`Anchor`]). Local interpretation is delegated to a host time zone
//! (see [`host`]), so every operation that needs one has a `*_with_host`
//! form. With the `sys` feature, convenience methods use the system clock and
//! the system's local time zone.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_arguments,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,

    // Field values are deliberately unvalidated and only narrowed after balancing.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod construct;
pub mod error;
pub mod format;
pub mod host;
pub mod iso;
pub mod magnitude;
pub mod parsers;

#[cfg(feature = "sys")]
pub mod sys;

mod builtins;

#[doc(hidden)]
pub(crate) mod utils;

use core::cmp::Ordering;

#[doc(inline)]
pub use error::DateTimeError;

/// The `datetime_rs` result type
pub type DateTimeResult<T> = Result<T, DateTimeError>;

pub mod partial {
    //! Partial Date/Time component records.
    //!
    //! Partial records serve as component dictionaries for construction and
    //! as the overrides accepted by `replace`.
    pub use crate::builtins::core::{PartialDate, PartialDateTime, PartialTime, PartialTimeDelta};
}

pub use crate::builtins::core::{Anchor, Date, DateTime, Instant, Now, Time, TimeDelta};
pub use crate::construct::{DateTimeArg, TimeArg, TimeDeltaArg, UtcSource};
pub use crate::host::FixedHostSystem;
pub use crate::magnitude::{Magnitude, Unit};

#[cfg(feature = "sys")]
pub use crate::sys::{LocalHostSystem, UtcHostSystem};

#[doc(hidden)]
#[macro_export]
macro_rules! datetime_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::DateTimeError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::DateTimeError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i64> for Sign {
    fn from(value: i64) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

// Relevant numeric constants
/// Milliseconds per second constant: 1e+3
pub const MS_PER_SECOND: i64 = 1000;
/// Milliseconds per minute constant: 6e+4
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds per hour constant: 3.6e+6
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
/// Milliseconds per week constant: 6.048e+8
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;
/// Max `Instant` millisecond constant: 8.64e+15
pub const MS_MAX_INSTANT: i64 = MS_PER_DAY * 100_000_000;
/// Min `Instant` millisecond constant: -8.64e+15
pub const MS_MIN_INSTANT: i64 = -MS_MAX_INSTANT;
