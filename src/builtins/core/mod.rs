//! The core implementations of the `datetime_rs` value types.
//!
//! Every operation that resolves local time takes a host explicitly.

mod date;
mod datetime;
mod instant;
mod now;
mod time;
mod timedelta;

#[doc(inline)]
pub use date::{Date, PartialDate};
#[doc(inline)]
pub use datetime::{Anchor, DateTime, PartialDateTime};
#[doc(inline)]
pub use instant::Instant;
#[doc(inline)]
pub use now::Now;
#[doc(inline)]
pub use time::{PartialTime, Time};
#[doc(inline)]
pub use timedelta::{PartialTimeDelta, TimeDelta};
