//! The single source of "now" for payload timestamps.
//!
//! Timestamp reads are the only non-deterministic input to staging. Everything
//! that needs the current time takes a [`Clock`] so tests can pin it with
//! [`FixedClock`].

use chrono::{DateTime, Utc};

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Today's UTC date at midnight, ISO-8601 with millisecond precision.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sfguide_core::clock::{midnight_timestamp, FixedClock};
///
/// let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 12).unwrap());
/// assert_eq!(midnight_timestamp(&clock), "2024-03-09T00:00:00.000Z");
/// ```
pub fn midnight_timestamp(clock: &dyn Clock) -> String {
    format!("{}T00:00:00.000Z", clock.now().format("%Y-%m-%d"))
}
