//! Time source for statistics.
//!
//! Statistics take "now" as an explicit argument; commands obtain it from a
//! [`Clock`] so tests and the `--now` flag can pin it.

use chrono::{DateTime, FixedOffset, Local, TimeZone};

/// Supplies the reference instant.
pub trait Clock {
    /// Timezone calendar days are computed in. Each instant is resolved with
    /// the offset in effect at that instant, not the offset of "now".
    type Tz: TimeZone;

    /// Current instant.
    fn now(&self) -> DateTime<Self::Tz>;
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at a given instant, in a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    type Tz = FixedOffset;

    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
