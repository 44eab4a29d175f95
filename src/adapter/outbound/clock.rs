//! Wall-clock time source.

use chrono::{DateTime, Utc};

use crate::port::outbound::Clock;

/// [`Clock`] reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
