//! Manually driven [`Clock`].

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::port::outbound::Clock;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::before_kickoff;

    #[test]
    fn moves_only_when_told() {
        let clock = FixedClock::new(before_kickoff());
        assert_eq!(clock.now(), before_kickoff());

        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), before_kickoff() + Duration::minutes(5));

        clock.set(before_kickoff());
        assert_eq!(clock.now(), before_kickoff());
    }
}
