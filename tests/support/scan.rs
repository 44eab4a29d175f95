//! Scanner and service wiring over the testkit fakes.

use std::sync::Arc;
use std::time::Duration;

use surebet::application::{
    ArbitrageScanner, ArbitrageService, DeskDefaults, OpportunityTracker, ScanSettings,
    StakeAllocator,
};
use surebet::testkit::clock::FixedClock;
use surebet::testkit::domain::before_kickoff;
use surebet::testkit::provider::ScriptedProvider;

/// Settings with short timeouts suitable for tests.
pub fn settings() -> ScanSettings {
    ScanSettings {
        workers: 4,
        event_timeout: Duration::from_millis(500),
        deadline: Duration::from_secs(5),
        max_events: None,
        cache_ttl: Duration::from_secs(300),
    }
}

pub struct Harness {
    pub provider: Arc<ScriptedProvider>,
    pub clock: Arc<FixedClock>,
    pub tracker: Arc<OpportunityTracker>,
}

impl Harness {
    pub fn new(provider: ScriptedProvider) -> Self {
        Self {
            provider: Arc::new(provider),
            clock: Arc::new(FixedClock::new(before_kickoff())),
            tracker: Arc::new(OpportunityTracker::new()),
        }
    }

    pub fn scanner(&self, settings: ScanSettings) -> ArbitrageScanner {
        ArbitrageScanner::new(
            self.provider.clone(),
            self.clock.clone(),
            Arc::clone(&self.tracker),
            settings,
        )
    }

    pub fn service(&self) -> ArbitrageService {
        ArbitrageService::new(
            self.scanner(settings()),
            Arc::clone(&self.tracker),
            StakeAllocator::default(),
            self.clock.clone(),
            DeskDefaults::default(),
        )
    }
}
