//! Batch scan configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::ranker::DEFAULT_LIMIT;
use crate::application::ScanSettings;
use crate::domain::MarketType;

/// `[scan]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Concurrent event pipelines (default: number of CPUs).
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Timeout of one event's odds fetch in milliseconds.
    #[serde(default = "default_event_timeout_ms")]
    pub event_timeout_ms: u64,
    /// Overall scan budget in milliseconds.
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
    /// Opportunities returned when the caller sets no limit.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Cap on events listed per scan (default: `min(limit * 2, 30)`).
    #[serde(default)]
    pub max_events: Option<usize>,
    /// Market type evaluated when the caller names none.
    #[serde(default)]
    pub market_type: MarketType,
}

fn default_workers() -> usize {
    num_cpus::get().max(1)
}

const fn default_event_timeout_ms() -> u64 {
    5_000
}

const fn default_deadline_ms() -> u64 {
    40_000
}

const fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            event_timeout_ms: default_event_timeout_ms(),
            deadline_ms: default_deadline_ms(),
            default_limit: default_limit(),
            max_events: None,
            market_type: MarketType::default(),
        }
    }
}

impl ScanConfig {
    /// Scanner limits, with cache entries living for `cache_ttl`.
    #[must_use]
    pub fn settings(&self, cache_ttl: Duration) -> ScanSettings {
        ScanSettings {
            workers: self.workers,
            event_timeout: Duration::from_millis(self.event_timeout_ms),
            deadline: Duration::from_millis(self.deadline_ms),
            max_events: self.max_events,
            cache_ttl,
        }
    }
}
