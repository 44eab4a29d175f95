//! Opportunity cache configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::adapter::outbound::memory::DEFAULT_MAX_ENTRIES;

/// `[cache]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Write scan results to the in-memory cache.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Lifetime of an entry in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Entries kept before the oldest are evicted.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

const fn default_enabled() -> bool {
    true
}

const fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

const fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
