//! In-process opportunity cache.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::trace;

use crate::domain::ArbitrageOpportunity;
use crate::error::Result;
use crate::port::outbound::OpportunityCache;

/// Default bound on cached keys.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

#[derive(Debug, Clone)]
struct Entry {
    opportunities: Vec<ArbitrageOpportunity>,
    inserted: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now.duration_since(self.inserted) < self.ttl
    }
}

/// Concurrent TTL cache keyed by event market.
#[derive(Debug)]
pub struct MemoryOpportunityCache {
    entries: DashMap<String, Entry>,
    max_entries: usize,
}

impl Default for MemoryOpportunityCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl MemoryOpportunityCache {
    /// Create a cache holding at most `max_entries` keys.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Remove expired entries, then the oldest ones while over capacity.
    pub fn prune(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.is_live(now));

        if self.entries.len() > self.max_entries {
            let mut ages: Vec<(String, Instant)> = self
                .entries
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().inserted))
                .collect();
            ages.sort_by(|a, b| a.1.cmp(&b.1));

            let excess = ages.len().saturating_sub(self.max_entries);
            for (key, _) in ages.into_iter().take(excess) {
                self.entries.remove(&key);
            }
        }
    }

    /// Number of stored keys, including not yet pruned expired ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl OpportunityCache for MemoryOpportunityCache {
    async fn put(
        &self,
        key: &str,
        opportunities: Vec<ArbitrageOpportunity>,
        ttl: Duration,
    ) -> Result<()> {
        trace!(key, count = opportunities.len(), ttl_secs = ttl.as_secs(), "Cache put");
        self.entries.insert(
            key.to_string(),
            Entry {
                opportunities,
                inserted: Instant::now(),
                ttl,
            },
        );
        if self.entries.len() > self.max_entries {
            self.prune();
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<ArbitrageOpportunity>>> {
        let now = Instant::now();
        let hit = self
            .entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.opportunities.clone());
        Ok(hit)
    }
}
