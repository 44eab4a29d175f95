//! Opportunity cache port.
//!
//! The cache is an optional side channel: writes are best effort and
//! the engine behaves the same with no cache configured.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{ArbitrageOpportunity, EventId, MarketId};
use crate::error::Result;

/// Key prefix for cached opportunity lists.
pub const CACHE_KEY_PREFIX: &str = "arbitrage:opportunities";

/// Cache key for one event market.
#[must_use]
pub fn cache_key(event_id: &EventId, market_id: &MarketId) -> String {
    format!("{CACHE_KEY_PREFIX}:{event_id}:{market_id}")
}

/// Key-value store with TTL semantics.
#[async_trait]
pub trait OpportunityCache: Send + Sync {
    /// Store `opportunities` under `key` for `ttl`.
    async fn put(
        &self,
        key: &str,
        opportunities: Vec<ArbitrageOpportunity>,
        ttl: Duration,
    ) -> Result<()>;

    /// Read a live entry. Expired entries read as `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<ArbitrageOpportunity>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_includes_event_and_market() {
        let key = cache_key(&EventId::from("evt-1"), &MarketId::from("h2h"));
        assert_eq!(key, "arbitrage:opportunities:evt-1:h2h");
    }
}
