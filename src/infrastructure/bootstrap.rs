//! Infrastructure bootstrap helpers for runtime wiring.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapter::outbound::{JsonFeedProvider, MemoryOpportunityCache, SystemClock};
use crate::application::{ArbitrageScanner, ArbitrageService, OpportunityTracker};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::{Clock, MarketOddsProvider, OpportunityCache};

/// Build the in-memory opportunity cache, if enabled.
pub fn build_cache(config: &Config) -> Option<Arc<dyn OpportunityCache>> {
    if !config.cache.enabled {
        debug!("Opportunity cache disabled");
        return None;
    }
    let cache: Arc<dyn OpportunityCache> =
        Arc::new(MemoryOpportunityCache::new(config.cache.max_entries));
    Some(cache)
}

/// Wire the arbitrage service around an odds provider and a clock.
pub fn build_service(
    config: &Config,
    provider: Arc<dyn MarketOddsProvider>,
    clock: Arc<dyn Clock>,
) -> ArbitrageService {
    let tracker = Arc::new(OpportunityTracker::new());
    let mut scanner = ArbitrageScanner::new(
        Arc::clone(&provider),
        Arc::clone(&clock),
        Arc::clone(&tracker),
        config.scan_settings(),
    );
    if let Some(cache) = build_cache(config) {
        scanner = scanner.with_cache(cache);
    }

    info!(
        provider = provider.name(),
        workers = config.scan.workers,
        min_profit_margin = %config.detection.min_profit_margin,
        cache = config.cache.enabled,
        "Arbitrage service ready"
    );

    ArbitrageService::new(
        scanner,
        tracker,
        config.stake_allocator(),
        clock,
        config.desk_defaults(),
    )
}

/// Wire the service around a JSON odds feed on disk and the system clock.
///
/// # Errors
///
/// Returns an error if the feed cannot be read or parsed.
pub fn build_feed_service<P: AsRef<Path>>(config: &Config, feed: P) -> Result<ArbitrageService> {
    let provider: Arc<dyn MarketOddsProvider> = Arc::new(JsonFeedProvider::from_path(feed)?);
    Ok(build_service(config, provider, Arc::new(SystemClock)))
}
