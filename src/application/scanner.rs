//! Bounded concurrent batch scan across events.
//!
//! Each event runs its own fetch-then-detect pipeline on a worker slot of a
//! [`Semaphore`]. Results are fanned in over an `mpsc` channel and ranked
//! once every event has reported or the scan deadline elapses, whichever
//! comes first. Slow or failing events only reduce the result set.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::{EventId, EventInfo, MarketEvaluation, MarketId, MarketType, ScanReport};
use crate::error::{Error, Result};
use crate::port::outbound::{cache_key, Clock, EventFilter, MarketOddsProvider, OpportunityCache};

use super::detection::{ArbitrageDetector, DetectionPolicy};
use super::ranker::{self, DEFAULT_LIMIT};
use super::tracker::OpportunityTracker;

/// Events considered per requested opportunity when no cap is configured.
const EVENTS_PER_RESULT: usize = 2;

/// Upper bound on events considered when no cap is configured.
const DEFAULT_EVENT_CAP: usize = 30;

/// Execution limits of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Concurrent event pipelines.
    pub workers: usize,
    /// Timeout of a single odds fetch.
    pub event_timeout: Duration,
    /// Overall scan budget.
    pub deadline: Duration,
    /// Cap on events listed per scan.
    pub max_events: Option<usize>,
    /// TTL of cache entries written by the scan.
    pub cache_ttl: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().max(1),
            event_timeout: Duration::from_millis(5_000),
            deadline: Duration::from_millis(40_000),
            max_events: None,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl ScanSettings {
    /// Number of events to list for a scan returning `limit` opportunities.
    #[must_use]
    pub fn events_for(&self, limit: usize) -> usize {
        self.max_events
            .unwrap_or_else(|| limit.saturating_mul(EVENTS_PER_RESULT).min(DEFAULT_EVENT_CAP))
    }
}

/// One batch scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Sport filter.
    pub sport: Option<String>,
    /// Maximum opportunities returned.
    pub limit: usize,
    /// Market type evaluated per event.
    pub market_type: MarketType,
    /// Detection parameters.
    pub policy: DetectionPolicy,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            sport: None,
            limit: DEFAULT_LIMIT,
            market_type: MarketType::default(),
            policy: DetectionPolicy::default(),
        }
    }
}

/// Fans detection out over upcoming events.
pub struct ArbitrageScanner {
    provider: Arc<dyn MarketOddsProvider>,
    clock: Arc<dyn Clock>,
    cache: Option<Arc<dyn OpportunityCache>>,
    tracker: Arc<OpportunityTracker>,
    settings: ScanSettings,
}

impl ArbitrageScanner {
    /// Create a scanner without a cache.
    pub fn new(
        provider: Arc<dyn MarketOddsProvider>,
        clock: Arc<dyn Clock>,
        tracker: Arc<OpportunityTracker>,
        settings: ScanSettings,
    ) -> Self {
        Self {
            provider,
            clock,
            cache: None,
            tracker,
            settings,
        }
    }

    /// Attach an opportunity cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn OpportunityCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Get the scan limits.
    #[must_use]
    pub const fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Get the odds provider.
    #[must_use]
    pub fn provider(&self) -> &dyn MarketOddsProvider {
        self.provider.as_ref()
    }

    /// Scan upcoming events and return the ranked report.
    ///
    /// Never fails: a listing failure yields an empty report and per-event
    /// failures are counted in it.
    pub async fn scan(&self, request: &ScanRequest) -> ScanReport {
        let now = self.clock.now();
        let filter = EventFilter {
            sport: request.sport.clone(),
            starts_after: Some(now),
            limit: Some(self.settings.events_for(request.limit)),
        };

        let events = match self.provider.list_events(&filter).await {
            Ok(events) => events,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Event listing failed");
                return ScanReport::default();
            }
        };

        let (upcoming, started): (Vec<EventInfo>, Vec<EventInfo>) =
            events.into_iter().partition(|event| !event.has_started(now));
        if !started.is_empty() {
            debug!(count = started.len(), "Skipping events that already started");
        }

        let (results, deadline_hit) = self.fan_out(upcoming, request).await;

        for evaluation in results.iter().filter_map(|(_, result)| result.as_ref().ok()) {
            self.tracker.refresh(evaluation);
            self.write_cache(evaluation);
        }

        let mut report = ranker::aggregate(results, request.limit);
        report.deadline_hit = deadline_hit;

        info!(
            events_scanned = report.events_scanned,
            events_failed = report.events_failed,
            events_timed_out = report.events_timed_out,
            truncated_markets = report.truncated_markets,
            deadline_hit,
            count = report.opportunities.len(),
            "Scan complete"
        );
        report
    }

    /// Fetch and evaluate one event's market.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] when the fetch exceeds the per-event timeout, and
    /// any provider error as is.
    pub async fn evaluate_event(
        &self,
        event: &EventInfo,
        market_type: &MarketType,
        policy: &DetectionPolicy,
    ) -> Result<MarketEvaluation> {
        let detector = ArbitrageDetector::new(policy);
        let evaluation = evaluate(
            self.provider.as_ref(),
            self.clock.as_ref(),
            &detector,
            event,
            market_type,
            self.settings.event_timeout,
        )
        .await?;

        self.tracker.refresh(&evaluation);
        self.write_cache(&evaluation);
        Ok(evaluation)
    }

    async fn fan_out(
        &self,
        events: Vec<EventInfo>,
        request: &ScanRequest,
    ) -> (Vec<(EventId, Result<MarketEvaluation>)>, bool) {
        let total = events.len();
        let detector = Arc::new(ArbitrageDetector::new(&request.policy));
        let permits = Arc::new(Semaphore::new(self.settings.workers.max(1)));
        let (tx, mut rx) = mpsc::channel(total.max(1));
        let mut tasks = JoinSet::new();

        for event in events {
            let provider = Arc::clone(&self.provider);
            let clock = Arc::clone(&self.clock);
            let detector = Arc::clone(&detector);
            let permits = Arc::clone(&permits);
            let tx = tx.clone();
            let market_type = request.market_type.clone();
            let timeout = self.settings.event_timeout;

            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                let result = evaluate(
                    provider.as_ref(),
                    clock.as_ref(),
                    &detector,
                    &event,
                    &market_type,
                    timeout,
                )
                .await;
                let _ = tx.send((event.id, result)).await;
            });
        }
        drop(tx);

        let deadline = tokio::time::sleep(self.settings.deadline);
        tokio::pin!(deadline);

        let mut results = Vec::with_capacity(total);
        let mut deadline_hit = false;
        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(result) => results.push(result),
                    None => break,
                },
                () = &mut deadline => {
                    deadline_hit = true;
                    tasks.abort_all();
                    warn!(
                        received = results.len(),
                        pending = total - results.len(),
                        "Scan deadline reached, finalizing with partial results"
                    );
                    break;
                }
            }
        }

        (results, deadline_hit)
    }

    fn write_cache(&self, evaluation: &MarketEvaluation) {
        let Some(cache) = &self.cache else {
            return;
        };
        let cache = Arc::clone(cache);
        let key = cache_key(&evaluation.event_id, &evaluation.market_id);
        let opportunities = evaluation.opportunities.clone();
        let ttl = self.settings.cache_ttl;

        tokio::spawn(async move {
            if let Err(e) = cache.put(&key, opportunities, ttl).await {
                debug!(key = %key, error = %e, "Cache write failed");
            }
        });
    }
}

async fn evaluate(
    provider: &dyn MarketOddsProvider,
    clock: &dyn Clock,
    detector: &ArbitrageDetector,
    event: &EventInfo,
    market_type: &MarketType,
    timeout: Duration,
) -> Result<MarketEvaluation> {
    let fetched = tokio::time::timeout(timeout, provider.fetch_snapshot(event, market_type))
        .await
        .map_err(|_| Error::Timeout {
            event_id: event.id.to_string(),
            after_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })??;

    match fetched {
        Some(snapshot) => Ok(detector.detect(&snapshot, clock.now())),
        None => {
            debug!(event_id = %event.id, market_type = %market_type, "Event has no such market");
            Ok(MarketEvaluation::empty(
                event.id.clone(),
                MarketId::new(market_type.key()),
            ))
        }
    }
}
