//! Scripted [`MarketOddsProvider`] for scanner and service tests.
//!
//! Events are registered with a snapshot, a failure, or nothing (no market).
//! Each fetch may be delayed to exercise timeouts and the scan deadline, and
//! the provider records how many fetches overlapped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{EventId, EventInfo, MarketSnapshot, MarketType};
use crate::error::{Error, Result};
use crate::port::outbound::{EventFilter, MarketOddsProvider};

enum Script {
    Snapshot(MarketSnapshot),
    Fail(String),
    NoMarket,
}

struct Entry {
    event: EventInfo,
    script: Script,
    delay: Duration,
}

/// Odds provider serving pre-built snapshots.
#[derive(Default)]
pub struct ScriptedProvider {
    entries: Vec<Entry>,
    listing_failure: Option<String>,
    fetches: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `snapshot` for its event.
    pub fn with_snapshot(mut self, snapshot: MarketSnapshot) -> Self {
        self.entries.push(Entry {
            event: snapshot.event().clone(),
            script: Script::Snapshot(snapshot),
            delay: Duration::ZERO,
        });
        self
    }

    /// Serve `snapshot` after sleeping for `delay`.
    pub fn with_delayed_snapshot(mut self, snapshot: MarketSnapshot, delay: Duration) -> Self {
        self.entries.push(Entry {
            event: snapshot.event().clone(),
            script: Script::Snapshot(snapshot),
            delay,
        });
        self
    }

    /// List `event` but fail every fetch of it.
    pub fn with_failure(mut self, event: EventInfo, reason: &str) -> Self {
        self.entries.push(Entry {
            event,
            script: Script::Fail(reason.to_string()),
            delay: Duration::ZERO,
        });
        self
    }

    /// List `event` without any market.
    pub fn with_event(mut self, event: EventInfo) -> Self {
        self.entries.push(Entry {
            event,
            script: Script::NoMarket,
            delay: Duration::ZERO,
        });
        self
    }

    /// Fail the event listing itself.
    pub fn with_listing_failure(mut self, reason: &str) -> Self {
        self.listing_failure = Some(reason.to_string());
        self
    }

    /// Number of snapshot fetches started.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Highest number of fetches that ran at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn entry(&self, id: &EventId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.event.id == *id)
    }
}

struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MarketOddsProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<EventInfo>> {
        if let Some(reason) = &self.listing_failure {
            return Err(Error::upstream("*", reason.as_str()));
        }
        let mut events: Vec<EventInfo> = self
            .entries
            .iter()
            .map(|entry| entry.event.clone())
            .filter(|event| filter.matches(event))
            .collect();
        events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id)));
        if let Some(limit) = filter.limit {
            events.truncate(limit);
        }
        Ok(events)
    }

    async fn find_event(&self, id: &EventId) -> Result<Option<EventInfo>> {
        Ok(self.entry(id).map(|entry| entry.event.clone()))
    }

    async fn fetch_snapshot(
        &self,
        event: &EventInfo,
        market_type: &MarketType,
    ) -> Result<Option<MarketSnapshot>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlight(Arc::clone(&self.in_flight));

        let Some(entry) = self.entry(&event.id) else {
            return Err(Error::upstream(event.id.as_str(), "unknown event"));
        };
        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }

        match &entry.script {
            Script::Snapshot(snapshot) if snapshot.market_type() == market_type => {
                Ok(Some(snapshot.clone()))
            }
            Script::Snapshot(_) | Script::NoMarket => Ok(None),
            Script::Fail(reason) => Err(Error::upstream(event.id.as_str(), reason.as_str())),
        }
    }
}
