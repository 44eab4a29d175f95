//! Odds provider port.
//!
//! The provider is the only I/O-bound collaborator of the detection engine.
//! It lists upcoming events and supplies one [`MarketSnapshot`] per event
//! market per scan.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{EventId, EventInfo, MarketSnapshot, MarketType};
use crate::error::Result;

/// Which events to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Only events of this sport (case-insensitive).
    pub sport: Option<String>,
    /// Only events starting after this instant.
    pub starts_after: Option<DateTime<Utc>>,
    /// Maximum number of events to return, applied after the other filters.
    pub limit: Option<usize>,
}

impl EventFilter {
    /// True when `event` passes the sport and start-time filters.
    #[must_use]
    pub fn matches(&self, event: &EventInfo) -> bool {
        let sport_ok = self.sport.as_deref().map_or(true, |sport| event.is_sport(sport));
        let upcoming = self.starts_after.map_or(true, |now| !event.has_started(now));
        sport_ok && upcoming
    }
}

/// Source of quoted odds.
#[async_trait]
pub trait MarketOddsProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// List upcoming events ordered by start time.
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<EventInfo>>;

    /// Look up a single event.
    async fn find_event(&self, event_id: &EventId) -> Result<Option<EventInfo>>;

    /// Snapshot of every quote for `event`'s market of `market_type`.
    ///
    /// Returns `Ok(None)` when the event has no such market.
    async fn fetch_snapshot(
        &self,
        event: &EventInfo,
        market_type: &MarketType,
    ) -> Result<Option<MarketSnapshot>>;
}
