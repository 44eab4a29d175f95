use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{EventId, EventInfo, MarketSnapshot, MarketType};
use crate::error::{Error, Result};
use crate::port::outbound::{EventFilter, MarketOddsProvider};

use super::dto::{FeedDocument, FeedEvent};

/// Odds provider backed by an in-memory feed document.
#[derive(Debug, Clone, Default)]
pub struct JsonFeedProvider {
    events: Vec<FeedEvent>,
}

impl JsonFeedProvider {
    /// Wrap an already parsed document.
    #[must_use]
    pub fn new(document: FeedDocument) -> Self {
        let mut events = document.events;
        events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id)));
        Self { events }
    }

    /// Parse a feed from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed documents.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: FeedDocument = serde_json::from_str(json)?;
        Ok(Self::new(document))
    }

    /// Read and parse a feed file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Json`]
    /// if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let provider = Self::from_json(&json)?;
        info!(path = %path.display(), events = provider.events.len(), "Loaded odds feed");
        Ok(provider)
    }

    /// Number of events in the feed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the feed has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn event(&self, event_id: &str) -> Option<&FeedEvent> {
        self.events.iter().find(|e| e.id == event_id)
    }
}

#[async_trait]
impl MarketOddsProvider for JsonFeedProvider {
    fn name(&self) -> &'static str {
        "json-feed"
    }

    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<EventInfo>> {
        let events: Vec<EventInfo> = self
            .events
            .iter()
            .map(FeedEvent::to_event_info)
            .filter(|event| filter.matches(event))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect();
        debug!(count = events.len(), sport = ?filter.sport, "Listed events");
        Ok(events)
    }

    async fn find_event(&self, event_id: &EventId) -> Result<Option<EventInfo>> {
        Ok(self.event(event_id.as_str()).map(FeedEvent::to_event_info))
    }

    async fn fetch_snapshot(
        &self,
        event: &EventInfo,
        market_type: &MarketType,
    ) -> Result<Option<MarketSnapshot>> {
        let feed_event = self
            .event(event.id.as_str())
            .ok_or_else(|| Error::upstream(event.id.as_str(), "event not present in feed"))?;

        match feed_event.market(market_type) {
            Some(market) => Ok(Some(market.to_snapshot(event.clone())?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{"events":[
        {"id":"late","name":"C vs D","sport":"basketball_nba","starts_at":"2026-05-02T01:00:00Z",
         "markets":[{"id":"t-1","type":"totals","quotes":[
            {"bookmaker":"BookA","outcome":"Over 210.5","odds":1.95},
            {"bookmaker":"BookB","outcome":"Under 210.5","odds":2.12}]}]},
        {"id":"early","name":"A vs B","sport":"soccer_epl","starts_at":"2026-05-01T18:00:00Z",
         "markets":[{"id":"m-1","type":"h2h","quotes":[
            {"bookmaker":"BookA","outcome":"Home","odds":2.1},
            {"bookmaker":"BookB","outcome":"Away","odds":2.05}]}]}
    ]}"#;

    #[tokio::test]
    async fn lists_events_by_start_time_with_filters() {
        let provider = JsonFeedProvider::from_json(FEED).unwrap();

        let all = provider.list_events(&EventFilter::default()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);

        let nba = provider
            .list_events(&EventFilter {
                sport: Some("BASKETBALL_NBA".into()),
                ..EventFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(nba.len(), 1);

        let first = provider
            .list_events(&EventFilter {
                limit: Some(1),
                ..EventFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(first[0].id.as_str(), "early");
    }

    #[tokio::test]
    async fn started_events_do_not_count_against_the_limit() {
        let provider = JsonFeedProvider::from_json(FEED).unwrap();
        let between = "2026-05-01T20:00:00Z".parse().unwrap();

        let upcoming = provider
            .list_events(&EventFilter {
                starts_after: Some(between),
                limit: Some(1),
                ..EventFilter::default()
            })
            .await
            .unwrap();
        let ids: Vec<&str> = upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["late"]);
    }

    #[tokio::test]
    async fn fetches_snapshot_for_market_type() {
        let provider = JsonFeedProvider::from_json(FEED).unwrap();
        let event = provider
            .find_event(&EventId::from("late"))
            .await
            .unwrap()
            .unwrap();

        let totals = provider
            .fetch_snapshot(&event, &MarketType::OverUnder)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(totals.outcome_count(), 2);

        let h2h = provider
            .fetch_snapshot(&event, &MarketType::MatchWinner)
            .await
            .unwrap();
        assert!(h2h.is_none());
    }

    #[tokio::test]
    async fn unknown_event_is_an_upstream_error() {
        let provider = JsonFeedProvider::from_json(FEED).unwrap();
        let ghost = EventInfo::new("ghost", "?", chrono::Utc::now());
        let err = provider
            .fetch_snapshot(&ghost, &MarketType::MatchWinner)
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            JsonFeedProvider::from_json("{\"events\": 3}"),
            Err(Error::Json(_))
        ));
    }
}
