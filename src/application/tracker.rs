//! Opportunity lifecycle across repeated scans.
//!
//! The tracker holds the latest opportunity set per event market. A fresh
//! evaluation of a market replaces its set; opportunities that are absent
//! from the fresh set are superseded.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{ArbitrageOpportunity, EventId, MarketEvaluation, MarketId, OpportunityId};

/// Classification of a market refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Ids first seen in this refresh.
    pub new: Vec<OpportunityId>,
    /// Ids present before and after.
    pub persisted: Vec<OpportunityId>,
    /// Previously active opportunities the refresh replaced, marked superseded.
    pub superseded: Vec<ArbitrageOpportunity>,
}

type MarketKey = (EventId, MarketId);

/// Thread-safe registry of the current opportunity set per event market.
#[derive(Debug, Default)]
pub struct OpportunityTracker {
    markets: RwLock<HashMap<MarketKey, Vec<ArbitrageOpportunity>>>,
}

impl OpportunityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the market's set with `evaluation`'s opportunities.
    pub fn refresh(&self, evaluation: &MarketEvaluation) -> RefreshOutcome {
        let key = (evaluation.event_id.clone(), evaluation.market_id.clone());
        let fresh_ids: HashSet<OpportunityId> =
            evaluation.opportunities.iter().map(ArbitrageOpportunity::id).collect();

        let previous = self
            .markets
            .write()
            .insert(key, evaluation.opportunities.clone())
            .unwrap_or_default();
        let previous_ids: HashSet<OpportunityId> =
            previous.iter().map(ArbitrageOpportunity::id).collect();

        let mut outcome = RefreshOutcome::default();
        for opportunity in &evaluation.opportunities {
            if previous_ids.contains(&opportunity.id()) {
                outcome.persisted.push(opportunity.id());
            } else {
                outcome.new.push(opportunity.id());
            }
        }
        for mut opportunity in previous {
            if !fresh_ids.contains(&opportunity.id()) {
                opportunity.supersede();
                outcome.superseded.push(opportunity);
            }
        }

        debug!(
            event_id = %evaluation.event_id,
            market_id = %evaluation.market_id,
            new = outcome.new.len(),
            persisted = outcome.persisted.len(),
            superseded = outcome.superseded.len(),
            "Opportunities refreshed"
        );
        outcome
    }

    /// Look up a tracked opportunity by id.
    #[must_use]
    pub fn get(&self, id: &OpportunityId) -> Option<ArbitrageOpportunity> {
        self.markets
            .read()
            .values()
            .flatten()
            .find(|opportunity| opportunity.id() == *id)
            .cloned()
    }

    /// Tracked opportunities still active at `now`, best first.
    #[must_use]
    pub fn active(&self, now: DateTime<Utc>) -> Vec<ArbitrageOpportunity> {
        let mut active: Vec<ArbitrageOpportunity> = self
            .markets
            .read()
            .values()
            .flatten()
            .filter(|opportunity| opportunity.is_active(now))
            .cloned()
            .collect();
        active.sort_by(|a, b| a.rank_cmp(b));
        active
    }

    /// Drop opportunities expired at `now`. Returns how many were removed.
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let mut markets = self.markets.write();
        let mut removed = 0;
        markets.retain(|_, opportunities| {
            let before = opportunities.len();
            opportunities.retain(|opportunity| opportunity.is_active(now));
            removed += before - opportunities.len();
            !opportunities.is_empty()
        });
        removed
    }

    /// Number of tracked opportunities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markets.read().values().map(Vec::len).sum()
    }

    /// True when nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::detection::ArbitrageDetector;
    use crate::domain::{EventInfo, MarketSnapshot, MarketType, OddsQuote, OpportunityStatus};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn starts_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn evaluate(away_book: &str, away_odds: Decimal) -> MarketEvaluation {
        let event = EventInfo::new("evt-1", "Home FC vs Away FC", starts_at());
        let snapshot = MarketSnapshot::builder(event, "h2h", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookB", "Home", dec!(2.10)))
            .quote(OddsQuote::new(away_book, "Away", away_odds))
            .build()
            .unwrap();
        ArbitrageDetector::default().detect(&snapshot, now())
    }

    #[test]
    fn first_refresh_reports_new() {
        let tracker = OpportunityTracker::new();
        let outcome = tracker.refresh(&evaluate("BookC", dec!(2.05)));

        assert_eq!(outcome.new.len(), 1);
        assert!(outcome.persisted.is_empty());
        assert!(outcome.superseded.is_empty());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn same_selection_persists_across_price_moves() {
        let tracker = OpportunityTracker::new();
        let first = tracker.refresh(&evaluate("BookC", dec!(2.05)));
        let second = tracker.refresh(&evaluate("BookC", dec!(2.08)));

        assert_eq!(second.persisted, first.new);
        assert!(second.new.is_empty());
        let tracked = tracker.get(&first.new[0]).unwrap();
        assert_eq!(tracked.selections()[0].decimal_odds, dec!(2.08));
    }

    #[test]
    fn changed_selection_supersedes_previous() {
        let tracker = OpportunityTracker::new();
        let first = tracker.refresh(&evaluate("BookC", dec!(2.05)));
        let second = tracker.refresh(&evaluate("BookD", dec!(2.05)));

        assert_eq!(second.new.len(), 1);
        assert_eq!(second.superseded.len(), 1);
        assert_eq!(second.superseded[0].id(), first.new[0]);
        assert_eq!(second.superseded[0].status(), OpportunityStatus::Superseded);
        assert!(tracker.get(&first.new[0]).is_none());
    }

    #[test]
    fn vanished_arbitrage_supersedes_everything() {
        let tracker = OpportunityTracker::new();
        tracker.refresh(&evaluate("BookC", dec!(2.05)));
        let outcome = tracker.refresh(&evaluate("BookC", dec!(1.80)));

        assert_eq!(outcome.superseded.len(), 1);
        assert!(tracker.active(now()).is_empty());
    }

    #[test]
    fn expired_opportunities_are_inactive_and_prunable() {
        let tracker = OpportunityTracker::new();
        tracker.refresh(&evaluate("BookC", dec!(2.05)));

        assert_eq!(tracker.active(now()).len(), 1);
        assert!(tracker.active(starts_at()).is_empty());
        assert_eq!(tracker.prune_expired(starts_at()), 1);
        assert!(tracker.is_empty());
    }
}
