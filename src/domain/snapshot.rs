//! Immutable view of every quote for one event market.
//!
//! A [`MarketSnapshot`] is produced once per scan cycle and read by the
//! detection pipeline. Construction goes through [`SnapshotBuilder`], which
//! enforces that the quoted outcomes match the market's declared exhaustive
//! outcome set: every declared outcome is quoted and nothing else is.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::DomainError;
use super::event::EventInfo;
use super::id::{EventId, MarketId};
use super::market::MarketType;
use super::odds::OddsQuote;

/// Quotes for one market of one event, grouped by outcome.
///
/// Outcomes are kept in lexical key order, which fixes the enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketSnapshot {
    event: EventInfo,
    market_id: MarketId,
    market_type: MarketType,
    outcomes: BTreeMap<String, Vec<OddsQuote>>,
}

impl MarketSnapshot {
    /// Start building a snapshot for `event`'s market.
    pub fn builder(
        event: EventInfo,
        market_id: impl Into<MarketId>,
        market_type: MarketType,
    ) -> SnapshotBuilder {
        SnapshotBuilder {
            event,
            market_id: market_id.into(),
            market_type,
            declared: None,
            quotes: Vec::new(),
        }
    }

    /// Get the event this market belongs to.
    #[must_use]
    pub const fn event(&self) -> &EventInfo {
        &self.event
    }

    /// Get the event ID.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event.id
    }

    /// Get the market ID.
    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Get the market type.
    #[must_use]
    pub const fn market_type(&self) -> &MarketType {
        &self.market_type
    }

    /// Event start, which is also when opportunities expire.
    #[must_use]
    pub const fn starts_at(&self) -> DateTime<Utc> {
        self.event.starts_at
    }

    /// Quotes grouped by outcome, in lexical outcome order.
    #[must_use]
    pub const fn outcomes(&self) -> &BTreeMap<String, Vec<OddsQuote>> {
        &self.outcomes
    }

    /// Number of declared outcomes.
    #[must_use]
    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Quotes for a single outcome.
    #[must_use]
    pub fn quotes(&self, outcome: &str) -> Option<&[OddsQuote]> {
        self.outcomes.get(outcome).map(Vec::as_slice)
    }

    /// Total number of quotes across all outcomes.
    #[must_use]
    pub fn quote_count(&self) -> usize {
        self.outcomes.values().map(Vec::len).sum()
    }

    /// Check the market can host an arbitrage at all.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InsufficientOutcomes`] with fewer than 2 outcomes.
    pub fn ensure_tradeable(&self) -> Result<(), DomainError> {
        if self.outcomes.len() < 2 {
            return Err(DomainError::InsufficientOutcomes {
                count: self.outcomes.len(),
            });
        }
        Ok(())
    }

    /// Copy of this snapshot without quotes published before `cutoff`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UncoveredOutcome`] if an outcome loses every quote.
    pub fn without_quotes_older_than(&self, cutoff: DateTime<Utc>) -> Result<Self, DomainError> {
        let mut outcomes = BTreeMap::new();
        for (outcome, quotes) in &self.outcomes {
            let fresh: Vec<OddsQuote> = quotes
                .iter()
                .filter(|q| !q.is_older_than(cutoff))
                .cloned()
                .collect();
            if fresh.is_empty() {
                return Err(DomainError::UncoveredOutcome {
                    outcome: outcome.clone(),
                });
            }
            outcomes.insert(outcome.clone(), fresh);
        }

        Ok(Self {
            event: self.event.clone(),
            market_id: self.market_id.clone(),
            market_type: self.market_type.clone(),
            outcomes,
        })
    }
}

/// Builder enforcing the snapshot's coverage invariants.
#[derive(Debug)]
pub struct SnapshotBuilder {
    event: EventInfo,
    market_id: MarketId,
    market_type: MarketType,
    declared: Option<BTreeSet<String>>,
    quotes: Vec<OddsQuote>,
}

impl SnapshotBuilder {
    /// Declare the exhaustive outcome set of this market.
    ///
    /// Without a declaration the quoted outcomes are taken as the full set.
    #[must_use]
    pub fn declare_outcomes<I, S>(mut self, outcomes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared = Some(outcomes.into_iter().map(Into::into).collect());
        self
    }

    /// Add one quote.
    #[must_use]
    pub fn quote(mut self, quote: OddsQuote) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Add several quotes.
    #[must_use]
    pub fn quotes(mut self, quotes: impl IntoIterator<Item = OddsQuote>) -> Self {
        self.quotes.extend(quotes);
        self
    }

    /// Build the snapshot.
    ///
    /// Duplicate bookmaker/outcome quotes are kept as independent candidates.
    ///
    /// # Errors
    ///
    /// - [`DomainError::UndeclaredOutcome`] if a quote names an undeclared outcome
    /// - [`DomainError::UncoveredOutcome`] if a declared outcome has no quote
    /// - [`DomainError::OutcomeCountMismatch`] if the market type fixes the
    ///   outcome count and the declaration disagrees
    pub fn build(self) -> Result<MarketSnapshot, DomainError> {
        let declared: BTreeSet<String> = match self.declared {
            Some(declared) => declared,
            None => self.quotes.iter().map(|q| q.outcome().to_string()).collect(),
        };

        if let Some(expected) = self.market_type.fixed_outcome_count() {
            if declared.len() != expected {
                return Err(DomainError::OutcomeCountMismatch {
                    expected,
                    actual: declared.len(),
                });
            }
        }

        let mut outcomes: BTreeMap<String, Vec<OddsQuote>> = declared
            .into_iter()
            .map(|outcome| (outcome, Vec::new()))
            .collect();

        for quote in self.quotes {
            match outcomes.get_mut(quote.outcome()) {
                Some(bucket) => bucket.push(quote),
                None => {
                    return Err(DomainError::UndeclaredOutcome {
                        outcome: quote.outcome().to_string(),
                    })
                }
            }
        }

        if let Some((outcome, _)) = outcomes.iter().find(|(_, quotes)| quotes.is_empty()) {
            return Err(DomainError::UncoveredOutcome {
                outcome: outcome.clone(),
            });
        }

        Ok(MarketSnapshot {
            event: self.event,
            market_id: self.market_id,
            market_type: self.market_type,
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn event() -> EventInfo {
        EventInfo::new(
            "evt-1",
            "Home FC vs Away FC",
            Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap(),
        )
    }

    #[test]
    fn groups_quotes_by_outcome_in_lexical_order() {
        let snapshot = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookA", "Home", dec!(2.00)))
            .quote(OddsQuote::new("BookC", "Away", dec!(2.05)))
            .quote(OddsQuote::new("BookB", "Home", dec!(2.10)))
            .build()
            .unwrap();

        let keys: Vec<&str> = snapshot.outcomes().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Away", "Home"]);
        assert_eq!(snapshot.quotes("Home").unwrap().len(), 2);
        assert_eq!(snapshot.quote_count(), 3);
    }

    #[test]
    fn rejects_declared_outcome_without_quotes() {
        let result = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .declare_outcomes(["Home", "Draw", "Away"])
            .quote(OddsQuote::new("BookA", "Home", dec!(2.60)))
            .quote(OddsQuote::new("BookB", "Away", dec!(2.90)))
            .build();

        assert_eq!(
            result.unwrap_err(),
            DomainError::UncoveredOutcome {
                outcome: "Draw".to_string()
            }
        );
    }

    #[test]
    fn rejects_undeclared_outcome() {
        let result = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .declare_outcomes(["Home", "Away"])
            .quote(OddsQuote::new("BookA", "Home", dec!(2.00)))
            .quote(OddsQuote::new("BookA", "Draw", dec!(3.40)))
            .build();

        assert!(matches!(result, Err(DomainError::UndeclaredOutcome { .. })));
    }

    #[test]
    fn totals_market_requires_two_outcomes() {
        let result = MarketSnapshot::builder(event(), "m-1", MarketType::OverUnder)
            .quote(OddsQuote::new("BookA", "Over 2.5", dec!(1.90)))
            .build();

        assert_eq!(
            result.unwrap_err(),
            DomainError::OutcomeCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn single_outcome_snapshot_builds_but_is_not_tradeable() {
        let snapshot = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookA", "Home", dec!(2.00)))
            .build()
            .unwrap();

        assert_eq!(
            snapshot.ensure_tradeable(),
            Err(DomainError::InsufficientOutcomes { count: 1 })
        );
    }

    #[test]
    fn freshness_filter_drops_old_quotes() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let old = now - chrono::Duration::minutes(10);
        let snapshot = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookA", "Home", dec!(2.00)).with_quoted_at(old))
            .quote(OddsQuote::new("BookB", "Home", dec!(2.10)).with_quoted_at(now))
            .quote(OddsQuote::new("BookC", "Away", dec!(2.05)))
            .build()
            .unwrap();

        let fresh = snapshot
            .without_quotes_older_than(now - chrono::Duration::minutes(2))
            .unwrap();
        assert_eq!(fresh.quotes("Home").unwrap().len(), 1);
        assert_eq!(fresh.quotes("Away").unwrap().len(), 1);

        let stale = snapshot.without_quotes_older_than(now + chrono::Duration::minutes(1));
        assert_eq!(
            stale.unwrap_err(),
            DomainError::UncoveredOutcome {
                outcome: "Home".to_string()
            }
        );
    }
}
