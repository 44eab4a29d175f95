//! Per-market detection pipeline: freshness filter, enumerate, evaluate, sort.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::domain::{Amount, DomainError, MarketEvaluation, MarketSnapshot};

use super::enumerator::{CombinationEnumerator, EnumeratorConfig, DEFAULT_MAX_COMBINATIONS};
use super::evaluator::{ArbitrageEvaluator, DEFAULT_MIN_BANKROLL};
use super::ranker;

/// Detection parameters shared by every market of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionPolicy {
    /// Minimum accepted profit margin.
    pub min_profit_margin: Decimal,
    /// Cap on combinations explored per market.
    pub max_combinations: usize,
    /// Keep only the N best prices per outcome.
    pub max_quotes_per_outcome: Option<usize>,
    /// Ignore quotes older than this.
    pub max_quote_age: Option<Duration>,
    /// Minimum bankroll attached to opportunities.
    pub min_bankroll: Amount,
}

impl Default for DetectionPolicy {
    fn default() -> Self {
        Self {
            min_profit_margin: Decimal::new(1, 2),
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            max_quotes_per_outcome: None,
            max_quote_age: None,
            min_bankroll: DEFAULT_MIN_BANKROLL,
        }
    }
}

impl DetectionPolicy {
    /// Same policy with a different margin threshold.
    #[must_use]
    pub fn with_min_profit_margin(mut self, min_profit_margin: Decimal) -> Self {
        self.min_profit_margin = min_profit_margin;
        self
    }
}

/// Runs the enumerator and evaluator over one market snapshot.
#[derive(Debug, Clone)]
pub struct ArbitrageDetector {
    enumerator: CombinationEnumerator,
    evaluator: ArbitrageEvaluator,
    max_quote_age: Option<Duration>,
}

impl Default for ArbitrageDetector {
    fn default() -> Self {
        Self::new(&DetectionPolicy::default())
    }
}

impl ArbitrageDetector {
    /// Create a detector from a policy.
    #[must_use]
    pub fn new(policy: &DetectionPolicy) -> Self {
        Self {
            enumerator: CombinationEnumerator::new(EnumeratorConfig {
                min_profit_margin: policy.min_profit_margin,
                max_combinations: policy.max_combinations,
                max_quotes_per_outcome: policy.max_quotes_per_outcome,
            }),
            evaluator: ArbitrageEvaluator::new(policy.min_profit_margin, policy.min_bankroll),
            max_quote_age: policy.max_quote_age,
        }
    }

    /// Evaluate every combination of `snapshot`.
    ///
    /// Never fails: markets that cannot host an arbitrage, stale markets and
    /// invalid quotes all reduce to fewer (possibly zero) opportunities.
    /// Opportunities are sorted best first.
    #[must_use]
    pub fn detect(&self, snapshot: &MarketSnapshot, now: DateTime<Utc>) -> MarketEvaluation {
        let event_id = snapshot.event_id().clone();
        let market_id = snapshot.market_id().clone();

        if let Err(e) = snapshot.ensure_tradeable() {
            debug!(event_id = %event_id, market_id = %market_id, error = %e, "Skipping market");
            return MarketEvaluation::empty(event_id, market_id);
        }

        let fresh;
        let snapshot = match self.max_quote_age {
            Some(age) => match snapshot.without_quotes_older_than(now - age) {
                Ok(filtered) => {
                    fresh = filtered;
                    &fresh
                }
                Err(e) => {
                    debug!(event_id = %event_id, market_id = %market_id, error = %e, "Market has stale quotes only");
                    return MarketEvaluation::empty(event_id, market_id);
                }
            },
            None => snapshot,
        };

        let mut combinations = self.enumerator.enumerate(snapshot);
        let mut opportunities = Vec::new();
        let mut rejected_invalid = 0;

        for combination in combinations.by_ref() {
            match self.evaluator.evaluate(snapshot, &combination, now) {
                Ok(opportunity) => opportunities.push(opportunity),
                Err(e @ DomainError::InvalidOdds { .. }) => {
                    rejected_invalid += 1;
                    trace!(event_id = %event_id, error = %e, "Combination rejected");
                }
                Err(e) => trace!(event_id = %event_id, error = %e, "Combination below threshold"),
            }
        }

        let truncated = combinations.is_truncated();
        if truncated {
            warn!(
                event_id = %event_id,
                market_id = %market_id,
                cap = self.enumerator.config().max_combinations,
                "Combination cap reached, results truncated"
            );
        }

        let opportunities = ranker::rank(opportunities, usize::MAX);

        debug!(
            event_id = %event_id,
            market_id = %market_id,
            quotes = snapshot.quote_count(),
            explored = combinations.produced(),
            pruned = combinations.pruned(),
            rejected_invalid,
            count = opportunities.len(),
            "Market evaluated"
        );

        MarketEvaluation {
            event_id,
            market_id,
            opportunities,
            explored: combinations.produced(),
            rejected_invalid,
            truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventInfo, MarketType, OddsQuote};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn event() -> EventInfo {
        EventInfo::new(
            "evt-1",
            "Home FC vs Away FC",
            Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap(),
        )
    }

    fn scenario_a() -> MarketSnapshot {
        MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookA", "Home", dec!(2.00)))
            .quote(OddsQuote::new("BookB", "Home", dec!(2.10)))
            .quote(OddsQuote::new("BookC", "Away", dec!(2.05)))
            .build()
            .unwrap()
    }

    #[test]
    fn duplicate_quotes_collapse_to_the_best_price() {
        let snapshot = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookB", "Home", dec!(2.10)))
            .quote(OddsQuote::new("BookB", "Home", dec!(2.15)))
            .quote(OddsQuote::new("BookC", "Away", dec!(2.05)))
            .build()
            .unwrap();

        let evaluation = ArbitrageDetector::default().detect(&snapshot, now());

        assert_eq!(evaluation.explored, 2);
        assert_eq!(evaluation.opportunities.len(), 1);
        let home = evaluation.opportunities[0]
            .selections()
            .iter()
            .find(|s| s.outcome == "Home")
            .unwrap();
        assert_eq!(home.decimal_odds, dec!(2.15));
    }

    #[test]
    fn scenario_a_ranks_both_combinations() {
        let evaluation = ArbitrageDetector::default().detect(&scenario_a(), now());

        assert_eq!(evaluation.opportunities.len(), 2);
        let first = &evaluation.opportunities[0];
        let second = &evaluation.opportunities[1];
        assert_eq!(first.profit_margin().round_dp(4), dec!(0.0360));
        assert_eq!(second.profit_margin().round_dp(4), dec!(0.0122));
        assert!(first
            .selections()
            .iter()
            .any(|s| s.bookmaker.as_str() == "BookB" && s.decimal_odds == dec!(2.10)));
        assert_eq!(evaluation.explored, 2);
        assert!(!evaluation.truncated);
    }

    #[test]
    fn scenario_c_fair_market_is_excluded() {
        let snapshot = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookA", "Home", dec!(2.00)))
            .quote(OddsQuote::new("BookB", "Away", dec!(2.00)))
            .build()
            .unwrap();
        let detector = ArbitrageDetector::new(
            &DetectionPolicy::default().with_min_profit_margin(Decimal::ZERO),
        );

        assert!(detector.detect(&snapshot, now()).opportunities.is_empty());
    }

    #[test]
    fn scenario_d_single_outcome_is_empty_not_error() {
        let snapshot = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookA", "Home", dec!(3.00)))
            .build()
            .unwrap();
        let evaluation = ArbitrageDetector::default().detect(&snapshot, now());

        assert!(evaluation.opportunities.is_empty());
        assert_eq!(evaluation.explored, 0);
    }

    #[test]
    fn invalid_quote_excludes_only_its_combinations() {
        let snapshot = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookA", "Home", dec!(0)))
            .quote(OddsQuote::new("BookB", "Home", dec!(2.10)))
            .quote(OddsQuote::new("BookC", "Away", dec!(2.05)))
            .build()
            .unwrap();
        let evaluation = ArbitrageDetector::default().detect(&snapshot, now());

        assert_eq!(evaluation.opportunities.len(), 1);
        assert_eq!(evaluation.rejected_invalid, 1);
    }

    #[test]
    fn stale_quotes_are_ignored_when_age_limit_set() {
        let old = now() - Duration::minutes(30);
        let snapshot = MarketSnapshot::builder(event(), "m-1", MarketType::MatchWinner)
            .quote(OddsQuote::new("BookB", "Home", dec!(2.10)).with_quoted_at(old))
            .quote(OddsQuote::new("BookA", "Home", dec!(2.00)).with_quoted_at(now()))
            .quote(OddsQuote::new("BookC", "Away", dec!(2.05)))
            .build()
            .unwrap();
        let policy = DetectionPolicy {
            max_quote_age: Some(Duration::minutes(2)),
            ..DetectionPolicy::default()
        };
        let evaluation = ArbitrageDetector::new(&policy).detect(&snapshot, now());

        assert_eq!(evaluation.opportunities.len(), 1);
        assert_eq!(
            evaluation.opportunities[0].selections()[1].bookmaker.as_str(),
            "BookA"
        );
    }

    #[test]
    fn detection_is_deterministic() {
        let snapshot = scenario_a();
        let detector = ArbitrageDetector::default();
        assert_eq!(detector.detect(&snapshot, now()), detector.detect(&snapshot, now()));
    }

    #[test]
    fn truncation_is_surfaced() {
        let policy = DetectionPolicy {
            max_combinations: 1,
            ..DetectionPolicy::default()
        };
        let evaluation = ArbitrageDetector::new(&policy).detect(&scenario_a(), now());

        assert!(evaluation.truncated);
        assert_eq!(evaluation.opportunities.len(), 1);
    }
}
