//! Detected arbitrage opportunities and their lifecycle.
//!
//! An [`ArbitrageOpportunity`] is a combination whose implied probabilities
//! sum below 1.0. Totals, margin and ROI are derived from the selections at
//! construction.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{Bookmaker, EventId, MarketId, OpportunityId};
use super::market::MarketType;
use super::money::{Amount, Odds, Probability};
use super::snapshot::MarketSnapshot;

/// One leg of an opportunity: back `outcome` at `bookmaker`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Outcome label.
    pub outcome: String,
    /// Bookmaker offering the price.
    pub bookmaker: Bookmaker,
    /// Decimal odds at detection time.
    pub decimal_odds: Odds,
    /// `1 / decimal_odds`.
    pub implied_probability: Probability,
}

/// Lifecycle state of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    /// Active: the event has not started.
    #[default]
    Detected,
    /// The event start time has been reached.
    Expired,
    /// A fresher snapshot of the same market replaced it.
    Superseded,
}

impl fmt::Display for OpportunityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detected => write!(f, "detected"),
            Self::Expired => write!(f, "expired"),
            Self::Superseded => write!(f, "superseded"),
        }
    }
}

/// A risk-free combination across bookmakers for one event market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    id: OpportunityId,
    event_id: EventId,
    event_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sport: Option<String>,
    market_id: MarketId,
    market_type: MarketType,
    selections: Vec<Selection>,
    total_implied_probability: Probability,
    profit_margin: Decimal,
    roi_percent: Decimal,
    min_bankroll: Amount,
    detected_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    status: OpportunityStatus,
}

impl ArbitrageOpportunity {
    /// Build an opportunity for `snapshot`'s market from its selections.
    ///
    /// Expires when the event starts.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InsufficientOutcomes`] with fewer than 2 selections
    /// - [`DomainError::BelowThreshold`] when the margin is not strictly positive
    pub fn from_selections(
        snapshot: &MarketSnapshot,
        selections: Vec<Selection>,
        min_bankroll: Amount,
        detected_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if selections.len() < 2 {
            return Err(DomainError::InsufficientOutcomes {
                count: selections.len(),
            });
        }

        let total: Probability = selections.iter().map(|s| s.implied_probability).sum();
        let profit_margin = Decimal::ONE - total;
        if profit_margin <= Decimal::ZERO || total <= Decimal::ZERO {
            return Err(DomainError::BelowThreshold {
                margin: profit_margin,
                threshold: Decimal::ZERO,
            });
        }
        let roi_percent = profit_margin
            .checked_div(total)
            .map(|ratio| ratio * Decimal::ONE_HUNDRED)
            .ok_or_else(|| DomainError::invalid_input("total implied probability overflow"))?;

        let id = OpportunityId::derive(
            snapshot.event_id(),
            snapshot.market_id(),
            selections
                .iter()
                .map(|s| (s.outcome.as_str(), &s.bookmaker)),
        );
        let event = snapshot.event();

        Ok(Self {
            id,
            event_id: event.id.clone(),
            event_name: event.name.clone(),
            sport: event.sport.clone(),
            market_id: snapshot.market_id().clone(),
            market_type: snapshot.market_type().clone(),
            selections,
            total_implied_probability: total,
            profit_margin,
            roi_percent,
            min_bankroll,
            detected_at,
            expires_at: event.starts_at,
            status: OpportunityStatus::Detected,
        })
    }

    /// Get the content-derived id.
    #[must_use]
    pub const fn id(&self) -> OpportunityId {
        self.id
    }

    /// Get the event ID.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Get the event display name.
    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Get the sport slug, when known.
    #[must_use]
    pub fn sport(&self) -> Option<&str> {
        self.sport.as_deref()
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

    /// Selections in the market's outcome order.
    #[must_use]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Sum of the selections' implied probabilities.
    #[must_use]
    pub const fn total_implied_probability(&self) -> Probability {
        self.total_implied_probability
    }

    /// `1 - total_implied_probability`.
    #[must_use]
    pub const fn profit_margin(&self) -> Decimal {
        self.profit_margin
    }

    /// `profit_margin / total_implied_probability * 100`.
    #[must_use]
    pub const fn roi_percent(&self) -> Decimal {
        self.roi_percent
    }

    /// Smallest bankroll worth staking.
    #[must_use]
    pub const fn min_bankroll(&self) -> Amount {
        self.min_bankroll
    }

    /// When the opportunity was detected.
    #[must_use]
    pub const fn detected_at(&self) -> DateTime<Utc> {
        self.detected_at
    }

    /// When the opportunity stops being valid (event start).
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Stored status, without applying the clock.
    #[must_use]
    pub const fn status(&self) -> OpportunityStatus {
        self.status
    }

    /// Status as of `now`.
    ///
    /// Supersession is sticky; otherwise the opportunity expires once
    /// `now >= expires_at`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> OpportunityStatus {
        match self.status {
            OpportunityStatus::Superseded => OpportunityStatus::Superseded,
            _ if now >= self.expires_at => OpportunityStatus::Expired,
            status => status,
        }
    }

    /// True while detected and not past expiry.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == OpportunityStatus::Detected
    }

    /// Mark as replaced by a fresher evaluation.
    pub fn supersede(&mut self) {
        self.status = OpportunityStatus::Superseded;
    }

    /// Profit implied by the margin for `bankroll`, before rounding.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn guaranteed_profit(&self, bankroll: Amount) -> Option<Amount> {
        bankroll.checked_mul(self.profit_margin)
    }

    /// Selection `(outcome, bookmaker)` pairs, sorted.
    #[must_use]
    pub fn selection_key(&self) -> Vec<(&str, &str)> {
        let mut key: Vec<(&str, &str)> = self
            .selections
            .iter()
            .map(|s| (s.outcome.as_str(), s.bookmaker.as_str()))
            .collect();
        key.sort_unstable();
        key
    }

    /// Ranking order: margin descending, then ROI descending, then the
    /// sorted selection set ascending. Event and market ids close the order.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .profit_margin
            .cmp(&self.profit_margin)
            .then_with(|| other.roi_percent.cmp(&self.roi_percent))
            .then_with(|| self.selection_key().cmp(&other.selection_key()))
            .then_with(|| self.event_id.cmp(&other.event_id))
            .then_with(|| self.market_id.cmp(&other.market_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventInfo;
    use crate::domain::odds::OddsQuote;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn starts_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap()
    }

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot::builder(
            EventInfo::new("evt-1", "Home FC vs Away FC", starts_at()).with_sport("soccer"),
            "m-1",
            MarketType::MatchWinner,
        )
        .quote(OddsQuote::new("BookB", "Home", dec!(2.10)))
        .quote(OddsQuote::new("BookC", "Away", dec!(2.05)))
        .build()
        .unwrap()
    }

    fn selection(outcome: &str, bookmaker: &str, odds: Decimal) -> Selection {
        Selection {
            outcome: outcome.to_string(),
            bookmaker: Bookmaker::from(bookmaker),
            decimal_odds: odds,
            implied_probability: Decimal::ONE / odds,
        }
    }

    fn opportunity(home: Decimal, away: Decimal) -> ArbitrageOpportunity {
        ArbitrageOpportunity::from_selections(
            &snapshot(),
            vec![selection("Away", "BookC", away), selection("Home", "BookB", home)],
            dec!(10),
            starts_at() - chrono::Duration::hours(2),
        )
        .unwrap()
    }

    #[test]
    fn derives_totals_from_selections() {
        let opp = opportunity(dec!(2.10), dec!(2.05));
        let expected_total = Decimal::ONE / dec!(2.10) + Decimal::ONE / dec!(2.05);

        assert_eq!(opp.total_implied_probability(), expected_total);
        assert_eq!(opp.profit_margin(), Decimal::ONE - expected_total);
        assert_eq!(opp.profit_margin().round_dp(4), dec!(0.0360));
        assert_eq!(opp.roi_percent().round_dp(2), dec!(3.73));
        assert_eq!(opp.expires_at(), starts_at());
        assert_eq!(opp.sport(), Some("soccer"));
    }

    #[test]
    fn rejects_non_positive_margin() {
        let result = ArbitrageOpportunity::from_selections(
            &snapshot(),
            vec![selection("Away", "BookC", dec!(2.00)), selection("Home", "BookB", dec!(2.00))],
            dec!(10),
            starts_at(),
        );
        assert!(matches!(result, Err(DomainError::BelowThreshold { .. })));
    }

    #[test]
    fn rejects_single_selection() {
        let result = ArbitrageOpportunity::from_selections(
            &snapshot(),
            vec![selection("Home", "BookB", dec!(5.00))],
            dec!(10),
            starts_at(),
        );
        assert_eq!(
            result.unwrap_err(),
            DomainError::InsufficientOutcomes { count: 1 }
        );
    }

    #[test]
    fn lifecycle_follows_clock_and_supersession() {
        let mut opp = opportunity(dec!(2.10), dec!(2.05));

        assert!(opp.is_active(starts_at() - chrono::Duration::seconds(1)));
        assert_eq!(opp.status_at(starts_at()), OpportunityStatus::Expired);

        opp.supersede();
        assert_eq!(
            opp.status_at(starts_at() - chrono::Duration::hours(1)),
            OpportunityStatus::Superseded
        );
        assert_eq!(opp.status_at(starts_at()), OpportunityStatus::Superseded);
    }

    #[test]
    fn id_is_stable_across_detections() {
        let first = opportunity(dec!(2.10), dec!(2.05));
        let later = ArbitrageOpportunity::from_selections(
            &snapshot(),
            vec![selection("Home", "BookB", dec!(2.12)), selection("Away", "BookC", dec!(2.05))],
            dec!(10),
            starts_at() - chrono::Duration::minutes(5),
        )
        .unwrap();

        assert_eq!(first.id(), later.id());
    }

    #[test]
    fn rank_cmp_orders_by_margin_first() {
        let better = opportunity(dec!(2.10), dec!(2.05));
        let worse = opportunity(dec!(2.00), dec!(2.05));

        assert_eq!(better.rank_cmp(&worse), Ordering::Less);
        assert_eq!(worse.rank_cmp(&better), Ordering::Greater);
        assert_eq!(better.rank_cmp(&better), Ordering::Equal);
    }

    #[test]
    fn guaranteed_profit_scales_with_bankroll() {
        let opp = opportunity(dec!(2.10), dec!(2.05));
        assert_eq!(opp.guaranteed_profit(dec!(100)).unwrap().round_dp(2), dec!(3.60));
    }
}
