//! Consumer-facing arbitrage operations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    Amount, ArbitrageOpportunity, EventId, MarketEvaluation, MarketType, OpportunityId,
    ScanReport, StakePlan,
};
use crate::error::Result;

/// Parameters of "list opportunities". Unset fields use configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpportunityQuery {
    /// Minimum accepted profit margin (fraction, e.g. `0.01`).
    pub min_profit_margin: Option<Decimal>,
    /// Sport filter.
    pub sport: Option<String>,
    /// Maximum number of opportunities returned.
    pub limit: Option<usize>,
    /// Market type to scan.
    pub market_type: Option<MarketType>,
}

/// Parameters of "detect for event".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    /// Event to evaluate.
    pub event_id: EventId,
    /// Market type to evaluate.
    pub market_type: Option<MarketType>,
    /// Minimum accepted profit margin.
    pub min_profit_margin: Option<Decimal>,
}

impl EventQuery {
    /// Query an event with configured defaults.
    pub fn new(event_id: impl Into<EventId>) -> Self {
        Self {
            event_id: event_id.into(),
            market_type: None,
            min_profit_margin: None,
        }
    }
}

/// Operations exposed to inbound adapters.
#[async_trait]
pub trait ArbitrageDesk: Send + Sync {
    /// Scan upcoming events and return ranked opportunities.
    ///
    /// Per-event failures are absorbed into the report, never returned.
    async fn list_opportunities(&self, query: &OpportunityQuery) -> Result<ScanReport>;

    /// Evaluate a single event's market.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown event, upstream errors as is. An event
    /// without the market yields an empty evaluation.
    async fn detect_for_event(&self, query: &EventQuery) -> Result<MarketEvaluation>;

    /// Look up an active opportunity seen by a previous scan.
    async fn find_opportunity(&self, id: &OpportunityId) -> Result<Option<ArbitrageOpportunity>>;

    /// Stake plan for a known opportunity.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `InvalidInput` for a bad bankroll.
    async fn compute_stakes(&self, id: &OpportunityId, bankroll: Amount) -> Result<StakePlan>;
}
