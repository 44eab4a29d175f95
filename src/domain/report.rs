//! Results of evaluating one market and of a batch scan.

use serde::{Deserialize, Serialize};

use super::id::{EventId, MarketId};
use super::opportunity::ArbitrageOpportunity;

/// Outcome of running detection over one market snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEvaluation {
    /// Event evaluated.
    pub event_id: EventId,
    /// Market evaluated.
    pub market_id: MarketId,
    /// Accepted opportunities, best first.
    pub opportunities: Vec<ArbitrageOpportunity>,
    /// Complete combinations produced by the enumerator.
    pub explored: usize,
    /// Combinations dropped because a leg had invalid odds.
    pub rejected_invalid: usize,
    /// Enumeration stopped at the combination cap.
    pub truncated: bool,
}

impl MarketEvaluation {
    /// Evaluation that produced nothing, e.g. for a single-outcome market.
    #[must_use]
    pub const fn empty(event_id: EventId, market_id: MarketId) -> Self {
        Self {
            event_id,
            market_id,
            opportunities: Vec::new(),
            explored: 0,
            rejected_invalid: 0,
            truncated: false,
        }
    }
}

/// Ranked opportunities across a batch of events, plus scan accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Opportunities, best first, truncated to the requested limit.
    pub opportunities: Vec<ArbitrageOpportunity>,
    /// Events whose market was evaluated.
    pub events_scanned: usize,
    /// Events that failed (upstream error or malformed snapshot).
    pub events_failed: usize,
    /// Events whose odds fetch exceeded the per-event timeout.
    pub events_timed_out: usize,
    /// Markets whose enumeration hit the combination cap.
    pub truncated_markets: usize,
    /// The overall scan deadline elapsed before every event reported.
    pub deadline_hit: bool,
}

impl ScanReport {
    /// True when no opportunity was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }
}
