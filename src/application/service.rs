//! Application service backing the inbound [`ArbitrageDesk`] port.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{
    Amount, ArbitrageOpportunity, MarketEvaluation, MarketType, OpportunityId, ScanReport,
    StakePlan,
};
use crate::error::{Error, Result};
use crate::port::inbound::{ArbitrageDesk, EventQuery, OpportunityQuery};
use crate::port::outbound::Clock;

use super::allocator::StakeAllocator;
use super::detection::DetectionPolicy;
use super::ranker::DEFAULT_LIMIT;
use super::scanner::{ArbitrageScanner, ScanRequest};
use super::tracker::OpportunityTracker;

/// Values used when a query leaves a parameter unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskDefaults {
    /// Detection parameters.
    pub policy: DetectionPolicy,
    /// Opportunities returned per scan.
    pub limit: usize,
    /// Market type scanned.
    pub market_type: MarketType,
}

impl Default for DeskDefaults {
    fn default() -> Self {
        Self {
            policy: DetectionPolicy::default(),
            limit: DEFAULT_LIMIT,
            market_type: MarketType::default(),
        }
    }
}

/// Scans, single-event detection and stake computation behind one facade.
pub struct ArbitrageService {
    scanner: ArbitrageScanner,
    tracker: Arc<OpportunityTracker>,
    allocator: StakeAllocator,
    clock: Arc<dyn Clock>,
    defaults: DeskDefaults,
}

impl ArbitrageService {
    /// Create the service. `tracker` must be the one the scanner refreshes.
    pub fn new(
        scanner: ArbitrageScanner,
        tracker: Arc<OpportunityTracker>,
        allocator: StakeAllocator,
        clock: Arc<dyn Clock>,
        defaults: DeskDefaults,
    ) -> Self {
        Self {
            scanner,
            tracker,
            allocator,
            clock,
            defaults,
        }
    }

    /// Get the query defaults.
    #[must_use]
    pub const fn defaults(&self) -> &DeskDefaults {
        &self.defaults
    }

    /// Stake plan for an opportunity the caller already holds.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a bad bankroll or an opportunity without a positive margin.
    pub fn plan_stakes(
        &self,
        opportunity: &ArbitrageOpportunity,
        bankroll: Amount,
    ) -> Result<StakePlan> {
        Ok(self.allocator.allocate(opportunity, bankroll)?)
    }

    fn policy_for(&self, min_profit_margin: Option<Decimal>) -> DetectionPolicy {
        match min_profit_margin {
            Some(margin) => self.defaults.policy.clone().with_min_profit_margin(margin),
            None => self.defaults.policy.clone(),
        }
    }
}

#[async_trait]
impl ArbitrageDesk for ArbitrageService {
    async fn list_opportunities(&self, query: &OpportunityQuery) -> Result<ScanReport> {
        let request = ScanRequest {
            sport: query.sport.clone(),
            limit: query.limit.unwrap_or(self.defaults.limit),
            market_type: query
                .market_type
                .clone()
                .unwrap_or_else(|| self.defaults.market_type.clone()),
            policy: self.policy_for(query.min_profit_margin),
        };

        let pruned = self.tracker.prune_expired(self.clock.now());
        if pruned > 0 {
            debug!(count = pruned, "Pruned expired opportunities");
        }

        Ok(self.scanner.scan(&request).await)
    }

    async fn detect_for_event(&self, query: &EventQuery) -> Result<MarketEvaluation> {
        let event = self
            .scanner
            .provider()
            .find_event(&query.event_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("event {}", query.event_id)))?;

        let market_type = query
            .market_type
            .clone()
            .unwrap_or_else(|| self.defaults.market_type.clone());
        let policy = self.policy_for(query.min_profit_margin);

        let evaluation = self
            .scanner
            .evaluate_event(&event, &market_type, &policy)
            .await?;
        info!(
            event_id = %event.id,
            market_id = %evaluation.market_id,
            count = evaluation.opportunities.len(),
            "Event evaluated"
        );
        Ok(evaluation)
    }

    async fn find_opportunity(&self, id: &OpportunityId) -> Result<Option<ArbitrageOpportunity>> {
        let now = self.clock.now();
        Ok(self.tracker.get(id).filter(|opportunity| opportunity.is_active(now)))
    }

    async fn compute_stakes(&self, id: &OpportunityId, bankroll: Amount) -> Result<StakePlan> {
        let opportunity = self
            .find_opportunity(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("opportunity {id}")))?;
        self.plan_stakes(&opportunity, bankroll)
    }
}
