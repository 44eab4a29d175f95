//! Stake split for an opportunity and a caller-chosen bankroll.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{Bookmaker, OpportunityId};
use super::money::{Amount, Odds};

/// Stake placed on one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeAllocation {
    /// Outcome backed.
    pub outcome: String,
    /// Bookmaker taking the bet.
    pub bookmaker: Bookmaker,
    /// Decimal odds of the selection.
    pub decimal_odds: Odds,
    /// Stake, rounded to the currency unit.
    pub stake: Amount,
    /// `stake * decimal_odds`, rounded to the currency unit.
    pub potential_return: Amount,
}

/// Full stake plan for one opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePlan {
    /// Opportunity the plan was computed for.
    pub opportunity_id: OpportunityId,
    /// Per-selection stakes, in the opportunity's selection order.
    pub allocations: Vec<StakeAllocation>,
    /// Bankroll requested by the caller.
    pub bankroll: Amount,
    /// Sum of the rounded stakes.
    pub total_stake: Amount,
    /// `total_stake * profit_margin`, rounded.
    pub implied_profit: Amount,
    /// Smallest rounded return minus `total_stake`.
    pub locked_profit: Amount,
    /// ROI of the opportunity, in percent.
    pub roi_percent: Decimal,
    /// Profit margin, in percent.
    pub profit_margin_percent: Decimal,
}

impl StakePlan {
    /// Smallest potential return across allocations.
    #[must_use]
    pub fn min_return(&self) -> Amount {
        self.allocations
            .iter()
            .map(|a| a.potential_return)
            .min()
            .unwrap_or(Decimal::ZERO)
    }

    /// Largest minus smallest potential return.
    #[must_use]
    pub fn return_spread(&self) -> Amount {
        let max = self
            .allocations
            .iter()
            .map(|a| a.potential_return)
            .max()
            .unwrap_or(Decimal::ZERO);
        max - self.min_return()
    }
}
