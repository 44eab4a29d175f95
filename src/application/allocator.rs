//! Proportional stake allocation.
//!
//! Each selection receives `bankroll * p_i / total_implied_probability`, so
//! every outcome returns the same amount before rounding. Stakes and returns
//! are then rounded independently to the currency unit; the resulting slack
//! is reported, not redistributed.

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::money::{currency_unit, round_to_unit};
use crate::domain::{Amount, ArbitrageOpportunity, DomainError, StakeAllocation, StakePlan};

/// Default number of currency decimals.
pub const DEFAULT_CURRENCY_DECIMALS: u32 = 2;

/// Computes stake plans for opportunities.
#[derive(Debug, Clone)]
pub struct StakeAllocator {
    currency_decimals: u32,
    max_bankroll: Option<Amount>,
}

impl Default for StakeAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_DECIMALS, None)
    }
}

impl StakeAllocator {
    /// Create an allocator rounding to `currency_decimals` places.
    #[must_use]
    pub const fn new(currency_decimals: u32, max_bankroll: Option<Amount>) -> Self {
        Self {
            currency_decimals,
            max_bankroll,
        }
    }

    /// Split `bankroll` across the opportunity's selections.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] when the bankroll is not positive
    /// or above the configured maximum, when the opportunity has fewer than
    /// two selections or a non-positive margin, or when the bankroll is too
    /// large to compute stakes and returns without overflow.
    pub fn allocate(
        &self,
        opportunity: &ArbitrageOpportunity,
        bankroll: Amount,
    ) -> Result<StakePlan, DomainError> {
        if bankroll <= Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "bankroll must be positive, got {bankroll}"
            )));
        }
        if let Some(max) = self.max_bankroll {
            if bankroll > max {
                return Err(DomainError::invalid_input(format!(
                    "bankroll {bankroll} exceeds maximum {max}"
                )));
            }
        }

        let selections = opportunity.selections();
        if selections.len() < 2 {
            return Err(DomainError::invalid_input(format!(
                "opportunity {} has {} selection(s), at least 2 are required",
                opportunity.id(),
                selections.len()
            )));
        }
        let total = opportunity.total_implied_probability();
        if opportunity.profit_margin() <= Decimal::ZERO || total <= Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "opportunity {} has non-positive profit margin {}",
                opportunity.id(),
                opportunity.profit_margin()
            )));
        }

        let dp = self.currency_decimals;
        let mut allocations = Vec::with_capacity(selections.len());
        for selection in selections {
            let share = bankroll
                .checked_mul(selection.implied_probability)
                .and_then(|weighted| weighted.checked_div(total))
                .ok_or_else(|| overflow(bankroll))?;
            let stake = round_to_unit(share, dp);
            let potential_return = stake
                .checked_mul(selection.decimal_odds)
                .ok_or_else(|| overflow(bankroll))?;
            allocations.push(StakeAllocation {
                outcome: selection.outcome.clone(),
                bookmaker: selection.bookmaker.clone(),
                decimal_odds: selection.decimal_odds,
                stake,
                potential_return: round_to_unit(potential_return, dp),
            });
        }

        let total_stake = allocations
            .iter()
            .try_fold(Decimal::ZERO, |sum, a| sum.checked_add(a.stake))
            .ok_or_else(|| overflow(bankroll))?;
        let implied_profit = opportunity
            .guaranteed_profit(total_stake)
            .ok_or_else(|| overflow(bankroll))?;
        let min_return = allocations
            .iter()
            .map(|a| a.potential_return)
            .min()
            .unwrap_or(Decimal::ZERO);
        let max_return = allocations
            .iter()
            .map(|a| a.potential_return)
            .max()
            .unwrap_or(Decimal::ZERO);

        let slack_bound = currency_unit(dp) * Decimal::from(allocations.len());
        if max_return - min_return > slack_bound {
            debug!(
                opportunity_id = %opportunity.id(),
                spread = %(max_return - min_return),
                bound = %slack_bound,
                "Rounding slack above one unit per leg"
            );
        }

        if bankroll < opportunity.min_bankroll() {
            debug!(
                opportunity_id = %opportunity.id(),
                bankroll = %bankroll,
                min_bankroll = %opportunity.min_bankroll(),
                "Bankroll below recommended minimum"
            );
        }

        Ok(StakePlan {
            opportunity_id: opportunity.id(),
            allocations,
            bankroll,
            total_stake,
            implied_profit: round_to_unit(implied_profit, dp),
            locked_profit: min_return - total_stake,
            roi_percent: round_to_unit(opportunity.roi_percent(), 2),
            profit_margin_percent: round_to_unit(
                opportunity.profit_margin() * Decimal::ONE_HUNDRED,
                2,
            ),
        })
    }
}

fn overflow(bankroll: Amount) -> DomainError {
    DomainError::invalid_input(format!("bankroll {bankroll} is too large to allocate"))
}
