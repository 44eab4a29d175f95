//! Scoring of enumerated combinations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Amount, ArbitrageOpportunity, Combination, DomainError, MarketSnapshot, Selection,
};

/// Default minimum bankroll attached to opportunities.
pub const DEFAULT_MIN_BANKROLL: Decimal = Decimal::TEN;

/// Turns combinations into opportunities when their margin clears the threshold.
#[derive(Debug, Clone)]
pub struct ArbitrageEvaluator {
    min_profit_margin: Decimal,
    min_bankroll: Amount,
}

impl Default for ArbitrageEvaluator {
    fn default() -> Self {
        Self::new(Decimal::new(1, 2), DEFAULT_MIN_BANKROLL)
    }
}

impl ArbitrageEvaluator {
    /// Create an evaluator with a margin threshold and a minimum bankroll.
    #[must_use]
    pub const fn new(min_profit_margin: Decimal, min_bankroll: Amount) -> Self {
        Self {
            min_profit_margin,
            min_bankroll,
        }
    }

    /// Get the minimum accepted margin.
    #[must_use]
    pub const fn min_profit_margin(&self) -> Decimal {
        self.min_profit_margin
    }

    /// Score `combination` of `snapshot`.
    ///
    /// Accepted iff `profit_margin > 0` and `profit_margin >= min_profit_margin`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidOdds`] if any leg has odds `<= 1.0`
    /// - [`DomainError::BelowThreshold`] if the margin does not clear the threshold
    pub fn evaluate(
        &self,
        snapshot: &MarketSnapshot,
        combination: &Combination<'_>,
        detected_at: DateTime<Utc>,
    ) -> Result<ArbitrageOpportunity, DomainError> {
        let mut selections = Vec::with_capacity(combination.len());
        for quote in combination.legs() {
            quote.validate()?;
            let implied_probability =
                quote
                    .implied_probability()
                    .ok_or_else(|| DomainError::InvalidOdds {
                        bookmaker: quote.bookmaker().to_string(),
                        outcome: quote.outcome().to_string(),
                        odds: quote.decimal_odds().to_string(),
                    })?;
            selections.push(Selection {
                outcome: quote.outcome().to_string(),
                bookmaker: quote.bookmaker().clone(),
                decimal_odds: quote.decimal_odds(),
                implied_probability,
            });
        }

        let total: Decimal = selections.iter().map(|s| s.implied_probability).sum();
        let margin = Decimal::ONE - total;
        if margin <= Decimal::ZERO || margin < self.min_profit_margin {
            return Err(DomainError::BelowThreshold {
                margin,
                threshold: self.min_profit_margin,
            });
        }

        ArbitrageOpportunity::from_selections(snapshot, selections, self.min_bankroll, detected_at)
    }
}
