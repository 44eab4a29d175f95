//! A single bookmaker price for one outcome.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::Bookmaker;
use super::money::{Odds, Probability};

/// Price quoted by one bookmaker for one outcome, in decimal odds.
///
/// `OddsQuote::new` does not validate so that the evaluator can observe and
/// reject bad prices; use [`OddsQuote::try_new`] or [`OddsQuote::from_f64`]
/// at ingestion boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsQuote {
    bookmaker: Bookmaker,
    outcome: String,
    decimal_odds: Odds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quoted_at: Option<DateTime<Utc>>,
}

impl OddsQuote {
    /// Create a quote without validating the odds.
    pub fn new(
        bookmaker: impl Into<Bookmaker>,
        outcome: impl Into<String>,
        decimal_odds: Odds,
    ) -> Self {
        Self {
            bookmaker: bookmaker.into(),
            outcome: outcome.into(),
            decimal_odds,
            quoted_at: None,
        }
    }

    /// Create a quote, rejecting odds that are not strictly greater than 1.0.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] when `decimal_odds <= 1.0`.
    pub fn try_new(
        bookmaker: impl Into<Bookmaker>,
        outcome: impl Into<String>,
        decimal_odds: Odds,
    ) -> Result<Self, DomainError> {
        let quote = Self::new(bookmaker, outcome, decimal_odds);
        quote.validate()?;
        Ok(quote)
    }

    /// Create a quote from a floating-point price.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] when the value is NaN, infinite,
    /// or not strictly greater than 1.0.
    pub fn from_f64(
        bookmaker: impl Into<Bookmaker>,
        outcome: impl Into<String>,
        decimal_odds: f64,
    ) -> Result<Self, DomainError> {
        let bookmaker = bookmaker.into();
        let outcome = outcome.into();
        if !decimal_odds.is_finite() {
            return Err(DomainError::InvalidOdds {
                bookmaker: bookmaker.to_string(),
                outcome,
                odds: decimal_odds.to_string(),
            });
        }
        match Decimal::try_from(decimal_odds) {
            Ok(odds) => Self::try_new(bookmaker, outcome, odds),
            Err(_) => Err(DomainError::InvalidOdds {
                bookmaker: bookmaker.to_string(),
                outcome,
                odds: decimal_odds.to_string(),
            }),
        }
    }

    /// Attach the time the bookmaker published this price.
    #[must_use]
    pub fn with_quoted_at(mut self, quoted_at: DateTime<Utc>) -> Self {
        self.quoted_at = Some(quoted_at);
        self
    }

    /// Get the bookmaker.
    #[must_use]
    pub const fn bookmaker(&self) -> &Bookmaker {
        &self.bookmaker
    }

    /// Get the outcome label.
    #[must_use]
    pub fn outcome(&self) -> &str {
        &self.outcome
    }

    /// Get the decimal odds.
    #[must_use]
    pub const fn decimal_odds(&self) -> Odds {
        self.decimal_odds
    }

    /// Get the publication time, if the provider reported one.
    #[must_use]
    pub const fn quoted_at(&self) -> Option<DateTime<Utc>> {
        self.quoted_at
    }

    /// Check the odds invariant (`decimal_odds > 1.0`).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] when the invariant does not hold.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.decimal_odds <= Decimal::ONE {
            return Err(DomainError::InvalidOdds {
                bookmaker: self.bookmaker.to_string(),
                outcome: self.outcome.clone(),
                odds: self.decimal_odds.to_string(),
            });
        }
        Ok(())
    }

    /// Implied probability `1 / decimal_odds`.
    ///
    /// Returns `None` when the odds are zero or negative.
    #[must_use]
    pub fn implied_probability(&self) -> Option<Probability> {
        if self.decimal_odds <= Decimal::ZERO {
            return None;
        }
        Decimal::ONE.checked_div(self.decimal_odds)
    }

    /// True when the quote carries a timestamp older than `cutoff`.
    ///
    /// Quotes without a timestamp are never considered stale.
    #[must_use]
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.quoted_at.is_some_and(|at| at < cutoff)
    }
}
