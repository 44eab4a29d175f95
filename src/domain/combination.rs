//! One candidate pick per outcome of a market.

use super::money::Probability;
use super::odds::OddsQuote;

/// A full choice of exactly one quote per declared outcome.
///
/// Legs borrow from the [`MarketSnapshot`](super::snapshot::MarketSnapshot)
/// they were enumerated from and follow its lexical outcome order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination<'a> {
    legs: Vec<&'a OddsQuote>,
    total_implied_probability: Probability,
}

impl<'a> Combination<'a> {
    /// Create a combination from its legs and precomputed implied total.
    #[must_use]
    pub fn new(legs: Vec<&'a OddsQuote>, total_implied_probability: Probability) -> Self {
        Self {
            legs,
            total_implied_probability,
        }
    }

    /// Chosen quotes, one per outcome.
    #[must_use]
    pub fn legs(&self) -> &[&'a OddsQuote] {
        &self.legs
    }

    /// Sum of the legs' implied probabilities as computed during enumeration.
    ///
    /// Quotes with non-positive odds contribute zero here; the evaluator
    /// rejects such combinations.
    #[must_use]
    pub const fn total_implied_probability(&self) -> Probability {
        self.total_implied_probability
    }

    /// Number of legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// True when the combination has no legs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}
