//! Branch-and-bound enumeration of outcome/bookmaker combinations.
//!
//! The search walks outcomes in lexical order and, within each outcome,
//! tries quotes from best price to worst. A partial pick is abandoned once
//! its implied-probability sum plus the cheapest possible completion exceeds
//! `1 - min_profit_margin`. Because quotes at one depth are ordered by
//! ascending implied probability, the first quote that breaks the bound cuts
//! off every remaining quote at that depth.
//!
//! Enumeration is lazy and iterative: [`Combinations`] keeps an explicit
//! stack instead of recursing, and stops after `max_combinations` complete
//! combinations, reporting the cut through [`Combinations::is_truncated`].

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::domain::{Combination, MarketSnapshot, OddsQuote, Probability};

/// Default cap on combinations produced per market.
pub const DEFAULT_MAX_COMBINATIONS: usize = 10_000;

/// Bounds of a single enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratorConfig {
    /// Minimum profit margin a combination must be able to reach.
    pub min_profit_margin: Decimal,
    /// Maximum number of complete combinations produced.
    pub max_combinations: usize,
    /// Keep only the N best prices per outcome.
    pub max_quotes_per_outcome: Option<usize>,
}

impl Default for EnumeratorConfig {
    fn default() -> Self {
        Self {
            min_profit_margin: Decimal::new(1, 2),
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            max_quotes_per_outcome: None,
        }
    }
}

/// Generates candidate combinations from a [`MarketSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct CombinationEnumerator {
    config: EnumeratorConfig,
}

impl CombinationEnumerator {
    /// Create an enumerator with the given bounds.
    #[must_use]
    pub const fn new(config: EnumeratorConfig) -> Self {
        Self { config }
    }

    /// Get the enumeration bounds.
    #[must_use]
    pub const fn config(&self) -> &EnumeratorConfig {
        &self.config
    }

    /// Lazily enumerate combinations of `snapshot`.
    ///
    /// Markets with fewer than two outcomes yield nothing.
    #[must_use]
    pub fn enumerate<'a>(&self, snapshot: &'a MarketSnapshot) -> Combinations<'a> {
        Combinations::new(snapshot, &self.config)
    }
}

/// Lazy iterator over the combinations of one snapshot.
#[derive(Debug)]
pub struct Combinations<'a> {
    /// Candidate quotes per depth with their contribution to the sum.
    levels: Vec<Vec<(&'a OddsQuote, Probability)>>,
    /// `suffix_min[d]`: cheapest completion from depth `d` onwards.
    suffix_min: Vec<Probability>,
    /// `partial[d]`: sum of the picks above depth `d`.
    partial: Vec<Probability>,
    /// Next candidate index per depth.
    cursor: Vec<usize>,
    /// Picked index per fixed depth.
    chosen: Vec<usize>,
    bound: Probability,
    max_combinations: usize,
    produced: usize,
    pruned: usize,
    truncated: bool,
    done: bool,
}

/// Contribution of a quote to the running sum.
///
/// Non-positive odds count as zero so that such combinations surface to the
/// evaluator, which rejects them as invalid.
fn contribution(quote: &OddsQuote) -> Probability {
    quote.implied_probability().unwrap_or(Decimal::ZERO)
}

impl<'a> Combinations<'a> {
    fn new(snapshot: &'a MarketSnapshot, config: &EnumeratorConfig) -> Self {
        let levels: Vec<Vec<(&'a OddsQuote, Probability)>> = snapshot
            .outcomes()
            .values()
            .map(|quotes| {
                let mut level: Vec<(&OddsQuote, Probability)> =
                    quotes.iter().map(|q| (q, contribution(q))).collect();
                level.sort_by(|(qa, pa), (qb, pb)| {
                    pa.cmp(pb)
                        .then_with(|| qb.decimal_odds().cmp(&qa.decimal_odds()))
                        .then_with(|| qa.bookmaker().cmp(qb.bookmaker()))
                });
                if let Some(limit) = config.max_quotes_per_outcome {
                    level.truncate(limit);
                }
                level
            })
            .collect();

        let depth = levels.len();
        let mut suffix_min = vec![Decimal::ZERO; depth + 1];
        for d in (0..depth).rev() {
            let cheapest = levels[d].first().map_or(Decimal::ZERO, |(_, p)| *p);
            suffix_min[d] = suffix_min[d + 1] + cheapest;
        }

        let done = depth < 2 || levels.iter().any(Vec::is_empty) || config.max_combinations == 0;

        Self {
            levels,
            suffix_min,
            partial: vec![Decimal::ZERO; depth + 1],
            cursor: vec![0; depth],
            chosen: Vec::with_capacity(depth),
            bound: Decimal::ONE - config.min_profit_margin,
            max_combinations: config.max_combinations,
            produced: 0,
            pruned: 0,
            truncated: false,
            done,
        }
    }

    /// Complete combinations produced so far.
    #[must_use]
    pub const fn produced(&self) -> usize {
        self.produced
    }

    /// Branches cut off by the bound so far.
    #[must_use]
    pub const fn pruned(&self) -> usize {
        self.pruned
    }

    /// True once enumeration stopped at the combination cap with more
    /// combinations left to explore.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn legs_with(&self, last: &'a OddsQuote) -> Vec<&'a OddsQuote> {
        let mut legs: Vec<&'a OddsQuote> = self
            .chosen
            .iter()
            .enumerate()
            .map(|(depth, &index)| self.levels[depth][index].0)
            .collect();
        legs.push(last);
        legs
    }
}

impl<'a> Iterator for Combinations<'a> {
    type Item = Combination<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let depth = self.chosen.len();
            let index = self.cursor[depth];

            let Some(&(quote, probability)) = self.levels[depth].get(index) else {
                // Level exhausted: backtrack.
                self.cursor[depth] = 0;
                if self.chosen.pop().is_none() {
                    self.done = true;
                }
                continue;
            };

            let sum = self.partial[depth] + probability;
            if (sum + self.suffix_min[depth + 1]).cmp(&self.bound) == Ordering::Greater {
                self.pruned += 1;
                self.cursor[depth] = self.levels[depth].len();
                continue;
            }
            self.cursor[depth] = index + 1;

            if depth + 1 < self.levels.len() {
                self.chosen.push(index);
                self.partial[depth + 1] = sum;
                continue;
            }

            if self.produced == self.max_combinations {
                self.truncated = true;
                self.done = true;
                return None;
            }
            self.produced += 1;
            return Some(Combination::new(self.legs_with(quote), sum));
        }
        None
    }
}
