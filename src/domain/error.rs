//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and by the detection
//! and allocation components when a domain invariant is violated.
//!
//! # Examples
//!
//! ```
//! use surebet::domain::error::DomainError;
//! use surebet::domain::odds::OddsQuote;
//! use rust_decimal_macros::dec;
//!
//! let result = OddsQuote::try_new("BookA", "Home", dec!(1.00));
//! assert!(matches!(result, Err(DomainError::InvalidOdds { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Decimal odds must be finite and strictly greater than 1.0.
    #[error("invalid odds {odds} from {bookmaker} for {outcome}: must be finite and > 1.0")]
    InvalidOdds {
        /// Bookmaker quoting the price.
        bookmaker: String,
        /// Outcome the price was quoted for.
        outcome: String,
        /// The offending value, rendered as text so non-finite floats survive.
        odds: String,
    },

    /// A market needs at least two outcomes to be arbitraged.
    #[error("market has {count} outcome(s), at least 2 are required")]
    InsufficientOutcomes {
        /// Number of outcomes the snapshot declares.
        count: usize,
    },

    /// A declared outcome has no quote, so no combination can cover it.
    #[error("declared outcome {outcome} has no quotes")]
    UncoveredOutcome {
        /// The uncovered outcome.
        outcome: String,
    },

    /// A quote references an outcome outside the declared exhaustive set.
    #[error("outcome {outcome} is not declared for this market")]
    UndeclaredOutcome {
        /// The unexpected outcome.
        outcome: String,
    },

    /// The market type fixes the outcome count and the declaration disagrees.
    #[error("market type expects {expected} outcomes, {actual} declared")]
    OutcomeCountMismatch {
        /// Outcome count the market type requires.
        expected: usize,
        /// Outcome count actually declared.
        actual: usize,
    },

    /// A combination's margin is below the configured threshold.
    #[error("profit margin {margin} is below threshold {threshold}")]
    BelowThreshold {
        /// Margin of the combination.
        margin: Decimal,
        /// Minimum accepted margin.
        threshold: Decimal,
    },

    /// Caller misuse: rejected before any computation takes place.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl DomainError {
    /// Build an [`InvalidInput`](Self::InvalidInput) error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
