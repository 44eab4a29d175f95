//! Surebet - sports-odds arbitrage detection and stake allocation.
//!
//! An arbitrage ("surebet") exists when backing every outcome of a market,
//! each at the best available bookmaker price, costs less than the payout:
//! the implied probabilities `1 / odds` of the chosen prices sum below 1.
//!
//! # Architecture
//!
//! - [`domain`] - Value types: quotes, market snapshots, opportunities, stake plans
//! - [`port`] - Traits at the seams: odds provider, cache, clock, arbitrage desk
//! - [`application`] - Enumeration, evaluation, ranking, allocation, batch scans
//! - [`adapter`] - JSON odds feed, in-memory cache, system clock, CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use surebet::application::ArbitrageDetector;
//! use surebet::domain::{EventInfo, MarketSnapshot, MarketType, OddsQuote};
//! use rust_decimal_macros::dec;
//!
//! let event = EventInfo::new("evt-1", "Home FC vs Away FC", chrono::Utc::now());
//! let snapshot = MarketSnapshot::builder(event, "h2h", MarketType::MatchWinner)
//!     .quote(OddsQuote::new("BookB", "Home", dec!(2.10)))
//!     .quote(OddsQuote::new("BookC", "Away", dec!(2.05)))
//!     .build()?;
//! let evaluation = ArbitrageDetector::default().detect(&snapshot, chrono::Utc::now());
//! # Ok::<(), surebet::domain::DomainError>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
