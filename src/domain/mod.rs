//! Bookmaker-agnostic domain types.
//!
//! Everything here is a value type: quotes, market snapshots, combinations,
//! opportunities and stake plans. No I/O, no shared mutable state.

pub mod combination;
pub mod error;
pub mod event;
pub mod id;
pub mod market;
pub mod money;
pub mod odds;
pub mod opportunity;
pub mod report;
pub mod snapshot;
pub mod stake;

pub use combination::Combination;
pub use error::DomainError;
pub use event::EventInfo;
pub use id::{Bookmaker, EventId, MarketId, OpportunityId};
pub use market::MarketType;
pub use money::{Amount, Odds, Probability};
pub use odds::OddsQuote;
pub use opportunity::{ArbitrageOpportunity, OpportunityStatus, Selection};
pub use report::{MarketEvaluation, ScanReport};
pub use snapshot::{MarketSnapshot, SnapshotBuilder};
pub use stake::{StakeAllocation, StakePlan};
