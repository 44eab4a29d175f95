//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod cache;
pub mod clock;
pub mod odds;

pub use cache::{cache_key, OpportunityCache};
pub use clock::Clock;
pub use odds::{EventFilter, MarketOddsProvider};
