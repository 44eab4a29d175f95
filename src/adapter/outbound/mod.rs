//! Outbound adapters (driven side).

pub mod clock;
pub mod feed;
pub mod memory;

pub use clock::SystemClock;
pub use feed::JsonFeedProvider;
pub use memory::MemoryOpportunityCache;
