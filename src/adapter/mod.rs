//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Command-line interface driving the arbitrage desk
//! - [`outbound`] - JSON odds feed, in-memory cache and system clock

pub mod inbound;
pub mod outbound;
