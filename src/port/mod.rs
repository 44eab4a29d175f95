//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!            ┌──────────────┐
//!   CLI ───▶ │ ArbitrageDesk│  inbound
//!            └──────┬───────┘
//!                   │
//!            ┌──────▼───────┐
//!            │  Application │
//!            └──┬────┬────┬─┘
//!               ▼    ▼    ▼
//!          Odds    Cache   Clock     outbound
//! ```
//!
//! - [`outbound::MarketOddsProvider`] - odds source, one snapshot per event market
//! - [`outbound::OpportunityCache`] - optional TTL side channel
//! - [`outbound::Clock`] - source of `now` for expiry decisions
//! - [`inbound::ArbitrageDesk`] - list opportunities, detect per event, compute stakes

pub mod inbound;
pub mod outbound;
