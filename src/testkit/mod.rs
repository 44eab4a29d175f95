//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`] - [`FixedClock`](clock::FixedClock), a manually driven time source.
//! - [`provider`] - [`ScriptedProvider`](provider::ScriptedProvider), an odds
//!   provider with scripted snapshots, delays and failures.
//! - [`domain`] - Builders for events, snapshots and the reference markets.

pub mod clock;
pub mod domain;
pub mod provider;
