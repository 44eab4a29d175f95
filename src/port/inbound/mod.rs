//! Inbound (driving) ports consumed by inbound adapters such as the CLI.

pub mod desk;

pub use desk::{ArbitrageDesk, EventQuery, OpportunityQuery};
