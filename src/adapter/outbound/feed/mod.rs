//! Odds feed read from a JSON document.
//!
//! The document lists events with their markets and bookmaker quotes:
//!
//! ```json
//! {"events":[{"id":"evt-1","name":"Home vs Away","sport":"soccer_epl",
//!   "starts_at":"2026-05-01T18:00:00Z",
//!   "markets":[{"id":"m-1","type":"h2h","outcomes":["Home","Away"],
//!     "quotes":[{"bookmaker":"BookA","outcome":"Home","odds":2.1}]}]}]}
//! ```

pub mod dto;
mod provider;

pub use provider::JsonFeedProvider;
