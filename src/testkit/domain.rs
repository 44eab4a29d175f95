//! Builders for domain primitives used across tests.
//!
//! Every market built here is quoted at [`before_kickoff`] for an event
//! starting at [`kickoff`].

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{EventInfo, MarketSnapshot, MarketType, OddsQuote};

/// Start time of every test event.
pub fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap()
}

/// Six hours before [`kickoff`].
pub fn before_kickoff() -> DateTime<Utc> {
    kickoff() - Duration::hours(6)
}

/// A soccer event starting at [`kickoff`].
pub fn event(id: &str) -> EventInfo {
    EventInfo::new(id, format!("{id} Home vs {id} Away"), kickoff()).with_sport("soccer_epl")
}

/// An `h2h` snapshot of `event` with `(bookmaker, outcome, odds)` quotes.
///
/// # Panics
///
/// Panics if the quotes leave no outcome to build a snapshot from.
pub fn snapshot(event: EventInfo, quotes: &[(&str, &str, Decimal)]) -> MarketSnapshot {
    MarketSnapshot::builder(event, "h2h", MarketType::MatchWinner)
        .quotes(
            quotes
                .iter()
                .map(|(book, outcome, odds)| OddsQuote::new(*book, *outcome, *odds)),
        )
        .build()
        .expect("test snapshot must be valid")
}

/// Two-way market with two arbitrages: margins 0.0360 and 0.0122.
pub fn two_way_arbitrage(event_id: &str) -> MarketSnapshot {
    snapshot(
        event(event_id),
        &[
            ("BookA", "Home", dec!(2.00)),
            ("BookB", "Home", dec!(2.10)),
            ("BookC", "Away", dec!(2.05)),
        ],
    )
}

/// Two-way market priced exactly at fair value.
pub fn fair_market(event_id: &str) -> MarketSnapshot {
    snapshot(
        event(event_id),
        &[("BookA", "Home", dec!(2.00)), ("BookB", "Away", dec!(2.00))],
    )
}

/// Two-way market with a single arbitrage whose margin is `home`/`away` dependent.
pub fn priced(event_id: &str, home: Decimal, away: Decimal) -> MarketSnapshot {
    snapshot(
        event(event_id),
        &[("BookB", "Home", home), ("BookC", "Away", away)],
    )
}
