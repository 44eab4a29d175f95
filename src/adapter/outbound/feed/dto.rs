//! Wire types of the JSON odds feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{DomainError, EventInfo, MarketSnapshot, MarketType, OddsQuote};

/// Root of a feed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub events: Vec<FeedEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEvent {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub markets: Vec<FeedMarket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedMarket {
    pub id: String,
    #[serde(rename = "type", default)]
    pub market_type: MarketType,
    /// Exhaustive outcome set, when the feed declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<Vec<String>>,
    #[serde(default)]
    pub quotes: Vec<FeedQuote>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedQuote {
    pub bookmaker: String,
    pub outcome: String,
    pub odds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_at: Option<DateTime<Utc>>,
}

impl FeedEvent {
    /// Event summary without markets.
    #[must_use]
    pub fn to_event_info(&self) -> EventInfo {
        let info = EventInfo::new(self.id.as_str(), self.name.as_str(), self.starts_at);
        match &self.sport {
            Some(sport) => info.with_sport(sport.as_str()),
            None => info,
        }
    }

    /// First market of the given type.
    #[must_use]
    pub fn market(&self, market_type: &MarketType) -> Option<&FeedMarket> {
        self.markets.iter().find(|m| &m.market_type == market_type)
    }
}

impl FeedQuote {
    /// Convert to a validated quote.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] for NaN, infinite or `<= 1.0` odds.
    pub fn to_quote(&self) -> Result<OddsQuote, DomainError> {
        let quote = OddsQuote::from_f64(self.bookmaker.as_str(), self.outcome.as_str(), self.odds)?;
        Ok(match self.quoted_at {
            Some(at) => quote.with_quoted_at(at),
            None => quote,
        })
    }
}

impl FeedMarket {
    /// Build the market snapshot for `event`.
    ///
    /// Quotes with invalid odds are dropped with a warning before the
    /// snapshot is assembled. Without an explicit declaration the outcome set
    /// is every label the feed quotes, invalid quotes included, so an outcome
    /// whose quotes were all dropped leaves the market uncovered.
    ///
    /// # Errors
    ///
    /// Returns the snapshot builder's coverage errors.
    pub fn to_snapshot(&self, event: EventInfo) -> Result<MarketSnapshot, DomainError> {
        let builder = MarketSnapshot::builder(event, self.id.as_str(), self.market_type.clone());
        let mut builder = match &self.outcomes {
            Some(outcomes) => builder.declare_outcomes(outcomes.iter().cloned()),
            None => builder.declare_outcomes(self.quotes.iter().map(|q| q.outcome.clone())),
        };

        for raw in &self.quotes {
            match raw.to_quote() {
                Ok(quote) => builder = builder.quote(quote),
                Err(e) => warn!(market_id = %self.id, error = %e, "Dropping invalid quote"),
            }
        }

        builder.build()
    }
}
