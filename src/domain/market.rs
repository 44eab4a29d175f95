//! Market types quoted by odds providers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of betting market, keyed the way odds providers name them.
///
/// Unknown keys are preserved as [`MarketType::Custom`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarketType {
    /// Head-to-head winner market (`h2h`), two- or three-way.
    #[default]
    MatchWinner,
    /// Point spread / handicap market (`spreads`).
    Handicap,
    /// Totals market (`totals`).
    OverUnder,
    /// Any other provider market key.
    Custom(String),
}

impl MarketType {
    /// Provider key (`h2h`, `spreads`, `totals`, or the custom key).
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::MatchWinner => "h2h",
            Self::Handicap => "spreads",
            Self::OverUnder => "totals",
            Self::Custom(key) => key,
        }
    }

    /// Storage code used when opportunities are recorded.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MatchWinner => "MATCH_WINNER",
            Self::Handicap => "HANDICAP",
            Self::OverUnder => "OVER_UNDER",
            Self::Custom(_) => "CUSTOM",
        }
    }

    /// Human-readable market name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::MatchWinner => "Match Winner",
            Self::Handicap => "Handicap",
            Self::OverUnder => "Over/Under",
            Self::Custom(key) => key,
        }
    }

    /// Number of outcomes a market of this type must declare, when fixed.
    ///
    /// Match-winner markets are two-way or three-way depending on the sport,
    /// so they return `None` and rely on the provider's declaration.
    #[must_use]
    pub const fn fixed_outcome_count(&self) -> Option<usize> {
        match self {
            Self::Handicap | Self::OverUnder => Some(2),
            Self::MatchWinner | Self::Custom(_) => None,
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<&str> for MarketType {
    fn from(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "h2h" | "match_winner" => Self::MatchWinner,
            "spreads" | "handicap" => Self::Handicap,
            "totals" | "over_under" => Self::OverUnder,
            _ => Self::Custom(key.trim().to_string()),
        }
    }
}

impl From<String> for MarketType {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<MarketType> for String {
    fn from(market_type: MarketType) -> Self {
        market_type.key().to_string()
    }
}

impl FromStr for MarketType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
