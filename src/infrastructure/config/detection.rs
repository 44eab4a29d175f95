//! Detection configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::enumerator::DEFAULT_MAX_COMBINATIONS;
use crate::application::evaluator::DEFAULT_MIN_BANKROLL;
use crate::application::DetectionPolicy;

/// `[detection]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Minimum profit margin an opportunity must reach (0.01 = 1%).
    #[serde(default = "default_min_profit_margin")]
    pub min_profit_margin: Decimal,
    /// Complete combinations explored per market before giving up.
    #[serde(default = "default_max_combinations")]
    pub max_combinations: usize,
    /// Keep only the best N prices per outcome.
    #[serde(default)]
    pub max_quotes_per_outcome: Option<usize>,
    /// Drop quotes older than this many seconds.
    #[serde(default)]
    pub max_quote_age_secs: Option<u64>,
    /// Bankroll recommended on every opportunity.
    #[serde(default = "default_min_bankroll")]
    pub min_bankroll: Decimal,
}

fn default_min_profit_margin() -> Decimal {
    Decimal::new(1, 2) // 1%
}

const fn default_max_combinations() -> usize {
    DEFAULT_MAX_COMBINATIONS
}

fn default_min_bankroll() -> Decimal {
    DEFAULT_MIN_BANKROLL
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_profit_margin: default_min_profit_margin(),
            max_combinations: default_max_combinations(),
            max_quotes_per_outcome: None,
            max_quote_age_secs: None,
            min_bankroll: default_min_bankroll(),
        }
    }
}

impl From<&DetectionConfig> for DetectionPolicy {
    fn from(config: &DetectionConfig) -> Self {
        Self {
            min_profit_margin: config.min_profit_margin,
            max_combinations: config.max_combinations,
            max_quotes_per_outcome: config.max_quotes_per_outcome,
            max_quote_age: config
                .max_quote_age_secs
                .map(|secs| chrono::Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))),
            min_bankroll: config.min_bankroll,
        }
    }
}
