//! Stake allocation configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::allocator::DEFAULT_CURRENCY_DECIMALS;
use crate::application::StakeAllocator;

/// Largest accepted `currency_decimals`.
pub const MAX_CURRENCY_DECIMALS: u32 = 8;

/// `[stakes]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StakesConfig {
    /// Decimal places stakes and returns are rounded to.
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u32,
    /// Largest bankroll accepted by stake computation.
    #[serde(default)]
    pub max_bankroll: Option<Decimal>,
}

const fn default_currency_decimals() -> u32 {
    DEFAULT_CURRENCY_DECIMALS
}

impl Default for StakesConfig {
    fn default() -> Self {
        Self {
            currency_decimals: default_currency_decimals(),
            max_bankroll: None,
        }
    }
}

impl From<&StakesConfig> for StakeAllocator {
    fn from(config: &StakesConfig) -> Self {
        Self::new(config.currency_decimals, config.max_bankroll)
    }
}
