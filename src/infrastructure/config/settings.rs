//! Application configuration loading and validation.
//!
//! Every section is optional; an empty file yields the defaults.
//!
//! # Example
//!
//! ```no_run
//! use surebet::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("surebet.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::cache::CacheConfig;
use super::detection::DetectionConfig;
use super::logging::{LoggingConfig, LOG_FORMATS};
use super::scan::ScanConfig;
use super::stakes::{StakesConfig, MAX_CURRENCY_DECIMALS};
use crate::application::{DeskDefaults, DetectionPolicy, ScanSettings, StakeAllocator};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Margin threshold and enumeration limits.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Concurrency, timeouts and defaults of batch scans.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Stake rounding and bankroll limits.
    #[serde(default)]
    pub stakes: StakesConfig,

    /// In-memory opportunity cache.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` when given, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    #[allow(clippy::result_large_err)]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(invalid("logging.format", "must be \"pretty\" or \"json\""));
        }

        let detection = &self.detection;
        if detection.min_profit_margin < Decimal::ZERO
            || detection.min_profit_margin >= Decimal::ONE
        {
            return Err(invalid(
                "detection.min_profit_margin",
                "must be >= 0 and < 1",
            ));
        }
        if detection.max_combinations == 0 {
            return Err(invalid(
                "detection.max_combinations",
                "must be greater than 0",
            ));
        }
        if detection.max_quotes_per_outcome == Some(0) {
            return Err(invalid(
                "detection.max_quotes_per_outcome",
                "must be greater than 0",
            ));
        }
        if detection.max_quote_age_secs == Some(0) {
            return Err(invalid(
                "detection.max_quote_age_secs",
                "must be greater than 0",
            ));
        }
        if detection.min_bankroll <= Decimal::ZERO {
            return Err(invalid("detection.min_bankroll", "must be greater than 0"));
        }

        let scan = &self.scan;
        if scan.workers == 0 {
            return Err(invalid("scan.workers", "must be greater than 0"));
        }
        if scan.event_timeout_ms == 0 {
            return Err(invalid("scan.event_timeout_ms", "must be greater than 0"));
        }
        if scan.deadline_ms == 0 {
            return Err(invalid("scan.deadline_ms", "must be greater than 0"));
        }
        if scan.deadline_ms < scan.event_timeout_ms {
            return Err(invalid("scan.deadline_ms", "must be >= event_timeout_ms"));
        }
        if scan.default_limit == 0 {
            return Err(invalid("scan.default_limit", "must be greater than 0"));
        }
        if scan.max_events == Some(0) {
            return Err(invalid("scan.max_events", "must be greater than 0"));
        }

        if self.stakes.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(invalid("stakes.currency_decimals", "must be <= 8"));
        }
        if self
            .stakes
            .max_bankroll
            .is_some_and(|max| max <= Decimal::ZERO)
        {
            return Err(invalid("stakes.max_bankroll", "must be greater than 0"));
        }

        if self.cache.enabled {
            if self.cache.ttl_secs == 0 {
                return Err(invalid("cache.ttl_secs", "must be greater than 0"));
            }
            if self.cache.max_entries == 0 {
                return Err(invalid("cache.max_entries", "must be greater than 0"));
            }
        }

        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Detection parameters from `[detection]`.
    #[must_use]
    pub fn detection_policy(&self) -> DetectionPolicy {
        DetectionPolicy::from(&self.detection)
    }

    /// Scanner limits from `[scan]` and `[cache]`.
    #[must_use]
    pub fn scan_settings(&self) -> ScanSettings {
        self.scan.settings(self.cache.ttl())
    }

    /// Stake allocator from `[stakes]`.
    #[must_use]
    pub fn stake_allocator(&self) -> StakeAllocator {
        StakeAllocator::from(&self.stakes)
    }

    /// Query defaults of the arbitrage desk.
    #[must_use]
    pub fn desk_defaults(&self) -> DeskDefaults {
        DeskDefaults {
            policy: self.detection_policy(),
            limit: self.scan.default_limit,
            market_type: self.scan.market_type.clone(),
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}
