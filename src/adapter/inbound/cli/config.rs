//! Handler for the `config` command group.

use std::path::Path;

use rust_decimal::Decimal;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Combination caps above this make single markets slow to evaluate.
const LARGE_COMBINATION_CAP: usize = 1_000_000;

fn optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "(unset)".to_string(), |v| v.to_string())
}

/// Settings that are valid but likely unintended.
#[must_use]
pub fn warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.detection.min_profit_margin == Decimal::ZERO {
        warnings.push("detection.min_profit_margin is 0: every positive margin is reported".into());
    }
    if config.detection.max_combinations > LARGE_COMBINATION_CAP {
        warnings.push(format!(
            "detection.max_combinations is above {LARGE_COMBINATION_CAP}; large markets will be slow"
        ));
    }
    if config.scan.workers > num_cpus::get().saturating_mul(4) {
        warnings.push(format!(
            "scan.workers ({}) is far above the CPU count",
            config.scan.workers
        ));
    }
    warnings
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    output::section("Effective Configuration");
    output::field("Path", path.display());

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Detection");
    let detection = &config.detection;
    output::field("Min profit margin", detection.min_profit_margin);
    output::field("Max combinations", detection.max_combinations);
    output::field(
        "Quotes per outcome",
        optional(detection.max_quotes_per_outcome),
    );
    output::field(
        "Max quote age",
        optional(detection.max_quote_age_secs.map(|s| format!("{s}s"))),
    );
    output::field("Min bankroll", detection.min_bankroll);

    output::section("Scan");
    let scan = &config.scan;
    output::field("Workers", scan.workers);
    output::field("Event timeout", format!("{}ms", scan.event_timeout_ms));
    output::field("Deadline", format!("{}ms", scan.deadline_ms));
    output::field("Default limit", scan.default_limit);
    output::field("Max events", optional(scan.max_events));
    output::field("Market type", &scan.market_type);

    output::section("Stakes");
    output::field("Currency decimals", config.stakes.currency_decimals);
    output::field("Max bankroll", optional(config.stakes.max_bankroll));

    output::section("Cache");
    output::field("Enabled", config.cache.enabled);
    if config.cache.enabled {
        output::field("TTL", format!("{}s", config.cache.ttl_secs));
        output::field("Max entries", config.cache.max_entries);
    }

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");

    let warnings = warnings(&config);
    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }

    output::field("Next", format!("surebet config show -c {}", path.display()));

    Ok(())
}
