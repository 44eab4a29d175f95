//! Command-line interface definitions.
//!
//! Every command reads events and odds from a JSON feed file (`--input`) and
//! an optional TOML configuration (`--config`).

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::domain::{MarketType, OpportunityId};

/// Default configuration file looked up by `config` subcommands.
pub const DEFAULT_CONFIG_PATH: &str = "surebet.toml";

/// Sports-odds arbitrage detection and stake allocation
#[derive(Parser, Debug)]
#[command(name = "surebet")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan every upcoming event and list ranked opportunities
    Scan(ScanArgs),

    /// Detect opportunities for a single event
    Event(EventArgs),

    /// Split a bankroll across an opportunity's selections
    Stakes(StakesArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Commands {
    /// Configuration file the command reads, if any.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Self::Scan(args) => args.source.config.as_deref(),
            Self::Event(args) => args.source.config.as_deref(),
            Self::Stakes(args) => args.source.config.as_deref(),
            Self::Config(ConfigCommand::Show(args) | ConfigCommand::Validate(args)) => {
                Some(&args.config)
            }
        }
    }
}

/// Subcommands for `surebet config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Feed and configuration inputs shared by detection commands.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// JSON odds feed.
    #[arg(short, long)]
    pub input: PathBuf,

    /// TOML configuration (defaults apply when omitted).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minimum profit margin, e.g. 0.02 for 2%.
    #[arg(long)]
    pub min_margin: Option<Decimal>,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only scan events of this sport.
    #[arg(long)]
    pub sport: Option<String>,

    /// Maximum opportunities listed.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Market type evaluated per event (h2h, spreads, totals, ...).
    #[arg(long)]
    pub market: Option<MarketType>,
}

/// Arguments for the `event` subcommand.
#[derive(Args, Debug)]
pub struct EventArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Event id as listed in the feed.
    #[arg(short, long)]
    pub event: String,

    /// Market type to evaluate.
    #[arg(long)]
    pub market: Option<MarketType>,
}

/// Arguments for the `stakes` subcommand.
#[derive(Args, Debug)]
pub struct StakesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Opportunity id reported by `scan` or `event`.
    #[arg(long, conflicts_with = "top", required_unless_present = "top")]
    pub opportunity: Option<OpportunityId>,

    /// Use the best opportunity of a fresh scan.
    #[arg(long)]
    pub top: bool,

    /// Amount to split across the selections.
    #[arg(short, long)]
    pub bankroll: Decimal,

    /// Only consider events of this sport.
    #[arg(long)]
    pub sport: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "surebet");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_parse_scan_command() {
        let cli = Cli::try_parse_from([
            "surebet",
            "--json",
            "scan",
            "--input",
            "odds.json",
            "--min-margin",
            "0.02",
            "--sport",
            "soccer_epl",
            "--limit",
            "5",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.source.input, PathBuf::from("odds.json"));
        assert_eq!(args.source.min_margin, Some(dec!(0.02)));
        assert_eq!(args.sport.as_deref(), Some("soccer_epl"));
        assert_eq!(args.limit, Some(5));
        assert!(args.source.config.is_none());
    }

    #[test]
    fn test_parse_event_command_with_market() {
        let cli = Cli::try_parse_from([
            "surebet", "event", "-i", "odds.json", "--event", "evt-1", "--market", "totals",
        ])
        .unwrap();

        let Commands::Event(args) = cli.command else {
            panic!("expected event");
        };
        assert_eq!(args.event, "evt-1");
        assert_eq!(args.market, Some(MarketType::OverUnder));
    }

    #[test]
    fn test_stakes_requires_opportunity_or_top() {
        assert!(Cli::try_parse_from([
            "surebet", "stakes", "-i", "odds.json", "--bankroll", "100"
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "surebet", "stakes", "-i", "odds.json", "--top", "--bankroll", "100",
        ])
        .unwrap();
        let Commands::Stakes(args) = cli.command else {
            panic!("expected stakes");
        };
        assert!(args.top);
        assert_eq!(args.bankroll, dec!(100));
    }

    #[test]
    fn test_stakes_rejects_both_selectors() {
        let result = Cli::try_parse_from([
            "surebet",
            "stakes",
            "-i",
            "odds.json",
            "--top",
            "--opportunity",
            "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
            "--bankroll",
            "100",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stakes_rejects_malformed_id() {
        let result = Cli::try_parse_from([
            "surebet",
            "stakes",
            "-i",
            "odds.json",
            "--opportunity",
            "not-a-uuid",
            "--bankroll",
            "100",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["surebet", "-vv", "config", "show"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Config(ConfigCommand::Show(args)) = cli.command else {
            panic!("expected config show");
        };
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));

        let cli = Cli::try_parse_from(["surebet", "-q", "config", "validate"]).unwrap();
        assert!(cli.quiet);
    }
}
