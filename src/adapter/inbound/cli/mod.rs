//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod event;
pub mod output;
pub mod render;
pub mod scan;
pub mod stakes;

use std::path::Path;

use miette::Report;

use crate::error::Result;
use crate::infrastructure::config::Config;

use command::{Cli, ColorChoice, Commands, ConfigCommand, SourceArgs};
use output::OutputConfig;

/// Execute a parsed command line.
///
/// # Errors
///
/// Returns the failure rendered as a diagnostic.
pub async fn run(cli: Cli) -> std::result::Result<(), Report> {
    let output_config = OutputConfig::new(cli.json, cli.quiet, cli.verbose);
    output::configure(output_config);
    apply_color(&cli.color);

    let config_path = cli.command.config_path().map(Path::to_path_buf);
    dispatch(cli.command, output_config)
        .await
        .map_err(|e| diagnostic::report(e, config_path.as_deref()))
}

async fn dispatch(command: Commands, output_config: OutputConfig) -> Result<()> {
    match command {
        Commands::Scan(args) => {
            let config = prepare(&args.source, output_config)?;
            scan::execute(&config, &args).await
        }
        Commands::Event(args) => {
            let config = prepare(&args.source, output_config)?;
            event::execute(&config, &args).await
        }
        Commands::Stakes(args) => {
            let config = prepare(&args.source, output_config)?;
            stakes::execute(&config, &args).await
        }
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}

/// Load configuration and start logging for a detection command.
fn prepare(source: &SourceArgs, output_config: OutputConfig) -> Result<Config> {
    let config = Config::load_or_default(source.config.as_deref())?;
    let logging = match output_config.log_level() {
        Some(level) => config.logging.clone().with_level(level),
        None => config.logging.clone(),
    };
    logging.init();
    Ok(config)
}

fn apply_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => {}
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}
