//! Miette-based error diagnostics for CLI error presentation.
//!
//! [`report`] turns a crate error into a rendered diagnostic. Configuration
//! parse errors point at the offending span of the file.

use std::path::Path;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::{ConfigError as SettingsError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(surebet::config))]
pub struct ConfigError {
    /// Human-readable error message.
    pub message: String,

    /// Configuration file content.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

/// Error without a source location.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(surebet::command))]
pub struct CommandError {
    /// Human-readable error message.
    pub message: String,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl CommandError {
    /// Create a new command error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Render `error` as a diagnostic. `config` is the file the command loaded.
#[must_use]
pub fn report(error: Error, config: Option<&Path>) -> Report {
    if let (Error::Config(SettingsError::Parse(parse)), Some(path)) = (&error, config) {
        if let (Some(span), Ok(content)) = (parse.span(), std::fs::read_to_string(path)) {
            return Report::new(ConfigError {
                message: format!("failed to parse {}", path.display()),
                src: NamedSource::new(path.display().to_string(), content),
                span: (span.start, span.len().max(1)).into(),
                help: Some(parse.message().to_string()),
            });
        }
    }

    let message = error.to_string();
    let help = match &error {
        Error::Config(SettingsError::InvalidValue { .. }) => {
            Some("run `surebet config show` to see the effective values".to_string())
        }
        Error::Config(SettingsError::ReadFile(_)) => {
            Some("pass an existing file with --config".to_string())
        }
        Error::Json(_) => Some("the input must be a JSON document with an `events` array".into()),
        Error::Io(_) => Some("check the --input path".to_string()),
        Error::NotFound { .. } => {
            Some("ids come from `surebet scan`; opportunities expire at event start".into())
        }
        Error::Domain(DomainError::InvalidInput { .. }) => {
            Some("the bankroll must be a positive amount".to_string())
        }
        _ => None,
    };

    let diagnostic = CommandError::new(message);
    Report::new(match help {
        Some(help) => diagnostic.with_help(help),
        None => diagnostic,
    })
}
