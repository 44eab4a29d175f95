use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("odds provider unavailable for event {event_id}: {reason}")]
    UpstreamUnavailable { event_id: String, reason: String },

    #[error("odds provider timed out for event {event_id} after {after_ms}ms")]
    Timeout { event_id: String, after_ms: u64 },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`UpstreamUnavailable`](Self::UpstreamUnavailable) error.
    pub fn upstream(event_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            event_id: event_id.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`NotFound`](Self::NotFound) error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// True for failures of the odds provider (unavailable or timed out).
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. } | Self::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_convert_transparently() {
        let err: Error = DomainError::invalid_input("bankroll must be positive").into();
        assert_eq!(err.to_string(), "invalid input: bankroll must be positive");
        assert!(!err.is_upstream());
    }

    #[test]
    fn upstream_errors_are_classified() {
        assert!(Error::upstream("evt-1", "connection refused").is_upstream());
        assert!(Error::Timeout {
            event_id: "evt-1".into(),
            after_ms: 5000
        }
        .is_upstream());
        assert!(!Error::not_found("opportunity").is_upstream());
    }

    #[test]
    fn config_error_messages() {
        let err = ConfigError::InvalidValue {
            field: "scan.workers",
            reason: "must be greater than 0".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for scan.workers: must be greater than 0"
        );
    }
}
