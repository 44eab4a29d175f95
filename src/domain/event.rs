//! Sporting events as listed by the odds provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::EventId;

/// Summary of a scheduled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    /// Provider identifier of the event.
    pub id: EventId,
    /// Display name, e.g. `"Arsenal vs Chelsea"`.
    pub name: String,
    /// Sport slug, e.g. `"soccer_epl"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    /// Scheduled start; opportunities expire at this instant.
    pub starts_at: DateTime<Utc>,
}

impl EventInfo {
    /// Create a new event summary.
    pub fn new(id: impl Into<EventId>, name: impl Into<String>, starts_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sport: None,
            starts_at,
        }
    }

    /// Set the sport slug.
    #[must_use]
    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = Some(sport.into());
        self
    }

    /// True once the event has started.
    #[must_use]
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at
    }

    /// True when the event belongs to `sport` (case-insensitive).
    #[must_use]
    pub fn is_sport(&self, sport: &str) -> bool {
        self.sport
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(sport))
    }
}
