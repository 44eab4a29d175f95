//! Time source port.

use chrono::{DateTime, Utc};

/// Supplies the current time for expiry and freshness decisions.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
