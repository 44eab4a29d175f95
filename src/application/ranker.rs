//! Global ranking and fan-in of per-event results.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::{ArbitrageOpportunity, EventId, MarketEvaluation, ScanReport};
use crate::error::{Error, Result};

/// Default number of opportunities returned by a scan.
pub const DEFAULT_LIMIT: usize = 50;

/// Sort opportunities best first and keep the top `limit`.
///
/// Duplicate quotes for the same bookmaker and outcome yield opportunities
/// sharing one id; only the best ranked of them is kept.
#[must_use]
pub fn rank(mut opportunities: Vec<ArbitrageOpportunity>, limit: usize) -> Vec<ArbitrageOpportunity> {
    opportunities.sort_by(|a, b| a.rank_cmp(b));
    let mut seen = HashSet::new();
    opportunities.retain(|o| seen.insert(o.id()));
    opportunities.truncate(limit);
    opportunities
}

/// Merge per-event results into one ranked report.
///
/// Failed events contribute zero opportunities and are counted, never
/// propagated.
#[must_use]
pub fn aggregate<I>(results: I, limit: usize) -> ScanReport
where
    I: IntoIterator<Item = (EventId, Result<MarketEvaluation>)>,
{
    let mut report = ScanReport::default();
    let mut merged = Vec::new();

    for (event_id, result) in results {
        match result {
            Ok(evaluation) => {
                report.events_scanned += 1;
                if evaluation.truncated {
                    report.truncated_markets += 1;
                }
                merged.extend(evaluation.opportunities);
            }
            Err(Error::Timeout { after_ms, .. }) => {
                report.events_timed_out += 1;
                warn!(event_id = %event_id, after_ms, "Event timed out, skipping");
            }
            Err(e) => {
                report.events_failed += 1;
                warn!(event_id = %event_id, error = %e, "Event failed, skipping");
            }
        }
    }

    report.opportunities = rank(merged, limit);
    report
}
