//! Gap-based session detection.
//!
//! A session is a run of events where no two neighbours are more than the
//! gap threshold apart. Only the most recent session's start is reported.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default session gap: five hours in milliseconds.
pub const SESSION_GAP_MS: i64 = 5 * 60 * 60 * 1000;

/// A timestamped log event. Only the timestamp takes part in detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Milliseconds since the Unix epoch, when the event carried one.
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Start of the most recent session in an ascending timestamp sequence,
/// using the default five hour gap.
pub fn find_session_start(sorted: &[i64]) -> Option<i64> {
    find_session_start_with_gap(sorted, SESSION_GAP_MS)
}

/// Start of the most recent session where neighbours are at most `gap_ms`
/// apart. A gap of exactly `gap_ms` does not split sessions.
pub fn find_session_start_with_gap(sorted: &[i64], gap_ms: i64) -> Option<i64> {
    let (&first, rest) = sorted.split_first()?;

    let mut session_start = first;
    let mut prev = first;
    for &ts in rest {
        if ts.saturating_sub(prev) > gap_ms {
            debug!(prev, ts, gap_ms, "session gap exceeded, starting new session");
            session_start = ts;
        }
        prev = ts;
    }

    Some(session_start)
}

/// Session start over raw events: drops events without a timestamp, sorts
/// the rest, then scans with `gap_ms`.
pub fn current_session_start(events: &[Event], gap_ms: i64) -> Option<i64> {
    let mut timestamps: Vec<i64> = events.iter().filter_map(|e| e.timestamp).collect();
    timestamps.sort_unstable();
    find_session_start_with_gap(&timestamps, gap_ms)
}
