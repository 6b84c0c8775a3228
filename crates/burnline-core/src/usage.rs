//! Usage log parsing and hourly cost bucketing.
//!
//! A usage log is JSON lines; each object carries an RFC 3339 `timestamp`
//! and a cost under `costUSD` (or `cost`). Everything else on the line is
//! kept as an opaque payload.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::session::Event;

const HOUR_MS: i64 = 3_600_000;

/// Sparse mapping from hour index to accumulated cost.
///
/// Hour indexes are not wrapped to a day, so spans crossing midnight stay
/// ordered. Missing hours read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourCostSeries(BTreeMap<i64, f64>);

impl HourCostSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `cost` to the bucket for `hour`.
    pub fn add(&mut self, hour: i64, cost: f64) {
        *self.0.entry(hour).or_insert(0.0) += cost;
    }

    pub fn get(&self, hour: i64) -> f64 {
        self.0.get(&hour).copied().unwrap_or(0.0)
    }

    pub fn max_hour(&self) -> Option<i64> {
        self.0.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.0.iter().map(|(h, c)| (*h, *c))
    }
}

impl FromIterator<(i64, f64)> for HourCostSeries {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (hour, cost) in iter {
            series.add(hour, cost);
        }
        series
    }
}

/// One line of the usage log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub timestamp: Option<DateTime<Utc>>,
    pub cost: f64,
    pub payload: serde_json::Value,
}

impl UsageRecord {
    /// Build a record from one decoded JSON object.
    ///
    /// Returns `None` when the value is not an object.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;

        let timestamp = obj
            .get("timestamp")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let cost = obj
            .get("costUSD")
            .or_else(|| obj.get("cost"))
            .and_then(|v| v.as_f64())
            .filter(|c| c.is_finite() && *c >= 0.0)
            .unwrap_or(0.0);

        Some(Self {
            timestamp,
            cost,
            payload: value,
        })
    }

    pub fn timestamp_millis(&self) -> Option<i64> {
        self.timestamp.map(|dt| dt.timestamp_millis())
    }

    pub fn to_event(&self) -> Event {
        Event {
            timestamp: self.timestamp_millis(),
            payload: self.payload.clone(),
        }
    }
}

/// Parse a JSON-lines usage log, skipping blank and malformed lines.
pub fn parse_usage_log(text: &str) -> Vec<UsageRecord> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match serde_json::from_str(line) {
            Ok(value) => {
                let record = UsageRecord::from_value(value);
                if record.is_none() {
                    warn!(line = idx + 1, "usage log line is not a JSON object");
                }
                record
            }
            Err(e) => {
                warn!(line = idx + 1, error = %e, "skipping malformed usage log line");
                None
            }
        })
        .collect()
}

/// Bucket records at or after `origin_ms` into hours counted from the origin.
///
/// Returns the series along with the anchor hour: the bucket of the earliest
/// record that was counted.
pub fn hourly_costs(records: &[UsageRecord], origin_ms: i64) -> (HourCostSeries, Option<i64>) {
    let mut series = HourCostSeries::new();
    let mut anchor: Option<i64> = None;

    for (ts, cost) in records
        .iter()
        .filter_map(|r| r.timestamp_millis().map(|ts| (ts, r.cost)))
    {
        if ts < origin_ms {
            continue;
        }
        let hour = ts.saturating_sub(origin_ms).div_euclid(HOUR_MS);
        series.add(hour, cost);
        anchor = Some(anchor.map_or(hour, |a| a.min(hour)));
    }

    (series, anchor)
}

/// Start of the calendar day containing `ts_ms`, in the given offset.
pub fn day_origin(ts_ms: i64, offset: FixedOffset) -> Option<i64> {
    let local = offset.timestamp_millis_opt(ts_ms).single()?;
    let midnight = local.date_naive().and_hms_opt(0, 0, 0)?;
    offset
        .from_local_datetime(&midnight)
        .single()
        .map(|dt| dt.timestamp_millis())
}
