use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::api::thingspeak::{FeedClient, FeedError, FeedRecord};
use crate::models::{Metric, Snapshot, MISSING_TIMESTAMP};

/// Convert a raw field value to a reading.
///
/// Strings are parsed as floats, numbers are taken as-is. Anything missing,
/// unparseable or non-finite reads as `0.0`.
pub fn parse_reading(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// `created_at` of a record, or "N/A" when absent or null.
/// Non-string values are kept in their JSON form.
pub fn record_timestamp(record: &FeedRecord) -> String {
    match &record.created_at {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => MISSING_TIMESTAMP.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Reshape feed records into a snapshot, preserving source order
pub fn records_to_snapshot(records: &[FeedRecord]) -> Snapshot {
    let mut snapshot = Snapshot::with_capacity(records.len());

    for record in records {
        let readings = Metric::ALL.map(|metric| {
            let raw = record.raw(metric);
            let reading = parse_reading(raw);
            if let Some(value) = raw.filter(|_| reading == 0.0) {
                trace!("{} ({}) read as 0.0 from {}", metric, metric.source_field(), value);
            }
            reading
        });
        snapshot.push_row(record_timestamp(record), readings);
    }

    snapshot
}

/// Fetch the latest records and transform them, keeping the failure reason
pub async fn try_fetch_snapshot(client: &FeedClient, results: u32) -> Result<Snapshot, FeedError> {
    let response = client.fetch_feed(results).await?;
    Ok(records_to_snapshot(&response.feeds))
}

/// Best-effort fetch: any failure is logged and degrades to an empty snapshot
pub async fn fetch_snapshot(client: &FeedClient, results: u32) -> Snapshot {
    match try_fetch_snapshot(client, results).await {
        Ok(snapshot) => {
            debug!("Fetched snapshot with {} records", snapshot.len());
            snapshot
        }
        Err(e) => {
            warn!("Error fetching data from {}: {}", client.endpoint(), e);
            Snapshot::empty()
        }
    }
}
