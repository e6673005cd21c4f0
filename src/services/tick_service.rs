use chrono::Utc;
use tracing::{info, warn};

use crate::api::thingspeak::FeedClient;
use crate::models::{ChartPanel, Snapshot, TickResponse};
use crate::services::{chart_service, snapshot_service};

/// Build the tick payload from an already fetched snapshot
pub fn tick_response(snapshot: &Snapshot, n_intervals: u64) -> TickResponse {
    let charts = chart_service::build_chart_specs(snapshot)
        .iter()
        .map(ChartPanel::from)
        .collect();

    TickResponse {
        n_intervals,
        generated_at: Utc::now().to_rfc3339(),
        record_count: snapshot.len(),
        charts,
    }
}

/// One refresh cycle: fetch, transform, build six charts.
///
/// `n_intervals` is the page's timer counter; it is logged and echoed back
/// but does not affect the result. Never fails: a failed fetch renders as
/// six empty charts.
pub async fn render_tick(client: &FeedClient, results: u32, n_intervals: u64) -> TickResponse {
    let snapshot = snapshot_service::fetch_snapshot(client, results).await;
    info!("Tick {}: {} records", n_intervals, snapshot.len());
    if !snapshot.is_aligned() {
        warn!("Tick {}: snapshot series are not aligned with timestamps", n_intervals);
    }

    tick_response(&snapshot, n_intervals)
}
