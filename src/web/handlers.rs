use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::api::thingspeak::FeedClient;
use crate::config::DashboardConfig;
use crate::models::{Metric, TickResponse};
use crate::services::{chart_service, snapshot_service, tick_service};
use crate::web::page;

#[derive(Debug, Clone)]
pub struct AppState {
    pub client: FeedClient,
    pub config: DashboardConfig,
}

#[derive(Debug, Deserialize)]
pub struct TickQuery {
    #[serde(default)]
    pub n_intervals: u64,
}

fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::render_dashboard_page(&state.config))
}

/// Timer callback target: always answers with six charts
pub async fn tick(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<TickQuery>,
) -> Json<TickResponse> {
    tracing::debug!(request_id = %request_id(&headers), n_intervals = query.n_intervals, "tick requested");
    let response = tick_service::render_tick(&state.client, state.config.results, query.n_intervals).await;
    Json(response)
}

/// GET /charts/{metric}.svg
pub async fn chart_svg(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let request_id = request_id(&headers);
    let slug = file.strip_suffix(".svg").unwrap_or(&file);

    let Some(metric) = Metric::from_slug(slug) else {
        tracing::warn!(%request_id, chart = %file, "unknown chart requested");
        return Err((StatusCode::NOT_FOUND, format!("unknown chart: {file}")));
    };

    let snapshot = snapshot_service::fetch_snapshot(&state.client, state.config.results).await;
    let spec = chart_service::build_chart_spec(&snapshot, metric);

    match chart_service::render_chart_svg(&spec) {
        Ok(svg) => Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg)),
        Err(e) => {
            tracing::error!(%request_id, %metric, error = %e, "chart render failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, format!("chart render failed: {e}")))
        }
    }
}
