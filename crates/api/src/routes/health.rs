use axum::extract::State;
use axum::{routing::get, Json, Router};
use eventdesk_core::resources;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

/// Liveness payload, wrapped in the usual `{ "success": true, "data": ... }`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Slugs accepted by `PUT|PATCH /api/v1/{resource}/{id}`.
    pub resources: Vec<&'static str>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<DataResponse<HealthResponse>> {
    let db_healthy = eventdesk_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    Json(DataResponse::new(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        resources: resources::all().iter().map(|r| r.slug).collect(),
    }))
}

/// Root-level routes, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
