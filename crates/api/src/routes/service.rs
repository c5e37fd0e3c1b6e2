//! Service-level views and the versioned aliases that redirect to them.

use axum::extract::State;
use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

const OK: &str = "OK";
const UNAVAILABLE: &str = "UNAVAILABLE";

/// Liveness response payload.
#[derive(Serialize)]
pub struct StatusResponse {
    pub alive: bool,
}

/// Readiness response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub overall_status: &'static str,
    pub detailed_status: DetailedStatus,
}

#[derive(Serialize)]
pub struct DetailedStatus {
    pub database_connection: &'static str,
    pub search_connection: &'static str,
}

/// GET /status -- process liveness.
async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { alive: true })
}

/// GET /health -- backing-store readiness, always 200. The database alone
/// drives the overall verdict; a missing search index only degrades the
/// learner endpoints.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match insights_db::health_check(&state.pool).await {
        Ok(()) => OK,
        Err(error) => {
            tracing::error!(%error, "database unreachable during health check");
            UNAVAILABLE
        }
    };
    let search = if state.roster.is_some() { OK } else { UNAVAILABLE };

    Json(HealthResponse {
        overall_status: database,
        detailed_status: DetailedStatus {
            database_connection: database,
            search_connection: search,
        },
    })
}

/// GET /authenticated -- succeeds for any request the fronting auth layer
/// admitted; clients use it to verify their credentials end to end.
async fn authenticated() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

/// Root-level service routes (intended for root-level, NOT under the API
/// prefix).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/health", get(health))
        .route("/authenticated", get(authenticated))
}

/// Slash-terminated aliases mounted under the API prefix. Kept for clients
/// that probe the versioned paths; they redirect to the root views.
pub fn redirect_router() -> Router<AppState> {
    Router::new()
        .route("/status/", get(|| async { Redirect::temporary("/status") }))
        .route("/health/", get(|| async { Redirect::temporary("/health") }))
        .route(
            "/authenticated/",
            get(|| async { Redirect::temporary("/authenticated") }),
        )
}
