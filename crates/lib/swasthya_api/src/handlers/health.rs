//! Liveness endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /health` — reports store reachability and identity count. The store
/// is in-process, so reachability is unconditional; the `db` field keeps the
/// shape the portal's probes expect.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        db: "connected",
        users: state.auth.user_count(),
    })
}
