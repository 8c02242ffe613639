use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::main_lib::AppState;

async fn healthz() -> &'static str {
    "ok"
}

async fn readyz() -> &'static str {
    "ok"
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    active_sessions: usize,
    session_map: String,
}

/// Session bookkeeping at a glance.
async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let store = state.session_tracker.store();
    Json(StatusResponse {
        active_sessions: store.len(),
        session_map: store.name().to_string(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/status", get(status))
}
