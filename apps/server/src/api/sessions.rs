use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, post},
    Json, Router,
};
use portal_core::{errors::Error as CoreError, sessions::SessionInfo};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::ApiResult, extract::JsonBody, main_lib::AppState, session::session_id_from_headers,
};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RegisterSessionRequest {
    session_id: Option<String>,
    username: Option<String>,
}

/// Session-created hook of the session lifecycle owner.
async fn register_session(
    State(state): State<Arc<AppState>>,
    body: Result<Option<Json<RegisterSessionRequest>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SessionInfo>)> {
    let Json(body) = body?.unwrap_or_default();
    let session_id = body
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let info = state.session_tracker.register(&session_id, body.username);
    if state.session_notifications(&session_id).is_none() {
        tracing::debug!("Session {} ended during registration", session_id);
    }
    Ok((StatusCode::CREATED, Json(info)))
}

/// Session-destroyed hook.
async fn destroy_session(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .destroy_session(&id)
        .ok_or(CoreError::SessionNotFound(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Callback events raised by the browser's unload observer.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
enum UnloadEvent {
    /// The page was closed or navigated away.
    UnloadHappened,
    /// The user was asked to confirm leaving the page.
    UnloadAttempted,
}

#[derive(Deserialize)]
struct UnloadRequest {
    event: UnloadEvent,
}

async fn unload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<UnloadRequest>,
) -> StatusCode {
    let Some(session_id) = session_id_from_headers(&headers) else {
        return StatusCode::NO_CONTENT;
    };
    match body.event {
        UnloadEvent::UnloadHappened => {
            if state.destroy_session(&session_id).is_some() {
                tracing::info!("Session {} closed by page unload", session_id);
            }
        }
        UnloadEvent::UnloadAttempted => {
            tracing::debug!("Unload attempted for session {}", session_id);
        }
    }
    StatusCode::NO_CONTENT
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", post(register_session))
        .route("/sessions/{id}", delete(destroy_session))
        .route("/session/unload", post(unload))
}
