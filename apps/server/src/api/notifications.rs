use std::sync::{Arc, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use portal_clients::NotificationQuery;
use portal_core::{
    errors::{Error as CoreError, ValidationError},
    notifications::{
        NewNotification, Notification, NotificationCardView, NotificationHolder,
        NotificationOverlay, SharedHolder,
    },
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    extract::JsonBody,
    session::CurrentSession,
};

fn lock(holder: &SharedHolder) -> ApiResult<MutexGuard<'_, NotificationHolder>> {
    holder
        .lock()
        .map_err(|_| ApiError::Internal("Notification holder lock poisoned".to_string()))
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct OverlayParams {
    #[serde(default)]
    unread_only: bool,
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
    Query(params): Query<OverlayParams>,
) -> ApiResult<Json<Vec<NotificationCardView>>> {
    let (holder, _) = session.notifications(&state)?;
    let overlay = NotificationOverlay {
        unread_only: params.unread_only,
    };
    let cards = overlay.render(&*lock(&holder)?);
    Ok(Json(cards))
}

async fn push_notification(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
    JsonBody(input): JsonBody<NewNotification>,
) -> ApiResult<(StatusCode, Json<Notification>)> {
    if input.title.trim().is_empty() {
        return Err(CoreError::from(ValidationError::MissingField("title".to_string())).into());
    }
    let notification = Notification::from(input);
    let (holder, _) = session.notifications(&state)?;
    let added = lock(&holder)?.add_notification(notification.clone());
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(notification)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeResponse {
    count: usize,
    caption: Option<String>,
    visible: bool,
}

async fn get_badge(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
) -> ApiResult<Json<BadgeResponse>> {
    let (_, badge) = session.notifications(&state)?;
    Ok(Json(BadgeResponse {
        count: badge.count(),
        caption: badge.caption(),
        visible: badge.is_visible(),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncResponse {
    success: bool,
    message: Option<String>,
    added: usize,
}

/// Pulls pending notifications for the session's user from the backend.
async fn sync_notifications(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
) -> ApiResult<Json<SyncResponse>> {
    let query = NotificationQuery {
        username: session.username().to_string(),
        only_unread: true,
    };
    let result = state.notification_service.get_user_notifications(&query).await;
    let (holder, _) = session.notifications(&state)?;
    let added = lock(&holder)?.add_notifications(result.payload).len();
    Ok(Json(SyncResponse {
        success: result.success,
        message: result.message,
        added,
    }))
}

async fn acknowledge_notification(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
) -> ApiResult<StatusCode> {
    let (holder, _) = session.notifications(&state)?;
    lock(&holder)?
        .acknowledge(&id)
        .ok_or(CoreError::NotificationNotFound(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_notification_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
) -> ApiResult<StatusCode> {
    let (holder, _) = session.notifications(&state)?;
    let mut holder = lock(&holder)?;
    if holder.get(&id).is_none() {
        return Err(CoreError::NotificationNotFound(id).into());
    }
    holder.mark_read(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
) -> ApiResult<StatusCode> {
    let (holder, _) = session.notifications(&state)?;
    lock(&holder)?.mark_all_read();
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/notifications",
            get(list_notifications).post(push_notification),
        )
        .route("/notifications/badge", get(get_badge))
        .route("/notifications/sync", post(sync_notifications))
        .route("/notifications/read", post(mark_all_read))
        .route("/notifications/{id}/ack", post(acknowledge_notification))
        .route("/notifications/{id}/read", post(mark_notification_read))
}
