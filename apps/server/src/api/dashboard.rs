use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use portal_clients::{EntityCommentQuery, SecurityUserQuery};
use portal_core::dashboard::{render_dashlet, DashletConfig, DashletStatus, DashletView};

use crate::{error::ApiResult, main_lib::AppState, session::CurrentSession};

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
) -> ApiResult<Json<Vec<DashletView>>> {
    let username = session.username().to_string();

    let (_, badge) = session.notifications(&state)?;
    let unread = DashletConfig::badge("Notifications", badge.count())
        .with_description("Unread notifications");

    let comments = state
        .comment_service
        .count_entity_comments(&EntityCommentQuery::new("user", username.clone()))
        .await;
    let comments = if comments.success {
        DashletConfig::badge("Comments", comments.payload)
            .with_description("Comments on your items")
            .with_status(DashletStatus::Success)
    } else {
        DashletConfig::badge("Comments", comments.payload)
            .with_description(comments.message.unwrap_or_default())
            .with_status(DashletStatus::Error)
    };

    let user = state
        .user_service
        .get_security_user_by_username(&SecurityUserQuery { username })
        .await;
    let account = match (user.success, user.payload) {
        (true, Some(user)) => DashletConfig::text(
            "Account",
            user.display_name.unwrap_or(user.username),
        )
        .with_description(user.roles.join(", "))
        .with_status(DashletStatus::Success),
        (true, None) => DashletConfig::text("Account", "Unknown user"),
        (false, _) => DashletConfig::text("Account", "Account service unavailable")
            .with_description(user.message.unwrap_or_default())
            .with_status(DashletStatus::Error),
    };

    Ok(Json(
        [unread, comments, account]
            .iter()
            .map(render_dashlet)
            .collect(),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}
