use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use portal_clients::{SecurityUser, SecurityUserQuery};
use portal_core::ServiceResult;

use crate::main_lib::AppState;

async fn get_user(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<ServiceResult<Option<SecurityUser>>> {
    Json(
        state
            .user_service
            .get_security_user_by_username(&SecurityUserQuery { username })
            .await,
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users/{username}", get(get_user))
}
