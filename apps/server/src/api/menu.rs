use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use portal_core::{
    errors::Error as CoreError,
    menu::{MenuEntry, MenuNode},
};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_menu(State(state): State<Arc<AppState>>) -> Json<Vec<MenuNode>> {
    Json(state.menu.tree())
}

async fn get_root_items(State(state): State<Arc<AppState>>) -> Json<Vec<MenuEntry>> {
    Json(state.menu.root_items().into_iter().cloned().collect())
}

async fn get_child_items(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MenuEntry>>> {
    let parent = state
        .menu
        .find(&id)
        .ok_or_else(|| CoreError::MenuEntryNotFound(id.clone()))?;
    Ok(Json(
        state.menu.child_items(parent).into_iter().cloned().collect(),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/menu", get(get_menu))
        .route("/menu/items", get(get_root_items))
        .route("/menu/items/{id}/children", get(get_child_items))
}
