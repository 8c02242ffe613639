use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use portal_clients::{EntityComment, EntityCommentQuery};
use portal_core::ServiceResult;

use crate::{
    error::{ApiError, ApiResult},
    extract::JsonBody,
    main_lib::AppState,
};

/// Comments of one entity. Backend failures come back as a failed result.
async fn search_comments(
    State(state): State<Arc<AppState>>,
    JsonBody(query): JsonBody<EntityCommentQuery>,
) -> ApiResult<Json<ServiceResult<Vec<EntityComment>>>> {
    if query.entity_type.is_empty() || query.entity_id.is_empty() {
        return Err(ApiError::BadRequest(
            "entityType and entityId are required".to_string(),
        ));
    }
    Ok(Json(state.comment_service.get_entity_comments(&query).await))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/comments/search", post(search_comments))
}
