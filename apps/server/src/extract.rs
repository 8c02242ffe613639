use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON request body. Rejections render as the JSON error page.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
