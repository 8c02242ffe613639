mod comments;
mod dashboard;
mod events;
mod health;
mod menu;
mod notifications;
mod sessions;
mod users;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{handle_panic, route_not_found},
    main_lib::AppState,
    session::track_session,
};

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .merge(health::router())
        .merge(sessions::router())
        .merge(menu::router())
        .merge(notifications::router())
        .merge(dashboard::router())
        .merge(comments::router())
        .merge(users::router())
        .merge(events::router());

    Router::new()
        .nest("/api/v1", api)
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), track_session))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
