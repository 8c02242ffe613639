use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
};
use portal_clients::CircuitBreakerConfig;
use portal_server::{api::app_router, build_state, config::Config};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        backend_url: "http://127.0.0.1:9".to_string(),
        uaa_url: "http://127.0.0.1:9".to_string(),
        backend_token: None,
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(10),
        client_timeout: Duration::from_secs(2),
        breaker: CircuitBreakerConfig::default(),
        session_max_idle: None,
    }
}

#[tokio::test]
async fn healthz_works() {
    let config = test_config();
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn unknown_route_renders_not_found_page() {
    let config = test_config();
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/no-such-view")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], 404);
    assert_eq!(json["message"], "Could not navigate to '/api/v1/no-such-view'");
}

#[tokio::test]
async fn menu_lists_children_and_rejects_unknown_parent() {
    let config = test_config();
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/menu/items/administration/children")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let children: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let ids: Vec<&str> = children
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["users", "comments"]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/menu/items/nowhere/children")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn malformed_json_body_renders_bad_request_page() {
    let config = test_config();
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let missing_fields = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/comments/search")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing_fields.status(), 400);
    let body = to_bytes(missing_fields.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], 400);
    assert!(json["message"].as_str().unwrap().contains("entityType"));

    let wrong_content_type = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/comments/search")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from(r#"{"entityType":"order","entityId":"1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(wrong_content_type.status(), 400);
    let body = to_bytes(wrong_content_type.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], 400);

    let broken_registration = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/sessions")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(broken_registration.status(), 400);
}
