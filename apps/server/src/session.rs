//! Session tracking: heartbeat middleware and the session extractor.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header::COOKIE, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use portal_core::{
    constants::{SESSION_COOKIE, SESSION_HEADER},
    notifications::{NotificationBadge, SharedHolder},
    sessions::{SessionInfo, TouchOutcome},
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Session id from the `x-session-id` header, else the `SESSION` cookie.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(id) = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return Some(id.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Updates last-contact of a known session on every request.
///
/// Unknown ids are left alone; records are only created by the session
/// lifecycle endpoints.
pub async fn track_session(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(session_id) = session_id_from_headers(request.headers()) {
        match state.session_tracker.touch(&session_id) {
            TouchOutcome::Updated => tracing::trace!("Touched session {}", session_id),
            TouchOutcome::Missing => tracing::debug!("Request for untracked session {}", session_id),
            TouchOutcome::Contended => {}
        }
    }
    next.run(request).await
}

/// A request bound to a tracked session. Rejects with 403 otherwise.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionInfo);

impl CurrentSession {
    pub fn id(&self) -> &str {
        &self.0.session_id
    }

    pub fn username(&self) -> &str {
        self.0.username.as_deref().unwrap_or("anonymous")
    }

    /// Notification holder and badge of this session. Denies access when the
    /// session ended after the request was admitted.
    pub fn notifications(&self, state: &AppState) -> ApiResult<(SharedHolder, NotificationBadge)> {
        state
            .session_notifications(self.id())
            .ok_or_else(session_not_active)
    }
}

fn session_not_active() -> ApiError {
    ApiError::AccessDenied("Access denied: session not active".to_string())
}

impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session_id = session_id_from_headers(&parts.headers)
            .ok_or_else(|| ApiError::AccessDenied("Access denied: no session".to_string()))?;
        state
            .session_tracker
            .store()
            .get(&session_id)
            .map(CurrentSession)
            .ok_or_else(session_not_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("SESSION=from-cookie"));
        headers.insert(SESSION_HEADER, HeaderValue::from_static("from-header"));
        assert_eq!(
            session_id_from_headers(&headers).as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn reads_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; SESSION=abc123; lang=en"),
        );
        assert_eq!(session_id_from_headers(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_or_empty_session_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);
        headers.insert(SESSION_HEADER, HeaderValue::from_static("  "));
        headers.insert(COOKIE, HeaderValue::from_static("SESSION="));
        assert_eq!(session_id_from_headers(&headers), None);
    }
}
