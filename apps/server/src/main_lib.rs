use std::sync::Arc;

use dashmap::DashMap;
use portal_clients::{
    EntityCommentServiceTrait, HttpServiceClient, NotificationServiceTrait, Resilient,
    SecurityUserServiceTrait,
};
use portal_core::{
    menu::{navigation_menu, MenuData},
    notifications::{NotificationBadge, NotificationRegistry, SharedHolder},
    sessions::{InMemorySessionStore, SessionInfo, SessionStore, SessionTracker},
};
use serde_json::json;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    config::Config,
    events::{UiEvent, UiEventBus, NOTIFICATIONS_CHANGED, SESSION_DESTROYED},
};

pub struct AppState {
    pub session_tracker: SessionTracker,
    pub notifications: NotificationRegistry,
    pub badges: DashMap<String, NotificationBadge>,
    pub menu: MenuData,
    pub comment_service: Arc<dyn EntityCommentServiceTrait>,
    pub user_service: Arc<dyn SecurityUserServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub event_bus: UiEventBus,
}

impl AppState {
    /// The session's notification holder, created on first use with its
    /// badge and the listener that forwards changes to the event stream.
    ///
    /// Returns `None` once the session is no longer tracked.
    pub fn session_notifications(
        &self,
        session_id: &str,
    ) -> Option<(SharedHolder, NotificationBadge)> {
        let holder = self.notifications.holder_for(session_id, |holder| {
            let badge = NotificationBadge::new();
            holder.register_notification_component(Box::new(badge.clone()));
            self.badges.insert(session_id.to_string(), badge);

            let bus = self.event_bus.clone();
            let sid = session_id.to_string();
            holder.add_notifications_change_listener(move |change, holder| {
                bus.publish(UiEvent::for_session(
                    NOTIFICATIONS_CHANGED,
                    &sid,
                    json!({ "change": change, "unreadCount": holder.unread_count() }),
                ));
            });
        });

        // Session records are removed before their holders, so a holder
        // created for a session destroyed meanwhile is dropped here.
        if self.session_tracker.store().get(session_id).is_none() {
            tracing::debug!("Dropping notifications of ended session {}", session_id);
            self.release_session_state(session_id);
            return None;
        }

        let badge = self
            .badges
            .get(session_id)
            .map(|b| b.value().clone())
            .unwrap_or_default();
        Some((holder, badge))
    }

    /// Ends a session: drops its tracking record, holder and badge.
    pub fn destroy_session(&self, session_id: &str) -> Option<SessionInfo> {
        let removed = self.session_tracker.destroy(session_id);
        self.release_session_state(session_id);
        if removed.is_some() {
            self.publish_destroyed(session_id);
        }
        removed
    }

    /// Ends a session only if its record still equals `seen`, so a session
    /// touched after `seen` was read survives.
    pub fn expire_session(&self, seen: &SessionInfo) -> bool {
        if !self.session_tracker.destroy_if_unchanged(seen) {
            return false;
        }
        self.release_session_state(&seen.session_id);
        self.publish_destroyed(&seen.session_id);
        true
    }

    fn release_session_state(&self, session_id: &str) {
        self.notifications.remove(session_id);
        self.badges.remove(session_id);
    }

    fn publish_destroyed(&self, session_id: &str) {
        self.event_bus.publish(UiEvent::for_session(
            SESSION_DESTROYED,
            session_id,
            json!({ "sessionId": session_id }),
        ));
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("PORTAL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let token = config.backend_token.as_deref();
    let backend = HttpServiceClient::new(&config.backend_url, token, Some(config.client_timeout))?;
    let uaa = HttpServiceClient::new(&config.uaa_url, token, Some(config.client_timeout))?;
    tracing::info!(
        "Backend at {}, user accounts at {}",
        backend.base_url(),
        uaa.base_url()
    );

    let comment_service: Arc<dyn EntityCommentServiceTrait> = Arc::new(Resilient::new(
        "entityCommentService",
        backend.clone(),
        config.breaker,
    ));
    let notification_service: Arc<dyn NotificationServiceTrait> = Arc::new(Resilient::new(
        "notificationService",
        backend,
        config.breaker,
    ));
    let user_service: Arc<dyn SecurityUserServiceTrait> =
        Arc::new(Resilient::new("securityUser", uaa, config.breaker));

    let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    tracing::info!("Session map in use: {}", session_store.name());

    Ok(Arc::new(AppState {
        session_tracker: SessionTracker::new(session_store),
        notifications: NotificationRegistry::new(),
        badges: DashMap::new(),
        menu: navigation_menu()?,
        comment_service,
        user_service,
        notification_service,
        event_bus: UiEventBus::new(256),
    }))
}
