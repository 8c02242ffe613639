use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};

use super::sessions_model::SessionInfo;
use super::sessions_traits::SessionStore;

/// Result of a heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    Updated,
    /// No record for the id; nothing was created.
    Missing,
    /// A concurrent writer replaced the record first; this heartbeat is dropped.
    Contended,
}

/// Session heartbeat on top of a shared [`SessionStore`].
#[derive(Clone)]
pub struct SessionTracker {
    store: Arc<dyn SessionStore>,
}

impl SessionTracker {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn touch(&self, session_id: &str) -> TouchOutcome {
        self.touch_at(session_id, Utc::now())
    }

    /// Moves last-contact of an existing record to `now`.
    pub fn touch_at(&self, session_id: &str, now: DateTime<Utc>) -> TouchOutcome {
        let Some(current) = self.store.get(session_id) else {
            return TouchOutcome::Missing;
        };
        if self.store.replace(&current, current.touched(now)) {
            TouchOutcome::Updated
        } else {
            debug!(
                "Heartbeat for session {} lost to a concurrent update",
                session_id
            );
            TouchOutcome::Contended
        }
    }

    /// Records a newly created session. Called by the session lifecycle owner.
    pub fn register(&self, session_id: &str, username: Option<String>) -> SessionInfo {
        let info = SessionInfo::new(session_id, username, Utc::now());
        if self.store.insert(info.clone()).is_some() {
            debug!("Session {} re-registered", session_id);
        } else {
            info!("Session {} registered in {}", session_id, self.store.name());
        }
        info
    }

    pub fn destroy(&self, session_id: &str) -> Option<SessionInfo> {
        let removed = self.store.remove(session_id);
        if removed.is_some() {
            info!("Session {} removed from {}", session_id, self.store.name());
        }
        removed
    }

    /// Removes the session only if its record still equals `seen`.
    pub fn destroy_if_unchanged(&self, seen: &SessionInfo) -> bool {
        let removed = self.store.remove_if_unchanged(seen);
        if removed {
            info!("Session {} removed from {}", seen.session_id, self.store.name());
        } else {
            debug!("Session {} changed since it was read, kept", seen.session_id);
        }
        removed
    }

    /// Sessions whose last contact is older than `max_idle` at `now`.
    pub fn expired(&self, now: DateTime<Utc>, max_idle: Duration) -> Vec<SessionInfo> {
        self.store
            .snapshot()
            .into_iter()
            .filter(|s| now - s.last_contact > max_idle)
            .collect()
    }
}
