use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::sessions_model::SessionInfo;
use super::sessions_traits::SessionStore;
use crate::constants::USER_SESSIONS_MAP;

/// Process-local session map.
pub struct InMemorySessionStore {
    name: String,
    sessions: DashMap<String, SessionInfo>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::named(USER_SESSIONS_MAP)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, session_id: &str) -> Option<SessionInfo> {
        self.sessions.get(session_id).map(|e| e.value().clone())
    }

    fn insert(&self, info: SessionInfo) -> Option<SessionInfo> {
        self.sessions.insert(info.session_id.clone(), info)
    }

    fn replace(&self, expected: &SessionInfo, new: SessionInfo) -> bool {
        match self.sessions.entry(expected.session_id.clone()) {
            Entry::Occupied(mut current) if current.get() == expected => {
                current.insert(new);
                true
            }
            _ => false,
        }
    }

    fn remove(&self, session_id: &str) -> Option<SessionInfo> {
        self.sessions.remove(session_id).map(|(_, info)| info)
    }

    fn remove_if_unchanged(&self, expected: &SessionInfo) -> bool {
        self.sessions
            .remove_if(&expected.session_id, |_, current| current == expected)
            .is_some()
    }

    fn snapshot(&self) -> Vec<SessionInfo> {
        self.sessions.iter().map(|e| e.value().clone()).collect()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn replace_is_conditional() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.name(), "userSessions");

        let now = Utc::now();
        let original = SessionInfo::new("s1", None, now);
        store.insert(original.clone());

        let stale = original.touched(now - Duration::seconds(5));
        assert!(!store.replace(&stale, original.touched(now + Duration::seconds(1))));
        assert_eq!(store.get("s1"), Some(original.clone()));

        let updated = original.touched(now + Duration::seconds(1));
        assert!(store.replace(&original, updated.clone()));
        assert_eq!(store.get("s1"), Some(updated));
    }

    #[test]
    fn conditional_remove_keeps_a_touched_record() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();
        let seen = SessionInfo::new("s1", None, now);
        store.insert(seen.touched(now + Duration::seconds(1)));

        assert!(!store.remove_if_unchanged(&seen));
        assert!(store.get("s1").is_some());

        let current = store.get("s1").unwrap();
        assert!(store.remove_if_unchanged(&current));
        assert!(store.is_empty());
    }

    #[test]
    fn replace_on_absent_key_does_not_insert() {
        let store = InMemorySessionStore::new();
        let ghost = SessionInfo::new("ghost", None, Utc::now());
        assert!(!store.replace(&ghost, ghost.clone()));
        assert!(store.is_empty());
    }
}
