use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use log::debug;

use super::holder::NotificationHolder;

pub type SharedHolder = Arc<Mutex<NotificationHolder>>;

/// One notification holder per session id.
#[derive(Default)]
pub struct NotificationRegistry {
    holders: DashMap<String, SharedHolder>,
}

impl NotificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session_id: &str) -> Option<SharedHolder> {
        self.holders.get(session_id).map(|h| h.value().clone())
    }

    /// Returns the session's holder, creating it with `init` on first use.
    pub fn holder_for<F>(&self, session_id: &str, init: F) -> SharedHolder
    where
        F: FnOnce(&mut NotificationHolder),
    {
        self.holders
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!("Creating notification holder for session {}", session_id);
                let mut holder = NotificationHolder::new();
                init(&mut holder);
                Arc::new(Mutex::new(holder))
            })
            .value()
            .clone()
    }

    /// Drops the holder when its session ends.
    pub fn remove(&self, session_id: &str) -> Option<SharedHolder> {
        self.holders.remove(session_id).map(|(_, h)| h)
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}
